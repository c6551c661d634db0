use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::errors::ServiceError;

#[async_trait]
pub trait CupcakeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<models::cupcake::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<models::cupcake::Model>, ServiceError>;
    async fn create(&self, flavor: &str, size: &str, rating: f64, image: Option<&str>) -> Result<models::cupcake::Model, ServiceError>;
    async fn update(&self, id: i32, flavor: &str, size: &str, rating: f64, image: &str) -> Result<models::cupcake::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCupcakeRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CupcakeRepository for SeaOrmCupcakeRepository {
    async fn find_all(&self) -> Result<Vec<models::cupcake::Model>, ServiceError> {
        crate::db::cupcake_service::list_cupcakes(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<models::cupcake::Model>, ServiceError> {
        crate::db::cupcake_service::get_cupcake(&self.db, id).await
    }

    async fn create(&self, flavor: &str, size: &str, rating: f64, image: Option<&str>) -> Result<models::cupcake::Model, ServiceError> {
        crate::db::cupcake_service::create_cupcake(&self.db, flavor, size, rating, image).await
    }

    async fn update(&self, id: i32, flavor: &str, size: &str, rating: f64, image: &str) -> Result<models::cupcake::Model, ServiceError> {
        crate::db::cupcake_service::update_cupcake(&self.db, id, flavor, size, rating, image).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::cupcake_service::delete_cupcake(&self.db, id).await
    }
}

/// In-memory repository backed by an ordered map, with its own id counter.
/// Test double for the SeaORM implementation; shares the models crate's
/// validation and normalization so both agree on semantics.
pub struct InMemoryCupcakeRepository {
    inner: Mutex<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    next_id: i32,
    rows: BTreeMap<i32, models::cupcake::Model>,
}

impl InMemoryCupcakeRepository {
    pub fn new() -> Self {
        Self { inner: Mutex::new(InMemoryState::default()) }
    }
}

impl Default for InMemoryCupcakeRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl CupcakeRepository for InMemoryCupcakeRepository {
    async fn find_all(&self) -> Result<Vec<models::cupcake::Model>, ServiceError> {
        let state = self.inner.lock().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<models::cupcake::Model>, ServiceError> {
        let state = self.inner.lock().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn create(&self, flavor: &str, size: &str, rating: f64, image: Option<&str>) -> Result<models::cupcake::Model, ServiceError> {
        models::cupcake::validate_flavor(flavor)?;
        models::cupcake::validate_size(size)?;

        let mut state = self.inner.lock().await;
        state.next_id += 1;
        let row = models::cupcake::Model {
            id: state.next_id,
            flavor: flavor.to_string(),
            size: size.to_string(),
            rating,
            image: models::cupcake::normalize_image(image),
        };
        state.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, flavor: &str, size: &str, rating: f64, image: &str) -> Result<models::cupcake::Model, ServiceError> {
        models::cupcake::validate_flavor(flavor)?;
        models::cupcake::validate_size(size)?;

        let mut state = self.inner.lock().await;
        let Some(existing) = state.rows.get_mut(&id) else {
            return Err(ServiceError::not_found("cupcake"));
        };
        existing.flavor = flavor.to_string();
        existing.size = size.to_string();
        existing.rating = rating;
        existing.image = image.to_string();
        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let mut state = self.inner.lock().await;
        Ok(state.rows.remove(&id).is_some())
    }
}
