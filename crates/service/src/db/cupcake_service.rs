use models::cupcake::{self, Entity as CupcakeEntity};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use crate::errors::ServiceError;

/// List every cupcake in ascending id order (the store's insertion order).
pub async fn list_cupcakes(db: &DatabaseConnection) -> Result<Vec<cupcake::Model>, ServiceError> {
    let rows = CupcakeEntity::find()
        .order_by_asc(cupcake::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Create a cupcake after validation; the store assigns the id.
pub async fn create_cupcake(
    db: &DatabaseConnection,
    flavor: &str,
    size: &str,
    rating: f64,
    image: Option<&str>,
) -> Result<cupcake::Model, ServiceError> {
    // presence validation and image normalization live in models::cupcake
    let created = cupcake::create(db, flavor, size, rating, image).await?;
    debug!(id = created.id, "cupcake row inserted");
    Ok(created)
}

/// Get a cupcake by id.
pub async fn get_cupcake(db: &DatabaseConnection, id: i32) -> Result<Option<cupcake::Model>, ServiceError> {
    let found = CupcakeEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Overwrite every mutable field of an existing cupcake. The PATCH surface
/// requires the full field set, so there is no partial-merge path here.
pub async fn update_cupcake(
    db: &DatabaseConnection,
    id: i32,
    flavor: &str,
    size: &str,
    rating: f64,
    image: &str,
) -> Result<cupcake::Model, ServiceError> {
    let current = CupcakeEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("cupcake")); };

    cupcake::validate_flavor(flavor)?;
    cupcake::validate_size(size)?;

    let mut am: cupcake::ActiveModel = existing.into();
    am.flavor = Set(flavor.to_string());
    am.size = Set(size.to_string());
    am.rating = Set(rating);
    am.image = Set(image.to_string());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a cupcake; returns true if a row was removed.
pub async fn delete_cupcake(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = CupcakeEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
