use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::errors::ServiceError;
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCupcakeInput {
    pub flavor: String,
    pub rating: f64,
    pub size: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// PATCH overwrites the whole record, so every field is required here; a
/// body missing any of them is rejected in the extractor before any write.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateCupcakeInput {
    pub flavor: String,
    pub rating: f64,
    pub size: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct CupcakeBody {
    pub cupcake: models::cupcake::Model,
}

#[derive(Debug, Serialize)]
pub struct CupcakeListBody {
    pub cupcakes: Vec<models::cupcake::Model>,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[utoipa::path(
    get, path = "/api/cupcakes", tag = "cupcakes",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<CupcakeListBody>, JsonApiError> {
    match state.repo.find_all().await {
        Ok(cupcakes) => {
            info!(count = cupcakes.len(), "list cupcakes");
            Ok(Json(CupcakeListBody { cupcakes }))
        }
        Err(e) => {
            error!(err = %e, "list cupcakes failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/api/cupcakes/{id}", tag = "cupcakes",
    params(("id" = i32, Path, description = "Cupcake ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<CupcakeBody>, JsonApiError> {
    match state.repo.find_by_id(id).await {
        Ok(Some(cupcake)) => Ok(Json(CupcakeBody { cupcake })),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => {
            error!(err = %e, "get cupcake failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/api/cupcakes", tag = "cupcakes",
    request_body = crate::openapi::CreateCupcakeInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateCupcakeInput>,
) -> Result<(StatusCode, Json<CupcakeBody>), JsonApiError> {
    info!(flavor = %input.flavor, size = %input.size, rating = input.rating, "cupcake_create_request");

    match state.repo.create(&input.flavor, &input.size, input.rating, input.image.as_deref()).await {
        Ok(cupcake) => {
            info!(id = cupcake.id, flavor = %cupcake.flavor, "created cupcake");
            Ok((StatusCode::CREATED, Json(CupcakeBody { cupcake })))
        }
        Err(e) => match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
            }
            _ => {
                error!(err = %e, "create cupcake failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    patch, path = "/api/cupcakes/{id}", tag = "cupcakes",
    params(("id" = i32, Path, description = "Cupcake ID")),
    request_body = crate::openapi::UpdateCupcakeInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateCupcakeInput>,
) -> Result<Json<CupcakeBody>, JsonApiError> {
    match state.repo.update(id, &input.flavor, &input.size, input.rating, &input.image).await {
        Ok(cupcake) => {
            info!(id = cupcake.id, "updated cupcake");
            Ok(Json(CupcakeBody { cupcake }))
        }
        Err(e) => match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
            }
            ServiceError::NotFound(_) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))),
            _ => {
                error!(err = %e, "update cupcake failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    delete, path = "/api/cupcakes/{id}", tag = "cupcakes",
    params(("id" = i32, Path, description = "Cupcake ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<MessageBody>, JsonApiError> {
    match state.repo.delete(id).await {
        Ok(true) => {
            info!(id, "deleted cupcake");
            Ok(Json(MessageBody { message: "Deleted" }))
        }
        Ok(false) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => {
            error!(err = %e, "delete cupcake failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
        }
    }
}
