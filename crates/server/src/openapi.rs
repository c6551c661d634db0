use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct CupcakeDoc {
    pub id: i32,
    pub flavor: String,
    pub size: String,
    pub rating: f64,
    pub image: String,
}

#[derive(utoipa::ToSchema)]
pub struct CreateCupcakeInputDoc {
    pub flavor: String,
    pub rating: f64,
    pub size: String,
    pub image: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateCupcakeInputDoc {
    pub flavor: String,
    pub rating: f64,
    pub size: String,
    pub image: String,
}

#[derive(utoipa::ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cupcakes::list,
        crate::routes::cupcakes::create,
        crate::routes::cupcakes::get,
        crate::routes::cupcakes::update,
        crate::routes::cupcakes::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CupcakeDoc,
            CreateCupcakeInputDoc,
            UpdateCupcakeInputDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cupcakes")
    )
)]
pub struct ApiDoc;
