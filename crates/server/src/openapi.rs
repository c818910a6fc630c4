use std::collections::HashMap;

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct PetDoc {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub weight: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct PetCreateDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub weight: Option<f64>,
}

/// Only supplied fields are applied; `weight: null` clears the weight.
#[derive(Serialize, ToSchema)]
pub struct PetUpdateDoc {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
    pub weight: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct PetStatisticsDoc {
    pub total_pets: u64,
    pub average_weight: Option<f64>,
    pub type_distribution: HashMap<String, u64>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Pet Store API", description = "A simple Pet Store API with CRUD operations and statistics"),
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::pets::list,
        crate::routes::pets::statistics,
        crate::routes::pets::get,
        crate::routes::pets::create,
        crate::routes::pets::update,
        crate::routes::pets::patch,
        crate::routes::pets::delete,
    ),
    components(
        schemas(
            HealthResponse,
            PetDoc,
            PetCreateDoc,
            PetUpdateDoc,
            PetStatisticsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "pets")
    )
)]
pub struct ApiDoc;
