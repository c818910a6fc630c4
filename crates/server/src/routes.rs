pub mod pets;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Welcome};

use crate::openapi::ApiDoc;

/// Shared handler state. The pool handle is passed down into every data
/// access call; handlers never open connections themselves.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Welcome message")))]
pub async fn root() -> Json<Welcome> {
    Json(Welcome::default())
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is healthy", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::healthy())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: root/health, pet CRUD, statistics and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let pets = Router::new()
        .route("/pets", get(pets::list).post(pets::create))
        .route("/pets/", get(pets::list).post(pets::create))
        .route("/pets/statistics", get(pets::statistics))
        .route(
            "/pets/:id",
            get(pets::get).put(pets::update).patch(pets::patch).delete(pets::delete),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(pets)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
