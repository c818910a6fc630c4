use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use service::db::pet_service;
use service::pagination::Pagination;
use service::schemas::pet::{Pet, PetCreate, PetStatistics, PetUpdate};
use tracing::info;

use crate::{errors::JsonApiError, routes::AppState};

type PetId = WithRejection<Path<i64>, JsonApiError>;

/// Ids outside the stored integer range cannot name a pet.
fn stored_id(raw: i64) -> Result<i32, JsonApiError> {
    i32::try_from(raw).map_err(|_| JsonApiError::pet_not_found(raw))
}

#[utoipa::path(
    get, path = "/pets", tag = "pets",
    params(
        ("skip" = Option<u64>, Query, description = "Number of records to skip"),
        ("limit" = Option<u64>, Query, description = "Maximum number of records to return (1-1000)")
    ),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::PetDoc]),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, JsonApiError>,
) -> Result<Json<Vec<Pet>>, JsonApiError> {
    let (skip, limit) = page.validate()?;
    let pets = pet_service::list_pets(&state.db, skip, limit).await?;
    info!(count = pets.len(), skip, limit, "list pets");
    Ok(Json(pets))
}

#[utoipa::path(
    get, path = "/pets/statistics", tag = "pets",
    responses(
        (status = 200, description = "Statistics", body = crate::openapi::PetStatisticsDoc),
        (status = 500, description = "Statistics Failed")
    )
)]
pub async fn statistics(State(state): State<AppState>) -> Result<Json<PetStatistics>, JsonApiError> {
    let stats = pet_service::get_pet_statistics(&state.db).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get, path = "/pets/{id}", tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PetDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    WithRejection(Path(raw), _): PetId,
) -> Result<Json<Pet>, JsonApiError> {
    let id = stored_id(raw)?;
    match pet_service::get_pet(&state.db, id).await? {
        Some(pet) => Ok(Json(pet)),
        None => Err(JsonApiError::pet_not_found(id)),
    }
}

#[utoipa::path(
    post, path = "/pets", tag = "pets",
    request_body = crate::openapi::PetCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PetDoc),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<PetCreate>, JsonApiError>,
) -> Result<(StatusCode, Json<Pet>), JsonApiError> {
    let pet = pet_service::create_pet(&state.db, input).await?;
    info!(id = pet.id, name = %pet.name, pet_type = %pet.pet_type, "created pet");
    Ok((StatusCode::CREATED, Json(pet)))
}

#[utoipa::path(
    put, path = "/pets/{id}", tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    request_body = crate::openapi::PetUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PetDoc),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    state: State<AppState>,
    id: PetId,
    input: WithRejection<Json<PetUpdate>, JsonApiError>,
) -> Result<Json<Pet>, JsonApiError> {
    // PUT shares the merge semantics of PATCH: omitted fields are kept.
    apply_update(state, id, input).await
}

#[utoipa::path(
    patch, path = "/pets/{id}", tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    request_body = crate::openapi::PetUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PetDoc),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn patch(
    state: State<AppState>,
    id: PetId,
    input: WithRejection<Json<PetUpdate>, JsonApiError>,
) -> Result<Json<Pet>, JsonApiError> {
    apply_update(state, id, input).await
}

async fn apply_update(
    State(state): State<AppState>,
    WithRejection(Path(raw), _): PetId,
    WithRejection(Json(input), _): WithRejection<Json<PetUpdate>, JsonApiError>,
) -> Result<Json<Pet>, JsonApiError> {
    let id = stored_id(raw)?;
    match pet_service::update_pet(&state.db, id, input).await? {
        Some(pet) => {
            info!(id = pet.id, "updated pet");
            Ok(Json(pet))
        }
        None => Err(JsonApiError::pet_not_found(id)),
    }
}

#[utoipa::path(
    delete, path = "/pets/{id}", tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(raw), _): PetId,
) -> Result<StatusCode, JsonApiError> {
    let id = stored_id(raw)?;
    if pet_service::delete_pet(&state.db, id).await? {
        info!(id, "deleted pet");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::pet_not_found(id))
    }
}
