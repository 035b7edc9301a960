//! Agency (`/api/orgaos/`) CRUD handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::IdPath;
use crate::api::doc::AGENCY_TAG;
use crate::api::dto::{AgencyPatchRequest, AgencyRequest, AgencyResponse, ErrorResponse};
use crate::error::AppResult;
use crate::models::UpdateAgency;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// # Routes
/// - `GET|POST /api/orgaos/`
/// - `GET|PUT|PATCH|DELETE /api/orgaos/{id}/`
pub fn agency_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_agencies, create_agency))
        .routes(routes!(get_agency, update_agency, patch_agency, delete_agency))
}

/// List agencies ordered by name
#[utoipa::path(
    get,
    path = "/api/orgaos/",
    tag = AGENCY_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All agencies", body = [AgencyResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_agencies(State(state): State<AppState>) -> AppResult<Json<Vec<AgencyResponse>>> {
    let agencies = state.services.agencies.list_agencies().await?;
    Ok(Json(agencies.into_iter().map(AgencyResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/orgaos/",
    tag = AGENCY_TAG,
    security(("bearerAuth" = [])),
    request_body = AgencyRequest,
    responses(
        (status = 201, description = "Agency created", body = AgencyResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 409, description = "Name or CNPJ already registered", body = ErrorResponse)
    )
)]
async fn create_agency(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AgencyRequest>,
) -> AppResult<(StatusCode, Json<AgencyResponse>)> {
    let agency = state
        .services
        .agencies
        .create_agency(payload.into_new_agency()?)
        .await?;
    tracing::info!(agency_id = agency.id, "Agency created");
    Ok((StatusCode::CREATED, Json(agency.into())))
}

#[utoipa::path(
    get,
    path = "/api/orgaos/{id}/",
    tag = AGENCY_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Agency id")),
    responses(
        (status = 200, description = "Agency found", body = AgencyResponse),
        (status = 404, description = "Agency not found", body = ErrorResponse)
    )
)]
async fn get_agency(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<AgencyResponse>> {
    let agency = state.services.agencies.get_agency(id).await?;
    Ok(Json(agency.into()))
}

/// Replace an agency; omitted optional fields keep their value
#[utoipa::path(
    put,
    path = "/api/orgaos/{id}/",
    tag = AGENCY_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Agency id")),
    request_body = AgencyRequest,
    responses(
        (status = 200, description = "Agency updated", body = AgencyResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Agency not found", body = ErrorResponse),
        (status = 409, description = "Name or CNPJ already registered", body = ErrorResponse)
    )
)]
async fn update_agency(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AgencyRequest>,
) -> AppResult<Json<AgencyResponse>> {
    let agency = state
        .services
        .agencies
        .update_agency(id, payload.into_changes()?)
        .await?;
    Ok(Json(agency.into()))
}

#[utoipa::path(
    patch,
    path = "/api/orgaos/{id}/",
    tag = AGENCY_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Agency id")),
    request_body = AgencyPatchRequest,
    responses(
        (status = 200, description = "Agency updated", body = AgencyResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Agency not found", body = ErrorResponse),
        (status = 409, description = "Name or CNPJ already registered", body = ErrorResponse)
    )
)]
async fn patch_agency(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AgencyPatchRequest>,
) -> AppResult<Json<AgencyResponse>> {
    let agency = state
        .services
        .agencies
        .update_agency(id, UpdateAgency::from(payload))
        .await?;
    Ok(Json(agency.into()))
}

/// Delete an agency and its inspections
#[utoipa::path(
    delete,
    path = "/api/orgaos/{id}/",
    tag = AGENCY_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Agency id")),
    responses(
        (status = 204, description = "Agency deleted"),
        (status = 404, description = "Agency not found", body = ErrorResponse)
    )
)]
async fn delete_agency(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    state.services.agencies.delete_agency(id).await?;
    tracing::info!(agency_id = id, "Agency deleted");
    Ok(StatusCode::NO_CONTENT)
}
