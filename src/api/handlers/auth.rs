//! Token endpoints: obtain a pair from credentials, refresh an access token.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    AccessTokenResponse, ErrorResponse, TokenObtainRequest, TokenPairResponse,
    TokenRefreshRequest, require,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::{generate_access_token, generate_token_pair, validate_refresh_token};
use crate::utils::validate::ValidatedJson;

/// # Routes
/// - `POST /api/token/`
/// - `POST /api/token/refresh/`
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(obtain_token_pair))
        .routes(routes!(refresh_access_token))
}

/// Exchange credentials for an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/token/",
    tag = AUTH_TAG,
    request_body = TokenObtainRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = TokenPairResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "No active account found with the given credentials", body = ErrorResponse)
    )
)]
async fn obtain_token_pair(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenObtainRequest>,
) -> AppResult<Json<TokenPairResponse>> {
    let username = require(payload.username, "username")?;
    let password = require(payload.password, "password")?;

    let user = state
        .services
        .users
        .authenticate(&username, &password)
        .await
        .inspect_err(|_| tracing::info!(username = %username, "Login rejected"))?;

    let (access, refresh) = generate_token_pair(user.id, &user.username, &state.jwt_config)?;
    tracing::info!(user_id = user.id, "Token pair issued");

    Ok(Json(TokenPairResponse { refresh, access }))
}

/// Exchange a refresh token for a new access token
///
/// The refresh token itself is not rotated.
#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    tag = AUTH_TAG,
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid, expired or wrong-type token", body = ErrorResponse)
    )
)]
async fn refresh_access_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRefreshRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let refresh = require(payload.refresh, "refresh")?;
    let claims = validate_refresh_token(&refresh, &state.jwt_config.secret)?;

    let access = generate_access_token(claims.user_id()?, &claims.username, &state.jwt_config)?;
    Ok(Json(AccessTokenResponse { access }))
}
