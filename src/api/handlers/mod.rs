//! HTTP request handlers for API endpoints.
//!
//! Each module exposes an `OpenApiRouter` carrying full paths, so routers
//! are merged rather than nested.

pub mod agencies;
pub mod auth;
pub mod health;
pub mod inspections;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::{AGENCY_ENTITY, INSPECTION_ENTITY};

/// Numeric `{id}` path segment. An id that is not an integer cannot match
/// any row, so it is reported as `NotFound` like an unknown one.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(id)) = Path::<i32>::from_request_parts(parts, state).await {
            return Ok(IdPath(id));
        }

        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Err(AppError::not_found(entity_for(parts.uri.path()), "id", raw))
    }
}

fn entity_for(path: &str) -> &'static str {
    if path.starts_with("/api/orgaos/") {
        AGENCY_ENTITY
    } else if path.starts_with("/api/fiscalizacoes/") {
        INSPECTION_ENTITY
    } else {
        "resource"
    }
}

