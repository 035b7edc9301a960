//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the wire contract (`nome`, `cnpj`, `fiscalizador`, ...),
//! so validation errors are reported under the names clients send.

mod agency;
mod auth;
mod error;
mod health;
mod inspection;

pub use agency::{AgencyPatchRequest, AgencyRequest, AgencyResponse};
pub use auth::{AccessTokenResponse, TokenObtainRequest, TokenPairResponse, TokenRefreshRequest};
pub use error::{ErrorDetails, ErrorResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use inspection::{InspectionPatchRequest, InspectionRequest, InspectionResponse};

use crate::error::{AppError, AppResult};

/// Message for a required field that was omitted.
pub(crate) const REQUIRED: &str = "This field is required.";

/// Unwraps a field that `#[validate(required)]` has already checked.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(field, REQUIRED))
}
