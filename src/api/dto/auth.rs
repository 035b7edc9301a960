//! Token endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Credentials exchanged for a token pair.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenObtainRequest {
    #[validate(required(message = "This field is required."))]
    #[schema(example = "maria", value_type = String)]
    pub username: Option<String>,
    #[validate(required(message = "This field is required."))]
    #[schema(example = "fiscal123", value_type = String)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPairResponse {
    pub refresh: String,
    pub access: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRefreshRequest {
    #[validate(required(message = "This field is required."))]
    #[schema(value_type = String)]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}
