//! HS256 access and refresh tokens.
//!
//! Lifetimes come from [`JwtConfig`] and are expressed in minutes.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub token_type: TokenType,
    /// Unique token id
    pub jti: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: i32,
        username: impl Into<String>,
        token_type: TokenType,
        expiration_minutes: i64,
    ) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            username: username.into(),
            token_type,
            jti: Uuid::new_v4().simple().to_string(),
            iat: now,
            exp: now + expiration_minutes * 60,
        }
    }

    /// The user id carried in `sub`.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Token contained no recognizable user identification"))
    }
}

/// Signs claims for `user_id` with the configured secret.
pub fn generate_token(
    user_id: i32,
    username: &str,
    token_type: TokenType,
    secret: &str,
    expiration_minutes: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, username, token_type, expiration_minutes);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

pub fn generate_access_token(user_id: i32, username: &str, config: &JwtConfig) -> AppResult<String> {
    generate_token(
        user_id,
        username,
        TokenType::Access,
        &config.secret,
        config.access_token_expiration,
    )
}

/// Generates both tokens issued on login
///
/// # Returns
/// A tuple of (access_token, refresh_token)
pub fn generate_token_pair(
    user_id: i32,
    username: &str,
    config: &JwtConfig,
) -> AppResult<(String, String)> {
    let access_token = generate_access_token(user_id, username, config)?;
    let refresh_token = generate_token(
        user_id,
        username,
        TokenType::Refresh,
        &config.secret,
        config.refresh_token_expiration,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT token
///
/// Signature and `exp` are always checked; `expected_type` additionally
/// pins the `token_type` claim.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token is invalid or expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Token is invalid or expired")
        }
        _ => AppError::unauthorized("Given token not valid for any token type"),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::unauthorized("Token has wrong type"));
    }

    Ok(claims)
}

/// Accepts only access tokens; used by the bearer middleware.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Accepts only refresh tokens; used by the refresh endpoint.
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_0123";

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiration: 5,
            refresh_token_expiration: 1440,
        }
    }

    fn unauthorized_message(result: AppResult<Claims>) -> String {
        match result {
            Err(AppError::Unauthorized { message }) => message,
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn test_claims_lifetime_in_minutes() {
        let claims = Claims::new(3, "maria", TokenType::Access, 5);
        assert_eq!(claims.exp - claims.iat, 300);
        assert_eq!(claims.user_id().unwrap(), 3);
        assert_eq!(claims.jti.len(), 32);
    }

    #[test]
    fn test_generate_token_pair() {
        let (access, refresh) = generate_token_pair(1, "maria", &test_config()).unwrap();
        assert_ne!(access, refresh);

        let access_claims = validate_access_token(&access, TEST_SECRET).unwrap();
        assert_eq!(access_claims.sub, "1");
        assert_eq!(access_claims.username, "maria");
        assert_eq!(access_claims.token_type, TokenType::Access);

        let refresh_claims = validate_refresh_token(&refresh, TEST_SECRET).unwrap();
        assert_eq!(refresh_claims.token_type, TokenType::Refresh);
        assert_eq!(refresh_claims.exp - refresh_claims.iat, 1440 * 60);
        assert_ne!(access_claims.jti, refresh_claims.jti);
    }

    #[test]
    fn test_validate_wrong_token_type() {
        let (access, refresh) = generate_token_pair(1, "maria", &test_config()).unwrap();

        assert_eq!(
            unauthorized_message(validate_refresh_token(&access, TEST_SECRET)),
            "Token has wrong type"
        );
        assert_eq!(
            unauthorized_message(validate_access_token(&refresh, TEST_SECRET)),
            "Token has wrong type"
        );
    }

    #[test]
    fn test_validate_expired_token() {
        let token = generate_token(1, "maria", TokenType::Access, TEST_SECRET, -1).unwrap();
        assert_eq!(
            unauthorized_message(validate_access_token(&token, TEST_SECRET)),
            "Token is invalid or expired"
        );
    }

    #[test]
    fn test_validate_wrong_secret() {
        let token = generate_access_token(1, "maria", &test_config()).unwrap();
        let result = validate_access_token(&token, "another_secret_key_for_jwt_testing_");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_validate_garbage() {
        let result = validate_token("not.a.jwt", TEST_SECRET, None);
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }
}
