//! Request body extraction with field validation, plus the shared field
//! validators used by the DTOs.

use std::borrow::Cow;

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult, FieldErrors};
use crate::models::InspectionStatus;

/// JSON body that has passed its `Validate` rules.
///
/// Malformed JSON becomes `AppError::BadRequest`. A field of the wrong type
/// and rule violations both become `AppError::ValidationErrors` keyed by
/// field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(raw) = Json::<serde_json::Value>::from_request(req, state).await?;
        let value: T = serde_path_to_error::deserialize(raw).map_err(field_type_error)?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Keys a type mismatch by the offending field. Errors on the body as a
/// whole (not an object, for instance) stay a plain bad request.
fn field_type_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let path = err.path().to_string();
    let inner = err.inner().to_string();
    if path == "." {
        return AppError::BadRequest {
            message: format!("Invalid request body: {}", inner),
        };
    }

    let message = if inner.contains("expected i32") || inner.contains("expected i64") {
        "A valid integer is required.".to_string()
    } else if inner.contains("expected a string") {
        "Not a valid string.".to_string()
    } else {
        inner
    };

    let mut errors = FieldErrors::new();
    errors.insert(path, vec![message]);
    AppError::ValidationErrors { errors }
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }
    Ok(())
}

/// Accepts only the inspection status wire values.
pub fn valid_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<InspectionStatus>()
        .map(|_| ())
        .map_err(|message| ValidationError::new("invalid_choice").with_message(Cow::Owned(message)))
}

/// Trims a string field as it is read, so length rules see the stored
/// value. Use with `#[serde(default)]`.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.map(|s| s.trim().to_string()))
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`), trimming a present value. Use with `#[serde(default)]`.
pub fn trimmed_double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    trimmed(deserializer).map(Some)
}

/// Maps an empty string to `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[serde(default, deserialize_with = "trimmed")]
        #[validate(
            required(message = "This field is required."),
            custom(function = "not_blank"),
            length(max = 10, message = "Ensure this field has no more than 10 characters.")
        )]
        nome: Option<String>,
        #[validate(custom(function = "valid_status"))]
        status: Option<String>,
        #[serde(default, deserialize_with = "trimmed_double_option")]
        contato: Option<Option<String>>,
        codigo: Option<i32>,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn extract(body: &str) -> AppResult<TestBody> {
        ValidatedJson::<TestBody>::from_request(json_request(body), &())
            .await
            .map(|ValidatedJson(value)| value)
    }

    fn field_errors(result: AppResult<TestBody>) -> crate::error::FieldErrors {
        match result {
            Err(AppError::ValidationErrors { errors }) => errors,
            other => panic!("Expected ValidationErrors error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_valid_body() {
        let body = extract(r#"{"nome": "Prefeitura", "status": "REGULAR"}"#)
            .await
            .unwrap();
        assert_eq!(body.nome.as_deref(), Some("Prefeitura"));
        assert_eq!(body.contato, None);
    }

    #[tokio::test]
    async fn test_required_and_blank() {
        let errors = field_errors(extract(r#"{}"#).await);
        assert_eq!(errors["nome"], vec!["This field is required."]);

        let errors = field_errors(extract(r#"{"nome": "   "}"#).await);
        assert_eq!(errors["nome"], vec!["This field may not be blank."]);
    }

    #[tokio::test]
    async fn test_max_length_and_status_choice() {
        let errors = field_errors(
            extract(r#"{"nome": "Secretaria de Obras", "status": "PENDENTE"}"#).await,
        );
        assert_eq!(
            errors["nome"],
            vec!["Ensure this field has no more than 10 characters."]
        );
        assert_eq!(errors["status"], vec!["\"PENDENTE\" is not a valid choice."]);
    }

    #[tokio::test]
    async fn test_explicit_null_is_kept_apart_from_absent() {
        let body = extract(r#"{"nome": "Ok", "contato": null}"#).await.unwrap();
        assert_eq!(body.contato, Some(None));

        let body = extract(r#"{"nome": "Ok", "contato": "x"}"#).await.unwrap();
        assert_eq!(body.contato, Some(Some("x".to_string())));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result = extract(r#"{"nome": "#).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));

        let result = extract(r#""nome""#).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_wrong_type_is_keyed_by_field() {
        let errors = field_errors(extract(r#"{"nome": 5}"#).await);
        assert_eq!(errors["nome"], vec!["Not a valid string."]);

        let errors = field_errors(extract(r#"{"nome": "Ok", "codigo": "abc"}"#).await);
        assert_eq!(errors["codigo"], vec!["A valid integer is required."]);
        assert!(!errors.contains_key("nome"));
    }

    #[tokio::test]
    async fn test_length_is_checked_after_trimming() {
        let body = extract(r#"{"nome": "  Prefeitura  ", "contato": " 3333-0000 "}"#)
            .await
            .unwrap();
        assert_eq!(body.nome.as_deref(), Some("Prefeitura"));
        assert_eq!(body.contato, Some(Some("3333-0000".to_string())));

        let errors = field_errors(extract(r#"{"nome": "  Prefeitura!  "}"#).await);
        assert_eq!(
            errors["nome"],
            vec!["Ensure this field has no more than 10 characters."]
        );
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"nome": "Ok"}"#))
            .unwrap();
        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(Some(String::new())), None);
        assert_eq!(
            blank_to_none(Some("12.345.678/0001-90".to_string())),
            Some("12.345.678/0001-90".to_string())
        );
        assert_eq!(blank_to_none(None), None);
    }
}
