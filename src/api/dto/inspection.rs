//! Inspection (`Fiscalizacao`) request/response DTOs.
//!
//! `fiscalizador_username`, `orgao_nome` and `data_fiscalizacao` are output
//! only; requests that carry them have those keys ignored.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::require;
use crate::error::{AppError, AppResult};
use crate::models::{InspectionDetails, InspectionStatus, NewInspection, UpdateInspection};
use crate::utils::validate::{not_blank, trimmed, valid_status};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 7,
    "fiscalizador": 3,
    "fiscalizador_username": "maria",
    "orgao": 1,
    "orgao_nome": "Prefeitura",
    "titulo": "Vistoria da merenda",
    "descricao": "Estoque conferido.",
    "status": "EM_ANALISE",
    "data_fiscalizacao": "2025-01-01T12:00:00Z"
}))]
pub struct InspectionResponse {
    pub id: i32,
    pub fiscalizador: i32,
    pub fiscalizador_username: String,
    pub orgao: i32,
    pub orgao_nome: String,
    pub titulo: String,
    pub descricao: String,
    pub status: InspectionStatus,
    #[schema(value_type = String, format = DateTime)]
    pub data_fiscalizacao: Timestamp,
}

impl From<InspectionDetails> for InspectionResponse {
    fn from(details: InspectionDetails) -> Self {
        let inspection = details.inspection;
        Self {
            id: inspection.id,
            fiscalizador: inspection.inspector_id,
            fiscalizador_username: details.inspector_username,
            orgao: inspection.agency_id,
            orgao_nome: details.agency_name,
            titulo: inspection.title,
            descricao: inspection.description,
            status: inspection.status,
            data_fiscalizacao: inspection.inspected_at.to_jiff(),
        }
    }
}

/// Body of POST and PUT.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InspectionRequest {
    #[validate(required(message = "This field is required."))]
    #[schema(value_type = i32, example = 3)]
    pub fiscalizador: Option<i32>,

    #[validate(required(message = "This field is required."))]
    #[schema(value_type = i32, example = 1)]
    pub orgao: Option<i32>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    #[schema(value_type = String)]
    pub titulo: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    #[schema(value_type = String)]
    pub descricao: Option<String>,

    /// Defaults to `EM_ANALISE` on create; kept as stored on PUT when omitted
    #[validate(custom(function = "valid_status"))]
    #[schema(value_type = Option<InspectionStatus>)]
    pub status: Option<String>,
}

impl InspectionRequest {
    pub fn into_new_inspection(self) -> AppResult<NewInspection> {
        Ok(NewInspection {
            inspector_id: require(self.fiscalizador, "fiscalizador")?,
            agency_id: require(self.orgao, "orgao")?,
            title: require(self.titulo, "titulo")?,
            description: require(self.descricao, "descricao")?,
            status: parse_status(self.status)?.unwrap_or_default(),
        })
    }

    pub fn into_changes(self) -> AppResult<UpdateInspection> {
        Ok(UpdateInspection {
            inspector_id: Some(require(self.fiscalizador, "fiscalizador")?),
            agency_id: Some(require(self.orgao, "orgao")?),
            title: Some(require(self.titulo, "titulo")?),
            description: Some(require(self.descricao, "descricao")?),
            status: parse_status(self.status)?,
        })
    }
}

/// Body of PATCH; only supplied fields change.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct InspectionPatchRequest {
    pub fiscalizador: Option<i32>,

    pub orgao: Option<i32>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub titulo: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub descricao: Option<String>,

    #[validate(custom(function = "valid_status"))]
    #[schema(value_type = Option<InspectionStatus>)]
    pub status: Option<String>,
}

impl InspectionPatchRequest {
    pub fn into_changes(self) -> AppResult<UpdateInspection> {
        Ok(UpdateInspection {
            inspector_id: self.fiscalizador,
            agency_id: self.orgao,
            title: self.titulo,
            description: self.descricao,
            status: parse_status(self.status)?,
        })
    }
}

fn parse_status(status: Option<String>) -> AppResult<Option<InspectionStatus>> {
    status
        .map(|s| s.parse::<InspectionStatus>())
        .transpose()
        .map_err(|reason| AppError::validation("status", reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Inspection;

    fn request(json: serde_json::Value) -> InspectionRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_status_defaults_on_create() {
        let new_inspection = request(serde_json::json!({
            "fiscalizador": 3, "orgao": 1, "titulo": " Vistoria ", "descricao": "Ok"
        }))
        .into_new_inspection()
        .unwrap();

        assert_eq!(new_inspection.status, InspectionStatus::EmAnalise);
        assert_eq!(new_inspection.title, "Vistoria");
    }

    #[test]
    fn test_title_length_ignores_surrounding_whitespace() {
        let patch: InspectionPatchRequest = serde_json::from_value(serde_json::json!({
            "titulo": format!("\t{}\n", "t".repeat(255)), "descricao": "  Revisada  "
        }))
        .unwrap();
        assert!(patch.validate().is_ok());

        let changes = patch.into_changes().unwrap();
        assert_eq!(changes.title.map(|t| t.len()), Some(255));
        assert_eq!(changes.description.as_deref(), Some("Revisada"));
    }

    #[test]
    fn test_read_only_fields_are_ignored() {
        let body = request(serde_json::json!({
            "fiscalizador": 3, "orgao": 1, "titulo": "T", "descricao": "D",
            "status": "IRREGULAR",
            "fiscalizador_username": "mallory",
            "orgao_nome": "Outro",
            "data_fiscalizacao": "2000-01-01T00:00:00Z"
        }));
        assert!(body.validate().is_ok());

        let changes = body.into_changes().unwrap();
        assert_eq!(changes.status, Some(InspectionStatus::Irregular));
        assert_eq!(changes.inspector_id, Some(3));
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = request(serde_json::json!({"status": "REGULAR"}))
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();

        for field in ["fiscalizador", "orgao", "titulo", "descricao"] {
            assert_eq!(
                fields[field][0].message.as_deref(),
                Some("This field is required."),
                "field {}",
                field
            );
        }
        assert!(!fields.contains_key("status"));
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let errors = request(serde_json::json!({
            "fiscalizador": 3, "orgao": 1, "titulo": "T", "descricao": "D", "status": "OK"
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.field_errors()["status"][0].message.as_deref(),
            Some("\"OK\" is not a valid choice.")
        );
    }

    #[test]
    fn test_patch_keeps_status_untouched_when_omitted() {
        let patch: InspectionPatchRequest =
            serde_json::from_value(serde_json::json!({"descricao": "Atualizada"})).unwrap();
        assert!(patch.validate().is_ok());

        let changes = patch.into_changes().unwrap();
        assert_eq!(changes.status, None);
        assert_eq!(changes.description.as_deref(), Some("Atualizada"));
        assert_eq!(changes.title, None);
    }

    #[test]
    fn test_response_shape() {
        let inspected_at: Timestamp = "2025-01-01T12:00:00Z".parse().unwrap();
        let details = InspectionDetails {
            inspection: Inspection {
                id: 7,
                inspector_id: 3,
                agency_id: 1,
                inspected_at: inspected_at.into(),
                title: "Vistoria".to_string(),
                description: "Ok".to_string(),
                status: InspectionStatus::Regular,
            },
            inspector_username: "maria".to_string(),
            agency_name: "Prefeitura".to_string(),
        };

        let json = serde_json::to_value(InspectionResponse::from(details)).unwrap();
        assert_eq!(json["fiscalizador_username"], "maria");
        assert_eq!(json["orgao_nome"], "Prefeitura");
        assert_eq!(json["status"], "REGULAR");
        assert_eq!(json["data_fiscalizacao"], "2025-01-01T12:00:00Z");
    }
}
