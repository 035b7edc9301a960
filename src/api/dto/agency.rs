//! Agency (`OrgaoFiscalizado`) request/response DTOs.
//!
//! Text fields are trimmed as they are read, before the length rules run.
//! Blank optional values are stored as NULL so an empty `cnpj` never
//! collides with the uniqueness rule.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::require;
use crate::error::AppResult;
use crate::models::{Agency, NewAgency, UpdateAgency};
use crate::utils::validate::{blank_to_none, not_blank, trimmed, trimmed_double_option};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[schema(example = json!({
    "id": 1,
    "nome": "Prefeitura Municipal",
    "endereco": "Praça da Matriz, 1",
    "cnpj": "12.345.678/0001-90",
    "contato": null
}))]
pub struct AgencyResponse {
    pub id: i32,
    pub nome: String,
    pub endereco: Option<String>,
    pub cnpj: Option<String>,
    pub contato: Option<String>,
}

impl From<Agency> for AgencyResponse {
    fn from(agency: Agency) -> Self {
        Self {
            id: agency.id,
            nome: agency.name,
            endereco: agency.address,
            cnpj: agency.tax_id,
            contato: agency.contact,
        }
    }
}

/// Body of POST and PUT.
///
/// On PUT an omitted optional field keeps its stored value and an explicit
/// `null` clears it; on POST both mean NULL.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AgencyRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    #[schema(value_type = String, example = "Prefeitura Municipal")]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "trimmed_double_option")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    #[schema(value_type = Option<String>)]
    pub endereco: Option<Option<String>>,

    #[serde(default, deserialize_with = "trimmed_double_option")]
    #[validate(length(max = 18, message = "Ensure this field has no more than 18 characters."))]
    #[schema(value_type = Option<String>, example = "12.345.678/0001-90")]
    pub cnpj: Option<Option<String>>,

    #[serde(default, deserialize_with = "trimmed_double_option")]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    #[schema(value_type = Option<String>)]
    pub contato: Option<Option<String>>,
}

impl AgencyRequest {
    pub fn into_new_agency(self) -> AppResult<NewAgency> {
        Ok(NewAgency {
            name: require(self.nome, "nome")?,
            address: self.endereco.and_then(blank_to_none),
            tax_id: self.cnpj.and_then(blank_to_none),
            contact: self.contato.and_then(blank_to_none),
        })
    }

    pub fn into_changes(self) -> AppResult<UpdateAgency> {
        Ok(UpdateAgency {
            name: Some(require(self.nome, "nome")?),
            address: self.endereco.map(blank_to_none),
            tax_id: self.cnpj.map(blank_to_none),
            contact: self.contato.map(blank_to_none),
        })
    }
}

/// Body of PATCH; only supplied fields change.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AgencyPatchRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    #[schema(value_type = Option<String>)]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "trimmed_double_option")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    #[schema(value_type = Option<String>)]
    pub endereco: Option<Option<String>>,

    #[serde(default, deserialize_with = "trimmed_double_option")]
    #[validate(length(max = 18, message = "Ensure this field has no more than 18 characters."))]
    #[schema(value_type = Option<String>)]
    pub cnpj: Option<Option<String>>,

    #[serde(default, deserialize_with = "trimmed_double_option")]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    #[schema(value_type = Option<String>)]
    pub contato: Option<Option<String>>,
}

impl From<AgencyPatchRequest> for UpdateAgency {
    fn from(patch: AgencyPatchRequest) -> Self {
        Self {
            name: patch.nome,
            address: patch.endereco.map(blank_to_none),
            tax_id: patch.cnpj.map(blank_to_none),
            contact: patch.contato.map(blank_to_none),
        }
    }
}
