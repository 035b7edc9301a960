//! Agency business rules: unique `nome` and `cnpj`, not-found mapping.

use crate::error::{AppError, AppResult};
use crate::models::{Agency, NewAgency, UpdateAgency};
use crate::repositories::AgencyRepository;

pub const AGENCY_ENTITY: &str = "orgao fiscalizado";

#[derive(Clone)]
pub struct AgencyService {
    repo: AgencyRepository,
}

impl AgencyService {
    pub fn new(repo: AgencyRepository) -> Self {
        Self { repo }
    }

    /// All agencies ordered by name.
    pub async fn list_agencies(&self) -> AppResult<Vec<Agency>> {
        self.repo.list_all().await
    }

    pub async fn get_agency(&self, id: i32) -> AppResult<Agency> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(AGENCY_ENTITY, "id", id))
    }

    pub async fn create_agency(&self, new_agency: NewAgency) -> AppResult<Agency> {
        self.ensure_unique(&new_agency.name, new_agency.tax_id.as_deref(), None)
            .await?;
        self.repo.create(new_agency).await
    }

    /// Applies `changes` to an existing agency.
    ///
    /// An empty changeset returns the stored row unchanged.
    pub async fn update_agency(&self, id: i32, changes: UpdateAgency) -> AppResult<Agency> {
        let current = self.get_agency(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }

        let name = changes.name.as_deref().unwrap_or(&current.name);
        let tax_id = match &changes.tax_id {
            Some(tax_id) => tax_id.as_deref(),
            None => current.tax_id.as_deref(),
        };
        self.ensure_unique(name, tax_id, Some(id)).await?;

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(AGENCY_ENTITY, "id", id))
    }

    /// Deletes an agency together with its inspections.
    pub async fn delete_agency(&self, id: i32) -> AppResult<()> {
        match self.repo.delete(id).await? {
            0 => Err(AppError::not_found(AGENCY_ENTITY, "id", id)),
            _ => Ok(()),
        }
    }

    // Races past these checks are caught by the unique constraints.
    async fn ensure_unique(
        &self,
        name: &str,
        tax_id: Option<&str>,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        if self.repo.name_taken(name, exclude_id).await? {
            return Err(AppError::duplicate(AGENCY_ENTITY, "nome", name));
        }
        if let Some(tax_id) = tax_id
            && self.repo.tax_id_taken(tax_id, exclude_id).await?
        {
            return Err(AppError::duplicate(AGENCY_ENTITY, "cnpj", tax_id));
        }
        Ok(())
    }
}
