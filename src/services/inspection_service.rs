//! Inspection business rules: references must exist, reads carry the
//! related names.

use crate::error::{AppError, AppResult, FieldErrors};
use crate::models::{InspectionDetails, NewInspection, UpdateInspection};
use crate::repositories::{AgencyRepository, InspectionRepository, UserRepository};

pub const INSPECTION_ENTITY: &str = "fiscalizacao";

#[derive(Clone)]
pub struct InspectionService {
    repo: InspectionRepository,
    users: UserRepository,
    agencies: AgencyRepository,
}

impl InspectionService {
    pub fn new(
        repo: InspectionRepository,
        users: UserRepository,
        agencies: AgencyRepository,
    ) -> Self {
        Self {
            repo,
            users,
            agencies,
        }
    }

    /// All inspections, newest first.
    pub async fn list_inspections(&self) -> AppResult<Vec<InspectionDetails>> {
        self.repo.list_all().await
    }

    pub async fn get_inspection(&self, id: i32) -> AppResult<InspectionDetails> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(INSPECTION_ENTITY, "id", id))
    }

    pub async fn create_inspection(
        &self,
        new_inspection: NewInspection,
    ) -> AppResult<InspectionDetails> {
        self.ensure_references(
            Some(new_inspection.inspector_id),
            Some(new_inspection.agency_id),
        )
        .await?;

        let created = self.repo.create(new_inspection).await?;
        self.get_inspection(created.id).await
    }

    /// Applies `changes`; `data_fiscalizacao` is never touched.
    pub async fn update_inspection(
        &self,
        id: i32,
        changes: UpdateInspection,
    ) -> AppResult<InspectionDetails> {
        let current = self.get_inspection(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }

        self.ensure_references(changes.inspector_id, changes.agency_id)
            .await?;

        if !self.repo.update(id, changes).await? {
            return Err(AppError::not_found(INSPECTION_ENTITY, "id", id));
        }
        self.get_inspection(id).await
    }

    pub async fn delete_inspection(&self, id: i32) -> AppResult<()> {
        match self.repo.delete(id).await? {
            0 => Err(AppError::not_found(INSPECTION_ENTITY, "id", id)),
            _ => Ok(()),
        }
    }

    /// Reports every missing reference at once, keyed by wire field.
    async fn ensure_references(
        &self,
        inspector_id: Option<i32>,
        agency_id: Option<i32>,
    ) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if let Some(inspector_id) = inspector_id
            && self.users.find_by_id(inspector_id).await?.is_none()
        {
            errors.insert("fiscalizador".to_string(), vec![missing_pk(inspector_id)]);
        }
        if let Some(agency_id) = agency_id
            && self.agencies.find_by_id(agency_id).await?.is_none()
        {
            errors.insert("orgao".to_string(), vec![missing_pk(agency_id)]);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationErrors { errors })
        }
    }
}

fn missing_pk(id: i32) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}
