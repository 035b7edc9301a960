//! Agency repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Agency, NewAgency, UpdateAgency};

#[derive(Clone)]
pub struct AgencyRepository {
    pool: AsyncDbPool,
}

impl AgencyRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_agency: NewAgency) -> Result<Agency, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(agencies)
            .values(&new_agency)
            .returning(Agency::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, agency_id: i32) -> Result<Option<Agency>, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        agencies
            .filter(id.eq(agency_id))
            .select(Agency::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all agencies ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Agency>, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        agencies
            .order((name.asc(), id.asc()))
            .select(Agency::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// True if an agency other than `exclude_id` already uses `agency_name`.
    pub async fn name_taken(
        &self,
        agency_name: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        let existing: Option<i32> = agencies
            .filter(name.eq(agency_name))
            .select(id)
            .first(&mut conn)
            .await
            .optional()?;
        Ok(existing.is_some_and(|found| Some(found) != exclude_id))
    }

    /// True if an agency other than `exclude_id` already uses `cnpj`.
    pub async fn tax_id_taken(
        &self,
        cnpj: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        let existing: Option<i32> = agencies
            .filter(tax_id.eq(cnpj))
            .select(id)
            .first(&mut conn)
            .await
            .optional()?;
        Ok(existing.is_some_and(|found| Some(found) != exclude_id))
    }

    /// Applies a non-empty changeset.
    ///
    /// # Returns
    /// The updated agency, or `None` if no row has `agency_id`
    pub async fn update(
        &self,
        agency_id: i32,
        changes: UpdateAgency,
    ) -> Result<Option<Agency>, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(agencies.filter(id.eq(agency_id)))
            .set(&changes)
            .returning(Agency::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Deletes an agency and, by cascade, its inspections.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(&self, agency_id: i32) -> Result<usize, AppError> {
        use crate::schema::agencies::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(agencies.filter(id.eq(agency_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
