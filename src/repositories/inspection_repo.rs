//! Inspection repository for async database operations.
//!
//! Reads join `users` and `agencies` so each row carries the inspector's
//! username and the agency's name.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Inspection, InspectionDetails, NewInspection, UpdateInspection};
use crate::schema::{agencies, inspections, users};

#[derive(Clone)]
pub struct InspectionRepository {
    pool: AsyncDbPool,
}

impl InspectionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_inspection: NewInspection) -> Result<Inspection, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(inspections::table)
            .values(&new_inspection)
            .returning(Inspection::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(
        &self,
        inspection_id: i32,
    ) -> Result<Option<InspectionDetails>, AppError> {
        let mut conn = self.pool.get().await?;

        inspections::table
            .inner_join(users::table)
            .inner_join(agencies::table)
            .filter(inspections::id.eq(inspection_id))
            .select((Inspection::as_select(), users::username, agencies::name))
            .first::<(Inspection, String, String)>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(InspectionDetails::from))
            .map_err(AppError::from)
    }

    /// Lists all inspections, newest first.
    pub async fn list_all(&self) -> Result<Vec<InspectionDetails>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows = inspections::table
            .inner_join(users::table)
            .inner_join(agencies::table)
            .order((inspections::inspected_at.desc(), inspections::id.desc()))
            .select((Inspection::as_select(), users::username, agencies::name))
            .load::<(Inspection, String, String)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(InspectionDetails::from).collect())
    }

    /// Applies a non-empty changeset.
    ///
    /// # Returns
    /// `false` if no row has `inspection_id`
    pub async fn update(
        &self,
        inspection_id: i32,
        changes: UpdateInspection,
    ) -> Result<bool, AppError> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::update(inspections::table.filter(inspections::id.eq(inspection_id)))
            .set(&changes)
            .execute(&mut conn)
            .await?;
        Ok(affected > 0)
    }

    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(&self, inspection_id: i32) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(inspections::table.filter(inspections::id.eq(inspection_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
