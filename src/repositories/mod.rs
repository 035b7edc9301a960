//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities.

mod agency_repo;
mod inspection_repo;
mod user_repo;

pub use agency_repo::AgencyRepository;
pub use inspection_repo::InspectionRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub agencies: AgencyRepository,
    pub inspections: InspectionRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            agencies: AgencyRepository::new(pool.clone()),
            inspections: InspectionRepository::new(pool),
        }
    }
}
