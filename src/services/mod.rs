//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod agency_service;
mod inspection_service;
mod user_service;

pub use agency_service::{AGENCY_ENTITY, AgencyService};
pub use inspection_service::{INSPECTION_ENTITY, InspectionService};
pub use user_service::{INVALID_CREDENTIALS, NewUserInput, UserService};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub agencies: AgencyService,
    pub inspections: InspectionService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            agencies: AgencyService::new(repos.agencies.clone()),
            inspections: InspectionService::new(repos.inspections, repos.users, repos.agencies),
        }
    }
}
