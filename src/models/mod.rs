mod agency;
mod inspection;
mod user;

pub use agency::{Agency, NewAgency, UpdateAgency};
pub use inspection::{
    Inspection, InspectionDetails, InspectionStatus, NewInspection, UpdateInspection,
};
pub use user::{NewUser, User};
