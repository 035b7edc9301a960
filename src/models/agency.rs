use diesel::prelude::*;

/// Agency subject to inspection
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::agencies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Agency {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Insertable, Clone, Default)]
#[diesel(table_name = crate::schema::agencies)]
pub struct NewAgency {
    pub name: String,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub contact: Option<String>,
}

/// Changeset for PUT and PATCH.
///
/// The outer `Option` skips the column; `Some(None)` writes NULL.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::agencies)]
pub struct UpdateAgency {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub tax_id: Option<Option<String>>,
    pub contact: Option<Option<String>>,
}

impl UpdateAgency {
    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.tax_id.is_none()
            && self.contact.is_none()
    }
}
