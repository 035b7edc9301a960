use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    /// Argon2 PHC string
    pub password: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// NewUser model for inserting new records
/// `password` must already be hashed.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}
