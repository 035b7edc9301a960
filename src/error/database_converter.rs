use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Table and column names parsed out of PostgreSQL messages are translated to
/// the entity labels and JSON field names that API clients see, so a unique
/// violation on `agencies.tax_id` surfaces as a `cnpj` field error.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, constraint_name).map(
                    |(table, column, value)| {
                        AppError::duplicate(
                            Self::entity_label(&table),
                            Self::wire_field(&table, &column),
                            value,
                        )
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(message, constraint_name).map(
                    |(table, column)| {
                        AppError::validation(
                            Self::wire_field(&table, &column),
                            "This field is required.",
                        )
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, constraint_name).map(
                    |(table, column, value)| {
                        AppError::validation(
                            Self::wire_field(&table, &column),
                            format!("Invalid pk \"{}\" - object does not exist.", value),
                        )
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint_name).map(
                    |(table, column)| {
                        AppError::validation(
                            Self::wire_field(&table, &column),
                            "Value is not a valid choice.",
                        )
                    },
                )
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{:?}: {}", kind, message),
        })
    }

    /// Human label of the entity stored in `table`.
    pub fn entity_label(table: &str) -> &str {
        match table {
            "agencies" => "orgao fiscalizado",
            "inspections" => "fiscalizacao",
            "users" => "user",
            other => other,
        }
    }

    /// JSON field name for a database column.
    pub fn wire_field<'a>(table: &str, column: &'a str) -> &'a str {
        match (table, column) {
            ("agencies", "name") => "nome",
            ("agencies", "address") => "endereco",
            ("agencies", "tax_id") => "cnpj",
            ("agencies", "contact") => "contato",
            ("inspections", "inspector_id") => "fiscalizador",
            ("inspections", "agency_id") => "orgao",
            ("inspections", "title") => "titulo",
            ("inspections", "description") => "descricao",
            ("inspections", "inspected_at") => "data_fiscalizacao",
            (_, column) => column,
        }
    }
}
