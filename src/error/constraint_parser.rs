use std::sync::OnceLock;

use regex::Regex;

/// Extracts table, column and value information from PostgreSQL constraint
/// violation messages and constraint names.
///
/// Constraint names follow PostgreSQL's default naming, which the migrations
/// keep: `{table}_{column}_key` for unique constraints, `{table}_{column}_fkey`
/// for foreign keys and `{table}_{column}_check` for check constraints.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Option<Self> {
        Some(Self {
            // "Key (field)=(value)" in the DETAIL line
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok()?,
            column_name: Regex::new(r#"column "([^"]+)""#).ok()?,
            table_name: Regex::new(r#"(?:relation|table) "([^"]+)""#).ok()?,
        })
    }
}

static REGEX_PATTERNS: OnceLock<Option<RegexPatterns>> = OnceLock::new();

const CONSTRAINT_SUFFIXES: [&str; 4] = ["_fkey", "_key", "_check", "_not_null"];

impl ConstraintParser {
    fn patterns() -> Option<&'static RegexPatterns> {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new).as_ref()
    }

    /// Parses a unique violation into `(table, column, value)`.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let from_message = Self::extract_key_value_from_message(message);

        if let Some((table, column)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = from_message
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((table, column, value));
        }

        let (column, value) = from_message?;
        let table = Self::extract_table_from_message(message)
            .unwrap_or_else(|| "resource".to_string());
        Some((table, column, value))
    }

    /// Parses a not-null violation into `(table, column)`.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let column = Self::extract_column_from_message(message)?;
        let table = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(t, _)| t))
            .unwrap_or_else(|| "resource".to_string());
        Some((table, column))
    }

    /// Parses a foreign key violation into `(table, column, referenced value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let from_message = Self::extract_key_value_from_message(message);

        if let Some((table, column)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = from_message
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((table, column, value));
        }

        let (column, value) = from_message?;
        let table = Self::extract_table_from_message(message)
            .unwrap_or_else(|| "resource".to_string());
        Some((table, column, value))
    }

    /// Parses a check violation into `(table, column)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let column = Self::extract_column_from_message(message)?;
        let table = Self::extract_table_from_message(message)
            .unwrap_or_else(|| "resource".to_string());
        Some((table, column))
    }

    /// Splits a default-named constraint into `(table, column)`.
    ///
    /// The table is everything before the first underscore, the column is the
    /// rest minus the constraint suffix, so multi-word columns such as
    /// `tax_id` or `agency_id` survive intact.
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()?
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()?
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()?.key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_violation_with_constraint_name() {
        let message = "duplicate key value violates unique constraint \"agencies_tax_id_key\"\nDETAIL: Key (tax_id)=(00.000.000/0001-00) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, Some("agencies_tax_id_key"));
        assert_eq!(
            result,
            Some((
                "agencies".to_string(),
                "tax_id".to_string(),
                "00.000.000/0001-00".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (username)=(maria) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some(("resource".to_string(), "username".to_string(), "maria".to_string()))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_detail() {
        let result = ConstraintParser::parse_unique_violation("boom", Some("agencies_name_key"));
        assert_eq!(
            result,
            Some(("agencies".to_string(), "name".to_string(), "duplicate_value".to_string()))
        );
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message = "null value in column \"title\" of relation \"inspections\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("inspections".to_string(), "title".to_string())));
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"inspections\" violates foreign key constraint \"inspections_agency_id_fkey\"\nDETAIL: Key (agency_id)=(999) is not present in table \"agencies\".";
        let result =
            ConstraintParser::parse_foreign_key_violation(message, Some("inspections_agency_id_fkey"));
        assert_eq!(
            result,
            Some(("inspections".to_string(), "agency_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_parse_check_violation() {
        let message = "new row for relation \"inspections\" violates check constraint \"inspections_status_check\"";
        let result = ConstraintParser::parse_check_violation(message, Some("inspections_status_check"));
        assert_eq!(result, Some(("inspections".to_string(), "status".to_string())));
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_username_key"),
            Some(("users".to_string(), "username".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("inspections_inspector_id_fkey"),
            Some(("inspections".to_string(), "inspector_id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("agencies_pkey"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("nounderscore_key"), None);
    }

    #[test]
    fn test_extract_key_value_from_message() {
        let message = "DETAIL: Key (name)=(Prefeitura) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("name".to_string(), "Prefeitura".to_string()))
        );
        assert_eq!(ConstraintParser::extract_key_value_from_message("nothing here"), None);
    }
}
