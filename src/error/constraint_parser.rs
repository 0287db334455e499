use std::sync::LazyLock;

use regex::Regex;

/// Pulls entity, field and value out of PostgreSQL constraint violation
/// messages.
///
/// Constraint names follow the Postgres defaults used by the migrations:
/// `categories_slug_key`, `products_slug_key`, `products_category_id_fkey`,
/// `products_price_check`.
pub struct ConstraintParser;

// "Key (slug)=(shoes) already exists."
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("key/value pattern"));
static COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"column "([^"]+)""#).expect("column pattern"));
static TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("table pattern")
});

const UNKNOWN_ENTITY: &str = "resource";

impl ConstraintParser {
    /// Returns `(entity, field, value)` for a unique violation.
    ///
    /// The constraint name wins when it is present; otherwise the `Key
    /// (field)=(value)` line is used and the entity falls back to whatever
    /// table the message mentions. Postgres sends that line as the error
    /// detail, separate from the message.
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value(message, details);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        Some((Self::entity_from_message(message), field, value))
    }

    /// Returns `(entity, field)` for a not-null violation.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| UNKNOWN_ENTITY.to_string());
        Some((entity, field))
    }

    /// Returns `(entity, field, referenced_value)` for a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value(message, details);

        if let Some((entity, field)) =
            constraint_name.and_then(Self::parse_foreign_key_constraint_name)
        {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        Some((Self::entity_from_message(message), field, value))
    }

    /// Returns `(entity, field)` for a check constraint violation.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        Some((Self::entity_from_message(message), field))
    }

    /// Splits `<table>_<column>_<suffix>` into `(table, column)`.
    ///
    /// Table names in this schema are single words, so everything between
    /// the first and the last underscore is the column.
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let (entity, rest) = constraint_name.split_once('_')?;
        let (field, _suffix) = rest.rsplit_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Like [`Self::parse_constraint_name`] but only for `_fkey` names.
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = constraint_name.strip_suffix("_fkey")?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        COLUMN
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        TABLE
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let caps = KEY_VALUE.captures(message)?;
        let field = caps.get(1)?.as_str().to_string();
        let value = caps.get(2)?.as_str().to_string();
        Some((field, value))
    }

    /// `(field, value)` from the `Key (..)=(..)` line, detail first.
    pub fn extract_key_value(message: &str, details: Option<&str>) -> Option<(String, String)> {
        details
            .and_then(Self::extract_key_value_from_message)
            .or_else(|| Self::extract_key_value_from_message(message))
    }

    fn entity_from_message(message: &str) -> String {
        Self::extract_table_from_message(message).unwrap_or_else(|| UNKNOWN_ENTITY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLUG_CLASH: &str = "duplicate key value violates unique constraint \"products_slug_key\"";
    const SLUG_CLASH_DETAIL: &str = "Key (slug)=(red-shoe) already exists.";

    #[test]
    fn test_unique_violation_from_constraint_name() {
        let result = ConstraintParser::parse_unique_violation(
            SLUG_CLASH,
            Some(SLUG_CLASH_DETAIL),
            Some("products_slug_key"),
        );
        assert_eq!(
            result,
            Some(("products".to_string(), "slug".to_string(), "red-shoe".to_string()))
        );
    }

    #[test]
    fn test_unique_violation_from_detail_only() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (slug)=(shoes) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None, None);
        assert_eq!(
            result,
            Some(("resource".to_string(), "slug".to_string(), "shoes".to_string()))
        );
    }

    #[test]
    fn test_unique_violation_without_any_hint() {
        assert_eq!(ConstraintParser::parse_unique_violation("boom", None, None), None);
    }

    #[test]
    fn test_not_null_violation_reads_relation() {
        let message =
            "null value in column \"price\" of relation \"products\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("products".to_string(), "price".to_string())));
    }

    #[test]
    fn test_foreign_key_violation() {
        let message = "insert or update on table \"products\" violates foreign key constraint \"products_category_id_fkey\"";
        let details = "Key (category_id)=(0f5e) is not present in table \"categories\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some(details),
            Some("products_category_id_fkey"),
        );
        assert_eq!(
            result,
            Some(("products".to_string(), "category_id".to_string(), "0f5e".to_string()))
        );
    }

    #[test]
    fn test_check_violation() {
        let message = "new row for relation \"products\" violates check constraint \"products_price_check\"";
        let result = ConstraintParser::parse_check_violation(message, Some("products_price_check"));
        assert_eq!(result, Some(("products".to_string(), "price".to_string())));
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("categories_slug_key"),
            Some(("categories".to_string(), "slug".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("products_category_id_idx"),
            Some(("products".to_string(), "category_id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("pkey"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("products_key"), None);
    }

    #[test]
    fn test_parse_foreign_key_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("products_category_id_fkey"),
            Some(("products".to_string(), "category_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("categories_slug_key"),
            None
        );
    }

    #[test]
    fn test_unique_violation_never_reports_constraint_name_as_value() {
        let result =
            ConstraintParser::parse_unique_violation(SLUG_CLASH, None, Some("products_slug_key"));
        assert_eq!(
            result,
            Some(("products".to_string(), "slug".to_string(), "duplicate_value".to_string()))
        );
    }

    #[test]
    fn test_extract_key_value_prefers_detail() {
        assert_eq!(
            ConstraintParser::extract_key_value("no key here", Some(SLUG_CLASH_DETAIL)),
            Some(("slug".to_string(), "red-shoe".to_string()))
        );
        assert_eq!(ConstraintParser::extract_key_value("nothing quoted", None), None);
    }
}
