use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::ProductInput;

// =============================================================================
// Validation Messages
// =============================================================================

/// Returned for any product payload that fails its schema, whatever the field.
pub const INVALID_PRODUCT_MESSAGE: &str =
    "All fields (name, description, price, category, inStock) are required and must be valid";

/// Returned when `page` or `limit` is not an integer of at least 1.
pub const INVALID_PAGINATION_MESSAGE: &str = "Page and limit must be positive integers";

/// Returned when the search endpoint is called without `q`.
pub const MISSING_SEARCH_QUERY_MESSAGE: &str = "Search query (q) is required";

// =============================================================================
// Product Schema
// =============================================================================

/// Type rule applied to a single payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// A JSON string with at least one character
    NonEmptyString,
    /// A JSON number; numeric-looking strings are rejected
    Number,
    /// A JSON boolean
    Boolean,
}

impl FieldRule {
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldRule::NonEmptyString => value.as_str().is_some_and(|s| !s.is_empty()),
            FieldRule::Number => value.is_number(),
            FieldRule::Boolean => value.is_boolean(),
        }
    }
}

/// Every field a create or update payload must carry, with its rule.
pub const PRODUCT_SCHEMA: [(&str, FieldRule); 5] = [
    ("name", FieldRule::NonEmptyString),
    ("description", FieldRule::NonEmptyString),
    ("price", FieldRule::Number),
    ("category", FieldRule::NonEmptyString),
    ("inStock", FieldRule::Boolean),
];

/// Validate a create/update payload against [`PRODUCT_SCHEMA`].
///
/// All rules are evaluated in one pass. Any failure, including a payload
/// that is not a JSON object, yields the same [`INVALID_PRODUCT_MESSAGE`].
/// Fields outside the schema are ignored.
pub fn validate_product_payload(payload: &Value) -> AppResult<ProductInput> {
    let Some(object) = payload.as_object() else {
        debug!("Product payload is not a JSON object");
        return Err(invalid_product());
    };

    let failed: Vec<&str> = PRODUCT_SCHEMA
        .iter()
        .filter(|(field, rule)| !object.get(*field).is_some_and(|v| rule.accepts(v)))
        .map(|(field, _)| *field)
        .collect();

    if !failed.is_empty() {
        debug!(?failed, "Product payload failed schema validation");
        return Err(invalid_product());
    }

    // Every rule above matches what the typed fields accept
    ProductInput::deserialize(payload).map_err(|e| {
        debug!(error = %e, "Product payload did not convert after schema pass");
        invalid_product()
    })
}

fn invalid_product() -> AppError {
    AppError::Validation(INVALID_PRODUCT_MESSAGE.to_string())
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Parse a query value as an integer of at least 1.
///
/// Returns `None` for zero, negatives, decimals, empty strings, anything
/// non-numeric and values that overflow `usize`.
pub fn parse_positive_integer(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Require a non-empty search term.
pub fn validate_search_query(q: Option<&str>) -> AppResult<&str> {
    match q {
        Some(term) if !term.is_empty() => Ok(term),
        _ => Err(AppError::Validation(
            MISSING_SEARCH_QUERY_MESSAGE.to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "name": "Desk Lamp",
            "description": "LED lamp with dimmer",
            "price": 35.5,
            "category": "Home",
            "inStock": true
        })
    }

    fn assert_invalid(payload: Value) {
        let err = validate_product_payload(&payload).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), INVALID_PRODUCT_MESSAGE);
    }

    #[test]
    fn test_valid_payload() {
        let input = validate_product_payload(&valid_payload()).unwrap();

        assert_eq!(input.name, "Desk Lamp");
        assert_eq!(input.description, "LED lamp with dimmer");
        assert_eq!(input.price, 35.5);
        assert_eq!(input.category, "Home");
        assert!(input.in_stock);
    }

    #[test]
    fn test_integer_price_and_false_in_stock_are_valid() {
        let mut payload = valid_payload();
        payload["price"] = json!(0);
        payload["inStock"] = json!(false);

        let input = validate_product_payload(&payload).unwrap();
        assert_eq!(input.price, 0.0);
        assert!(!input.in_stock);
    }

    #[test]
    fn test_every_json_number_converts_to_price() {
        for price in [json!(0), json!(-3), json!(u64::MAX), json!(i64::MIN), json!(1.5e300)] {
            let mut payload = valid_payload();
            payload["price"] = price.clone();

            let input = validate_product_payload(&payload).unwrap();
            assert_eq!(input.price, price.as_f64().unwrap());
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut payload = valid_payload();
        payload["id"] = json!("client-chosen");
        payload["color"] = json!("red");

        assert!(validate_product_payload(&payload).is_ok());
    }

    #[test]
    fn test_numeric_string_price_rejected() {
        let mut payload = valid_payload();
        payload["price"] = json!("35.5");
        assert_invalid(payload);
    }

    #[test]
    fn test_string_in_stock_rejected() {
        let mut payload = valid_payload();
        payload["inStock"] = json!("true");
        assert_invalid(payload);
    }

    #[test]
    fn test_empty_strings_rejected() {
        for field in ["name", "description", "category"] {
            let mut payload = valid_payload();
            payload[field] = json!("");
            assert_invalid(payload);
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        for (field, _) in PRODUCT_SCHEMA {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(field);
            assert_invalid(payload);
        }
    }

    #[test]
    fn test_null_fields_rejected() {
        let mut payload = valid_payload();
        payload["price"] = Value::Null;
        assert_invalid(payload);
    }

    #[test]
    fn test_non_object_payloads_rejected() {
        assert_invalid(json!([valid_payload()]));
        assert_invalid(json!("Desk Lamp"));
        assert_invalid(Value::Null);
    }

    #[test]
    fn test_field_rules() {
        assert!(FieldRule::NonEmptyString.accepts(&json!(" ")));
        assert!(!FieldRule::NonEmptyString.accepts(&json!(1)));
        assert!(FieldRule::Number.accepts(&json!(-3.25)));
        assert!(!FieldRule::Number.accepts(&json!("3")));
        assert!(FieldRule::Boolean.accepts(&json!(false)));
        assert!(!FieldRule::Boolean.accepts(&json!(0)));
    }

    #[test]
    fn test_parse_positive_integer() {
        assert_eq!(parse_positive_integer("1"), Some(1));
        assert_eq!(parse_positive_integer("25"), Some(25));
        assert_eq!(parse_positive_integer("0"), None);
        assert_eq!(parse_positive_integer("-1"), None);
        assert_eq!(parse_positive_integer("1.5"), None);
        assert_eq!(parse_positive_integer("abc"), None);
        assert_eq!(parse_positive_integer(""), None);
        assert_eq!(parse_positive_integer("99999999999999999999999999"), None);
    }

    #[test]
    fn test_search_query_required() {
        assert_eq!(validate_search_query(Some("lap")).unwrap(), "lap");

        for q in [None, Some("")] {
            let err = validate_search_query(q).unwrap_err();
            assert_eq!(err.to_string(), MISSING_SEARCH_QUERY_MESSAGE);
        }
    }
}
