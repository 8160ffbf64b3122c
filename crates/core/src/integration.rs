//! Field mapping for integration imports.
//!
//! An integration stores a JSON object mapping external column names to
//! internal field names. Imported rows are reshaped through that mapping
//! before they reach a create DTO.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Rename the keys of `row` according to `mappings` (`external -> internal`).
///
/// Unmapped keys are dropped; mapped keys missing from the row are skipped.
/// Non-object inputs produce an empty object.
pub fn apply_field_mapping(row: &Value, mappings: &Value) -> Value {
    let (Some(row), Some(mappings)) = (row.as_object(), mappings.as_object()) else {
        return Value::Object(Map::new());
    };

    let mut mapped = Map::new();
    for (external, internal) in mappings {
        let (Some(internal), Some(value)) = (internal.as_str(), row.get(external)) else {
            continue;
        };
        mapped.insert(internal.to_string(), value.clone());
    }
    Value::Object(mapped)
}

/// Validate an integration's field mapping object.
///
/// Rejects non-objects, empty keys or targets, non-string targets, and two
/// external keys that map onto the same internal field.
pub fn validate_field_mappings(mappings: &Value) -> Result<(), CoreError> {
    let Some(obj) = mappings.as_object() else {
        return Err(CoreError::Validation(
            "Field mappings must be a JSON object".to_string(),
        ));
    };

    let mut targets = HashSet::new();
    for (external, internal) in obj {
        if external.trim().is_empty() {
            return Err(CoreError::Validation(
                "Field mapping keys must not be empty".to_string(),
            ));
        }
        let Some(internal) = internal.as_str() else {
            return Err(CoreError::Validation(format!(
                "Mapping for '{external}' must be a string"
            )));
        };
        if internal.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Mapping for '{external}' must not be empty"
            )));
        }
        if !targets.insert(internal) {
            return Err(CoreError::Validation(format!(
                "Internal field '{internal}' is mapped more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_renames_and_drops_keys() {
        let row = json!({"Device Name": "LT-042", "Serial #": "C02XK", "Owner": "ana"});
        let mappings = json!({"Device Name": "name", "Serial #": "serial"});

        let mapped = apply_field_mapping(&row, &mappings);
        assert_eq!(mapped, json!({"name": "LT-042", "serial": "C02XK"}));
    }

    #[test]
    fn mapping_skips_missing_columns() {
        let row = json!({"Device Name": "LT-042"});
        let mappings = json!({"Device Name": "name", "Cost": "purchase_cost"});
        assert_eq!(apply_field_mapping(&row, &mappings), json!({"name": "LT-042"}));
    }

    #[test]
    fn non_object_row_maps_to_empty() {
        assert_eq!(apply_field_mapping(&json!([1, 2]), &json!({"a": "b"})), json!({}));
    }

    #[test]
    fn valid_mappings_accepted() {
        assert!(validate_field_mappings(&json!({"A": "name", "B": "serial"})).is_ok());
        assert!(validate_field_mappings(&json!({})).is_ok());
    }

    #[test]
    fn duplicate_target_rejected() {
        let err = validate_field_mappings(&json!({"A": "name", "B": "name"})).unwrap_err();
        assert!(err.to_string().contains("mapped more than once"));
    }

    #[test]
    fn malformed_mappings_rejected() {
        assert!(validate_field_mappings(&json!("name")).is_err());
        assert!(validate_field_mappings(&json!({"": "name"})).is_err());
        assert!(validate_field_mappings(&json!({"A": 3})).is_err());
        assert!(validate_field_mappings(&json!({"A": " "})).is_err());
    }
}
