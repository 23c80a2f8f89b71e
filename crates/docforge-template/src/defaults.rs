/*
 * defaults.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Layering field defaults under caller data.

use crate::schema::Field;
use crate::value::DataRecord;

/// Build the effective record: `data` plus the default of every field whose
/// key is absent or `null`.
///
/// `""`, `0` and `false` are deliberate values and are kept. `data` itself is
/// not modified.
pub fn merge_with_defaults(fields: &[Field], data: &DataRecord) -> DataRecord {
    let mut merged = data.clone();
    for field in fields {
        let Some(default) = &field.default_value else {
            continue;
        };
        if merged.get_present(&field.key).is_none() {
            tracing::trace!(key = %field.key, "Applying field default");
            merged.insert(field.key.clone(), default.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::value::DataValue;
    use pretty_assertions::assert_eq;

    fn tax_field() -> Field {
        Field::new("f", "tax", "Tax", FieldType::Number).with_default(0)
    }

    #[test]
    fn test_caller_value_wins() {
        let data: DataRecord = [("tax", 5)].into_iter().collect();
        let merged = merge_with_defaults(&[tax_field()], &data);
        assert_eq!(merged.get("tax"), Some(&DataValue::from(5)));
    }

    #[test]
    fn test_absent_key_gets_default() {
        let merged = merge_with_defaults(&[tax_field()], &DataRecord::new());
        assert_eq!(merged.get("tax"), Some(&DataValue::from(0)));
    }

    #[test]
    fn test_null_gets_default() {
        let data: DataRecord = [("tax", DataValue::Null)].into_iter().collect();
        let merged = merge_with_defaults(&[tax_field()], &data);
        assert_eq!(merged.get("tax"), Some(&DataValue::from(0)));
    }

    #[test]
    fn test_falsy_values_are_preserved() {
        let fields = vec![
            Field::new("a", "note", "Note", FieldType::Text).with_default("n/a"),
            Field::new("b", "count", "Count", FieldType::Number).with_default(3),
            Field::new("c", "paid", "Paid", FieldType::Checkbox).with_default(true),
        ];
        let data: DataRecord = [
            ("note", DataValue::from("")),
            ("count", DataValue::from(0)),
            ("paid", DataValue::from(false)),
        ]
        .into_iter()
        .collect();

        let merged = merge_with_defaults(&fields, &data);
        assert_eq!(merged, data);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data: DataRecord = [("other", "x")].into_iter().collect();
        let before = data.clone();
        let merged = merge_with_defaults(&[tax_field()], &data);

        assert_eq!(data, before);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_fields_without_defaults_are_ignored() {
        let field = Field::new("f", "name", "Name", FieldType::Text);
        let merged = merge_with_defaults(&[field], &DataRecord::new());
        assert!(merged.is_empty());
    }
}
