//! Cell formatting for raw row values.
//!
//! Rows arrive as JSON straight from the data endpoints and may be dirty.
//! Formatting never fails: anything that does not look like a number is
//! shown as zero.

use serde_json::Value;

use crate::entity::EntityKind;

/// Coerces a JSON value to a finite number, falling back to `0.0`.
///
/// - numbers are taken as-is
/// - strings are trimmed and parsed, an empty string is zero
/// - booleans map to `1.0` / `0.0`
/// - `null`, arrays and objects are zero
///
/// NaN and infinities (including parsed `"inf"`) also collapse to zero.
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    finite_or_zero(number)
}

/// Folds NaN, infinities and `-0.0` into `0.0`.
fn finite_or_zero(number: f64) -> f64 {
    if number.is_finite() && number != 0.0 {
        number
    } else {
        0.0
    }
}

/// Formats a fraction as a percentage with one decimal place.
///
/// `0.5` becomes `"50.0%"`. Halves round away from zero and the sign is
/// kept, so `-0.2` becomes `"-20.0%"`. A result that overflows or rounds
/// to negative zero is shown as `"0.0%"`.
pub fn format_percentage(value: &Value) -> String {
    let percent = coerce_number(value) * 100.0;
    let rounded = finite_or_zero((percent * 10.0).round() / 10.0);
    format!("{rounded:.1}%")
}

/// Renders the edit action for one row.
///
/// Returns an empty string when the row has no usable `id`, so a broken
/// row shows an empty cell instead of a dead link.
pub fn format_edit_link(entity: EntityKind, id: &Value) -> String {
    let id = match id {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return String::new(),
    };

    format!(
        r#"<a href="{}" class="btn btn-sm btn-outline-primary">Edit</a>"#,
        entity.edit_path(id)
    )
}

/// Renders a value without a formatter, the way the grid would print it.
pub fn format_plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn percentage_of_fractions() {
        assert_eq!(format_percentage(&json!(0.5)), "50.0%");
        assert_eq!(format_percentage(&json!(1)), "100.0%");
        assert_eq!(format_percentage(&json!(0.4237)), "42.4%");
        assert_eq!(format_percentage(&json!(0)), "0.0%");
    }

    #[test]
    fn percentage_keeps_sign() {
        assert_eq!(format_percentage(&json!(-0.2)), "-20.0%");
        assert_eq!(format_percentage(&json!(1.5)), "150.0%");
    }

    #[test]
    fn percentage_of_dirty_values_is_zero() {
        assert_eq!(format_percentage(&json!("not a number")), "0.0%");
        assert_eq!(format_percentage(&json!(null)), "0.0%");
        assert_eq!(format_percentage(&json!("")), "0.0%");
        assert_eq!(format_percentage(&json!([1, 2])), "0.0%");
        assert_eq!(format_percentage(&json!({"rate": 0.5})), "0.0%");
        assert_eq!(format_percentage(&json!("inf")), "0.0%");
        assert_eq!(format_percentage(&json!("-0")), "0.0%");
        // Finite inputs that overflow once scaled
        assert_eq!(format_percentage(&json!(1e307)), "0.0%");
        assert_eq!(format_percentage(&json!("1e308")), "0.0%");
        assert_eq!(format_percentage(&json!(-1e307)), "0.0%");
        // Rounds to negative zero
        assert_eq!(format_percentage(&json!(-0.0004)), "0.0%");
    }

    #[test]
    fn percentage_of_numeric_strings() {
        assert_eq!(format_percentage(&json!(" 0.25 ")), "25.0%");
        assert_eq!(format_percentage(&json!("1")), "100.0%");
        assert_eq!(format_percentage(&json!(true)), "100.0%");
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(format_percentage(&json!(0.12345)), "12.3%");
        assert_eq!(format_percentage(&json!(0.9999)), "100.0%");
        assert_eq!(format_percentage(&json!(-0.12345)), "-12.3%");
    }

    #[test]
    fn edit_link_targets_entity_edit_page() {
        assert_eq!(
            format_edit_link(EntityKind::Deck, &json!(3)),
            r#"<a href="/deck/edit/3" class="btn btn-sm btn-outline-primary">Edit</a>"#
        );
        assert_eq!(
            format_edit_link(EntityKind::Player, &json!("41")),
            r#"<a href="/player/edit/41" class="btn btn-sm btn-outline-primary">Edit</a>"#
        );
    }

    #[test]
    fn edit_link_without_id_is_empty() {
        assert_eq!(format_edit_link(EntityKind::Deck, &json!(null)), "");
        assert_eq!(format_edit_link(EntityKind::Deck, &json!("  ")), "");
    }

    #[test]
    fn plain_values() {
        assert_eq!(format_plain(&json!("Atraxa")), "Atraxa");
        assert_eq!(format_plain(&json!(12)), "12");
        assert_eq!(format_plain(&json!(null)), "");
    }
}
