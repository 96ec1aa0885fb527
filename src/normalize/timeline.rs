use serde_json::Value;

use crate::types::{TimeWindow, UNKNOWN_OFFSET};

/// Fields whose presence as a string marks a record as a meal.
pub const MEAL_FIELDS: [&str; 3] = ["meal_type", "signature_dish", "outlet"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Place,
    Meal,
}

/// Meal fields take precedence: a record with any of [`MEAL_FIELDS`] as a
/// string is a meal even when it also names a place.
pub fn classify(record: &Value) -> RecordKind {
    let is_meal = MEAL_FIELDS
        .iter()
        .any(|field| record.get(*field).is_some_and(Value::is_string));
    if is_meal {
        RecordKind::Meal
    } else {
        RecordKind::Place
    }
}

/// Parse an `"HH:MM-HH:MM"` label. Each side is parsed on its own; a side
/// that is missing or malformed gets [`UNKNOWN_OFFSET`].
pub fn parse_time_range(label: &str) -> TimeWindow {
    let mut sides = label.split('-');
    let start_minutes = sides.next().and_then(parse_clock).unwrap_or(UNKNOWN_OFFSET);
    let end_minutes = sides.next().and_then(parse_clock).unwrap_or(UNKNOWN_OFFSET);

    TimeWindow {
        time: label.to_string(),
        start_minutes,
        end_minutes,
    }
}

/// Minutes since midnight for `"H:M"`.
pub fn parse_clock(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut parts = raw.split(':');
    let hours = parse_component(parts.next()?)?;
    let minutes = parse_component(parts.next()?)?;
    hours.checked_mul(60)?.checked_add(minutes)
}

fn parse_component(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_well_formed_ranges() {
        let window = parse_time_range("14:00-15:30");
        assert_eq!(window.start_minutes, 840);
        assert_eq!(window.end_minutes, 930);
        assert_eq!(window.time, "14:00-15:30");
    }

    #[test]
    fn test_tolerates_whitespace_around_separator() {
        let window = parse_time_range(" 09:05 - 10:45 ");
        assert_eq!(window.start_minutes, 545);
        assert_eq!(window.end_minutes, 645);
    }

    #[test]
    fn test_malformed_labels_are_unknown() {
        for label in ["", "noon", "ab:cd-ef:gh", "-", "9-10", "9:x-10:y"] {
            let window = parse_time_range(label);
            assert_eq!(window.start_minutes, UNKNOWN_OFFSET, "{label}");
            assert_eq!(window.end_minutes, UNKNOWN_OFFSET, "{label}");
        }
    }

    #[test]
    fn test_missing_end_only_affects_end() {
        let window = parse_time_range("09:00");
        assert_eq!(window.start_minutes, 540);
        assert_eq!(window.end_minutes, UNKNOWN_OFFSET);
    }

    #[test]
    fn test_empty_minute_component_is_unknown() {
        let window = parse_time_range("09:-10:00");
        assert_eq!(window.start_minutes, UNKNOWN_OFFSET);
        assert_eq!(window.end_minutes, 600);
    }

    #[test]
    fn test_meal_fields_win_over_place_fields() {
        assert_eq!(
            classify(&json!({"place_name": "Fort", "outlet": "Cafe X"})),
            RecordKind::Meal
        );
        assert_eq!(classify(&json!({"signature_dish": "Dal"})), RecordKind::Meal);
        assert_eq!(classify(&json!({"place_name": "Fort"})), RecordKind::Place);
        assert_eq!(classify(&json!({"meal_type": 3})), RecordKind::Place);
    }
}
