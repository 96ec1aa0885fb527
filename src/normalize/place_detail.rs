use serde_json::Value;

use super::coerce::{bool_or, non_empty_string, string_list, string_or};
use crate::types::{LanguageOutput, LanguageOutputs, PlaceDetailResult};

pub const DEFAULT_LOCAL_LANGUAGE: &str = "Local";

/// Normalize a raw `place-detail-tts` response. Relative audio addresses are
/// resolved against `base_url`. Never fails.
pub fn normalize_place_detail(raw: &Value, base_url: &str) -> PlaceDetailResult {
    let outputs = raw.get("outputs").unwrap_or(&Value::Null);

    PlaceDetailResult {
        place: string_or(raw.get("place"), ""),
        destination_city: string_or(raw.get("destination_city"), ""),
        local_language: string_or(raw.get("local_language"), DEFAULT_LOCAL_LANGUAGE),
        local_text: non_empty_string(raw.get("local_text")),
        constraints: string_list(raw.get("constraints")),
        special_cautions: string_list(raw.get("special_cautions")),
        outputs: LanguageOutputs {
            english: normalize_language_output(outputs.get("english"), base_url),
            hindi: normalize_language_output(outputs.get("hindi"), base_url),
            local: normalize_language_output(outputs.get("local"), base_url),
        },
        cached: bool_or(raw.get("cached"), false),
    }
}

/// `None` unless the slot is an object, so a missing language stays
/// distinguishable from an empty one.
fn normalize_language_output(raw: Option<&Value>, base_url: &str) -> Option<LanguageOutput> {
    let raw = raw.filter(|value| value.is_object())?;
    Some(LanguageOutput {
        text: string_or(raw.get("text"), ""),
        audio_file: string_or(raw.get("audio_file"), ""),
        audio_url: resolve_audio_url(&string_or(raw.get("audio_url"), ""), base_url),
    })
}

/// Absolute `http(s)://` addresses pass through; anything else is joined to
/// the service base address. Empty stays empty.
pub fn resolve_audio_url(url: &str, base_url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:8000";

    #[test]
    fn test_resolves_relative_audio_against_base() {
        assert_eq!(
            resolve_audio_url("/audio/x.mp3", BASE),
            "http://localhost:8000/audio/x.mp3"
        );
        assert_eq!(
            resolve_audio_url("audio/x.mp3", "http://localhost:8000/"),
            "http://localhost:8000/audio/x.mp3"
        );
        assert_eq!(
            resolve_audio_url("https://cdn.example.com/x.mp3", BASE),
            "https://cdn.example.com/x.mp3"
        );
        assert_eq!(resolve_audio_url("", BASE), "");
    }

    #[test]
    fn test_defaults_for_empty_payload() {
        let result = normalize_place_detail(&json!(null), BASE);
        assert_eq!(result.place, "");
        assert_eq!(result.local_language, DEFAULT_LOCAL_LANGUAGE);
        assert_eq!(result.local_text, None);
        assert!(result.constraints.is_empty());
        assert_eq!(result.outputs, LanguageOutputs::default());
        assert!(!result.cached);
    }

    #[test]
    fn test_malformed_slots_are_omitted() {
        let result = normalize_place_detail(
            &json!({"outputs": {"english": "hello", "hindi": {}, "local": null}}),
            BASE,
        );
        assert!(result.outputs.english.is_none());
        assert_eq!(result.outputs.hindi, Some(LanguageOutput::default()));
        assert!(result.outputs.local.is_none());
    }

    #[test]
    fn test_cached_flag_requires_boolean() {
        assert!(normalize_place_detail(&json!({"cached": true}), BASE).cached);
        assert!(!normalize_place_detail(&json!({"cached": "yes"}), BASE).cached);
    }
}
