use serde_json::json;
use trip_viewer::{
    normalize::{classify, parse_time_range, RecordKind},
    normalize_itinerary, normalize_place_detail,
    types::{ItineraryMetadata, TimelineEntry, UNKNOWN_OFFSET},
};

const BASE: &str = "http://planner.local:8000";

#[test]
fn test_valid_time_ranges_parse_to_minutes() {
    for (h1, m1, h2, m2) in [(0, 0, 0, 30), (9, 5, 10, 45), (14, 0, 15, 30), (23, 59, 23, 59)] {
        let label = format!("{h1:02}:{m1:02}-{h2:02}:{m2:02}");
        let window = parse_time_range(&label);
        assert_eq!(window.start_minutes, h1 * 60 + m1, "{label}");
        assert_eq!(window.end_minutes, h2 * 60 + m2, "{label}");
    }
}

#[test]
fn test_malformed_time_labels_sort_last() {
    for label in ["", "soon", "aa:bb-cc:dd", "10-11", "-"] {
        let window = parse_time_range(label);
        assert_eq!(window.start_minutes, UNKNOWN_OFFSET);
        assert_eq!(window.end_minutes, UNKNOWN_OFFSET);
    }
}

#[test]
fn test_day_scenario_merges_meals_and_places() {
    let raw = json!({
        "itinerary": {
            "days": [{
                "day": 2,
                "schedule_blocks": [{"time": "09:00-10:00", "place_name": "Fort"}],
                "food_halts": [{"time": "08:00-08:30", "meal_type": "Breakfast", "outlet": "Cafe X"}]
            }]
        }
    });

    let data = normalize_itinerary(&raw);
    let day = &data.itinerary.days[0];
    assert_eq!(day.day, 2);
    assert_eq!(day.timeline.len(), 2);

    match &day.timeline[0] {
        TimelineEntry::Meal(meal) => {
            assert_eq!(meal.meal_type, "Breakfast");
            assert_eq!(meal.outlet, "Cafe X");
            assert_eq!(meal.window.start_minutes, 480);
        }
        other => panic!("expected breakfast first, got {other:?}"),
    }
    match &day.timeline[1] {
        TimelineEntry::Place(place) => {
            assert_eq!(place.place_name, "Fort");
            assert_eq!(place.window.start_minutes, 540);
        }
        other => panic!("expected fort second, got {other:?}"),
    }
}

#[test]
fn test_timeline_is_stable_and_complete() {
    let raw = json!({
        "itinerary": {
            "days": [{
                "timeline": [
                    {"time": "later", "place_name": "Unknown A"},
                    {"time": "10:00-11:00", "place_name": "Museum"},
                    {"time": "10:00-10:30", "place_name": "Gate"},
                    {"place_name": "Unknown B"}
                ],
                "food_halts": [
                    {"time": "10:00-10:45", "meal_type": "Brunch"},
                    {"time": "19:00-20:00", "meal_type": "Dinner"}
                ]
            }]
        }
    });

    let day = &normalize_itinerary(&raw).itinerary.days[0];
    assert_eq!(day.timeline.len(), 6);

    let starts: Vec<u32> = day.timeline.iter().map(TimelineEntry::start_minutes).collect();
    assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));

    let names: Vec<String> = day
        .timeline
        .iter()
        .map(|entry| match entry {
            TimelineEntry::Place(place) => place.place_name.clone(),
            TimelineEntry::Meal(meal) => meal.meal_type.clone(),
        })
        .collect();
    assert_eq!(
        names,
        vec!["Museum", "Gate", "Brunch", "Dinner", "Unknown A", "Unknown B"]
    );
}

#[test]
fn test_meal_fields_take_precedence() {
    let record = json!({"place_name": "Fort Cafe", "signature_dish": "Kachori"});
    assert_eq!(classify(&record), RecordKind::Meal);

    let raw = json!({"itinerary": {"days": [{"schedule_blocks": [record]}]}});
    let day = &normalize_itinerary(&raw).itinerary.days[0];
    match &day.timeline[0] {
        TimelineEntry::Meal(meal) => assert_eq!(meal.signature_dish, "Kachori"),
        other => panic!("expected a meal, got {other:?}"),
    }
}

#[test]
fn test_alternate_day_keys() {
    let raw = json!({"itinerary": {"day_plans": [{"title": "Arrival"}, {}]}});
    let days = normalize_itinerary(&raw).itinerary.days;
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].title, "Arrival");
    assert_eq!(days[1].title, "Day 2");
    assert_eq!(days[1].day, 2);
}

#[test]
fn test_duplicate_day_numbers_keep_array_order() {
    let raw = json!({"itinerary": {"days": [{"day": 3}, {"day": 1}, {"day": 3}]}});
    let numbers: Vec<u32> = normalize_itinerary(&raw)
        .itinerary
        .days
        .iter()
        .map(|day| day.day)
        .collect();
    assert_eq!(numbers, vec![3, 1, 3]);
}

#[test]
fn test_missing_days_and_hotel_use_defaults() {
    let data = normalize_itinerary(&json!({}));
    let itinerary = &data.itinerary;
    assert!(itinerary.days.is_empty());
    assert_eq!(itinerary.title, "Your AI Travel Itinerary");
    assert_eq!(itinerary.hotel_recommendation.area, "Central Area");
    assert_eq!(
        itinerary.hotel_recommendation.reason,
        "Chosen for connectivity and access to key places."
    );
    assert_eq!(itinerary.total_estimated_cost, 0.0);
    assert!(!itinerary.within_budget);
    assert_eq!(data.metadata, ItineraryMetadata::default());
}

#[test]
fn test_non_object_payloads_never_fail() {
    for raw in [json!(null), json!([1, 2]), json!("oops"), json!({"itinerary": 5})] {
        let data = normalize_itinerary(&raw);
        assert!(data.itinerary.days.is_empty());
    }
}

#[test]
fn test_within_budget_requires_literal_true() {
    let string_flag = normalize_itinerary(&json!({"itinerary": {"within_budget": "true"}}));
    assert!(!string_flag.itinerary.within_budget);

    let bool_flag = normalize_itinerary(&json!({"itinerary": {"within_budget": true}}));
    assert!(bool_flag.itinerary.within_budget);
}

#[test]
fn test_place_detail_resolves_audio_and_omits_missing_slots() {
    let raw = json!({
        "place": "Amber Fort",
        "outputs": {"english": {"text": "hi", "audio_url": "/a.mp3"}}
    });

    let result = normalize_place_detail(&raw, BASE);
    let english = result.outputs.english.as_ref().unwrap();
    assert_eq!(english.text, "hi");
    assert_eq!(english.audio_url, format!("{BASE}/a.mp3"));
    assert_eq!(english.audio_file, "");
    assert!(result.outputs.hindi.is_none());
    assert!(result.outputs.local.is_none());

    let value = serde_json::to_value(&result).unwrap();
    assert!(value["outputs"].get("hindi").is_none());
}

#[test]
fn test_place_detail_keeps_absolute_audio() {
    let raw = json!({
        "outputs": {
            "english": {"audio_url": "http://cdn.example.com/en.mp3"},
            "hindi": {"audio_url": "https://cdn.example.com/hi.mp3"}
        }
    });
    let result = normalize_place_detail(&raw, BASE);
    assert_eq!(
        result.outputs.english.unwrap().audio_url,
        "http://cdn.example.com/en.mp3"
    );
    assert_eq!(
        result.outputs.hindi.unwrap().audio_url,
        "https://cdn.example.com/hi.mp3"
    );
}

#[test]
fn test_place_detail_lists_and_flags() {
    let raw = json!({
        "local_language": "Marathi",
        "constraints": ["Closed on Mondays ", ""],
        "special_cautions": "Steep stairs",
        "cached": true
    });
    let result = normalize_place_detail(&raw, BASE);
    assert_eq!(result.local_language, "Marathi");
    assert_eq!(result.constraints, vec!["Closed on Mondays"]);
    assert_eq!(result.special_cautions, vec!["Steep stairs"]);
    assert!(result.cached);
}
