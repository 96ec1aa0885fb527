use serde_json::{Map, Value};
use tracing::debug;

use super::coerce::{
    bool_or, finite_number, first_array, first_string, non_empty_string, number_or, string_or,
    whole_number,
};
use super::timeline::{classify, parse_time_range, RecordKind};
use crate::types::{
    BudgetSummary, DayPlan, FullItinerary, HotelRecommendation, Itinerary, ItineraryMetadata,
    MealStop, PlaceVisit, TimelineEntry,
};

const DAY_KEYS: [&str; 4] = ["days", "day_plans", "plan", "schedule"];
const PLACE_KEYS: [&str; 3] = ["schedule_blocks", "timeline", "activities"];
const MEAL_KEYS: [&str; 1] = ["food_halts"];

pub const DEFAULT_TITLE: &str = "Your AI Travel Itinerary";
pub const DEFAULT_HOTEL_AREA: &str = "Central Area";
pub const DEFAULT_HOTEL_REASON: &str = "Chosen for connectivity and access to key places.";
pub const DEFAULT_PLACE_NAME: &str = "Planned stop";
pub const DEFAULT_PLACE_REASON: &str = "Recommended by itinerary engine.";
pub const DEFAULT_MEAL_TYPE: &str = "Meal";
pub const DEFAULT_OUTLET: &str = "Recommended outlet";
pub const DEFAULT_SIGNATURE_DISH: &str = "Chef special";
pub const DEFAULT_MEAL_AREA: &str = "City Center";
pub const DEFAULT_GEOGRAPHIC_FLOW: &str = "Optimized local flow";
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalize a raw `full-itinerary` response. Never fails: anything missing
/// or wrong-typed is replaced by its default.
pub fn normalize_itinerary(raw: &Value) -> FullItinerary {
    let itinerary_raw = raw.get("itinerary").unwrap_or(&Value::Null);

    let days: Vec<DayPlan> = first_array(itinerary_raw, &DAY_KEYS)
        .iter()
        .enumerate()
        .map(|(index, day)| normalize_day(day, index))
        .collect();

    debug!(
        target: "trip_viewer::normalize",
        days = days.len(),
        entries = days.iter().map(|day| day.timeline.len()).sum::<usize>(),
        "normalized itinerary"
    );

    FullItinerary {
        itinerary: Itinerary {
            title: string_or(itinerary_raw.get("title"), DEFAULT_TITLE),
            hotel_recommendation: normalize_hotel(itinerary_raw.get("hotel_recommendation")),
            days,
            total_estimated_cost: number_or(itinerary_raw.get("total_estimated_cost"), 0.0),
            within_budget: bool_or(itinerary_raw.get("within_budget"), false),
            budget_summary: normalize_budget_summary(itinerary_raw.get("budget_summary")),
        },
        metadata: normalize_metadata(raw.get("metadata")),
    }
}

/// `index` is the day's position in the received array.
pub fn normalize_day(raw: &Value, index: usize) -> DayPlan {
    let position = u32::try_from(index + 1).unwrap_or(u32::MAX);

    let places = first_array(raw, &PLACE_KEYS)
        .iter()
        .map(|record| match classify(record) {
            RecordKind::Meal => TimelineEntry::Meal(normalize_meal(record)),
            RecordKind::Place => TimelineEntry::Place(normalize_place(record)),
        });
    let meals = first_array(raw, &MEAL_KEYS)
        .iter()
        .map(|record| TimelineEntry::Meal(normalize_meal(record)));

    let mut timeline: Vec<TimelineEntry> = places.chain(meals).collect();
    // Stable: equal offsets keep input order, unknown times sink to the end.
    timeline.sort_by_key(TimelineEntry::start_minutes);

    DayPlan {
        day: whole_number(raw.get("day"))
            .and_then(|day| u32::try_from(day).ok())
            .unwrap_or(position),
        title: string_or(raw.get("title"), &format!("Day {position}")),
        day_time_window: string_or(raw.get("day_time_window"), ""),
        geographic_flow: first_string(raw, &["geographic_flow", "geographic_flow_explanation"])
            .unwrap_or(DEFAULT_GEOGRAPHIC_FLOW)
            .to_string(),
        walking_distance: walking_distance_label(raw.get("total_walking_km_estimate")),
        timeline,
        estimated_day_cost: number_or(raw.get("estimated_day_cost"), 0.0),
    }
}

pub fn normalize_place(raw: &Value) -> PlaceVisit {
    PlaceVisit {
        window: parse_time_range(&string_or(raw.get("time"), "")),
        place_name: first_string(raw, &["place_name", "place"])
            .unwrap_or(DEFAULT_PLACE_NAME)
            .to_string(),
        reason_for_time_choice: string_or(raw.get("reason_for_time_choice"), DEFAULT_PLACE_REASON),
        image_url: non_empty_string(raw.get("image_url")),
        area: non_empty_string(raw.get("area")),
        description: non_empty_string(raw.get("description")),
    }
}

pub fn normalize_meal(raw: &Value) -> MealStop {
    MealStop {
        window: parse_time_range(&string_or(raw.get("time"), "")),
        meal_type: string_or(raw.get("meal_type"), DEFAULT_MEAL_TYPE),
        outlet: string_or(raw.get("outlet"), DEFAULT_OUTLET),
        signature_dish: string_or(raw.get("signature_dish"), DEFAULT_SIGNATURE_DISH),
        area: string_or(raw.get("area"), DEFAULT_MEAL_AREA),
        reason_selected: non_empty_string(raw.get("reason_selected")),
    }
}

pub fn normalize_hotel(raw: Option<&Value>) -> HotelRecommendation {
    let raw = raw.unwrap_or(&Value::Null);
    HotelRecommendation {
        area: string_or(raw.get("area"), DEFAULT_HOTEL_AREA),
        reason: string_or(raw.get("reason"), DEFAULT_HOTEL_REASON),
    }
}

/// `"N.N km"` for a finite positive estimate, `"N/A"` for anything else.
pub fn walking_distance_label(raw: Option<&Value>) -> String {
    match finite_number(raw) {
        Some(km) if km > 0.0 => format!("{km:.1} km"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn normalize_budget_summary(raw: Option<&Value>) -> Option<BudgetSummary> {
    let raw = raw.filter(|value| value.is_object())?;
    Some(BudgetSummary {
        total_budget: finite_number(raw.get("total_budget")),
        estimated_spend: finite_number(raw.get("estimated_spend")),
    })
}

const METADATA_KEYS: [&str; 6] = [
    "total_latency_ms",
    "num_places_discovered",
    "num_clusters",
    "mandatory_top_places",
    "budget",
    "destination_city",
];

/// Known statistics are typed when well-formed; other keys pass through.
pub fn normalize_metadata(raw: Option<&Value>) -> ItineraryMetadata {
    let Some(object) = raw.and_then(Value::as_object) else {
        return ItineraryMetadata::default();
    };

    let extra: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    ItineraryMetadata {
        total_latency_ms: finite_number(object.get("total_latency_ms")),
        num_places_discovered: whole_number(object.get("num_places_discovered")),
        num_clusters: whole_number(object.get("num_clusters")),
        mandatory_top_places: object
            .get("mandatory_top_places")
            .and_then(Value::as_array)
            .map(|places| {
                places
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        budget: finite_number(object.get("budget")),
        destination_city: object
            .get("destination_city")
            .and_then(Value::as_str)
            .map(str::to_string),
        extra,
    }
}
