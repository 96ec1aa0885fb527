use std::fmt::Write as _;

use crate::{
    core::DetailOverlay,
    types::{DayPlan, FullItinerary, GalleryPlace, ItineraryMetadata, TimelineEntry},
};

const NOT_AVAILABLE: &str = "N/A";

/// Whole-unit amount with thousands separators, `N/A` when not finite.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn latency_label(metadata: &ItineraryMetadata) -> String {
    metadata
        .total_latency_ms
        .map(|ms| format!("{:.1}s", ms / 1000.0))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn count_label(value: Option<u64>) -> String {
    value
        .map(|count| count.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn render_input_prompt(last_error: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "No itinerary loaded.");
    if let Some(error) = last_error {
        let _ = writeln!(out, "Error: {error}");
    }
    let _ = writeln!(
        out,
        "Start planning with: trip-viewer plan --from <home> --to <destination> --days <n> --budget <amount>"
    );
    out
}

pub fn render_itinerary(data: &FullItinerary, selected_day: usize) -> String {
    let itinerary = &data.itinerary;
    let metadata = &data.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "{}", itinerary.title);
    let _ = writeln!(
        out,
        "Generated route across {} day(s)",
        itinerary.days.len()
    );
    let _ = writeln!(out);

    let hotel = &itinerary.hotel_recommendation;
    let _ = writeln!(out, "Hotel: {}", hotel.area);
    let _ = writeln!(out, "  {}", hotel.reason);
    if let Some(url) = hotel.search_url() {
        let _ = writeln!(out, "  {url}");
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Estimated cost: {}  ({})",
        format_amount(itinerary.total_estimated_cost),
        if itinerary.within_budget {
            "within budget"
        } else {
            "over budget or unconfirmed"
        }
    );
    if let Some(summary) = &itinerary.budget_summary {
        let _ = writeln!(
            out,
            "Budget: {} / spend {}",
            summary.total_budget.map(format_amount).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            summary
                .estimated_spend
                .map(format_amount)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        );
    }
    let _ = writeln!(
        out,
        "Places discovered: {}  Clusters: {}  Planning time: {}",
        count_label(metadata.num_places_discovered),
        count_label(metadata.num_clusters),
        latency_label(metadata)
    );
    if !metadata.mandatory_top_places.is_empty() {
        let _ = writeln!(out, "Top places: {}", metadata.mandatory_top_places.join(", "));
    }
    let _ = writeln!(out);

    let tabs: Vec<String> = itinerary
        .days
        .iter()
        .enumerate()
        .map(|(index, day)| {
            if index == selected_day {
                format!("[Day {}]", day.day)
            } else {
                format!(" Day {} ", day.day)
            }
        })
        .collect();
    if !tabs.is_empty() {
        let _ = writeln!(out, "{}", tabs.join(" "));
        let _ = writeln!(out);
    }

    match itinerary.day_or_first(selected_day) {
        Some(day) => out.push_str(&render_day(day)),
        None => {
            let _ = writeln!(out, "No days in this itinerary.");
        }
    }
    out
}

pub fn render_day(day: &DayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", day.title);
    let _ = writeln!(out, "  {}", day.geographic_flow);
    if !day.day_time_window.is_empty() {
        let _ = writeln!(out, "  Active window: {}", day.day_time_window);
    }
    let _ = writeln!(
        out,
        "  Walking: {}  Day cost: {}",
        day.walking_distance,
        format_amount(day.estimated_day_cost)
    );
    let _ = writeln!(out);

    if day.timeline.is_empty() {
        let _ = writeln!(out, "  No timeline data for this day.");
        return out;
    }

    for (index, entry) in day.timeline.iter().enumerate() {
        let time = if entry.window().time.is_empty() {
            "time TBD"
        } else {
            entry.window().time.as_str()
        };
        match entry {
            TimelineEntry::Place(place) => {
                let _ = writeln!(out, "  {:>2}. {time:<13} {}", index + 1, place.place_name);
                let _ = writeln!(out, "      {}", place.reason_for_time_choice);
            }
            TimelineEntry::Meal(meal) => {
                let _ = writeln!(
                    out,
                    "  {:>2}. {time:<13} {} at {} ({})",
                    index + 1,
                    meal.meal_type,
                    meal.outlet,
                    meal.area
                );
                let _ = writeln!(out, "      Signature dish: {}", meal.signature_dish);
                if let Some(reason) = &meal.reason_selected {
                    let _ = writeln!(out, "      {reason}");
                }
            }
        }
    }
    out
}

/// Everything in the overlay except the narration body, which is revealed
/// separately.
pub fn render_detail_header(overlay: &DetailOverlay) -> String {
    let mut out = String::new();
    let place = &overlay.place;
    let _ = writeln!(out, "{}", place.place_name);
    let _ = writeln!(out, "Scheduled at {}", place.window.time);
    if let Some(url) = place.map_url() {
        let _ = writeln!(out, "Map: {url}");
    }

    if overlay.loading {
        let _ = writeln!(out, "Loading place details...");
        return out;
    }
    if let Some(error) = &overlay.error {
        let _ = writeln!(out, "Error: {error}");
        return out;
    }
    let Some(result) = &overlay.result else {
        return out;
    };

    if result.cached {
        let _ = writeln!(out, "(served from cache)");
    }
    let languages: Vec<String> = overlay
        .available_languages()
        .iter()
        .map(|language| {
            if *language == overlay.language {
                format!("[{language}]")
            } else {
                language.to_string()
            }
        })
        .collect();
    if !languages.is_empty() {
        let _ = writeln!(out, "Languages: {}", languages.join(" "));
    }
    let audio: Vec<String> = overlay
        .audio_languages()
        .iter()
        .map(ToString::to_string)
        .collect();
    if !audio.is_empty() {
        let _ = writeln!(out, "Audio: {}", audio.join(", "));
    }
    if !result.constraints.is_empty() {
        let _ = writeln!(out, "Constraints:");
        for constraint in &result.constraints {
            let _ = writeln!(out, "  - {constraint}");
        }
    }
    if !result.special_cautions.is_empty() {
        let _ = writeln!(out, "Special cautions:");
        for caution in &result.special_cautions {
            let _ = writeln!(out, "  - {caution}");
        }
    }
    out
}

pub fn render_gallery(places: &[GalleryPlace]) -> String {
    if places.is_empty() {
        return "No places saved yet.\n".to_string();
    }
    let mut out = String::new();
    for entry in places {
        let _ = writeln!(
            out,
            "{:<7} {}  {}",
            entry.day_label,
            entry.place.place_name,
            entry.place.image_url.as_deref().unwrap_or("(no image)")
        );
    }
    out
}
