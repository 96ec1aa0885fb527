use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Offset given to a time that could not be parsed. Entries carrying it sort
/// after every entry with a real time.
pub const UNKNOWN_OFFSET: u32 = u32::MAX;

/// Normalized planner response: the itinerary plus the planner's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullItinerary {
    pub itinerary: Itinerary,
    pub metadata: ItineraryMetadata,
}

/// Multi-day plan with guaranteed-present fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub title: String,
    pub hotel_recommendation: HotelRecommendation,
    pub days: Vec<DayPlan>,
    pub total_estimated_cost: f64,
    /// Only a literal boolean `true` upstream sets this
    pub within_budget: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_summary: Option<BudgetSummary>,
}

impl Itinerary {
    /// Day at `index`, falling back to the first day when out of range.
    pub fn day_or_first(&self, index: usize) -> Option<&DayPlan> {
        self.days.get(index).or_else(|| self.days.first())
    }

    /// Every place visit across the trip, labelled with its day.
    pub fn place_gallery(&self) -> Vec<GalleryPlace> {
        self.days
            .iter()
            .flat_map(|day| {
                let label = format!("Day {}", day.day);
                day.places().map(move |place| GalleryPlace {
                    day_label: label.clone(),
                    place: place.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecommendation {
    pub area: String,
    pub reason: String,
}

impl HotelRecommendation {
    /// Map search for hotels around the recommended area.
    pub fn search_url(&self) -> Option<String> {
        let query = format!("hotels near {}", self.area);
        Url::parse_with_params(
            "https://www.google.com/maps/search/",
            &[("api", "1"), ("query", query.as_str())],
        )
        .ok()
        .map(String::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_spend: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number as reported upstream (not checked for uniqueness)
    pub day: u32,
    pub title: String,
    pub day_time_window: String,
    pub geographic_flow: String,
    /// `"N.N km"` or `"N/A"`
    pub walking_distance: String,
    /// Places and meals merged in start-time order
    pub timeline: Vec<TimelineEntry>,
    pub estimated_day_cost: f64,
}

impl DayPlan {
    pub fn places(&self) -> impl Iterator<Item = &PlaceVisit> {
        self.timeline.iter().filter_map(TimelineEntry::as_place)
    }

    pub fn meals(&self) -> impl Iterator<Item = &MealStop> {
        self.timeline.iter().filter_map(TimelineEntry::as_meal)
    }
}

/// Time label plus the minute offsets derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub time: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl TimeWindow {
    pub fn is_known(&self) -> bool {
        self.start_minutes != UNKNOWN_OFFSET
    }
}

/// One slot of a day's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Place(PlaceVisit),
    Meal(MealStop),
}

impl TimelineEntry {
    pub fn window(&self) -> &TimeWindow {
        match self {
            TimelineEntry::Place(place) => &place.window,
            TimelineEntry::Meal(meal) => &meal.window,
        }
    }

    pub fn start_minutes(&self) -> u32 {
        self.window().start_minutes
    }

    pub fn as_place(&self) -> Option<&PlaceVisit> {
        match self {
            TimelineEntry::Place(place) => Some(place),
            TimelineEntry::Meal(_) => None,
        }
    }

    pub fn as_meal(&self) -> Option<&MealStop> {
        match self {
            TimelineEntry::Meal(meal) => Some(meal),
            TimelineEntry::Place(_) => None,
        }
    }

    pub fn is_meal(&self) -> bool {
        matches!(self, TimelineEntry::Meal(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceVisit {
    #[serde(flatten)]
    pub window: TimeWindow,
    pub place_name: String,
    pub reason_for_time_choice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlaceVisit {
    pub fn map_url(&self) -> Option<String> {
        Url::parse_with_params(
            "https://www.google.com/maps",
            &[("q", self.place_name.as_str())],
        )
        .ok()
        .map(String::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealStop {
    #[serde(flatten)]
    pub window: TimeWindow,
    pub meal_type: String,
    pub outlet: String,
    pub signature_dish: String,
    pub area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_selected: Option<String>,
}

/// A place visit tagged with the day it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPlace {
    pub day_label: String,
    pub place: PlaceVisit,
}

/// Planner statistics. Known keys are typed when well-formed and absent
/// otherwise; unrecognized keys are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_latency_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_places_discovered: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_clusters: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory_top_places: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_city: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
