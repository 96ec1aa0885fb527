pub mod itinerary;
pub mod place_detail;
pub mod request;

pub use itinerary::{
    BudgetSummary, DayPlan, FullItinerary, GalleryPlace, HotelRecommendation, Itinerary,
    ItineraryMetadata, MealStop, PlaceVisit, TimeWindow, TimelineEntry, UNKNOWN_OFFSET,
};
pub use place_detail::{Language, LanguageOutput, LanguageOutputs, PlaceDetailResult};
pub use request::{PlaceDetailRequest, PlannerRequest};
