//! Defensive conversion of planner payloads into the typed model.
//!
//! The backend's schema is not contractually fixed, so both entry points are
//! total: absent, wrong-typed, or malformed fields degrade to documented
//! defaults instead of producing errors.

pub mod coerce;
pub mod itinerary;
pub mod place_detail;
pub mod timeline;

pub use itinerary::{normalize_day, normalize_itinerary, normalize_metadata};
pub use place_detail::{normalize_place_detail, resolve_audio_url};
pub use timeline::{classify, parse_time_range, RecordKind};
