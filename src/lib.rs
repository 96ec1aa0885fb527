//! trip-viewer: a client for a remote travel itinerary engine
//!
//! The planner service does all of the planning; this crate sends trip
//! parameters, normalizes whatever shape comes back into a strict typed
//! model, and keeps a small persisted session so a terminal viewer can
//! resume where it left off.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_viewer::{PlannerApi, PlannerClient, PlannerRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlannerClient::from_env()?;
//!     let request = PlannerRequest::new("Delhi", "Jaipur", 3, 25000.0)
//!         .with_interests(["history", "architecture"]);
//!
//!     let data = client.fetch_full_itinerary(&request).await?;
//!     for day in &data.itinerary.days {
//!         println!("{} ({} stops)", day.title, day.timeline.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub mod normalize;
pub(crate) mod services;
pub mod types;

pub use core::{
    DetailOverlay, DetailTicket, PlannerApi, PlannerClient, PlannerView, PlaybackSlot,
    SessionSnapshot, SessionStore, StatusRotation, Typewriter, Viewer,
};
pub use error::{Result, TravelError};
pub use normalize::{normalize_itinerary, normalize_place_detail};
pub use types::{
    DayPlan, FullItinerary, Itinerary, Language, PlaceDetailRequest, PlaceDetailResult,
    PlannerRequest, TimelineEntry,
};

#[cfg(feature = "cli")]
pub mod cli;
