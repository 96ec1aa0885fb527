pub mod client;
pub mod playback;
pub mod reveal;
pub mod session;
pub mod viewer;

pub use client::{PlannerApi, PlannerClient};
pub use playback::{Clip, PlaybackSlot};
pub use reveal::{StatusRotation, Typewriter};
pub use session::{PlannerView, SessionSnapshot, SessionStore};
pub use viewer::{DetailOverlay, DetailTicket, Viewer};
