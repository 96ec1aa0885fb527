use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{error::Result, types::FullItinerary};

/// Storage key of the persisted snapshot; the file is `<key>.json`.
pub const STORAGE_KEY: &str = "travel_ai_state_v1";
pub const STATE_DIR_ENV: &str = "TRAVEL_STATE_DIR";
const DEFAULT_STATE_DIR: &str = ".trip-viewer";

/// Which top-level view the user was last on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerView {
    #[default]
    Input,
    Itinerary,
}

/// The state that survives restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub itinerary_data: Option<FullItinerary>,
    pub selected_day_index: usize,
    pub active_view: PlannerView,
}

/// On-disk shape with every field optional, so partial snapshots still load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot {
    #[serde(default)]
    itinerary_data: Option<FullItinerary>,
    #[serde(default)]
    selected_day_index: Option<usize>,
    #[serde(default)]
    active_view: Option<PlannerView>,
}

impl From<StoredSnapshot> for SessionSnapshot {
    fn from(stored: StoredSnapshot) -> Self {
        match stored.itinerary_data {
            Some(itinerary) => SessionSnapshot {
                itinerary_data: Some(itinerary),
                selected_day_index: stored.selected_day_index.unwrap_or(0),
                active_view: stored.active_view.unwrap_or(PlannerView::Itinerary),
            },
            None => SessionSnapshot::default(),
        }
    }
}

/// File-backed snapshot persistence. Last writer wins.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// `$TRAVEL_STATE_DIR`, or `.trip-viewer/` under the working directory.
    pub fn from_env() -> Result<Self> {
        let dir = match std::env::var(STATE_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => std::env::current_dir()?.join(DEFAULT_STATE_DIR),
        };
        Ok(Self::new(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the last snapshot. Missing or unreadable data means "no prior
    /// session" and is never an error.
    pub fn load(&self) -> SessionSnapshot {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(target: "trip_viewer::session", path = %self.path.display(), "no prior session");
                return SessionSnapshot::default();
            }
            Err(err) => {
                warn!(target: "trip_viewer::session", error = %err, "session unreadable, starting fresh");
                return SessionSnapshot::default();
            }
        };

        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        match serde_path_to_error::deserialize::<_, StoredSnapshot>(&mut deserializer) {
            Ok(stored) => {
                let snapshot = SessionSnapshot::from(stored);
                info!(
                    target: "trip_viewer::session",
                    view = ?snapshot.active_view,
                    day = snapshot.selected_day_index,
                    "resumed session"
                );
                snapshot
            }
            Err(err) => {
                let path = err.path().to_string();
                let location = if path.is_empty() { "<root>" } else { path.as_str() };
                warn!(
                    target: "trip_viewer::session",
                    at = location,
                    error = %err.inner(),
                    "session snapshot corrupt, starting fresh"
                );
                SessionSnapshot::default()
            }
        }
    }

    /// Write the whole snapshot, replacing whatever was stored.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        debug!(target: "trip_viewer::session", path = %self.path.display(), "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
