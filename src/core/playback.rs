use tracing::debug;

use crate::types::Language;

/// The clip currently playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub language: Language,
    pub url: String,
}

/// Holds at most one playing clip. Starting a clip stops the previous
/// one.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSlot {
    current: Option<Clip>,
}

impl PlaybackSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `url`, returning the clip that was stopped to make room.
    pub fn play(&mut self, language: Language, url: impl Into<String>) -> Option<Clip> {
        let stopped = self.stop();
        let url = url.into();
        debug!(target: "trip_viewer::playback", %language, %url, "playing clip");
        self.current = Some(Clip { language, url });
        stopped
    }

    pub fn stop(&mut self) -> Option<Clip> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Clip> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }
}
