use std::time::Duration;

/// Tick interval for the narration reveal.
pub const TYPEWRITER_TICK: Duration = Duration::from_millis(18);
/// How long each progress message stays up while an itinerary is generated.
pub const STATUS_TICK: Duration = Duration::from_millis(2500);

pub const STATUS_MESSAGES: [&str; 6] = [
    "Analyzing geographic clusters...",
    "Optimizing travel flow...",
    "Balancing cultural depth with pacing...",
    "Allocating budget intelligently...",
    "Mapping restaurants near final stops...",
    "Finalizing your personalized route...",
];

/// Incremental reveal of a narration, one character per tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the revealed prefix, always on a char boundary
    cursor: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
        }
    }

    /// Reveal one more character. Returns the newly revealed slice, or
    /// `None` once the whole text is visible.
    pub fn advance(&mut self) -> Option<&str> {
        let next = self.text[self.cursor..].chars().next()?;
        let start = self.cursor;
        self.cursor += next.len_utf8();
        Some(&self.text[start..self.cursor])
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.cursor]
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.text.len()
    }

    pub fn finish(&mut self) {
        self.cursor = self.text.len();
    }

    /// Replace the text and restart from the beginning.
    pub fn restart(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.restart(String::new());
    }
}

/// Cycles through the fixed progress messages.
#[derive(Debug, Clone, Default)]
pub struct StatusRotation {
    index: usize,
}

impl StatusRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static str {
        STATUS_MESSAGES[self.index]
    }

    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % STATUS_MESSAGES.len();
        self.current()
    }
}
