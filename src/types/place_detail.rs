use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Narration languages the backend can produce for a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Local,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Local];

    pub fn key(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Local => "local",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Local => "Local",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "local" => Ok(Language::Local),
            other => Err(format!("unknown language `{other}`")),
        }
    }
}

/// Narration text and audio for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOutput {
    pub text: String,
    pub audio_file: String,
    /// Absolute, playable address (empty when the backend sent none)
    pub audio_url: String,
}

/// Per-language slots. A `None` slot means the language is not available,
/// which is different from an available slot with empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<LanguageOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi: Option<LanguageOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<LanguageOutput>,
}

impl LanguageOutputs {
    pub fn get(&self, language: Language) -> Option<&LanguageOutput> {
        match language {
            Language::English => self.english.as_ref(),
            Language::Hindi => self.hindi.as_ref(),
            Language::Local => self.local.as_ref(),
        }
    }
}

/// Normalized narration/audio response for one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDetailResult {
    pub place: String,
    pub destination_city: String,
    pub local_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_text: Option<String>,
    pub constraints: Vec<String>,
    pub special_cautions: Vec<String>,
    pub outputs: LanguageOutputs,
    /// Whether the backend served a precomputed result
    pub cached: bool,
}

impl PlaceDetailResult {
    /// Narration text for a language. Local prefers the top-level
    /// `local_text` over the local slot.
    pub fn narration(&self, language: Language) -> &str {
        if language == Language::Local {
            if let Some(text) = self.local_text.as_deref() {
                return text;
            }
        }
        self.outputs
            .get(language)
            .map(|output| output.text.as_str())
            .unwrap_or("")
    }

    pub fn available_languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| match language {
                Language::Local => !self.narration(Language::Local).is_empty(),
                other => self.outputs.get(*other).is_some(),
            })
            .collect()
    }

    /// Languages with a playable clip. Local narration is text-only.
    pub fn audio_languages(&self) -> Vec<Language> {
        [Language::English, Language::Hindi]
            .into_iter()
            .filter(|language| self.audio_url(*language).is_some())
            .collect()
    }

    pub fn audio_url(&self, language: Language) -> Option<&str> {
        self.outputs
            .get(language)
            .map(|output| output.audio_url.as_str())
            .filter(|url| !url.is_empty())
    }
}
