// ============================================================================
// LANGUAGE - Supported UI locales
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "eng")]
    English,
    #[serde(rename = "nep")]
    Nepali,
    #[serde(rename = "mai")]
    Maithili,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::English, Locale::Nepali, Locale::Maithili];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::English => "eng",
            Locale::Nepali => "nep",
            Locale::Maithili => "mai",
        }
    }

    /// Label shown in the language picker
    pub fn short_label(&self) -> &'static str {
        match self {
            Locale::English => "En",
            Locale::Nepali => "ने",
            Locale::Maithili => "मै",
        }
    }

    /// Unknown codes fall back to English
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "nep" | "ne" => Locale::Nepali,
            "mai" => Locale::Maithili,
            _ => Locale::English,
        }
    }
}
