//! Conversation languages offered by the language selector.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

/// Closed set of languages the assistant can greet and reply in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Hi];

    /// Wire code sent to the chat endpoint.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
        }
    }

    /// Greeting seeded into a fresh transcript.
    pub fn greeting(self) -> &'static str {
        match self {
            Language::En => "Hello! I'm your AI agricultural assistant. How can I help you with your farming needs today?",
            Language::Hi => "नमस्ते! मैं आपका AI कृषि सहायक हूँ। आज मैं आपकी खेती की जरूरतों में कैसे मदद कर सकता हूँ?",
        }
    }

    /// Next entry in selector order, wrapping around.
    pub fn next(self) -> Language {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageParseError {
    input: String,
}

impl fmt::Display for LanguageParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        write!(
            f,
            "unsupported language '{}' (expected one of: {})",
            self.input,
            known.join(", ")
        )
    }
}

impl StdError for LanguageParseError {}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            _ => Err(LanguageParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = LanguageParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.code().to_string()
    }
}
