use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_CHAT_PATH};
use crate::core::language::Language;
use crate::utils::url::construct_api_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the Khet.ai backend (e.g., "http://127.0.0.1:5000")
    pub base_url: Option<String>,
    /// Chat route relative to `base_url` (e.g., "api/chat")
    pub chat_path: Option<String>,
    /// Language selected when the chat opens
    pub language: Option<Language>,
}

/// Format a path for display, replacing the home directory with `~` on Unix.
///
/// - Unix: `/home/user/.config/khet-chat/config.toml` → `~/.config/khet-chat/config.toml`
/// - Other platforms: the path is shown as-is.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Chat endpoint derived from `base_url` and `chat_path`, with defaults
    /// filling whichever is unset.
    pub fn chat_endpoint(&self) -> String {
        let chat_path = self.chat_path.as_deref().unwrap_or(DEFAULT_CHAT_PATH);
        construct_api_url(self.backend_base_url(), chat_path)
    }

    /// Root URL the weather, crop and disease routes hang off.
    pub fn backend_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Picks the endpoint to talk to: explicit flag, then the environment
    /// override, then the configured endpoint.
    pub fn resolve_endpoint(&self, flag: Option<&str>, env_override: Option<&str>) -> String {
        [flag, env_override]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.chat_endpoint())
    }

    pub fn resolve_language(&self, flag: Option<Language>) -> Language {
        flag.or(self.language).unwrap_or_default()
    }
}
