//! Handlers for the individual configuration keys.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::SettingHandler;
use crate::core::config::data::Config;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_CHAT_PATH};
use crate::core::language::Language;
use crate::utils::url::normalize_base_url;

fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

/// Handler for the `base-url` setting.
pub struct BaseUrlHandler;

impl SettingHandler for BaseUrlHandler {
    fn key(&self) -> &'static str {
        "base-url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(raw) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the backend URL, provide it:",
                example: "khet-chat set base-url http://127.0.0.1:5000",
            });
        };

        let url = normalize_base_url(raw);
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingError::InvalidUrl(raw.clone()));
        }

        let message = success_set(self.key(), &url);
        config.base_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.base_url = None;
        format!("✅ Unset base-url (will use {DEFAULT_BASE_URL})")
    }

    fn format(&self, config: &Config) -> String {
        match &config.base_url {
            Some(url) => format!("  base-url: {url}"),
            None => format!("  base-url: (unset, default {DEFAULT_BASE_URL})"),
        }
    }
}

/// Handler for the `chat-path` setting.
pub struct ChatPathHandler;

impl SettingHandler for ChatPathHandler {
    fn key(&self) -> &'static str {
        "chat-path"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let path = args
            .first()
            .map(|p| p.trim().trim_start_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .ok_or(SettingError::MissingArgs {
                hint: "To set the chat route, provide a path relative to base-url:",
                example: "khet-chat set chat-path api/chat",
            })?;

        let message = success_set(self.key(), &path);
        config.chat_path = Some(path);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.chat_path = None;
        format!("✅ Unset chat-path (will use {DEFAULT_CHAT_PATH})")
    }

    fn format(&self, config: &Config) -> String {
        match &config.chat_path {
            Some(path) => format!("  chat-path: {path}"),
            None => format!("  chat-path: (unset, default {DEFAULT_CHAT_PATH})"),
        }
    }
}

/// Handler for the `language` setting.
pub struct LanguageHandler;

impl SettingHandler for LanguageHandler {
    fn key(&self) -> &'static str {
        "language"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(raw) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the starting language, provide a language code:",
                example: "khet-chat set language hi",
            });
        };

        let language: Language = raw.parse().map_err(|_| SettingError::UnknownLanguage {
            input: raw.clone(),
        })?;

        config.language = Some(language);
        Ok(success_set(
            self.key(),
            &format!("{} ({})", language.code(), language.display_name()),
        ))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.language = None;
        format!("✅ Unset language (will use {})", Language::default().code())
    }

    fn format(&self, config: &Config) -> String {
        match config.language {
            Some(language) => format!("  language: {language}"),
            None => format!("  language: (unset, default {})", Language::default()),
        }
    }
}
