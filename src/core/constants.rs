//! Shared constants used across the application

/// Assistant reply appended whenever an exchange fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Base URL of the Khet.ai backend when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Path of the chat route relative to the base URL.
pub const DEFAULT_CHAT_PATH: &str = "api/chat";

/// Backend routes for the non-chat tools, relative to the base URL.
pub const WEATHER_PATH: &str = "api/weather";
pub const CROP_RECOMMEND_PATH: &str = "api/crop-recommend";
pub const DISEASE_DETECT_PATH: &str = "api/disease-detect";

/// Environment variable holding a complete chat endpoint URL.
pub const CHAT_URL_ENV: &str = "KHET_CHAT_URL";

/// Environment variable consulted first for the tracing filter.
pub const LOG_FILTER_ENV: &str = "KHET_LOG";

/// Space reserved for the typing indicator + margin in the input area.
pub const INDICATOR_SPACE: u16 = 4;
