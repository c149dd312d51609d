//! URL utilities for building the chat endpoint
//!
//! Base URLs and route paths come from user configuration, so either side may
//! carry stray slashes. These helpers join them without doubling or dropping
//! separators.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use khet_chat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:5000"), "http://127.0.0.1:5000");
/// assert_eq!(normalize_base_url("http://127.0.0.1:5000/"), "http://127.0.0.1:5000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Construct a complete API endpoint URL from a base URL and route path
///
/// # Examples
///
/// ```
/// use khet_chat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:5000/", "/api/chat"),
///     "http://127.0.0.1:5000/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim().trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://khet.example"),
            "https://khet.example"
        );

        // Multiple trailing slashes - should all be removed
        assert_eq!(
            normalize_base_url("https://khet.example///"),
            "https://khet.example"
        );

        // Pasted values often carry whitespace
        assert_eq!(
            normalize_base_url("  https://khet.example/ \n"),
            "https://khet.example"
        );

        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_construct_api_url() {
        assert_eq!(
            construct_api_url("http://127.0.0.1:5000", "api/chat"),
            "http://127.0.0.1:5000/api/chat"
        );

        // Both base URL with trailing slash and endpoint with leading slash
        assert_eq!(
            construct_api_url("http://127.0.0.1:5000/", "/api/chat"),
            "http://127.0.0.1:5000/api/chat"
        );

        // Base URL that already carries a path prefix
        assert_eq!(
            construct_api_url("https://khet.example/app//", "///api/chat"),
            "https://khet.example/app/api/chat"
        );
    }
}
