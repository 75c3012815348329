//! Provider utility functions
//!
//! URL handling and key masking shared by the backends.

/// Chat completions endpoint suffix (OpenAI and Azure AI inference)
pub const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";

/// OpenAI default base URL
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

/// Completes a base URL with the chat completions suffix
///
/// # Behavior
/// 1. Remove trailing slashes
/// 2. Keep the URL when it already ends with the suffix
/// 3. Otherwise append the suffix
///
/// # Example
/// ```
/// use aicommit_rs::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://api.openai.com/v1", "/chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
///
/// assert_eq!(
///     complete_endpoint("https://api.openai.com/v1/chat/completions/", "/chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim().trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(&format!("/{}", suffix)) {
        return url.to_string();
    }

    format!("{}/{}", url, suffix)
}

/// Appends `key=value` to the query string unless `key` is already present
pub fn with_query_param(url: &str, key: &str, value: &str) -> String {
    let has_key = url
        .split_once('?')
        .is_some_and(|(_, query)| query.split('&').any(|pair| pair.split('=').next() == Some(key)));
    if has_key {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, key, value)
}

/// Mask API key to prevent log leaks
///
/// # rule
/// - more than 8 characters: first 4 characters + `...` + last 4 characters
/// - otherwise: `****`
///
/// # Example
/// ```
/// use aicommit_rs::llm::provider::utils::mask_api_key;
///
/// assert_eq!(mask_api_key("sk-proj-abcdefgh"), "sk-p...efgh");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}
