use std::time::Duration;

/// Truncates a string to a maximum length, adding `...` to the end if it was truncated.
///
/// This function will continuously try to reduce length if string is being
/// truncated in the middle of a UTF codepoint
///
/// # Arguments
/// * `string` - The string to truncate
/// * `max_length` - The maximum length of the string, including the `...`
#[must_use]
pub fn truncate_string(string: &impl ToString, max_length: usize) -> String {
    let string = string.to_string();
    if string.len() <= max_length {
        return string;
    }

    let mut end = max_length.saturating_sub(3);
    while !string.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &string[..end])
}

/// Builds the HTTP client used when the caller doesn't bring their own
///
/// # Panics
/// When the TLS backend cannot be initialized
#[must_use]
pub fn init_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!(
            "{}/{} (+{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY")
        ))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Unable to build HTTP client")
}
