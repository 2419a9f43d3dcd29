//! API error types

use std::time::Duration;

/// Errors that can occur during a REST round trip.
///
/// None of these are retried; the user repeats the gesture.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response from the save handler.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid save URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to read the response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a blocking alert: the status plus whatever the
    /// server said, with markup removed.
    pub fn alert_text(&self) -> String {
        match self {
            Self::Http { status, message } => {
                let message = strip_tags(message);
                if message.is_empty() {
                    format!("Error {status}")
                } else {
                    format!("Error {status}: {message}")
                }
            }
            other => other.to_string(),
        }
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text_strips_markup() {
        let err = ApiError::http(500, "<h1>Oops</h1>\n<p>Table   locked</p>");
        assert_eq!(err.alert_text(), "Error 500: Oops Table locked");
    }

    #[test]
    fn test_alert_text_without_message() {
        assert_eq!(ApiError::http(404, "  ").alert_text(), "Error 404");
    }

    #[test]
    fn test_status_code() {
        assert_eq!(ApiError::http(403, "").status_code(), Some(403));
        assert_eq!(ApiError::parse("bad").status_code(), None);
    }
}
