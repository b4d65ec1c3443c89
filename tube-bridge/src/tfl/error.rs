//! TfL client error types.

use super::convert::ConversionError;

/// Errors from fetching line statuses.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the API
    #[error("rate limited by TfL API")]
    RateLimited,

    /// Invalid or missing app key
    #[error("unauthorized: check TFL_APP_KEY")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body is not the expected JSON
    #[error("JSON parse error: {message}{}", .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but lacks fields the bridge needs
    #[error("malformed response: {0}")]
    Malformed(#[from] ConversionError),

    /// Saved response could not be loaded
    #[error("mock data error: {message}")]
    MockData { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = FetchError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(
            err.to_string(),
            "JSON parse error: expected value (body: <html>)"
        );

        let err = FetchError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = FetchError::Malformed(ConversionError::MissingStatuses {
            line: "dlr".into(),
        });
        assert_eq!(
            err.to_string(),
            "malformed response: line dlr has no lineStatuses"
        );
    }
}
