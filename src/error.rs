use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignOnError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - realm rejected the request")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Unknown sign-on provider: {0}")]
    UnknownProvider(String),

    #[error("Widget is its own authority but no sign-on provider was configured")]
    MissingProvider,

    #[error("Widget hierarchy contains a cycle - context cannot be resolved")]
    ContextCycle,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl SignOnError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            // Back off to a char boundary; the cut may land inside a
            // multibyte sequence.
            let mut cut = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..cut],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => SignOnError::Unauthorized,
            403 => SignOnError::AccessDenied(truncated),
            404 => SignOnError::NotFound(truncated),
            500..=599 => SignOnError::ServerError(truncated),
            _ => SignOnError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}
