use dogland_core::validation::FieldViolation;

/// Errors from the REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Machine-readable code such as `VALIDATION_ERROR`.
        code: Option<String>,
        message: String,
        /// Per-field violations, present on validation failures.
        errors: Vec<FieldViolation>,
    },

    /// A 2xx response that is not a successful envelope: undecodable JSON,
    /// `success: false`, or a missing member.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            ClientError::MalformedResponse(_) => None,
        }
    }
}

/// Errors from loading or saving the favorites set.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Favorites storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised by stores that refuse writes (tests, read-only media).
    #[error("Favorites could not be saved: {0}")]
    Unavailable(String),
}
