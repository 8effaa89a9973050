use thiserror::Error;

/// Failure of a single text-generation call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The generator was never configured with a credential.
    #[error("generator unavailable: {0}")]
    Unavailable(String),

    /// Transport failure (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// Rate limit or quota exhausted.
    #[error("quota exceeded: {0}")]
    Quota(String),

    /// The API answered but the payload was not usable.
    #[error("unexpected response format: {0}")]
    Format(String),

    /// Any other non-success status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
}

impl GenerationError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let is_quota = status == 429 || message.contains("RESOURCE_EXHAUSTED") || message.contains("quota");
        if is_quota {
            Self::Quota(message)
        } else {
            Self::Api { status, message }
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs stay out of error text.
        let err = err.without_url();
        if err.is_decode() {
            Self::Format(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(GenerationError::from_status(429, "slow down"), GenerationError::Quota(_)));
        assert!(matches!(
            GenerationError::from_status(400, "RESOURCE_EXHAUSTED: daily quota"),
            GenerationError::Quota(_)
        ));
        assert_eq!(
            GenerationError::from_status(500, "boom"),
            GenerationError::Api {
                status: 500,
                message: "boom".to_string()
            }
        );
    }
}
