//! Error model shared by the domain and the capability adapters.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures caused by the caller's input.
/// Failures of external services belong to [`CapabilityError`] or the
/// adapter-specific errors in the `ai`/`infra` crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty query).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failure while bringing an external capability online.
///
/// These never reach a request: the readiness gate collapses them into a
/// `false` readiness flag after logging the [`kind`](Self::kind).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The credential / connection string is not configured.
    #[error("credential missing: {0}")]
    CredentialMissing(String),

    /// The credential is present but has the wrong shape.
    #[error("credential malformed: {0}")]
    CredentialMalformed(String),

    /// The external service could not be reached.
    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    /// The service was reached but the confidence check failed.
    #[error("probe failure: {0}")]
    ProbeFailure(String),
}

impl CapabilityError {
    pub fn credential_missing(msg: impl Into<String>) -> Self {
        Self::CredentialMissing(msg.into())
    }

    pub fn credential_malformed(msg: impl Into<String>) -> Self {
        Self::CredentialMalformed(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionFailure(msg.into())
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::ProbeFailure(msg.into())
    }

    /// Stable, log-friendly discriminant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredentialMissing(_) => "credential_missing",
            Self::CredentialMalformed(_) => "credential_malformed",
            Self::ConnectionFailure(_) => "connection_failure",
            Self::ProbeFailure(_) => "probe_failure",
        }
    }
}
