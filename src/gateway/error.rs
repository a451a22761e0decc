/**
 * Responsibility
 * - What the gateway reports upward when a call fails
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("unexpected status {status} for {resource}")]
    UnexpectedStatus {
        resource: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("invalid endpoint path: {0}")]
    InvalidEndpoint(String),
}
