/*
 * Responsibility
 * - AppError: what a controller command resolves to when it fails
 * - Commands never panic and never leak transport types past this boundary;
 *   the render collaborator decides how to show each kind
 * - GatewayError -> AppError is the single mapping point
 */
use thiserror::Error;

use crate::gateway::error::GatewayError;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required field was blank. Local: no network call was made and the
    /// form stays open.
    #[error("{message}")]
    Validation { message: &'static str },

    /// The request failed, timed out, or the service answered with something
    /// unusable. List/form state is unchanged except the loading flag.
    #[error("network error: {detail}")]
    Network { detail: String },

    /// Stale id on update/delete: the target was already removed. Treated as
    /// a network-class failure; the front end suggests a refresh.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
}

impl AppError {
    pub fn validation(message: &'static str) -> Self {
        Self::Validation { message }
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound { resource } => AppError::NotFound { resource },
            other => AppError::Network {
                detail: other.to_string(),
            },
        }
    }
}
