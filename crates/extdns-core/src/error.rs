//! Error types for the webhook provider
//!
//! This module defines all error types used throughout the workspace.

use crate::endpoint::Endpoint;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for provider operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider's zone listing failed; nothing was attempted
    #[error("failed to fetch zone list: {source}")]
    ZoneListing {
        /// Underlying API failure
        source: ApiError,
    },

    /// Listing the record sets of one zone failed
    #[error("failed to fetch records in zone {zone}: {source}")]
    RecordListing {
        /// Name of the zone being listed
        zone: String,
        /// Underlying API failure
        source: ApiError,
    },

    /// A change batch was rejected for a reason other than an idempotence conflict
    #[error("failed to {action} records ({endpoint:?}): {source}")]
    Change {
        /// Lowercase verb of the rejected action ("create" or "delete")
        action: &'static str,
        /// The endpoint whose batch was rejected
        endpoint: Box<Endpoint>,
        /// Underlying API failure
        source: ApiError,
    },

    /// An operation exceeded its internal deadline
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap a failed zone listing
    pub fn zone_listing(source: ApiError) -> Self {
        Self::ZoneListing { source }
    }

    /// Wrap a failed record listing for `zone`
    pub fn record_listing(zone: impl Into<String>, source: ApiError) -> Self {
        Self::RecordListing {
            zone: zone.into(),
            source,
        }
    }

    /// Wrap a fatal change rejection together with the offending endpoint
    pub fn change(action: &'static str, endpoint: &Endpoint, source: ApiError) -> Self {
        Self::Change {
            action,
            endpoint: Box::new(endpoint.clone()),
            source,
        }
    }
}

/// An error reported by a provider's remote API
///
/// Providers report failures as an optional machine-readable code plus a
/// human-readable message. Both end up in the rendered text, which is what
/// idempotence classification inspects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{message}", code_prefix(.code))]
pub struct ApiError {
    /// Provider error code, when the API returns one
    pub code: Option<String>,
    /// Provider error message
    pub message: String,
}

impl ApiError {
    /// Create an error with a message only
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Create an error with a provider code and message
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Whether the rendered error text contains `marker`
    pub fn mentions(&self, marker: &str) -> bool {
        self.to_string().contains(marker)
    }
}

fn code_prefix(code: &Option<String>) -> String {
    match code {
        Some(code) => format!("{}: ", code),
        None => String::new(),
    }
}
