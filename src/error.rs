// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the sync engine and its API clients.

use crate::config::ConfigError;
use std::fmt;
use std::time::Duration;

/// External service an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Garmin,
    Notion,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Garmin => f.write_str("Garmin"),
            Service::Notion => f.write_str("Notion"),
        }
    }
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{service} rate limit exceeded")]
    RateLimited {
        service: Service,
        /// Delay advertised by the `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },

    #[error("{0} rejected the credentials")]
    Unauthorized(Service),

    #[error("{service} request failed: {message}")]
    Transient { service: Service, message: String },

    #[error("{service} API error: {message}")]
    Api { service: Service, message: String },

    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: Service, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether repeating the same request may succeed.
    ///
    /// Rate limits, network failures and 5xx responses are retryable;
    /// everything else is terminal for the run.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::RateLimited { .. } | AppError::Transient { .. }
        )
    }

    /// Whether the server rejected the request before acting on it.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::RateLimited { .. })
    }

    /// Whether the error means the configured token is no longer valid.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// Server-advertised wait before the next attempt.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            AppError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
