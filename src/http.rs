// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response checking shared by the Garmin and Notion clients.
//!
//! Maps HTTP failures onto [`AppError`] so the retry layer can tell
//! transient failures (429, 5xx, network) from terminal ones.

use crate::error::{AppError, Result, Service};
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Map a transport-level failure (connect, timeout, body read).
pub(crate) fn request_error(service: Service, err: reqwest::Error) -> AppError {
    AppError::Transient {
        service,
        message: err.to_string(),
    }
}

/// Map a non-success status to an error.
pub(crate) fn status_error(
    service: Service,
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> AppError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(%service, ?retry_after, "Rate limit hit (429)");
            AppError::RateLimited {
                service,
                retry_after,
            }
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(service),
        s if s.is_server_error() => AppError::Transient {
            service,
            message: format!("HTTP {}: {}", status, body),
        },
        _ => AppError::Api {
            service,
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Check response status and return error if not successful.
pub(crate) async fn check_response(
    service: Service,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after);
    let body = response.text().await.unwrap_or_default();

    Err(status_error(service, status, retry_after, &body))
}

/// Check response and parse JSON body.
pub(crate) async fn check_response_json<T: DeserializeOwned>(
    service: Service,
    response: reqwest::Response,
) -> Result<T> {
    check_response(service, response)
        .await?
        .json()
        .await
        .map_err(|e| AppError::InvalidResponse {
            service,
            message: format!("JSON parse error: {}", e),
        })
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_maps_to_retryable() {
        let err = status_error(
            Service::Notion,
            StatusCode::TOO_MANY_REQUESTS,
            Some(Duration::from_secs(2)),
            "",
        );
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_server_error_is_transient() {
        let err = status_error(
            Service::Garmin,
            StatusCode::BAD_GATEWAY,
            None,
            "upstream",
        );
        assert!(matches!(err, AppError::Transient { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_errors_are_terminal() {
        let err = status_error(Service::Notion, StatusCode::BAD_REQUEST, None, "bad filter");
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("bad filter"));

        let err = status_error(Service::Garmin, StatusCode::UNAUTHORIZED, None, "");
        assert!(err.is_auth_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(" 3 "), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
