// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use garmin_notion_sync::config::ConfigError;
use garmin_notion_sync::error::{AppError, Service};
use std::time::Duration;

#[test]
fn test_retryable_errors() {
    let err = AppError::RateLimited {
        service: Service::Notion,
        retry_after: Some(Duration::from_secs(1)),
    };
    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(1)));

    let err = AppError::Transient {
        service: Service::Garmin,
        message: "connection reset".to_string(),
    };
    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), None);
}

#[test]
fn test_terminal_errors() {
    let err = AppError::Unauthorized(Service::Garmin);
    assert!(!err.is_retryable());
    assert!(err.is_auth_error());

    let err = AppError::Api {
        service: Service::Notion,
        message: "HTTP 400: validation_error".to_string(),
    };
    assert!(!err.is_retryable());
    assert!(!err.is_auth_error());

    let err: AppError = ConfigError::Missing("NOTION_TOKEN").into();
    assert!(!err.is_retryable());
}

#[test]
fn test_error_messages_name_service() {
    assert_eq!(
        AppError::Unauthorized(Service::Notion).to_string(),
        "Notion rejected the credentials"
    );
    assert_eq!(
        AppError::RateLimited {
            service: Service::Garmin,
            retry_after: None
        }
        .to_string(),
        "Garmin rate limit exceeded"
    );
}
