// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Garmin Connect API client for listing activities.
//!
//! Login is not handled here: the client is given an access token issued
//! by an external login step and only reads the activity list.

use crate::config::Config;
use crate::error::{Result, Service};
use crate::http::{check_response_json, request_error};
use crate::models::RawActivity;
use crate::services::RetryPolicy;
use async_trait::async_trait;

/// Source of raw activities, newest first.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Up to `limit` activities starting at `offset`.
    async fn list_activities(&self, offset: u32, limit: u32) -> Result<Vec<RawActivity>>;
}

/// Garmin Connect API client.
#[derive(Clone)]
pub struct GarminClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    retry: RetryPolicy,
}

impl GarminClient {
    /// Create a new Garmin client with an access token.
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: crate::config::DEFAULT_GARMIN_API_BASE.to_string(),
            access_token,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a client from application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.garmin_access_token.clone())
            .with_base_url(&config.garmin_api_base)
            .with_retry(RetryPolicy::from_config(config))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn activities_url(&self) -> String {
        format!(
            "{}/activitylist-service/activities/search/activities",
            self.base_url
        )
    }
}

#[async_trait]
impl ActivitySource for GarminClient {
    async fn list_activities(&self, offset: u32, limit: u32) -> Result<Vec<RawActivity>> {
        let url = self.activities_url();
        let url = url.as_str();
        let query = &[("start", offset.to_string()), ("limit", limit.to_string())];
        let http = &self.http;
        let token = self.access_token.as_str();

        let activities: Vec<RawActivity> = self
            .retry
            .run("garmin.list_activities", move || async move {
                let response = http
                    .get(url)
                    .bearer_auth(token)
                    .query(query)
                    .send()
                    .await
                    .map_err(|e| request_error(Service::Garmin, e))?;

                check_response_json(Service::Garmin, response).await
            })
            .await?;

        tracing::debug!(offset, limit, count = activities.len(), "Listed Garmin activities");
        Ok(activities)
    }
}
