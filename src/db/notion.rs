// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion database client implementing [`DestinationStore`].
//!
//! Provides the three calls the sync engine needs:
//! - Database query with equality filters
//! - Page creation
//! - Page property patch
//!
//! Only the first page of query results is read; the engine never needs
//! more than the first match.

use crate::config::Config;
use crate::db::DestinationStore;
use crate::error::{AppError, Result, Service};
use crate::http::{check_response_json, request_error};
use crate::models::{DestinationRecord, PropertyValue, RecordFilter, RecordProperties};
use crate::services::RetryPolicy;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// API version pinned for request and response shapes.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion database client.
#[derive(Clone)]
pub struct NotionDb {
    http: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
    retry: RetryPolicy,
}

impl NotionDb {
    /// Create a client for one database.
    pub fn new(token: String, database_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: crate::config::DEFAULT_NOTION_API_BASE.to_string(),
            token,
            database_id,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a client from application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.notion_token.clone(),
            config.notion_database_id.clone(),
        )
        .with_base_url(&config.notion_api_base)
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

    /// Send a JSON request through the retry policy and parse the response.
    ///
    /// `should_retry` picks which failures are resent.
    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        should_retry: fn(&AppError) -> bool,
        method: Method,
        url: &str,
        body: &Value,
    ) -> Result<T> {
        let http = &self.http;
        let token = self.token.as_str();
        self.retry
            .run_if(operation, should_retry, move || {
                let method = method.clone();
                async move {
                    let response = http
                        .request(method, url)
                        .bearer_auth(token)
                        .header("Notion-Version", NOTION_VERSION)
                        .json(body)
                        .send()
                        .await
                        .map_err(|e| request_error(Service::Notion, e))?;

                    check_response_json(Service::Notion, response).await
                }
            })
            .await
    }
}

#[async_trait]
impl DestinationStore for NotionDb {
    async fn query(&self, filter: &RecordFilter) -> Result<Vec<DestinationRecord>> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let body = json!({ "filter": filter_json(filter) });

        let response: QueryResponse = self
            .send_json("notion.query", AppError::is_retryable, Method::POST, &url, &body)
            .await?;

        if response.has_more {
            tracing::debug!(
                returned = response.results.len(),
                "Query has more results than the first page"
            );
        }

        Ok(response.results.into_iter().map(Into::into).collect())
    }

    async fn create_record(
        &self,
        properties: RecordProperties,
        icon: Option<&str>,
    ) -> Result<DestinationRecord> {
        let url = format!("{}/pages", self.base_url);
        let mut body = json!({
            "parent": { "database_id": self.database_id },
            "properties": properties_json(&properties),
        });
        if let Some(url) = icon {
            body["icon"] = icon_json(url);
        }

        let page: NotionPage = self
            .send_json("notion.create_page", create_should_retry, Method::POST, &url, &body)
            .await?;

        tracing::debug!(page_id = %page.id, "Created Notion page");
        Ok(page.into())
    }

    async fn update_record(
        &self,
        id: &str,
        properties: RecordProperties,
        icon: Option<&str>,
    ) -> Result<()> {
        let url = format!("{}/pages/{}", self.base_url, id);
        let mut body = json!({ "properties": properties_json(&properties) });
        if let Some(url) = icon {
            body["icon"] = icon_json(url);
        }

        let _: IgnoredAny = self
            .send_json("notion.update_page", AppError::is_retryable, Method::PATCH, &url, &body)
            .await?;

        tracing::debug!(page_id = id, "Updated Notion page");
        Ok(())
    }
}

/// Retry condition for page creation. A timeout or 5xx may follow a
/// committed create, so only a 429 is known to have left nothing behind.
fn create_should_retry(err: &AppError) -> bool {
    err.is_rate_limited()
}

// ─── Request encoding ────────────────────────────────────────────────────────

fn text_json(content: &str) -> Value {
    json!([{ "text": { "content": content } }])
}

fn property_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Title(s) => json!({ "title": text_json(s) }),
        PropertyValue::RichText(s) => json!({ "rich_text": text_json(s) }),
        PropertyValue::Select(Some(name)) => json!({ "select": { "name": name } }),
        PropertyValue::Select(None) => json!({ "select": null }),
        PropertyValue::Number(n) => json!({ "number": n }),
        PropertyValue::Checkbox(b) => json!({ "checkbox": b }),
        PropertyValue::Date(Some(start)) => json!({ "date": { "start": start } }),
        PropertyValue::Date(None) => json!({ "date": null }),
    }
}

fn properties_json(properties: &RecordProperties) -> Value {
    let map: Map<String, Value> = properties
        .iter()
        .map(|(name, value)| (name.to_string(), property_json(value)))
        .collect();
    Value::Object(map)
}

fn filter_json(filter: &RecordFilter) -> Value {
    match filter {
        RecordFilter::RichTextEquals { property, value } => {
            json!({ "property": property, "rich_text": { "equals": value } })
        }
        RecordFilter::TitleEquals { property, value } => {
            json!({ "property": property, "title": { "equals": value } })
        }
        RecordFilter::SelectEquals { property, value } => {
            json!({ "property": property, "select": { "equals": value } })
        }
        RecordFilter::DateEquals { property, value } => {
            json!({ "property": property, "date": { "equals": value } })
        }
        RecordFilter::And(filters) => {
            json!({ "and": filters.iter().map(filter_json).collect::<Vec<_>>() })
        }
    }
}

fn icon_json(url: &str) -> Value {
    json!({ "type": "external", "external": { "url": url } })
}

// ─── Response decoding ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<NotionPage>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct NotionPage {
    id: String,
    #[serde(default)]
    properties: BTreeMap<String, NotionProperty>,
    #[serde(default)]
    icon: Option<NotionIcon>,
}

/// Page property as returned by the API, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum NotionProperty {
    Title {
        #[serde(default)]
        title: Vec<NotionText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<NotionText>,
    },
    Select {
        select: Option<NotionSelect>,
    },
    Number {
        number: Option<f64>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Date {
        date: Option<NotionDate>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct NotionText {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize)]
struct NotionSelect {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct NotionDate {
    start: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum NotionIcon {
    External { external: NotionExternal },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct NotionExternal {
    url: String,
}

fn join_text(parts: Vec<NotionText>) -> String {
    parts.into_iter().map(|t| t.plain_text).collect()
}

impl NotionProperty {
    fn into_value(self) -> Option<PropertyValue> {
        Some(match self {
            NotionProperty::Title { title } => PropertyValue::Title(join_text(title)),
            NotionProperty::RichText { rich_text } => PropertyValue::RichText(join_text(rich_text)),
            NotionProperty::Select { select } => PropertyValue::Select(select.map(|s| s.name)),
            NotionProperty::Number { number } => PropertyValue::Number(number),
            NotionProperty::Checkbox { checkbox } => PropertyValue::Checkbox(checkbox),
            NotionProperty::Date { date } => PropertyValue::Date(date.and_then(|d| d.start)),
            NotionProperty::Unsupported => return None,
        })
    }
}

impl From<NotionPage> for DestinationRecord {
    fn from(page: NotionPage) -> Self {
        let properties = page
            .properties
            .into_iter()
            .filter_map(|(name, prop)| prop.into_value().map(|v| (name, v)))
            .collect();

        let icon = match page.icon {
            Some(NotionIcon::External { external }) => Some(external.url),
            _ => None,
        };

        DestinationRecord {
            id: page.id,
            properties,
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::properties;

    #[test]
    fn test_page_decoding() {
        let page_json = json!({
            "object": "page",
            "id": "page-1",
            "icon": { "type": "external", "external": { "url": "https://example.com/run.png" } },
            "properties": {
                "Activity Name": { "id": "title", "type": "title",
                    "title": [{ "plain_text": "Morning ", "text": { "content": "Morning " } },
                              { "plain_text": "Run" }] },
                "Garmin Activity ID": { "id": "a", "type": "rich_text", "rich_text": [] },
                "Activity Type": { "id": "b", "type": "select", "select": { "name": "Running" } },
                "Subactivity Type": { "id": "c", "type": "select", "select": null },
                "Distance (km)": { "id": "d", "type": "number", "number": 5.2 },
                "Max Power": { "id": "e", "type": "number", "number": null },
                "PR": { "id": "f", "type": "checkbox", "checkbox": true },
                "Date": { "id": "g", "type": "date",
                    "date": { "start": "2024-03-01T07:15:32.000+00:00", "end": null } },
                "Created": { "id": "h", "type": "created_time", "created_time": "2024-03-01T08:00:00.000Z" }
            }
        });

        let page: NotionPage = serde_json::from_value(page_json).expect("page should decode");
        let record = DestinationRecord::from(page);

        assert_eq!(record.id, "page-1");
        assert_eq!(record.icon.as_deref(), Some("https://example.com/run.png"));
        let props = &record.properties;
        assert_eq!(props.title(properties::ACTIVITY_NAME), Some("Morning Run"));
        assert_eq!(props.rich_text(properties::GARMIN_ID), Some(""));
        assert_eq!(props.select(properties::ACTIVITY_TYPE), Some("Running"));
        assert_eq!(props.select(properties::SUBACTIVITY_TYPE), None);
        assert_eq!(props.number(properties::DISTANCE_KM), Some(5.2));
        assert_eq!(props.number(properties::MAX_POWER), None);
        assert_eq!(props.checkbox(properties::PR), Some(true));
        assert_eq!(
            props.date(properties::DATE),
            Some("2024-03-01T07:15:32.000+00:00")
        );
        assert!(!props.contains("Created"));
    }

    #[test]
    fn test_emoji_icon_ignored() {
        let page: NotionPage = serde_json::from_value(json!({
            "id": "page-2",
            "icon": { "type": "emoji", "emoji": "🏃" },
            "properties": {}
        }))
        .expect("page should decode");
        assert_eq!(DestinationRecord::from(page).icon, None);
    }

    #[test]
    fn test_property_encoding() {
        let props = RecordProperties::new()
            .with(properties::ACTIVITY_NAME, PropertyValue::Title("Run".into()))
            .with(properties::AVG_PACE, PropertyValue::RichText("6:40 min/km".into()))
            .with(properties::ACTIVITY_TYPE, PropertyValue::Select(Some("Running".into())))
            .with(properties::CALORIES, PropertyValue::Number(Some(412.0)))
            .with(properties::FAVORITE, PropertyValue::Checkbox(false))
            .with(properties::DATE, PropertyValue::Date(Some("2024-03-01T07:15:32Z".into())));

        let encoded = properties_json(&props);

        assert_eq!(
            encoded[properties::ACTIVITY_NAME],
            json!({ "title": [{ "text": { "content": "Run" } }] })
        );
        assert_eq!(
            encoded[properties::AVG_PACE],
            json!({ "rich_text": [{ "text": { "content": "6:40 min/km" } }] })
        );
        assert_eq!(
            encoded[properties::ACTIVITY_TYPE],
            json!({ "select": { "name": "Running" } })
        );
        assert_eq!(encoded[properties::CALORIES], json!({ "number": 412.0 }));
        assert_eq!(encoded[properties::FAVORITE], json!({ "checkbox": false }));
        assert_eq!(
            encoded[properties::DATE],
            json!({ "date": { "start": "2024-03-01T07:15:32Z" } })
        );
    }

    #[test]
    fn test_composite_filter_encoding() {
        let filter = RecordFilter::And(vec![
            RecordFilter::DateEquals {
                property: properties::DATE.to_string(),
                value: "2024-03-01T07:15:32Z".to_string(),
            },
            RecordFilter::SelectEquals {
                property: properties::ACTIVITY_TYPE.to_string(),
                value: "Running".to_string(),
            },
            RecordFilter::TitleEquals {
                property: properties::ACTIVITY_NAME.to_string(),
                value: "Morning Run".to_string(),
            },
        ]);

        assert_eq!(
            filter_json(&filter),
            json!({ "and": [
                { "property": "Date", "date": { "equals": "2024-03-01T07:15:32Z" } },
                { "property": "Activity Type", "select": { "equals": "Running" } },
                { "property": "Activity Name", "title": { "equals": "Morning Run" } },
            ]})
        );
    }

    #[test]
    fn test_create_retries_only_rate_limits() {
        let timeout = AppError::Transient {
            service: Service::Notion,
            message: "operation timed out".into(),
        };
        let gateway = crate::http::status_error(
            Service::Notion,
            reqwest::StatusCode::GATEWAY_TIMEOUT,
            None,
            "",
        );
        let limited = AppError::RateLimited {
            service: Service::Notion,
            retry_after: None,
        };

        assert!(timeout.is_retryable() && !create_should_retry(&timeout));
        assert!(gateway.is_retryable() && !create_should_retry(&gateway));
        assert!(create_should_retry(&limited));
    }

    #[test]
    fn test_icon_encoding() {
        assert_eq!(
            icon_json("https://example.com/i.png"),
            json!({ "type": "external", "external": { "url": "https://example.com/i.png" } })
        );
    }
}
