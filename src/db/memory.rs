// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory [`DestinationStore`] with the same filter semantics as Notion.
//!
//! Used by tests and for offline runs. Every write is recorded so callers
//! can assert exactly which creates and updates a sync produced.

use crate::db::DestinationStore;
use crate::error::Result;
use crate::models::{DestinationRecord, PropertyValue, RecordFilter, RecordProperties};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// A write applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Create {
        id: String,
        properties: RecordProperties,
        icon: Option<String>,
    },
    Update {
        id: String,
        properties: RecordProperties,
        icon: Option<String>,
    },
}

impl WriteOp {
    pub fn id(&self) -> &str {
        match self {
            WriteOp::Create { id, .. } | WriteOp::Update { id, .. } => id,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, WriteOp::Create { .. })
    }

    pub fn properties(&self) -> &RecordProperties {
        match self {
            WriteOp::Create { properties, .. } | WriteOp::Update { properties, .. } => properties,
        }
    }
}

#[derive(Default)]
struct State {
    records: Vec<DestinationRecord>,
    writes: Vec<WriteOp>,
    next_id: u64,
}

/// In-memory destination store.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with existing records (not logged as writes).
    pub fn with_records(records: impl IntoIterator<Item = DestinationRecord>) -> Self {
        let store = Self::new();
        store.lock().records.extend(records);
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of all records, in insertion order.
    pub fn records(&self) -> Vec<DestinationRecord> {
        self.lock().records.clone()
    }

    pub fn record(&self, id: &str) -> Option<DestinationRecord> {
        self.lock().records.iter().find(|r| r.id == id).cloned()
    }

    /// All writes since creation or the last [`clear_writes`](Self::clear_writes).
    pub fn writes(&self) -> Vec<WriteOp> {
        self.lock().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }
}

#[async_trait]
impl DestinationStore for MemoryStore {
    async fn query(&self, filter: &RecordFilter) -> Result<Vec<DestinationRecord>> {
        Ok(self
            .lock()
            .records
            .iter()
            .filter(|r| matches_filter(&r.properties, filter))
            .cloned()
            .collect())
    }

    async fn create_record(
        &self,
        properties: RecordProperties,
        icon: Option<&str>,
    ) -> Result<DestinationRecord> {
        let mut state = self.lock();
        state.next_id += 1;
        let record = DestinationRecord {
            id: format!("mem-{}", state.next_id),
            properties: properties.clone(),
            icon: icon.map(str::to_string),
        };
        state.records.push(record.clone());
        state.writes.push(WriteOp::Create {
            id: record.id.clone(),
            properties,
            icon: record.icon.clone(),
        });
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &str,
        properties: RecordProperties,
        icon: Option<&str>,
    ) -> Result<()> {
        let mut state = self.lock();
        let record = state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow::anyhow!("No record with id {}", id))?;

        record.properties.merge(properties.clone());
        if let Some(url) = icon {
            record.icon = Some(url.to_string());
        }

        state.writes.push(WriteOp::Update {
            id: id.to_string(),
            properties,
            icon: icon.map(str::to_string),
        });
        Ok(())
    }
}

/// Evaluate an equality filter. Absent or differently-typed properties
/// never match.
fn matches_filter(props: &RecordProperties, filter: &RecordFilter) -> bool {
    match filter {
        RecordFilter::RichTextEquals { property, value } => {
            props.rich_text(property) == Some(value.as_str())
        }
        RecordFilter::TitleEquals { property, value } => {
            props.title(property) == Some(value.as_str())
        }
        RecordFilter::SelectEquals { property, value } => {
            matches!(props.get(property), Some(PropertyValue::Select(Some(s))) if s == value)
        }
        RecordFilter::DateEquals { property, value } => props.date(property) == Some(value.as_str()),
        RecordFilter::And(filters) => filters.iter().all(|f| matches_filter(props, f)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(id: &str, name: &str) -> RecordProperties {
        RecordProperties::new()
            .with("Garmin Activity ID", PropertyValue::RichText(id.to_string()))
            .with("Activity Name", PropertyValue::Title(name.to_string()))
            .with("Activity Type", PropertyValue::Select(Some("Running".into())))
    }

    #[tokio::test]
    async fn test_create_then_query() {
        let store = MemoryStore::new();
        let created = store
            .create_record(props("42", "Run"), Some("https://example.com/i.png"))
            .await
            .unwrap();

        let found = store
            .query(&RecordFilter::RichTextEquals {
                property: "Garmin Activity ID".into(),
                value: "42".into(),
            })
            .await
            .unwrap();

        assert_eq!(found, vec![created]);
        assert_eq!(store.writes().len(), 1);
        assert!(store.writes()[0].is_create());
    }

    #[tokio::test]
    async fn test_and_filter_requires_all() {
        let store = MemoryStore::new();
        store.create_record(props("1", "Run"), None).await.unwrap();

        let both = RecordFilter::And(vec![
            RecordFilter::TitleEquals {
                property: "Activity Name".into(),
                value: "Run".into(),
            },
            RecordFilter::SelectEquals {
                property: "Activity Type".into(),
                value: "Cycling".into(),
            },
        ]);
        assert!(store.query(&both).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_patches_properties() {
        let store = MemoryStore::new();
        let record = store.create_record(props("", "Run"), None).await.unwrap();

        store
            .update_record(
                &record.id,
                RecordProperties::new()
                    .with("Garmin Activity ID", PropertyValue::RichText("7".into())),
                None,
            )
            .await
            .unwrap();

        let updated = store.record(&record.id).unwrap();
        assert_eq!(updated.properties.rich_text("Garmin Activity ID"), Some("7"));
        assert_eq!(updated.properties.title("Activity Name"), Some("Run"));
    }

    #[tokio::test]
    async fn test_update_unknown_record_fails() {
        let store = MemoryStore::new();
        let result = store
            .update_record("missing", RecordProperties::new(), None)
            .await;
        assert!(result.is_err());
        assert!(store.writes().is_empty());
    }
}
