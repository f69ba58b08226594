// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity matching between Garmin activities and destination records.
//!
//! The Garmin activity ID is authoritative once a record carries it. The
//! composite (date, type, name) key is a heuristic for records created
//! before the ID was stored, or for activities arriving without an ID.

use crate::db::{properties, DestinationStore};
use crate::error::Result;
use crate::models::{DestinationRecord, NormalizedActivity, RecordFilter};

/// Finds the destination record representing an activity.
pub struct Matcher<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: DestinationStore + ?Sized> Matcher<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Find the existing record for an activity: primary key first, then
    /// the composite fallback.
    pub async fn find_existing(
        &self,
        activity: &NormalizedActivity,
    ) -> Result<Option<DestinationRecord>> {
        if let Some(activity_id) = activity.activity_id.as_deref() {
            if let Some(record) = self.find_by_activity_id(activity_id).await? {
                return Ok(Some(record));
            }
        }
        self.find_by_composite_key(activity).await
    }

    /// Record whose primary-key property equals `activity_id`.
    pub async fn find_by_activity_id(&self, activity_id: &str) -> Result<Option<DestinationRecord>> {
        let filter = RecordFilter::RichTextEquals {
            property: properties::GARMIN_ID.to_string(),
            value: activity_id.to_string(),
        };
        let results = self.store.query(&filter).await?;
        Ok(first_of(results, "activity_id", activity_id))
    }

    /// Record matching on exact start time, type and display name.
    ///
    /// Activities without a start time cannot be matched this way.
    pub async fn find_by_composite_key(
        &self,
        activity: &NormalizedActivity,
    ) -> Result<Option<DestinationRecord>> {
        let Some(start_time) = activity.start_time.as_deref() else {
            tracing::debug!(
                name = %activity.display_name,
                "No start time, skipping composite lookup"
            );
            return Ok(None);
        };

        let filter = RecordFilter::And(vec![
            RecordFilter::DateEquals {
                property: properties::DATE.to_string(),
                value: start_time.to_string(),
            },
            RecordFilter::SelectEquals {
                property: properties::ACTIVITY_TYPE.to_string(),
                value: activity.activity_type.clone(),
            },
            RecordFilter::TitleEquals {
                property: properties::ACTIVITY_NAME.to_string(),
                value: activity.display_name.clone(),
            },
        ]);
        let results = self.store.query(&filter).await?;
        Ok(first_of(results, "composite", start_time))
    }
}

/// First record of a lookup. Duplicates are reported, not resolved.
fn first_of(
    results: Vec<DestinationRecord>,
    lookup: &'static str,
    key: &str,
) -> Option<DestinationRecord> {
    if results.len() > 1 {
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        tracing::warn!(
            lookup,
            key,
            count = results.len(),
            record_ids = ?ids,
            "Multiple destination records match one activity, using the first"
        );
    }
    results.into_iter().next()
}
