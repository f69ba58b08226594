// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Garmin ID backfill pass.
//!
//! Links records created before the Garmin ID was stored: any record found
//! through the composite key whose ID property is empty gets the ID written
//! into it. Must run before the main sync loop, since it changes which
//! records the primary-key lookup will find.

use crate::db::{properties, DestinationStore};
use crate::error::Result;
use crate::models::{NormalizedActivity, PropertyValue, RecordProperties};
use crate::services::matcher::Matcher;
use crate::services::retry::WritePacer;

/// Attaches Garmin IDs to records matched by the composite key.
pub struct Backfiller<'a, S: ?Sized> {
    store: &'a S,
    pacer: &'a WritePacer,
}

impl<'a, S: DestinationStore + ?Sized> Backfiller<'a, S> {
    pub fn new(store: &'a S, pacer: &'a WritePacer) -> Self {
        Self { store, pacer }
    }

    /// Run the pass over a batch. Returns the number of records patched.
    pub async fn run(&self, activities: &[NormalizedActivity]) -> Result<usize> {
        let matcher = Matcher::new(self.store);
        let mut patched = 0;

        for activity in activities {
            let Some(activity_id) = activity.activity_id.as_deref() else {
                continue;
            };

            if matcher.find_by_activity_id(activity_id).await?.is_some() {
                continue; // already linked
            }

            let Some(record) = matcher.find_by_composite_key(activity).await? else {
                continue;
            };

            let current_id = record.properties.rich_text(properties::GARMIN_ID).unwrap_or("");
            if !current_id.is_empty() {
                tracing::debug!(
                    activity_id,
                    record_id = %record.id,
                    current_id,
                    "Composite match already linked to another activity"
                );
                continue;
            }

            self.pacer.pace().await;
            let patch = RecordProperties::new().with(
                properties::GARMIN_ID,
                PropertyValue::RichText(activity_id.to_string()),
            );
            self.store.update_record(&record.id, patch, None).await?;
            patched += 1;

            tracing::info!(activity_id, record_id = %record.id, "Backfilled Garmin ID");
        }

        Ok(patched)
    }
}
