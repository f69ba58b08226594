// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sync orchestration.
//!
//! Handles the core workflow:
//! 1. Normalize the fetched Garmin activities
//! 2. Backfill Garmin IDs onto records matched by composite key
//! 3. For each activity, in source order: match, then create, update or skip
//!
//! Activities are processed strictly one at a time. A collaborator failure
//! aborts the batch; writes already made stay in place.

use crate::db::{properties, DestinationStore};
use crate::error::Result;
use crate::models::{NormalizedActivity, PropertyValue, RawActivity, RecordProperties};
use crate::services::backfill::Backfiller;
use crate::services::change::stale_fields;
use crate::services::garmin::ActivitySource;
use crate::services::matcher::Matcher;
use crate::services::normalize::normalize;
use crate::services::retry::WritePacer;

/// Terminal state of one activity within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// No matching record existed; one was created.
    Created,
    /// A matching record was stale and has been rewritten.
    Updated,
    /// A matching record was already up to date.
    Skipped,
}

/// Counts for one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub backfilled: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl SyncReport {
    fn record(&mut self, action: SyncAction) {
        match action {
            SyncAction::Created => self.created += 1,
            SyncAction::Updated => self.updated += 1,
            SyncAction::Skipped => self.skipped += 1,
        }
    }

    /// Number of create and update writes (backfill patches excluded).
    pub fn writes(&self) -> usize {
        self.created + self.updated
    }
}

/// Reconciles Garmin activities into a destination store.
pub struct SyncService<S> {
    store: S,
    pacer: WritePacer,
    backfill_enabled: bool,
}

impl<S: DestinationStore> SyncService<S> {
    pub fn new(store: S, pacer: WritePacer) -> Self {
        Self {
            store,
            pacer,
            backfill_enabled: true,
        }
    }

    /// Enable or disable the Garmin ID backfill pass.
    pub fn with_backfill(mut self, enabled: bool) -> Self {
        self.backfill_enabled = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch up to `limit` activities from `source` and reconcile them.
    pub async fn run<A: ActivitySource + ?Sized>(
        &self,
        source: &A,
        limit: u32,
    ) -> Result<SyncReport> {
        let activities = source.list_activities(0, limit).await?;
        tracing::info!(count = activities.len(), limit, "Fetched activities");
        self.reconcile(&activities).await
    }

    /// Reconcile a batch of raw activities against the store.
    pub async fn reconcile(&self, raw_activities: &[RawActivity]) -> Result<SyncReport> {
        let activities: Vec<NormalizedActivity> = raw_activities.iter().map(normalize).collect();
        let mut report = SyncReport {
            fetched: activities.len(),
            ..Default::default()
        };

        if self.backfill_enabled {
            report.backfilled = Backfiller::new(&self.store, &self.pacer)
                .run(&activities)
                .await?;
        }

        for activity in &activities {
            let action = self.reconcile_one(activity).await?;
            report.record(action);
        }

        tracing::info!(
            fetched = report.fetched,
            backfilled = report.backfilled,
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            "Sync complete"
        );
        Ok(report)
    }

    /// Match one activity and create, update or skip its record.
    pub async fn reconcile_one(&self, activity: &NormalizedActivity) -> Result<SyncAction> {
        let matcher = Matcher::new(&self.store);

        let Some(existing) = matcher.find_existing(activity).await? else {
            let record = self
                .store
                .create_record(create_properties(activity), activity.icon)
                .await?;
            tracing::info!(
                activity_id = activity.activity_id.as_deref(),
                record_id = %record.id,
                name = %activity.display_name,
                "Created activity record"
            );
            return Ok(SyncAction::Created);
        };

        let stale = stale_fields(&existing, activity);
        if stale.is_empty() {
            return Ok(SyncAction::Skipped);
        }

        tracing::debug!(record_id = %existing.id, fields = ?stale, "Record is stale");
        self.store
            .update_record(&existing.id, update_properties(activity), activity.icon)
            .await?;
        tracing::info!(
            activity_id = activity.activity_id.as_deref(),
            record_id = %existing.id,
            name = %activity.display_name,
            "Updated activity record"
        );
        Ok(SyncAction::Updated)
    }
}

/// Full property set for a new record.
pub fn create_properties(activity: &NormalizedActivity) -> RecordProperties {
    let mut props = metric_properties(activity);
    if let Some(start_time) = &activity.start_time {
        props.insert(properties::DATE, PropertyValue::Date(Some(start_time.clone())));
    }
    props.insert(
        properties::ACTIVITY_NAME,
        PropertyValue::Title(activity.display_name.clone()),
    );
    props.insert(
        properties::GARMIN_ID,
        PropertyValue::RichText(activity.activity_id.clone().unwrap_or_default()),
    );
    props
}

/// Properties rewritten on a stale record.
///
/// Date and name identify the record and are left alone; the Garmin ID is
/// only written when the activity has one.
pub fn update_properties(activity: &NormalizedActivity) -> RecordProperties {
    let mut props = metric_properties(activity);
    if let Some(activity_id) = &activity.activity_id {
        props.insert(properties::GARMIN_ID, PropertyValue::RichText(activity_id.clone()));
    }
    props
}

fn metric_properties(activity: &NormalizedActivity) -> RecordProperties {
    let select = |s: &str| PropertyValue::Select((!s.is_empty()).then(|| s.to_string()));
    let number = |n: f64| PropertyValue::Number(Some(n));

    RecordProperties::new()
        .with(properties::ACTIVITY_TYPE, select(&activity.activity_type))
        .with(properties::SUBACTIVITY_TYPE, select(&activity.subtype))
        .with(properties::DISTANCE_KM, number(activity.distance_km))
        .with(properties::DURATION_MIN, number(activity.duration_min))
        .with(properties::CALORIES, number(activity.calories as f64))
        .with(properties::AVG_PACE, PropertyValue::RichText(activity.pace.clone()))
        .with(properties::AVG_POWER, number(activity.avg_power))
        .with(properties::MAX_POWER, number(activity.max_power))
        .with(properties::TRAINING_EFFECT, select(&activity.training_effect))
        .with(properties::AEROBIC, number(activity.aerobic))
        .with(properties::AEROBIC_EFFECT, select(&activity.aerobic_effect))
        .with(properties::ANAEROBIC, number(activity.anaerobic))
        .with(properties::ANAEROBIC_EFFECT, select(&activity.anaerobic_effect))
        .with(properties::PR, PropertyValue::Checkbox(activity.pr))
        .with(properties::FAVORITE, PropertyValue::Checkbox(activity.favorite))
}
