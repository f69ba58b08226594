// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use garmin_notion_sync::db::{properties, MemoryStore};
use garmin_notion_sync::error::Result;
use garmin_notion_sync::models::{
    ActivityType, DestinationRecord, PropertyValue, RawActivity, RecordProperties,
};
use garmin_notion_sync::services::{ActivitySource, SyncService, WritePacer};
use std::fs;

/// Load the sample Garmin activity list.
#[allow(dead_code)]
pub fn fixture_activities() -> Vec<RawActivity> {
    let json = fs::read_to_string("tests/fixtures/garmin_activities.json")
        .expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

/// A running activity with the given ID, name and distance.
#[allow(dead_code)]
pub fn run_activity(id: Option<u64>, name: &str, distance_m: f64) -> RawActivity {
    RawActivity {
        activity_id: id,
        activity_name: Some(name.to_string()),
        activity_type: Some(ActivityType {
            type_key: Some("running".to_string()),
        }),
        start_time_gmt: Some("2024-03-01 07:15:32".to_string()),
        distance: Some(distance_m),
        duration: Some(1800.0),
        calories: Some(400.0),
        average_speed: Some(2.5),
        ..Default::default()
    }
}

/// A record as left behind by an older sync: composite fields set, no
/// Garmin ID and no subtype.
#[allow(dead_code)]
pub fn legacy_record(id: &str, start_time: &str, activity_type: &str, name: &str) -> DestinationRecord {
    DestinationRecord {
        id: id.to_string(),
        properties: RecordProperties::new()
            .with(properties::DATE, PropertyValue::Date(Some(start_time.to_string())))
            .with(
                properties::ACTIVITY_TYPE,
                PropertyValue::Select(Some(activity_type.to_string())),
            )
            .with(properties::ACTIVITY_NAME, PropertyValue::Title(name.to_string()))
            .with(properties::GARMIN_ID, PropertyValue::RichText(String::new()))
            .with(properties::DISTANCE_KM, PropertyValue::Number(Some(5.0))),
        icon: None,
    }
}

/// Sync service over an in-memory store, without pacing.
#[allow(dead_code)]
pub fn test_sync(store: MemoryStore) -> SyncService<MemoryStore> {
    SyncService::new(store, WritePacer::disabled())
}

/// Activity source serving a fixed list.
#[allow(dead_code)]
pub struct StaticSource(pub Vec<RawActivity>);

#[async_trait]
impl ActivitySource for StaticSource {
    async fn list_activities(&self, offset: u32, limit: u32) -> Result<Vec<RawActivity>> {
        Ok(self
            .0
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
