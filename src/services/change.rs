// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Change detection: decides whether an existing record is stale.

use crate::db::properties;
use crate::models::{DestinationRecord, NormalizedActivity, RawActivity};
use crate::services::normalize::normalize;

/// Numbers read back from the destination are rounded to at most two
/// decimals, so anything closer than this is the same value.
const NUMBER_TOLERANCE: f64 = 1e-6;

/// Whether `existing` must be rewritten to reflect `raw`.
pub fn needs_update(existing: &DestinationRecord, raw: &RawActivity) -> bool {
    !stale_fields(existing, &normalize(raw)).is_empty()
}

/// Names of the properties on `existing` that differ from `activity`.
///
/// Absent properties, empty values and properties of the wrong kind all
/// count as differences. A missing or empty subtype is always reported so
/// records predating that property get filled in.
pub fn stale_fields(existing: &DestinationRecord, activity: &NormalizedActivity) -> Vec<&'static str> {
    let props = &existing.properties;
    let mut stale = Vec::new();

    if let Some(new_id) = activity.activity_id.as_deref().filter(|id| !id.is_empty()) {
        if props.rich_text(properties::GARMIN_ID).unwrap_or("") != new_id {
            stale.push(properties::GARMIN_ID);
        }
    }

    let numbers = [
        (properties::DISTANCE_KM, activity.distance_km),
        (properties::DURATION_MIN, activity.duration_min),
        (properties::CALORIES, activity.calories as f64),
        (properties::AVG_POWER, activity.avg_power),
        (properties::MAX_POWER, activity.max_power),
        (properties::AEROBIC, activity.aerobic),
        (properties::ANAEROBIC, activity.anaerobic),
    ];
    for (name, expected) in numbers {
        if !number_matches(props.number(name), expected) {
            stale.push(name);
        }
    }

    if props.rich_text(properties::AVG_PACE) != Some(activity.pace.as_str()) {
        stale.push(properties::AVG_PACE);
    }

    // An unset select and an empty label are the same value.
    let selects = [
        (properties::TRAINING_EFFECT, &activity.training_effect),
        (properties::AEROBIC_EFFECT, &activity.aerobic_effect),
        (properties::ANAEROBIC_EFFECT, &activity.anaerobic_effect),
        (properties::ACTIVITY_TYPE, &activity.activity_type),
    ];
    for (name, expected) in selects {
        if props.select(name).unwrap_or("") != expected.as_str() {
            stale.push(name);
        }
    }

    if props.select(properties::SUBACTIVITY_TYPE) != Some(activity.subtype.as_str()) {
        stale.push(properties::SUBACTIVITY_TYPE);
    }

    let checkboxes = [
        (properties::PR, activity.pr),
        (properties::FAVORITE, activity.favorite),
    ];
    for (name, expected) in checkboxes {
        if props.checkbox(name) != Some(expected) {
            stale.push(name);
        }
    }

    stale
}

fn number_matches(stored: Option<f64>, expected: f64) -> bool {
    stored.is_some_and(|n| (n - expected).abs() < NUMBER_TOLERANCE)
}
