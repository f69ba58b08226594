// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Garmin activity model and its normalized projection.

use serde::{Deserialize, Serialize};

/// Activity summary as returned by the Garmin activity list.
///
/// Every field is optional; `null` and absence are treated the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    /// Garmin activity ID (stable primary key)
    #[serde(default)]
    pub activity_id: Option<u64>,
    #[serde(default)]
    pub activity_name: Option<String>,
    #[serde(default)]
    pub activity_type: Option<ActivityType>,
    /// Start time in GMT, e.g. "2024-03-01 07:15:32"
    #[serde(default, rename = "startTimeGMT")]
    pub start_time_gmt: Option<String>,
    /// Distance in meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    /// Average speed in m/s
    #[serde(default)]
    pub average_speed: Option<f64>,
    #[serde(default)]
    pub avg_power: Option<f64>,
    #[serde(default)]
    pub max_power: Option<f64>,
    #[serde(default)]
    pub training_effect_label: Option<String>,
    #[serde(default)]
    pub aerobic_training_effect: Option<f64>,
    #[serde(default)]
    pub aerobic_training_effect_message: Option<String>,
    #[serde(default)]
    pub anaerobic_training_effect: Option<f64>,
    #[serde(default)]
    pub anaerobic_training_effect_message: Option<String>,
    #[serde(default)]
    pub pr: Option<bool>,
    #[serde(default)]
    pub favorite: Option<bool>,
}

impl RawActivity {
    /// Primary key as stored in the destination, if the activity has one.
    ///
    /// An ID of zero is treated as missing.
    pub fn primary_key(&self) -> Option<String> {
        self.activity_id
            .filter(|id| *id != 0)
            .map(|id| id.to_string())
    }

    /// Raw `activityType.typeKey`, if present.
    pub fn type_key(&self) -> Option<&str> {
        self.activity_type
            .as_ref()
            .and_then(|t| t.type_key.as_deref())
    }
}

/// Nested `activityType` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityType {
    #[serde(default)]
    pub type_key: Option<String>,
}

/// Canonical projection of a [`RawActivity`] used for matching, comparison
/// and storage. Recomputed on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedActivity {
    /// Garmin activity ID as a string
    pub activity_id: Option<String>,
    /// Start time, RFC3339 UTC
    pub start_time: Option<String>,
    pub display_name: String,
    pub activity_type: String,
    pub subtype: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub calories: i64,
    /// "M:SS min/km", or empty when speed is unknown
    pub pace: String,
    pub avg_power: f64,
    pub max_power: f64,
    pub training_effect: String,
    pub aerobic: f64,
    pub aerobic_effect: String,
    pub anaerobic: f64,
    pub anaerobic_effect: String,
    pub pr: bool,
    pub favorite: bool,
    /// External icon URL for the subtype
    pub icon: Option<&'static str>,
}
