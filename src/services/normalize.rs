// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity normalization.
//!
//! Turns a Garmin activity summary into the canonical form stored in the
//! destination: classified type/subtype, display name, rounded metrics,
//! formatted pace and training-effect labels, plus an icon.
//!
//! Normalization is total and deterministic: missing fields fall back to
//! defaults and the same input always yields the same output.

use crate::models::{NormalizedActivity, RawActivity};
use crate::time_utils::normalize_start_time;

const UNKNOWN: &str = "Unknown";
const UNNAMED_ACTIVITY: &str = "Unnamed Activity";

/// Ordered prefix table for training-effect messages. First match wins.
const TRAINING_MESSAGES: &[(&str, &str)] = &[
    ("NO_", "No Benefit"),
    ("MINOR_", "Some Benefit"),
    ("RECOVERY_", "Recovery"),
    ("MAINTAINING_", "Maintaining"),
    ("IMPROVING_", "Impacting"),
    ("IMPACTING_", "Impacting"),
    ("HIGHLY_", "Highly Impacting"),
    ("OVERREACHING_", "Overreaching"),
];

/// Normalize a raw Garmin activity.
pub fn normalize(raw: &RawActivity) -> NormalizedActivity {
    let display_name = format_display_name(raw.activity_name.as_deref().unwrap_or(UNNAMED_ACTIVITY));
    let (activity_type, subtype) = classify_activity(raw.type_key(), &display_name);
    let icon = icon_for(&subtype);

    NormalizedActivity {
        activity_id: raw.primary_key(),
        start_time: raw.start_time_gmt.as_deref().map(normalize_start_time),
        distance_km: round_to(raw.distance.unwrap_or(0.0) / 1000.0, 2),
        duration_min: round_to(raw.duration.unwrap_or(0.0) / 60.0, 2),
        calories: raw.calories.unwrap_or(0.0).round_ties_even() as i64,
        pace: format_pace(raw.average_speed.unwrap_or(0.0)),
        avg_power: round_to(raw.avg_power.unwrap_or(0.0), 1),
        max_power: round_to(raw.max_power.unwrap_or(0.0), 1),
        training_effect: format_training_effect(
            raw.training_effect_label.as_deref().unwrap_or(UNKNOWN),
        ),
        aerobic: round_to(raw.aerobic_training_effect.unwrap_or(0.0), 1),
        aerobic_effect: format_training_message(
            raw.aerobic_training_effect_message
                .as_deref()
                .unwrap_or(UNKNOWN),
        ),
        anaerobic: round_to(raw.anaerobic_training_effect.unwrap_or(0.0), 1),
        anaerobic_effect: format_training_message(
            raw.anaerobic_training_effect_message
                .as_deref()
                .unwrap_or(UNKNOWN),
        ),
        pr: raw.pr.unwrap_or(false),
        favorite: raw.favorite.unwrap_or(false),
        display_name,
        activity_type,
        subtype,
        icon,
    }
}

/// Classify a Garmin type key into `(type, subtype)`.
///
/// Name keywords override everything else, then the remap table, then the
/// Yoga/Pilates grouping and the Rowing V2 alias.
pub fn classify_activity(type_key: Option<&str>, display_name: &str) -> (String, String) {
    let lower_name = display_name.to_lowercase();
    if lower_name.contains("meditation") {
        return ("Meditation".to_string(), "Meditation".to_string());
    }
    if lower_name.contains("barre") {
        return ("Strength".to_string(), "Barre".to_string());
    }
    if lower_name.contains("stretch") {
        return ("Stretching".to_string(), "Stretching".to_string());
    }

    let formatted = match type_key {
        Some(key) => title_case(&key.replace('_', " ")),
        None => UNKNOWN.to_string(),
    };

    if let Some(mapped) = remap_type(&formatted) {
        return (mapped.to_string(), formatted);
    }

    match formatted.as_str() {
        "Rowing V2" => ("Rowing".to_string(), "Rowing".to_string()),
        "Yoga" | "Pilates" => ("Yoga/Pilates".to_string(), formatted),
        _ => (formatted.clone(), formatted),
    }
}

/// Parent type for Garmin subtypes that roll up into a broader category.
fn remap_type(formatted: &str) -> Option<&'static str> {
    Some(match formatted {
        "Barre" => "Strength",
        "Indoor Cardio" => "Cardio",
        "Indoor Cycling" => "Cycling",
        "Indoor Rowing" => "Rowing",
        "Speed Walking" => "Walking",
        "Strength Training" => "Strength",
        "Treadmill Running" => "Running",
        _ => return None,
    })
}

/// External icon for an activity subtype, if one is known.
pub fn icon_for(subtype: &str) -> Option<&'static str> {
    Some(match subtype {
        "Barre" => "https://img.icons8.com/?size=100&id=66924&format=png&color=000000",
        "Breathwork" => "https://img.icons8.com/?size=100&id=9798&format=png&color=000000",
        "Cardio" => "https://img.icons8.com/?size=100&id=71221&format=png&color=000000",
        "Cycling" => "https://img.icons8.com/?size=100&id=47443&format=png&color=000000",
        "Hiking" => "https://img.icons8.com/?size=100&id=9844&format=png&color=000000",
        "Indoor Cardio" => "https://img.icons8.com/?size=100&id=62779&format=png&color=000000",
        "Indoor Cycling" => "https://img.icons8.com/?size=100&id=47443&format=png&color=000000",
        "Indoor Rowing" => "https://img.icons8.com/?size=100&id=71098&format=png&color=000000",
        "Pilates" => "https://img.icons8.com/?size=100&id=9774&format=png&color=000000",
        "Meditation" => "https://img.icons8.com/?size=100&id=9798&format=png&color=000000",
        "Rowing" => "https://img.icons8.com/?size=100&id=71491&format=png&color=000000",
        "Running" => "https://img.icons8.com/?size=100&id=k1l1XFkME39t&format=png&color=000000",
        "Strength Training" => {
            "https://img.icons8.com/?size=100&id=107640&format=png&color=000000"
        }
        "Stretching" => "https://img.icons8.com/?size=100&id=djfOcRn1m_kh&format=png&color=000000",
        "Swimming" => "https://img.icons8.com/?size=100&id=9777&format=png&color=000000",
        "Treadmill Running" => "https://img.icons8.com/?size=100&id=9794&format=png&color=000000",
        "Walking" => "https://img.icons8.com/?size=100&id=9807&format=png&color=000000",
        "Yoga" => "https://img.icons8.com/?size=100&id=9783&format=png&color=000000",
        _ => return None,
    })
}

/// Cosmetic rename for Garmin's generic "ENTERTAINMENT" activity names.
pub fn format_display_name(name: &str) -> String {
    name.replace("ENTERTAINMENT", "Netflix")
}

/// Format average speed (m/s) as pace per kilometre, e.g. "6:40 min/km".
///
/// Seconds are truncated, not rounded. Non-positive speed yields "".
pub fn format_pace(average_speed: f64) -> String {
    if average_speed <= 0.0 || !average_speed.is_finite() {
        return String::new();
    }
    let pace_min_km = 1000.0 / (average_speed * 60.0);
    let minutes = pace_min_km.trunc();
    let seconds = ((pace_min_km - minutes) * 60.0).trunc();
    format!("{}:{:02} min/km", minutes as u64, seconds as u64)
}

/// Map a Garmin training-effect message to its benefit label by prefix.
/// Unknown messages pass through unchanged.
pub fn format_training_message(message: &str) -> String {
    TRAINING_MESSAGES
        .iter()
        .find(|(prefix, _)| message.starts_with(prefix))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| message.to_string())
}

/// "AEROBIC_BASE" → "Aerobic Base".
pub fn format_training_effect(label: &str) -> String {
    title_case(&label.replace('_', " "))
}

/// Word-run title case: a letter is upper-cased unless it follows another
/// letter, in which case it is lower-cased. Non-letters pass through.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Round to `decimals` places, ties to even.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
