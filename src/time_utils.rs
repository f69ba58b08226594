// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Garmin's `startTimeGMT` layout.
const GARMIN_GMT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Canonical form of an activity start time.
///
/// Accepts Garmin's `YYYY-MM-DD HH:MM:SS` (GMT) and RFC3339 with any offset.
/// Anything else is returned unchanged so the value still round-trips into
/// the destination as-is.
pub fn normalize_start_time(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, GARMIN_GMT_FORMAT) {
        return format_utc_rfc3339(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return format_utc_rfc3339(dt.with_timezone(&Utc));
    }
    raw.to_string()
}
