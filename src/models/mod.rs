// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod record;

pub use activity::{ActivityType, NormalizedActivity, RawActivity};
pub use record::{DestinationRecord, PropertyValue, RecordFilter, RecordProperties};
