// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - reconciliation engine and source client.

pub mod backfill;
pub mod change;
pub mod garmin;
pub mod matcher;
pub mod normalize;
pub mod retry;
pub mod sync;

pub use backfill::Backfiller;
pub use change::{needs_update, stale_fields};
pub use garmin::{ActivitySource, GarminClient};
pub use matcher::Matcher;
pub use normalize::normalize;
pub use retry::{RetryPolicy, WritePacer};
pub use sync::{SyncAction, SyncReport, SyncService};
