//! Destination database layer (Notion).

pub mod memory;
pub mod notion;

pub use memory::{MemoryStore, WriteOp};
pub use notion::NotionDb;

use crate::error::Result;
use crate::models::{DestinationRecord, RecordFilter, RecordProperties};
use async_trait::async_trait;

/// Property names in the activity database.
pub mod properties {
    pub const DATE: &str = "Date";
    pub const ACTIVITY_TYPE: &str = "Activity Type";
    pub const SUBACTIVITY_TYPE: &str = "Subactivity Type";
    pub const ACTIVITY_NAME: &str = "Activity Name";
    pub const DISTANCE_KM: &str = "Distance (km)";
    pub const DURATION_MIN: &str = "Duration (min)";
    pub const CALORIES: &str = "Calories";
    pub const AVG_PACE: &str = "Avg Pace";
    pub const AVG_POWER: &str = "Avg Power";
    pub const MAX_POWER: &str = "Max Power";
    pub const TRAINING_EFFECT: &str = "Training Effect";
    pub const AEROBIC: &str = "Aerobic";
    pub const AEROBIC_EFFECT: &str = "Aerobic Effect";
    pub const ANAEROBIC: &str = "Anaerobic";
    pub const ANAEROBIC_EFFECT: &str = "Anaerobic Effect";
    pub const PR: &str = "PR";
    pub const FAVORITE: &str = "Fav";
    /// Primary key linking a page to its Garmin activity
    pub const GARMIN_ID: &str = "Garmin Activity ID";
}

/// Structured-document store holding one record per synced activity.
///
/// Implementations are expected to give read-your-writes consistency: a
/// record created or patched by one call is visible to the next `query`.
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Records matching `filter`, in store order.
    async fn query(&self, filter: &RecordFilter) -> Result<Vec<DestinationRecord>>;

    /// Create a record with the given properties and optional external icon.
    async fn create_record(
        &self,
        properties: RecordProperties,
        icon: Option<&str>,
    ) -> Result<DestinationRecord>;

    /// Patch the given properties (and icon, if any) on an existing record.
    async fn update_record(
        &self,
        id: &str,
        properties: RecordProperties,
        icon: Option<&str>,
    ) -> Result<()>;
}
