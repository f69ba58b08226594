// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Garmin → Notion sync
//!
//! One-shot run: fetch recent Garmin activities and reconcile them into
//! the configured Notion database.

use garmin_notion_sync::{
    config::Config,
    db::NotionDb,
    error::Result,
    services::{GarminClient, SyncReport, SyncService, WritePacer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    match run().await {
        Ok(report) => {
            tracing::info!(
                created = report.created,
                updated = report.updated,
                skipped = report.skipped,
                backfilled = report.backfilled,
                writes = report.writes(),
                "Done"
            );
            Ok(())
        }
        Err(e) => {
            if e.is_auth_error() {
                tracing::error!(error = %e, "Credentials rejected; refresh the tokens in the environment");
            } else {
                tracing::error!(error = %e, "Sync aborted");
            }
            Err(e.into())
        }
    }
}

/// Load configuration, wire up the clients and reconcile once.
async fn run() -> Result<SyncReport> {
    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        database = %config.notion_database_id,
        limit = config.activity_limit,
        backfill = config.backfill_enabled,
        "Starting Garmin to Notion sync"
    );

    let garmin = GarminClient::from_config(&config);
    let notion = NotionDb::from_config(&config);

    let sync = SyncService::new(notion, WritePacer::new(config.backfill_write_interval))
        .with_backfill(config.backfill_enabled);

    sync.run(&garmin, config.activity_limit).await
}

/// Initialize structured JSON logging.
fn init_logging() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garmin_notion_sync=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
