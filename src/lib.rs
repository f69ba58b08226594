// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Garmin → Notion activity sync
//!
//! This crate reconciles Garmin Connect activities into a Notion database,
//! keeping exactly one up-to-date page per activity.

pub mod config;
pub mod db;
pub mod error;
mod http;
pub mod models;
pub mod services;
pub mod time_utils;
