//! Page-level use-case services.
//!
//! # Responsibility
//! - Orchestrate gate, feeds, ingest and report into one page build.
//! - Keep hosts decoupled from feed formats and aggregation details.

pub mod dashboard_service;
