//! Core domain logic for the KPI reporting dashboard.
//! Turns per-division target/result/memo feeds into gated, display-ready
//! division pages.

pub mod access;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod memo;
pub mod model;
pub mod render;
pub mod report;
pub mod service;
pub mod source;

pub use access::{AccessError, AccessGate, AllowList, Identity, RequestContext};
pub use config::{ConfigError, ConfigResult, DashboardConfig, DivisionConfig, FeedHandles};
pub use ingest::normalize::DataIntegrityError;
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use report::cutoff::CutoffPolicy;
pub use report::table::TextualLayout;
pub use service::dashboard_service::{
    DashboardError, DashboardResult, DashboardService, DataWarning, DivisionLink, DivisionPage,
    NumericPanel, TextualPanel,
};
pub use source::cache::{CacheSettings, FeedCache, StalePolicy};
pub use source::json_file::JsonFileFeedSource;
pub use source::{FeedError, FeedResult, FeedSource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
