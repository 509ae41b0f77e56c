//! Data source boundary.
//!
//! # Responsibility
//! - Define the `FeedSource` contract through which the core receives rows.
//! - Cache feeds with a freshness window (`cache`).
//! - Provide a file-backed source for exported sheets (`json_file`).
//!
//! # Invariants
//! - Sources return rows exactly as received; trimming and coercion happen
//!   in `ingest`.
//! - A feed is identified by its handle (URL or relative path) alone.

pub mod cache;
pub mod json_file;

use crate::model::row::RawRow;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FeedResult<T> = Result<T, FeedError>;

/// Feed fetch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    InvalidHandle(String),
    NotFound(String),
    Io { handle: String, message: String },
    Parse { handle: String, message: String },
    Unavailable { handle: String, message: String },
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHandle(handle) => write!(f, "feed handle is invalid: `{handle}`"),
            Self::NotFound(handle) => write!(f, "feed not found: `{handle}`"),
            Self::Io { handle, message } => write!(f, "failed to read feed `{handle}`: {message}"),
            Self::Parse { handle, message } => {
                write!(f, "failed to parse feed `{handle}`: {message}")
            }
            Self::Unavailable { handle, message } => {
                write!(f, "feed `{handle}` is unavailable: {message}")
            }
        }
    }
}

impl Error for FeedError {}

/// Supplier of tabular feeds.
pub trait FeedSource: Send + Sync {
    /// Short identifier used in log lines.
    fn source_id(&self) -> &str;

    /// Fetches every row of the feed behind `handle`.
    fn fetch(&self, handle: &str) -> FeedResult<Vec<RawRow>>;
}

impl<T: FeedSource + ?Sized> FeedSource for std::sync::Arc<T> {
    fn source_id(&self) -> &str {
        (**self).source_id()
    }

    fn fetch(&self, handle: &str) -> FeedResult<Vec<RawRow>> {
        (**self).fetch(handle)
    }
}
