//! File-backed feed source for sheet exports.
//!
//! A handle is a path relative to the source root pointing at a JSON array of
//! row objects, e.g. `global/targets.json`.

use crate::model::row::RawRow;
use crate::source::{FeedError, FeedResult, FeedSource};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

pub struct JsonFileFeedSource {
    root: PathBuf,
}

impl JsonFileFeedSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, handle: &str) -> FeedResult<PathBuf> {
        let relative = Path::new(handle);
        let is_plain_relative = !handle.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !is_plain_relative {
            return Err(FeedError::InvalidHandle(handle.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl FeedSource for JsonFileFeedSource {
    fn source_id(&self) -> &str {
        "json_file"
    }

    fn fetch(&self, handle: &str) -> FeedResult<Vec<RawRow>> {
        let path = self.resolve(handle)?;
        let body = std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => FeedError::NotFound(handle.to_string()),
            _ => FeedError::Io {
                handle: handle.to_string(),
                message: err.to_string(),
            },
        })?;
        parse_rows(handle, &body)
    }
}

/// Parses a JSON array of row objects.
pub fn parse_rows(handle: &str, body: &str) -> FeedResult<Vec<RawRow>> {
    let values: Vec<Value> = serde_json::from_str(body).map_err(|err| FeedError::Parse {
        handle: handle.to_string(),
        message: err.to_string(),
    })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            RawRow::from_json(value).ok_or_else(|| FeedError::Parse {
                handle: handle.to_string(),
                message: format!("row {index} is not an object"),
            })
        })
        .collect()
}
