//! Indicator classifier.
//!
//! Splits definitions into numeric and textual partitions. Definitions with an
//! unrecognized kind tag are excluded from both and reported instead of being
//! dropped silently.

use crate::ingest::normalize::DefinitionSet;
use crate::model::indicator::{IndicatorDefinition, IndicatorKind, UnrecognizedIndicator};
use log::warn;

/// Partitioned definitions, each in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub numeric: Vec<IndicatorDefinition>,
    pub textual: Vec<IndicatorDefinition>,
    pub unrecognized: Vec<UnrecognizedIndicator>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.numeric.len() + self.textual.len()
    }
}

/// Partitions `set` by indicator kind.
pub fn classify(set: &DefinitionSet) -> Classification {
    let mut classification = Classification::default();
    for definition in set.definitions() {
        match definition.kind {
            IndicatorKind::Numeric => classification.numeric.push(definition.clone()),
            IndicatorKind::Textual => classification.textual.push(definition.clone()),
        }
    }

    for item in set.unrecognized() {
        warn!(
            "event=indicator_kind_unrecognized module=ingest uid={} tag={:?}",
            item.uid, item.tag
        );
    }
    classification.unrecognized = set.unrecognized().to_vec();
    classification
}
