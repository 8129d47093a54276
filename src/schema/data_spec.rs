//! `DataSpec`: which example splits a bulk-inference run processes.
//!
//! Wire layout:
//!   2  example_splits  repeated string
//!   1, 3, 4            reserved

use crate::schema::fields::{self, FieldDescriptor, SpecMessage, sealed};
use serde::{Deserialize, Serialize};

const EXAMPLE_SPLITS: u32 = 2;

/// Split filter. An empty list means every split is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSpec {
    example_splits: Vec<String>,
}

impl DataSpec {
    pub fn new<S>(example_splits: S) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            example_splits: example_splits.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_split(mut self, split: impl Into<String>) -> Self {
        self.example_splits.push(split.into());
        self
    }

    pub fn example_splits(&self) -> &[String] {
        &self.example_splits
    }

    pub fn processes_all_splits(&self) -> bool {
        self.example_splits.is_empty()
    }

    pub fn includes(&self, split: &str) -> bool {
        self.processes_all_splits() || self.example_splits.iter().any(|s| s == split)
    }

    /// Keep the splits from `available` this spec selects, in the caller's order.
    pub fn select<'a, S: AsRef<str>>(&self, available: &'a [S]) -> Vec<&'a str> {
        available
            .iter()
            .map(AsRef::as_ref)
            .filter(|split| self.includes(split))
            .collect()
    }
}

impl sealed::Sealed for DataSpec {
    fn values_mut(&mut self, number: u32) -> Option<&mut Vec<String>> {
        match number {
            EXAMPLE_SPLITS => Some(&mut self.example_splits),
            _ => None,
        }
    }
}

impl SpecMessage for DataSpec {
    const NAME: &'static str = "tfx.components.inference.DataSpec";
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::new("example_splits", EXAMPLE_SPLITS)];
    const RESERVED: &'static [u32] = &[1, 3, 4];

    fn values(&self, number: u32) -> &[String] {
        match number {
            EXAMPLE_SPLITS => &self.example_splits,
            _ => &[],
        }
    }
}

const _: () = assert!(fields::is_well_formed(
    <DataSpec as SpecMessage>::FIELDS,
    <DataSpec as SpecMessage>::RESERVED
));

crate::wire::impl_prost_message!(DataSpec);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AVAILABLE: [&str; 3] = ["train", "eval", "holdout"];

    #[test]
    fn empty_selects_everything() {
        let spec = DataSpec::default();
        assert!(spec.processes_all_splits());
        assert!(spec.includes("anything"));
        assert_eq!(spec.select(&AVAILABLE), AVAILABLE.to_vec());
    }

    #[test]
    fn named_splits_filter_in_caller_order() {
        let spec = DataSpec::new(["holdout", "train"]);
        assert!(!spec.includes("eval"));
        assert_eq!(spec.select(&AVAILABLE), vec!["train", "holdout"]);
    }

    #[test]
    fn unknown_split_selects_nothing() {
        let spec = DataSpec::default().with_split("test");
        assert!(spec.select(&AVAILABLE).is_empty());
    }
}
