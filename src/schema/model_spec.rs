//! `ModelSpec`: which serving signatures and metagraph to use.
//!
//! Wire layout:
//!   2  model_signature_name  repeated string
//!   5  tag                   repeated string
//!   1, 3, 4, 6               reserved
//!
//! JSON shape:
//! {
//!   "model_signature_name": ["serving_default", "classify"],
//!   "tag": ["serve", "gpu"]
//! }

use crate::schema::fields::{self, FieldDescriptor, SpecMessage, sealed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Signature used by the serving runtime when none is named.
pub const DEFAULT_SIGNATURE_NAME: &str = "serving_default";

/// Metagraph tag loaded when none is named (the CPU graph).
pub const DEFAULT_TAG: &str = "serve";

const MODEL_SIGNATURE_NAME: u32 = 2;
const TAG: u32 = 5;

/// Selection of the served model's signatures and metagraph tags.
///
/// `model_signature_name` has set semantics: order carries no meaning even
/// though the wire keeps it. Compare with [`ModelSpec::signature_set`] when
/// order should not matter. Duplicates are kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    model_signature_name: Vec<String>,
    tag: Vec<String>,
}

/// How a consumer should run the model, derived from the signature names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureSelection<'a> {
    /// No names given: default serving signature, single head.
    Default,
    /// Exactly one distinct name.
    Single(&'a str),
    /// Two or more distinct names, sorted.
    Multi(Vec<&'a str>),
}

impl ModelSpec {
    pub fn new<S, T>(signature_names: S, tags: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            model_signature_name: signature_names.into_iter().map(Into::into).collect(),
            tag: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_signature_name(mut self, name: impl Into<String>) -> Self {
        self.model_signature_name.push(name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag.push(tag.into());
        self
    }

    pub fn signature_names(&self) -> &[String] {
        &self.model_signature_name
    }

    pub fn tags(&self) -> &[String] {
        &self.tag
    }

    /// Distinct signature names, ignoring order and duplicates.
    pub fn signature_set(&self) -> BTreeSet<&str> {
        self.model_signature_name.iter().map(String::as_str).collect()
    }

    pub fn signature_selection(&self) -> SignatureSelection<'_> {
        let names: Vec<&str> = self.signature_set().into_iter().collect();
        match names.len() {
            0 => SignatureSelection::Default,
            1 => SignatureSelection::Single(names[0]),
            _ => SignatureSelection::Multi(names),
        }
    }

    pub fn is_multi_head(&self) -> bool {
        matches!(self.signature_selection(), SignatureSelection::Multi(_))
    }

    /// Signature names a runtime would run, with the default filled in.
    pub fn effective_signature_names(&self) -> Vec<&str> {
        if self.model_signature_name.is_empty() {
            vec![DEFAULT_SIGNATURE_NAME]
        } else {
            self.model_signature_name.iter().map(String::as_str).collect()
        }
    }

    /// Metagraph tags a runtime would load, with the default filled in.
    pub fn effective_tags(&self) -> Vec<&str> {
        if self.tag.is_empty() {
            vec![DEFAULT_TAG]
        } else {
            self.tag.iter().map(String::as_str).collect()
        }
    }
}

impl sealed::Sealed for ModelSpec {
    fn values_mut(&mut self, number: u32) -> Option<&mut Vec<String>> {
        match number {
            MODEL_SIGNATURE_NAME => Some(&mut self.model_signature_name),
            TAG => Some(&mut self.tag),
            _ => None,
        }
    }
}

impl SpecMessage for ModelSpec {
    const NAME: &'static str = "tfx.components.inference.ModelSpec";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new("model_signature_name", MODEL_SIGNATURE_NAME),
        FieldDescriptor::new("tag", TAG),
    ];
    const RESERVED: &'static [u32] = &[1, 3, 4, 6];

    fn values(&self, number: u32) -> &[String] {
        match number {
            MODEL_SIGNATURE_NAME => &self.model_signature_name,
            TAG => &self.tag,
            _ => &[],
        }
    }
}

const _: () = assert!(fields::is_well_formed(
    <ModelSpec as SpecMessage>::FIELDS,
    <ModelSpec as SpecMessage>::RESERVED
));

crate::wire::impl_prost_message!(ModelSpec);
