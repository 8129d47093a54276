//! Field tables shared by every message in the schema.
//!
//! Each message is a flat list of repeated string fields keyed by a small
//! wire number. Numbers that were used by older revisions are retired and
//! listed in `RESERVED`; they must never be assigned again.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A single repeated string field: its text/JSON name and its wire number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub number: u32,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, number: u32) -> Self {
        Self { name, number }
    }
}

pub(crate) mod sealed {
    /// Write access to field storage, only reachable from inside the crate.
    pub trait Sealed {
        fn values_mut(&mut self, number: u32) -> Option<&mut Vec<String>>;
    }
}

/// A configuration message made only of repeated string fields.
///
/// Implemented by [`ModelSpec`](super::ModelSpec) and
/// [`DataSpec`](super::DataSpec). Sealed: no outside implementations and no
/// field-level write access. The `prost::Message` supertrait still exposes
/// `clear()` and `merge()`, which replace or append whole field contents.
pub trait SpecMessage:
    sealed::Sealed
    + prost::Message
    + Default
    + Clone
    + PartialEq
    + Debug
    + Serialize
    + DeserializeOwned
{
    /// Fully-qualified message name, used in errors and logs.
    const NAME: &'static str;

    /// Assigned fields in ascending wire-number order.
    const FIELDS: &'static [FieldDescriptor];

    /// Wire numbers permanently retired from this message.
    const RESERVED: &'static [u32];

    /// Values stored for `number`, empty for numbers not in `FIELDS`.
    fn values(&self, number: u32) -> &[String];

    fn field_by_number(number: u32) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.number == number)
    }

    fn field_by_name(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    fn is_reserved(number: u32) -> bool {
        Self::RESERVED.contains(&number)
    }
}

/// True when no assigned field reuses a reserved number and field numbers
/// are strictly ascending. Evaluated in const context by each message.
pub const fn is_well_formed(fields: &[FieldDescriptor], reserved: &[u32]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        if i > 0 && fields[i - 1].number >= fields[i].number {
            return false;
        }
        let mut j = 0;
        while j < reserved.len() {
            if fields[i].number == reserved[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}
