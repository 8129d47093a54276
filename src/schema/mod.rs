//! Schema layer: the two bulk-inference configuration messages.
//!
//! This module owns:
//! - `ModelSpec` (which signatures and metagraph tags to use)
//! - `DataSpec` (which example splits to process)
//! - the field tables (name + wire number) and reserved numbers that the
//!   wire codec, text format and config loader are generic over.

pub mod data_spec;
pub mod fields;
pub mod model_spec;

pub use data_spec::DataSpec;
pub use fields::{FieldDescriptor, SpecMessage};
pub use model_spec::{DEFAULT_SIGNATURE_NAME, DEFAULT_TAG, ModelSpec, SignatureSelection};
