//! Configuration schema for bulk inference: `ModelSpec` picks the served
//! model's signatures and metagraph tags, `DataSpec` picks the example splits.
//!
//! Both messages travel as protobuf-compatible bytes ([`wire`]), and can be
//! authored as JSON or text ([`config`], [`text`]).

pub mod config;
pub mod schema;
pub mod text;
pub mod wire;

pub use schema::{DataSpec, ModelSpec, SignatureSelection, SpecMessage};
pub use wire::WireError;

pub type Result<T> = anyhow::Result<T>;
