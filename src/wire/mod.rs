//! Tagged binary encoding for schema messages (protobuf wire format).

pub mod codec;
pub mod error;

pub(crate) use codec::impl_prost_message;
pub use codec::{decode, encode};
pub use error::WireError;
