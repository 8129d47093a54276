//! Encode/decode for flat repeated-string messages.
//!
//! Every value is written as its own `(number << 3) | LEN` key followed by a
//! varint length and UTF-8 bytes. Fields go out in ascending number order.
//!
//! On read:
//! - reserved numbers are a hard error (never skipped)
//! - numbers not in the field table are skipped, whatever their wire type
//! - absent fields stay empty

use crate::schema::SpecMessage;
use crate::wire::WireError;

use prost::DecodeError;
use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType, string};
use tracing::debug;

/// Serialize `message` to its binary wire form.
pub fn encode<M: SpecMessage>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Parse a complete binary payload into `M`.
///
/// Unlike `prost::Message::decode`, a reserved field comes back as
/// [`WireError::ReservedField`] instead of a generic decode error.
pub fn decode<M: SpecMessage>(bytes: &[u8]) -> Result<M, WireError> {
    let decode_err = |source: DecodeError| WireError::Decode {
        message: M::NAME,
        source,
    };

    let mut buf = bytes;
    let mut message = M::default();
    while buf.has_remaining() {
        let (tag, wire_type) = encoding::decode_key(&mut buf).map_err(decode_err)?;

        if M::is_reserved(tag) {
            return Err(WireError::ReservedField {
                message: M::NAME,
                field: tag,
            });
        }
        if M::field_by_number(tag).is_none() {
            debug!(message = M::NAME, field = tag, ?wire_type, "skipping unknown field");
        }

        message
            .merge_field(tag, wire_type, &mut buf, DecodeContext::default())
            .map_err(decode_err)?;
    }
    Ok(message)
}

pub(crate) fn encode_fields<M: SpecMessage>(message: &M, buf: &mut impl BufMut) {
    for field in M::FIELDS {
        string::encode_repeated(field.number, message.values(field.number), buf);
    }
}

pub(crate) fn encoded_len<M: SpecMessage>(message: &M) -> usize {
    M::FIELDS
        .iter()
        .map(|field| string::encoded_len_repeated(field.number, message.values(field.number)))
        .sum()
}

pub(crate) fn merge_field<M: SpecMessage>(
    message: &mut M,
    tag: u32,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    if M::is_reserved(tag) {
        return Err(DecodeError::new(format!(
            "{} uses reserved field number {}",
            M::NAME,
            tag
        )));
    }

    match (M::field_by_number(tag), message.values_mut(tag)) {
        (Some(field), Some(values)) => {
            string::merge_repeated(wire_type, values, buf, ctx).map_err(|mut err| {
                err.push(M::NAME, field.name);
                err
            })
        }
        _ => encoding::skip_field(wire_type, tag, buf, ctx),
    }
}

/// Implement `prost::Message` for a [`SpecMessage`] by routing through the
/// generic field-table codec above.
macro_rules! impl_prost_message {
    ($ty:ty) => {
        impl ::prost::Message for $ty {
            fn encode_raw(&self, buf: &mut impl ::prost::bytes::BufMut) {
                $crate::wire::codec::encode_fields(self, buf)
            }

            fn merge_field(
                &mut self,
                tag: u32,
                wire_type: ::prost::encoding::WireType,
                buf: &mut impl ::prost::bytes::Buf,
                ctx: ::prost::encoding::DecodeContext,
            ) -> ::core::result::Result<(), ::prost::DecodeError> {
                $crate::wire::codec::merge_field(self, tag, wire_type, buf, ctx)
            }

            fn encoded_len(&self) -> usize {
                $crate::wire::codec::encoded_len(self)
            }

            fn clear(&mut self) {
                *self = <$ty as ::core::default::Default>::default();
            }
        }
    };
}

pub(crate) use impl_prost_message;
