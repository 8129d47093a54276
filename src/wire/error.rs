use thiserror::Error;

/// Failure to turn bytes back into a configuration message.
#[derive(Debug, Error)]
pub enum WireError {
    /// Bytes do not follow the tagged encoding: truncated payload, bad
    /// length prefix, invalid UTF-8, wrong wire type or an invalid key.
    #[error("failed to decode {message}: {source}")]
    Decode {
        message: &'static str,
        #[source]
        source: prost::DecodeError,
    },

    /// A retired field number appeared in the payload.
    #[error("{message} uses reserved field number {field}")]
    ReservedField { message: &'static str, field: u32 },
}

impl WireError {
    pub fn is_reserved_field(&self) -> bool {
        matches!(self, WireError::ReservedField { .. })
    }
}
