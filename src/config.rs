//! Reading and writing schema messages as files.
//!
//! A message file is one of:
//! - JSON (`.json`): `{"model_signature_name": [...], "tag": [...]}`
//! - text (`.pbtxt`, `.textproto`, `.txt`): `field: "value"` lines
//! - binary (`.pb`, `.bin`): the tagged wire encoding

use crate::schema::SpecMessage;
use crate::{text, wire};

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Text,
    Binary,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "pbtxt" | "textproto" | "txt" => Some(Format::Text),
            "pb" | "bin" => Some(Format::Binary),
            _ => None,
        }
    }

    /// Use `explicit` if given, otherwise infer from `path`.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> anyhow::Result<Self> {
        explicit.or_else(|| Format::from_path(path)).ok_or_else(|| {
            anyhow!(
                "cannot infer format of {}; pass it explicitly (json, text, binary)",
                path.display()
            )
        })
    }
}

/// Decode a message from in-memory bytes.
pub fn decode_message<M: SpecMessage>(
    bytes: &[u8],
    format: Format,
    origin: &str,
) -> anyhow::Result<M> {
    let message = match format {
        Format::Json => serde_json::from_slice(bytes)
            .with_context(|| format!("parse {} JSON from {}", M::NAME, origin))?,
        Format::Text => {
            let source = std::str::from_utf8(bytes)
                .with_context(|| format!("{} is not valid UTF-8 text", origin))?;
            text::parse_text(source, origin)?
        }
        Format::Binary => {
            wire::decode(bytes).with_context(|| format!("decode binary {}", origin))?
        }
    };
    Ok(message)
}

/// Encode a message to bytes in `format`.
pub fn encode_message<M: SpecMessage>(message: &M, format: Format) -> anyhow::Result<Vec<u8>> {
    let bytes = match format {
        Format::Json => {
            let mut json = serde_json::to_vec_pretty(message)?;
            json.push(b'\n');
            json
        }
        Format::Text => text::render_text(message).into_bytes(),
        Format::Binary => wire::encode(message),
    };
    Ok(bytes)
}

pub fn read_message<M: SpecMessage>(path: &Path, format: Option<Format>) -> anyhow::Result<M> {
    let format = Format::resolve(format, path)?;
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    info!(path = %path.display(), ?format, message = M::NAME, "reading message");
    decode_message(&bytes, format, &path.display().to_string())
}

pub fn write_message<M: SpecMessage>(
    message: &M,
    path: &Path,
    format: Option<Format>,
) -> anyhow::Result<()> {
    let format = Format::resolve(format, path)?;
    let bytes = encode_message(message, format)?;
    fs::write(path, &bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), ?format, bytes = bytes.len(), "wrote message");
    Ok(())
}
