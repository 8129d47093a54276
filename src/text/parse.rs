use crate::schema::SpecMessage;
use anyhow::{Context, bail};
use regex::Regex;
use tracing::debug;

/// Parse the text form of a message.
///
/// One field per line:
/// field_name: "value"
///
/// Example:
/// # run both heads on the GPU graph
/// model_signature_name: "serving_default"
/// model_signature_name: "classify"
/// tag: 'gpu'
///
/// `origin` names the source (usually a path) in error messages.
pub fn parse_text<M: SpecMessage>(text: &str, origin: &str) -> anyhow::Result<M> {
    // Capture:
    // 1) field name
    // 2) double-quoted body, or
    // 3) single-quoted body
    // followed by an optional trailing comment.
    const FIELD_LINE_RE: &str = r#"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')\s*(?:#.*)?$"#;
    let re = Regex::new(FIELD_LINE_RE)?;

    let mut message = M::default();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(caps) = re.captures(line) else {
            bail!(
                "{} parse error at {}:{}: cannot parse line: {:?}",
                M::NAME,
                origin,
                lno,
                line
            );
        };

        let name = &caps[1];
        let raw = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();

        let Some(field) = M::field_by_name(name) else {
            bail!(
                "{} parse error at {}:{}: unknown field {:?}",
                M::NAME,
                origin,
                lno,
                name
            );
        };

        let value = unescape(raw)
            .with_context(|| format!("bad string value at {}:{}: {}", origin, lno, raw))?;

        match message.values_mut(field.number) {
            Some(values) => values.push(value),
            None => bail!("{} has no storage for field {}", M::NAME, field.name),
        }
    }

    debug!(message = M::NAME, origin, "parsed text message");
    Ok(message)
}

fn unescape(raw: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => bail!("unsupported escape \\{}", other),
            None => bail!("dangling backslash"),
        }
    }
    Ok(out)
}
