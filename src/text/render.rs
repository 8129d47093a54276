use crate::schema::SpecMessage;

/// Render `message` in text form: one `name: "value"` line per value, fields
/// in wire-number order. Empty messages render as an empty string.
pub fn render_text<M: SpecMessage>(message: &M) -> String {
    let mut out = String::new();
    for field in M::FIELDS {
        for value in message.values(field.number) {
            out.push_str(field.name);
            out.push_str(": \"");
            out.push_str(&escape(value));
            out.push_str("\"\n");
        }
    }
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelSpec;
    use crate::text::parse_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_in_field_order() {
        let spec = ModelSpec::default().with_tag("gpu").with_signature_name("classify");
        assert_eq!(
            render_text(&spec),
            "model_signature_name: \"classify\"\ntag: \"gpu\"\n"
        );
    }

    #[test]
    fn escaped_values_parse_back() {
        let spec = ModelSpec::new(["quote\"d", "multi\nline"], ["back\\slash"]);
        let parsed: ModelSpec = parse_text(&render_text(&spec), "rendered").unwrap();
        assert_eq!(parsed, spec);
    }
}
