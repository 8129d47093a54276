use bulk_inference_spec::wire::{WireError, decode, encode};
use bulk_inference_spec::{DataSpec, ModelSpec, SignatureSelection};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

/// One length-delimited string occurrence of `field`.
fn string_field(field: u32, value: &str) -> Vec<u8> {
    let mut out = vec![((field << 3) | 2) as u8, value.len() as u8];
    out.extend_from_slice(value.as_bytes());
    out
}

#[test]
fn model_spec_round_trips_keeping_order() {
    let cases = [
        ModelSpec::default(),
        ModelSpec::new(["serving_default"], Vec::<String>::new()),
        ModelSpec::new(Vec::<String>::new(), ["serve", "gpu"]),
        ModelSpec::new(["b", "a", "b"], ["gpu", "serve"]),
        ModelSpec::new(["", "ünïcode"], [""]),
    ];
    for spec in cases {
        let back: ModelSpec = decode(&encode(&spec)).unwrap();
        assert_eq!(back, spec);
        assert_eq!(back.tags(), spec.tags());
    }
}

#[test]
fn data_spec_round_trips_keeping_order() {
    for spec in [
        DataSpec::default(),
        DataSpec::new(["eval"]),
        DataSpec::new(["holdout", "train", "eval"]),
    ] {
        let back: DataSpec = decode(&encode(&spec)).unwrap();
        assert_eq!(back.example_splits(), spec.example_splits());
    }
}

#[test]
fn missing_signature_field_means_default_head() {
    let bytes = string_field(5, "gpu");
    let spec: ModelSpec = decode(&bytes).unwrap();
    assert!(spec.signature_names().is_empty());
    assert_eq!(spec.signature_selection(), SignatureSelection::Default);
    assert_eq!(spec.tags(), ["gpu"]);
}

#[test]
fn model_spec_rejects_every_reserved_number() {
    for field in [1, 3, 4, 6] {
        let mut bytes = string_field(2, "serving_default");
        bytes.extend(string_field(field, "legacy"));
        match decode::<ModelSpec>(&bytes) {
            Err(WireError::ReservedField { message, field: got }) => {
                assert_eq!(got, field);
                assert!(message.ends_with("ModelSpec"));
            }
            other => panic!("field {field}: expected reserved error, got {other:?}"),
        }
    }
}

#[test]
fn data_spec_rejects_every_reserved_number() {
    for field in [1, 3, 4] {
        let err = decode::<DataSpec>(&string_field(field, "x")).unwrap_err();
        assert!(err.is_reserved_field(), "field {field}: {err}");
    }
}

#[test]
fn reserved_number_is_rejected_for_any_wire_type() {
    // field 6, varint
    let err = decode::<ModelSpec>(&[0x30, 0x01]).unwrap_err();
    assert!(err.is_reserved_field());
}

#[test]
fn unknown_fields_are_skipped() {
    let mut bytes = string_field(2, "classify");
    bytes.extend([0x38, 0x96, 0x01]); // 7: varint 150
    bytes.extend(string_field(9, "future")); // 9: string
    bytes.extend([0x45, 1, 2, 3, 4]); // 8: fixed32
    bytes.extend([0x51, 1, 2, 3, 4, 5, 6, 7, 8]); // 10: fixed64
    bytes.extend(string_field(5, "serve"));

    let spec: ModelSpec = decode(&bytes).unwrap();
    assert_eq!(spec, ModelSpec::new(["classify"], ["serve"]));
}

#[test]
fn model_field_number_is_unknown_to_data_spec() {
    // 5 is ModelSpec.tag but neither assigned nor reserved in DataSpec
    let mut bytes = string_field(5, "gpu");
    bytes.extend(string_field(2, "eval"));
    let spec: DataSpec = decode(&bytes).unwrap();
    assert_eq!(spec, DataSpec::new(["eval"]));
}

#[test]
fn multi_head_scenario() {
    let spec = ModelSpec::new(["serving_default", "classify"], Vec::<String>::new());
    let back: ModelSpec = decode(&encode(&spec)).unwrap();
    assert_eq!(
        back.signature_set(),
        BTreeSet::from(["classify", "serving_default"])
    );
    assert!(back.tags().is_empty());
    assert!(back.is_multi_head());
}

#[test]
fn split_filter_scenario() {
    let eval_only: DataSpec = decode(&encode(&DataSpec::new(["eval"]))).unwrap();
    assert_eq!(eval_only.example_splits(), ["eval"]);
    assert_eq!(eval_only.select(&["train", "eval"]), vec!["eval"]);

    let all: DataSpec = decode(&encode(&DataSpec::default())).unwrap();
    assert!(all.processes_all_splits());
    assert_eq!(all.select(&["train", "eval"]), vec!["train", "eval"]);
}

#[test]
fn truncated_payload_fails() {
    // declares 5 bytes, carries 1
    let err = decode::<DataSpec>(&[0x12, 0x05, b'e']).unwrap_err();
    assert!(matches!(err, WireError::Decode { .. }), "{err}");
}

#[test]
fn truncated_key_fails() {
    // varint key with continuation bit and nothing after it
    assert!(decode::<ModelSpec>(&[0x92]).is_err());
}

#[test]
fn invalid_utf8_fails() {
    let err = decode::<ModelSpec>(&[0x12, 0x02, 0xc3, 0x28]).unwrap_err();
    assert!(matches!(err, WireError::Decode { .. }), "{err}");
}

#[test]
fn field_number_zero_fails() {
    assert!(decode::<DataSpec>(&[0x02, 0x00]).is_err());
}
