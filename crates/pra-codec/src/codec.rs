use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{SummaryEnvelope, TestCaseEnvelope};
use crate::error::{CodecError, CodecResult};

/// Content type written alongside every stored envelope.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Encoder/decoder for stored envelopes.
///
/// Output is compact UTF-8 JSON without a BOM. The length of the returned
/// bytes is the exact content length to declare to the backend.
pub struct EnvelopeCodec;

impl EnvelopeCodec {
    pub fn encode_test_case(envelope: &TestCaseEnvelope) -> CodecResult<Bytes> {
        encode(envelope)
    }

    pub fn decode_test_case(data: &[u8]) -> CodecResult<TestCaseEnvelope> {
        decode(data, "test-case")
    }

    pub fn encode_summary(envelope: &SummaryEnvelope) -> CodecResult<Bytes> {
        encode(envelope)
    }

    pub fn decode_summary(data: &[u8]) -> CodecResult<SummaryEnvelope> {
        decode(data, "summary")
    }
}

fn encode<T: Serialize>(value: &T) -> CodecResult<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decode a JSON object into `T`. Arrays and scalars are rejected up front:
/// serde would otherwise accept a positional array for a struct.
fn decode<T: DeserializeOwned>(data: &[u8], what: &str) -> CodecResult<T> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| CodecError::Deserialization(format!("{what} envelope: {e}")))?;
    if !value.is_object() {
        return Err(CodecError::Deserialization(format!(
            "{what} envelope: expected a JSON object"
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| CodecError::Deserialization(format!("{what} envelope: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonObject;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_case_roundtrip() {
        let env = TestCaseEnvelope::new("Foo.java", "class Foo {}");
        let bytes = EnvelopeCodec::encode_test_case(&env).unwrap();
        assert_eq!(EnvelopeCodec::decode_test_case(&bytes).unwrap(), env);
    }

    #[test]
    fn test_case_wire_shape() {
        let env = TestCaseEnvelope::new("Foo.java", "class Foo {}");
        let bytes = EnvelopeCodec::encode_test_case(&env).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({ "fileName": "Foo.java", "testCases": "class Foo {}" }));
        assert!(value.get("prId").is_none());
    }

    #[test]
    fn test_case_preserves_source_text() {
        let source = "public class T {\n\t@Test void a() { assertEquals(\"\\u00e9\", s); }\n}\n";
        let env = TestCaseEnvelope::new("weird name!.java", source);
        let bytes = EnvelopeCodec::encode_test_case(&env).unwrap();
        let back = EnvelopeCodec::decode_test_case(&bytes).unwrap();
        assert_eq!(back.test_cases, source);
        assert_eq!(back.file_name, "weird name!.java");
    }

    #[test]
    fn empty_test_cases_allowed() {
        let env = TestCaseEnvelope::new("Empty.java", "");
        let bytes = EnvelopeCodec::encode_test_case(&env).unwrap();
        assert_eq!(EnvelopeCodec::decode_test_case(&bytes).unwrap(), env);
    }

    #[test]
    fn encoded_has_no_bom() {
        let bytes = EnvelopeCodec::encode_test_case(&TestCaseEnvelope::new("a", "b")).unwrap();
        assert_eq!(bytes[0], b'{');
    }

    #[test]
    fn summary_roundtrip() {
        let data = json!({ "k": 1, "nested": { "risk": [1, 2, "high"] }, "none": null });
        let env = SummaryEnvelope::new("https://x/y", data.as_object().unwrap().clone());
        let bytes = EnvelopeCodec::encode_summary(&env).unwrap();
        assert_eq!(EnvelopeCodec::decode_summary(&bytes).unwrap(), env);
    }

    #[test]
    fn summary_empty_data_allowed() {
        let env = SummaryEnvelope::new("https://x/y", Default::default());
        let bytes = EnvelopeCodec::encode_summary(&env).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({ "githubUrl": "https://x/y", "data": {} }));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let raw = br#"{"fileName":"a.java","testCases":"x","prId":"PR-1","extra":[1]}"#;
        let env = EnvelopeCodec::decode_test_case(raw).unwrap();
        assert_eq!(env, TestCaseEnvelope::new("a.java", "x"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = EnvelopeCodec::decode_test_case(br#"{"fileName":"a.java"}"#).unwrap_err();
        assert!(matches!(err, CodecError::Deserialization(ref m) if m.contains("testCases")));

        let err = EnvelopeCodec::decode_summary(br#"{"data":{}}"#).unwrap_err();
        assert!(matches!(err, CodecError::Deserialization(ref m) if m.contains("githubUrl")));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(EnvelopeCodec::decode_test_case(br#"{"fileName":1,"testCases":"x"}"#).is_err());
        assert!(EnvelopeCodec::decode_summary(br#"{"githubUrl":"u","data":[1]}"#).is_err());
        assert!(EnvelopeCodec::decode_summary(br#"{"githubUrl":"u","data":null}"#).is_err());
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(EnvelopeCodec::decode_test_case(br#"["a.java","x"]"#).is_err());
        assert!(EnvelopeCodec::decode_test_case(b"\"text\"").is_err());
        assert!(EnvelopeCodec::decode_test_case(b"not json").is_err());
        assert!(EnvelopeCodec::decode_test_case(b"").is_err());
        assert!(EnvelopeCodec::decode_test_case(&[0xff, 0xfe]).is_err());
    }

    proptest! {
        #[test]
        fn any_test_case_round_trips(file_name in ".*", test_cases in ".*") {
            let env = TestCaseEnvelope::new(file_name, test_cases);
            let bytes = EnvelopeCodec::encode_test_case(&env).unwrap();
            prop_assert_eq!(EnvelopeCodec::decode_test_case(&bytes).unwrap(), env);
        }

        #[test]
        fn any_summary_round_trips(
            github_url in ".*",
            entries in proptest::collection::btree_map(".*", any::<i64>(), 0..8),
        ) {
            let data: JsonObject = entries.into_iter().map(|(k, v)| (k, json!(v))).collect();
            let env = SummaryEnvelope::new(github_url, data);
            let bytes = EnvelopeCodec::encode_summary(&env).unwrap();
            prop_assert_eq!(EnvelopeCodec::decode_summary(&bytes).unwrap(), env);
        }
    }
}
