//! Decoding of raw JSON log records.
//!
//! A raw record is a single JSON object. The `level` and `message` (or `msg`)
//! keys are lifted into dedicated fields; every other top-level key becomes a
//! key/value pair. Key order is preserved and duplicate keys are kept, which
//! is why decoding walks the object with a visitor instead of going through
//! `serde_json::Map`.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;

use crate::level::FemtoLevel;

/// Structured view of one raw record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Parsed level, `None` when absent or unrecognised.
    pub level: Option<FemtoLevel>,
    pub message: String,
    /// Remaining keys in their original order.
    pub fields: Vec<(String, String)>,
}

impl DecodedRecord {
    /// Decode `raw` as a JSON object.
    pub fn from_slice(raw: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(raw)
    }
}

impl<'de> Deserialize<'de> for DecodedRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = DecodedRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object describing a log record")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = DecodedRecord::default();
        while let Some(key) = map.next_key::<String>()? {
            let raw: &'de RawValue = map.next_value()?;
            let value = value_text(raw).map_err(<A::Error as de::Error>::custom)?;
            match key.as_str() {
                "level" => record.level = value.parse().ok(),
                "message" | "msg" => record.message = value,
                _ => record.fields.push((key, value)),
            }
        }
        Ok(record)
    }
}

/// Strings are unescaped; any other JSON value keeps its source text.
fn value_text(raw: &RawValue) -> serde_json::Result<String> {
    let text = raw.get();
    if text.starts_with('"') {
        serde_json::from_str(text)
    } else {
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn lifts_level_and_message() {
        let record =
            DecodedRecord::from_slice(br#"{"level":"info","message":"hello","user":"alice"}"#)
                .expect("decode record");
        assert_eq!(record.level, Some(FemtoLevel::Info));
        assert_eq!(record.message, "hello");
        assert_eq!(record.fields, vec![("user".to_owned(), "alice".to_owned())]);
    }

    #[rstest]
    fn accepts_msg_alias() {
        let record = DecodedRecord::from_slice(br#"{"msg":"short"}"#).expect("decode record");
        assert_eq!(record.message, "short");
        assert_eq!(record.level, None);
    }

    #[rstest]
    fn keeps_order_and_duplicates() {
        let record = DecodedRecord::from_slice(br#"{"b":"1","a":"2","b":"3"}"#)
            .expect("decode record");
        let keys: Vec<_> = record.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "b"]);
        assert_eq!(record.fields[2].1, "3");
    }

    #[rstest]
    fn non_string_values_keep_json_text() {
        let record = DecodedRecord::from_slice(
            br#"{"n":42,"ok":true,"none":null,"obj":{"x":[1,2]}}"#,
        )
        .expect("decode record");
        assert_eq!(
            record.fields,
            vec![
                ("n".to_owned(), "42".to_owned()),
                ("ok".to_owned(), "true".to_owned()),
                ("none".to_owned(), "null".to_owned()),
                ("obj".to_owned(), r#"{"x":[1,2]}"#.to_owned()),
            ]
        );
    }

    #[rstest]
    fn unescapes_string_values() {
        let record = DecodedRecord::from_slice(br#"{"message":"line1\nline2\t\"q\""}"#)
            .expect("decode record");
        assert_eq!(record.message, "line1\nline2\t\"q\"");
    }

    #[rstest]
    fn unknown_level_is_none() {
        let record =
            DecodedRecord::from_slice(br#"{"level":"verbose"}"#).expect("decode record");
        assert_eq!(record.level, None);
    }

    #[rstest]
    #[case(b"[1,2,3]".as_slice())]
    #[case(b"\"text\"".as_slice())]
    #[case(b"{\"level\":".as_slice())]
    #[case(b"".as_slice())]
    fn rejects_non_object_input(#[case] raw: &[u8]) {
        assert!(DecodedRecord::from_slice(raw).is_err());
    }
}
