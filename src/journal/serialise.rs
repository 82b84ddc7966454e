//! JSON serialisation of [`FemtoLogRecord`] values.
//!
//! The output is the raw record format read back by
//! [`DecodedRecord`](crate::record::DecodedRecord): `level` and `message`
//! become `PRIORITY` and `MESSAGE`, everything else turns into a journal field.
//! Source locations use the `code_*` names so they land in the journal's
//! `CODE_FILE`, `CODE_LINE` and `CODE_MODULE` fields.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::log_record::FemtoLogRecord;

/// Keys the decoder lifts into `PRIORITY` and `MESSAGE`.
const RESERVED_KEYS: [&str; 3] = ["level", "message", "msg"];

/// Prefix given to caller keys that collide with [`RESERVED_KEYS`].
const RESERVED_PREFIX: &str = "field_";

struct SerializableRecord<'a>(&'a FemtoLogRecord);

fn field_key(key: &str) -> Cow<'_, str> {
    if RESERVED_KEYS.contains(&key) {
        Cow::Owned(format!("{RESERVED_PREFIX}{key}"))
    } else {
        Cow::Borrowed(key)
    }
}

impl Serialize for SerializableRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let meta = &record.metadata;
        let time = DateTime::<Utc>::from(meta.timestamp).to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("time", &time)?;
        map.serialize_entry("level", record.level.as_str())?;
        map.serialize_entry("logger", &record.logger)?;
        map.serialize_entry("message", &record.message)?;
        if !meta.module_path.is_empty() {
            map.serialize_entry("code_module", &meta.module_path)?;
        }
        if !meta.filename.is_empty() {
            map.serialize_entry("code_file", &meta.filename)?;
            map.serialize_entry("code_line", &meta.line_number)?;
        }
        for (key, value) in &meta.key_values {
            map.serialize_entry(field_key(key).as_ref(), value)?;
        }
        map.end()
    }
}

/// Serialise a record into a newline-terminated JSON object.
pub fn serialise_record(record: &FemtoLogRecord) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    serde_json::to_writer(&mut buf, &SerializableRecord(record))?;
    buf.push(b'\n');
    Ok(buf)
}
