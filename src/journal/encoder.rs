//! Journal native protocol encoding.
//!
//! Each field is written as `NAME=value\n`. Values containing a newline use
//! the binary form instead: `NAME\n`, the value length as a little-endian
//! `u64`, the value bytes and a closing `\n`.
//!
//! Records are laid out as `PRIORITY`, `MESSAGE`, the caller's key/value
//! pairs with uppercased names, and finally `JSON` holding the raw record so
//! consumers always find the original payload in the last field.

use std::borrow::Cow;

use crate::record::DecodedRecord;

use super::priority::Priority;

/// Append the wire form of `record` to `buf`. `raw` is the serialised record
/// `record` was decoded from.
pub fn encode_record(record: &DecodedRecord, raw: &[u8], buf: &mut Vec<u8>) {
    let priority = Priority::from_level(record.level).as_digit();
    put_field(buf, "PRIORITY", &[priority]);
    put_field(buf, "MESSAGE", record.message.as_bytes());
    for (key, value) in &record.fields {
        put_field(buf, &field_name(key), value.as_bytes());
    }
    put_field(buf, "JSON", raw);
}

/// Append a single field to `buf`.
pub fn put_field(buf: &mut Vec<u8>, name: &str, value: &[u8]) {
    buf.reserve(name.len() + value.len() + 10);
    buf.extend_from_slice(name.as_bytes());
    if value.contains(&b'\n') {
        buf.push(b'\n');
        buf.extend_from_slice(&(value.len() as u64).to_le_bytes());
    } else {
        buf.push(b'=');
    }
    buf.extend_from_slice(value);
    buf.push(b'\n');
}

fn field_name(key: &str) -> Cow<'_, str> {
    let upper = key.to_uppercase();
    if upper == key {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(upper)
    }
}
