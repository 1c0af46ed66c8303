//! Encoding commands to records and decoding them back.
//!
//! Encoding is infallible: every variant knows its fields, and every field
//! is a string. Decoding is where things go wrong, so every failure names
//! the variant and the field that didn't fit.
//!
//! Two layers live here:
//! - **Record level** ([`Command::encode`], [`Command::decode`]): one
//!   command ↔ one JSON object.
//! - **Entry level** ([`encode_entry`], [`entry_to_record`]): one record ↔
//!   one element of a batch array, in either [`EntryFormat`].

use serde_json::Value;

use crate::{Command, CommandKind, EntryFormat, ProtocolError, Record, TYPE_FIELD};

impl Command {
    /// Encodes this command as a record: `type` plus every declared field.
    pub fn encode(&self) -> Record {
        let mut record = Record::new();
        record.insert(TYPE_FIELD.to_string(), Value::from(self.tag()));

        match self {
            Self::Register { username, password } | Self::Login { username, password } => {
                put(&mut record, "username", username);
                put(&mut record, "password", password);
            }
            Self::Create { name } | Self::Join { name } => {
                put(&mut record, "name", name);
            }
            Self::Message { message } => {
                put(&mut record, "message", message);
            }
            Self::Logout | Self::Leave | Self::Close => {}
        }

        record
    }

    /// Same as [`encode`](Self::encode), wrapped as a `serde_json::Value`.
    pub fn to_value(&self) -> Value {
        Value::Object(self.encode())
    }

    /// Builds a `kind` command from the fields in `record`.
    ///
    /// The `type` key is not looked at: by the time we get here the
    /// registry has already used it to pick `kind`. Keys that `kind`
    /// doesn't declare are ignored.
    ///
    /// # Errors
    /// Returns [`ProtocolError::MalformedPayload`] if a declared field is
    /// missing or isn't a string.
    pub fn decode(kind: CommandKind, record: &Record) -> Result<Self, ProtocolError> {
        let command = match kind {
            CommandKind::Register => Self::Register {
                username: field(kind, record, "username")?,
                password: field(kind, record, "password")?,
            },
            CommandKind::Login => Self::Login {
                username: field(kind, record, "username")?,
                password: field(kind, record, "password")?,
            },
            CommandKind::Logout => Self::Logout,
            CommandKind::Create => Self::Create {
                name: field(kind, record, "name")?,
            },
            CommandKind::Join => Self::Join {
                name: field(kind, record, "name")?,
            },
            CommandKind::Leave => Self::Leave,
            CommandKind::Message => Self::Message {
                message: field(kind, record, "message")?,
            },
            CommandKind::Close => Self::Close,
        };
        Ok(command)
    }
}

fn put(record: &mut Record, key: &str, value: &str) {
    record.insert(key.to_string(), Value::from(value));
}

/// Reads a required string field.
fn field(kind: CommandKind, record: &Record, key: &str) -> Result<String, ProtocolError> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ProtocolError::MalformedPayload(format!(
            "{kind}: field `{key}` must be a string, got {}",
            describe(other)
        ))),
        None => Err(ProtocolError::MalformedPayload(format!(
            "{kind}: missing field `{key}`"
        ))),
    }
}

/// A short name for a JSON value's kind, for error messages.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads the `type` tag out of a record.
///
/// # Errors
/// Returns [`ProtocolError::MalformedPayload`] if `type` is missing or
/// isn't a string.
pub fn record_tag(record: &Record) -> Result<&str, ProtocolError> {
    match record.get(TYPE_FIELD) {
        Some(Value::String(tag)) => Ok(tag.as_str()),
        Some(other) => Err(ProtocolError::MalformedPayload(format!(
            "`{TYPE_FIELD}` must be a string, got {}",
            describe(other)
        ))),
        None => Err(ProtocolError::MalformedPayload(format!(
            "entry has no `{TYPE_FIELD}` field"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Batch entries
// ---------------------------------------------------------------------------

/// Encodes one command as a batch element in the given format.
pub fn encode_entry(command: &Command, format: EntryFormat) -> Value {
    match format {
        EntryFormat::Inline => command.to_value(),
        // `Value`'s Display impl writes compact JSON and can't fail.
        EntryFormat::Nested => Value::String(command.to_value().to_string()),
    }
}

/// Turns one batch element back into a record.
///
/// Accepts both layouts: an object is taken as-is, a string is parsed as
/// JSON and must contain an object.
///
/// # Errors
/// Returns [`ProtocolError::MalformedPayload`] for anything else (numbers,
/// arrays, strings that aren't JSON objects).
pub fn entry_to_record(entry: Value) -> Result<Record, ProtocolError> {
    match entry {
        Value::Object(record) => Ok(record),
        Value::String(nested) => match serde_json::from_str::<Value>(&nested) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(other) => Err(ProtocolError::MalformedPayload(format!(
                "nested entry must encode an object, got {}",
                describe(&other)
            ))),
            Err(e) => Err(ProtocolError::MalformedPayload(format!(
                "nested entry is not valid JSON: {e}"
            ))),
        },
        other => Err(ProtocolError::MalformedPayload(format!(
            "entry must be an object, got {}",
            describe(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn every_variant() -> Vec<Command> {
        vec![
            Command::register("alice", "pw1"),
            Command::login("bob", "hunter2"),
            Command::logout(),
            Command::create("lobby"),
            Command::join("lobby"),
            Command::leave(),
            Command::message("hi there"),
            Command::close(),
        ]
    }

    #[test]
    fn test_encode_register_json_format() {
        let value = Command::register("alice", "pw1").to_value();
        assert_eq!(
            value,
            json!({ "type": "Register", "username": "alice", "password": "pw1" })
        );
    }

    #[test]
    fn test_encode_fieldless_variant_is_just_the_tag() {
        assert_eq!(Command::logout().to_value(), json!({ "type": "Logout" }));
        assert_eq!(Command::leave().to_value(), json!({ "type": "Leave" }));
        assert_eq!(Command::close().to_value(), json!({ "type": "Close" }));
    }

    #[test]
    fn test_encoded_keys_match_declared_fields() {
        for command in every_variant() {
            let record = command.encode();
            let mut keys: Vec<&str> = record.keys().map(String::as_str).collect();
            keys.retain(|k| *k != TYPE_FIELD);
            keys.sort_unstable();

            let mut declared = command.kind().fields().to_vec();
            declared.sort_unstable();
            assert_eq!(keys, declared, "fields of {}", command.kind());
        }
    }

    #[test]
    fn test_decode_inverts_encode_for_every_variant() {
        for command in every_variant() {
            let decoded = Command::decode(command.kind(), &command.encode()).unwrap();
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn test_decode_preserves_unicode_and_empty_strings() {
        let command = Command::message("héllo 👋 \"quoted\"\n");
        let decoded = Command::decode(CommandKind::Message, &command.encode()).unwrap();
        assert_eq!(decoded, command);

        let empty = Command::create("");
        let decoded = Command::decode(CommandKind::Create, &empty.encode()).unwrap();
        assert_eq!(decoded, empty);
    }

    #[test]
    fn test_decode_missing_field_is_malformed() {
        let rec = record(json!({ "type": "Login", "username": "alice" }));
        let err = Command::decode(CommandKind::Login, &rec).unwrap_err();
        match err {
            ProtocolError::MalformedPayload(msg) => {
                assert!(msg.contains("Login"));
                assert!(msg.contains("password"));
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_wrong_field_kind_is_malformed() {
        let rec = record(json!({ "type": "Join", "name": 42 }));
        let err = Command::decode(CommandKind::Join, &rec).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedPayload(ref m) if m.contains("a number")));
    }

    #[test]
    fn test_decode_ignores_type_and_extra_keys() {
        // The tag was already consumed by the registry; a mismatching one
        // here doesn't matter.
        let rec = record(json!({ "type": "Whatever", "name": "lobby", "extra": true }));
        let decoded = Command::decode(CommandKind::Join, &rec).unwrap();
        assert_eq!(decoded, Command::join("lobby"));
    }

    #[test]
    fn test_record_tag() {
        let rec = record(json!({ "type": "Close" }));
        assert_eq!(record_tag(&rec).unwrap(), "Close");

        let rec = record(json!({ "name": "lobby" }));
        assert!(matches!(record_tag(&rec), Err(ProtocolError::MalformedPayload(_))));

        let rec = record(json!({ "type": 7 }));
        assert!(matches!(record_tag(&rec), Err(ProtocolError::MalformedPayload(_))));
    }

    #[test]
    fn test_nested_entry_is_a_json_string() {
        let entry = encode_entry(&Command::join("lobby"), EntryFormat::Nested);
        let Value::String(text) = &entry else {
            panic!("nested entry must be a string, got {entry}");
        };
        let inner: Value = serde_json::from_str(text).unwrap();
        assert_eq!(inner, json!({ "type": "Join", "name": "lobby" }));
    }

    #[test]
    fn test_entry_to_record_accepts_both_formats() {
        let command = Command::register("alice", "pw1");
        for format in [EntryFormat::Inline, EntryFormat::Nested] {
            let rec = entry_to_record(encode_entry(&command, format)).unwrap();
            assert_eq!(rec, command.encode());
        }
    }

    #[test]
    fn test_entry_to_record_rejects_non_objects() {
        for bad in [json!(3), json!(null), json!(["Logout"]), json!("not json"), json!("[1]")] {
            let err = entry_to_record(bad).unwrap_err();
            assert!(matches!(err, ProtocolError::MalformedPayload(_)));
        }
    }
}
