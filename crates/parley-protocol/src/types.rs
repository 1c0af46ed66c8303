//! Core protocol types for Parley's wire format.
//!
//! Every command that crosses the wire is a [`Record`]: a flat JSON object
//! with a `type` tag naming the variant and one string field per argument.
//! [`CommandKind`] is the closed set of tags we understand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// One encoded command: `{ "type": "Join", "name": "lobby" }`.
///
/// We keep records as a plain `serde_json::Map` rather than a typed struct
/// because the set of keys depends on the tag, and the tag has to be read
/// before we know which variant to build.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The key that carries the variant tag in every [`Record`].
pub const TYPE_FIELD: &str = "type";

// ---------------------------------------------------------------------------
// CommandKind
// ---------------------------------------------------------------------------

/// The variant tag of a command, without its payload.
///
/// The tag string is exactly the variant name (`"Register"`, `"Login"`,
/// ...). It is the sole discriminator on the wire, so renaming a variant is
/// a protocol break.
///
/// Serde serializes a `CommandKind` as its tag string, so `Login` becomes
/// `"Login"` in JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CommandKind {
    Register,
    Login,
    Logout,
    Create,
    Join,
    Leave,
    Message,
    Close,
}

impl CommandKind {
    /// Every known kind, in declaration order.
    pub const ALL: [CommandKind; 8] = [
        Self::Register,
        Self::Login,
        Self::Logout,
        Self::Create,
        Self::Join,
        Self::Leave,
        Self::Message,
        Self::Close,
    ];

    /// The wire tag for this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::Create => "Create",
            Self::Join => "Join",
            Self::Leave => "Leave",
            Self::Message => "Message",
            Self::Close => "Close",
        }
    }

    /// The payload fields this kind carries on the wire, besides `type`.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Register | Self::Login => &["username", "password"],
            Self::Create | Self::Join => &["name"],
            Self::Message => &["message"],
            Self::Logout | Self::Leave | Self::Close => &[],
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parsing is case-sensitive: `"login"` is not a known tag.
impl FromStr for CommandKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ProtocolError::UnknownCommandType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// EntryFormat
// ---------------------------------------------------------------------------

/// How each command is laid out inside a batch array.
///
/// ```text
/// Inline:  [{"type":"Join","name":"lobby"}]
/// Nested:  ["{\"type\":\"Join\",\"name\":\"lobby\"}"]
/// ```
///
/// `Nested` is the layout older peers produce: every record is encoded to
/// a JSON string on its own, then the strings are encoded as an array.
/// Readers always accept both, so this only controls what we write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFormat {
    #[default]
    Inline,
    Nested,
}
