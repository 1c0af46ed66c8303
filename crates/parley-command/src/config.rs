//! Invoker configuration.

use parley_protocol::EntryFormat;
use serde::{Deserialize, Serialize};

/// Settings for a [`CommandInvoker`](crate::CommandInvoker).
///
/// Deserializable so a host can keep it next to the rest of its config
/// file; every field falls back to its default when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokerConfig {
    /// How [`serialize`](crate::CommandInvoker::serialize) lays out each
    /// command in the batch array.
    ///
    /// Default: [`EntryFormat::Inline`]. Use [`EntryFormat::Nested`] when
    /// talking to peers that expect every entry as its own JSON string.
    /// Decoding accepts both regardless of this setting.
    pub entry_format: EntryFormat,
}

impl InvokerConfig {
    /// A config that writes nested (string) entries.
    pub fn nested() -> Self {
        Self {
            entry_format: EntryFormat::Nested,
        }
    }
}
