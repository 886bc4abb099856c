//! Note model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned note identifier.
///
/// Opaque to the client: it is compared for equality and sent back in
/// request paths, never parsed. Services that number their notes send ids as
/// JSON integers; those are kept in their decimal text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

impl NoteId {
    /// Wrap an identifier received from the service or typed by a user
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A note as returned by the notes service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Display title, possibly empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Body text, possibly empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Creation timestamp as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Note {
    /// Whether the lowercased title or content contains `query`.
    ///
    /// `query` must already be trimmed and lowercased.
    #[must_use]
    pub fn matches_normalized_query(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query) || self.content.to_lowercase().contains(query)
    }

    /// Title for listings, falling back to the first content line
    #[must_use]
    pub fn display_title(&self, max_len: usize) -> String {
        let source = if self.title.trim().is_empty() {
            self.content.lines().next().unwrap_or("")
        } else {
            self.title.as_str()
        };
        source.trim().chars().take(max_len).collect()
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCreateRequest {
    pub title: String,
    pub content: String,
}

impl NoteCreateRequest {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
