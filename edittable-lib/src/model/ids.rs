//! Row and table identities

use serde::Deserialize;
use serde::Serialize;

use super::TableMeta;

/// Names a body row independently of where it is drawn.
///
/// Assigned by the server when the row is created (or allocated in load
/// order when the markup carries none) and stable for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u32);

impl RowId {
    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> RowId {
        RowId(self.0 + 1)
    }
}

impl From<u32> for RowId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names a table's container element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub String);

impl TableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one editable table on a topic, as the REST handler expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// `Web.Topic` the table lives in.
    pub topic: String,
    /// Zero-based number of the table within the topic.
    pub table: u32,
    /// Save URL override from the table's metadata.
    pub save_url: Option<String>,
}

impl TableRef {
    pub fn new(topic: impl Into<String>, table: u32) -> Self {
        Self {
            topic: topic.into(),
            table,
            save_url: None,
        }
    }
}

impl From<&TableMeta> for TableRef {
    fn from(meta: &TableMeta) -> Self {
        Self {
            topic: meta.topic.clone(),
            table: meta.table,
            save_url: meta.url.clone(),
        }
    }
}
