//! Metadata embedded in server-rendered table markup
//!
//! The wiki annotates tables, rows and cells with a small JSON record,
//! either in a `data-erp` attribute or as a trailing `{...}` token in the
//! class list. The raw text is taken from the markup once and kept in the
//! element's data storage; every read parses that text strictly, so later
//! reads never touch the markup again.

use edittable_dom::Element;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::RowId;
use crate::error::MetadataError;

/// Attribute carrying JSON metadata.
pub const META_ATTR: &str = "data-erp";

/// Element data key the raw metadata is cached under.
pub const META_DATA_KEY: &str = "erp-meta";

/// Per-table metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    /// `Web.Topic` the table lives in.
    #[serde(default)]
    pub topic: String,
    /// Zero-based number of the table within the topic.
    #[serde(default)]
    pub table: u32,
    /// Rows at the top excluded from reordering.
    #[serde(rename = "headerrows", default)]
    pub header_rows: usize,
    /// Rows at the bottom excluded from reordering.
    #[serde(rename = "footerrows", default)]
    pub footer_rows: usize,
    /// Save URL override.
    #[serde(default)]
    pub url: Option<String>,
    /// Initial client-side sort.
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// Read-only table: no drag handles, no structural edits.
    #[serde(default)]
    pub disabled: bool,
}

/// A column sort request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Zero-based column index.
    pub column: usize,
    /// Descending when true.
    #[serde(default)]
    pub reverse: bool,
}

/// Per-row metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMeta {
    /// Server-assigned identity.
    #[serde(default)]
    pub row: Option<RowId>,
    #[serde(default)]
    pub readonly: bool,
}

/// Per-cell editor metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMeta {
    #[serde(rename = "type", default)]
    pub kind: CellKind,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Editor used for a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Text,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
    Label,
    /// Read-only row number display.
    Row,
}

impl CellKind {
    /// Whether the cell's editor accepts input. Labels and row numbers are
    /// display only.
    pub fn is_editable(self) -> bool {
        !matches!(self, Self::Label | Self::Row)
    }
}

/// Reads typed metadata from an element.
///
/// Returns `Ok(None)` when the element carries no annotation at all. A class
/// annotation is removed from the visible class list the first time it is
/// read.
pub fn read_meta<T: DeserializeOwned>(element: &mut Element) -> Result<Option<T>, MetadataError> {
    let raw = match element.get_data(META_DATA_KEY) {
        Some(cached) => cached.clone(),
        None => match take_raw(element) {
            Some(raw) => {
                element.set_data(META_DATA_KEY, raw.clone());
                raw
            }
            None => return Ok(None),
        },
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| MetadataError::InvalidJson {
            element: element.id.clone(),
            raw,
            source,
        })
}

/// Like [`read_meta`], but a missing annotation yields the record's default.
pub fn read_meta_or_default<T: DeserializeOwned + Default>(
    element: &mut Element,
) -> Result<T, MetadataError> {
    read_meta(element).map(Option::unwrap_or_default)
}

fn take_raw(element: &mut Element) -> Option<String> {
    if let Some(raw) = element.get_attr(META_ATTR) {
        return Some(raw.to_string());
    }

    let at = element
        .classes
        .iter()
        .position(|class| class.starts_with('{') && class.ends_with('}'))?;
    Some(element.classes.remove(at))
}
