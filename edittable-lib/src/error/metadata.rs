//! Metadata error types

/// Errors reading the metadata the wiki embeds in table markup.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Embedded metadata is not valid JSON for the expected record.
    #[error("Invalid metadata on {element}: {source}")]
    InvalidJson {
        /// Id of the element carrying the metadata.
        element: String,
        /// The raw metadata text.
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required element or annotation is absent.
    #[error("Missing {what} in {element}")]
    Missing {
        /// What was looked for.
        what: &'static str,
        /// Id of the element searched.
        element: String,
    },

    /// An entry of the change-list field could not be decoded.
    #[error("Invalid change list entry '{entry}'")]
    ChangeList {
        /// The offending `slot=flag` entry.
        entry: String,
    },
}

impl MetadataError {
    /// Creates a new missing-metadata error.
    pub fn missing(what: &'static str, element: impl Into<String>) -> Self {
        Self::Missing {
            what,
            element: element.into(),
        }
    }
}
