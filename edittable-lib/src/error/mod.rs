//! Error types

mod api;
mod metadata;
mod table;

pub use api::*;
pub use metadata::*;
pub use table::*;

/// Top-level error for everything the row editor does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The REST round trip failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Server-rendered metadata could not be read.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A structural table operation was rejected.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Markup returned by the server could not be parsed.
    #[error("Markup error: {0}")]
    Markup(#[from] edittable_dom::ParseError),

    /// Configuration could not be decoded.
    #[error("Invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// I/O failure while setting up logging.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A global logger was already installed.
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl Error {
    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }
}
