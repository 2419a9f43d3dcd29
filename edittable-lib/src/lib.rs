//! Row editing for wiki-rendered tables
//!
//! Keeps the mapping between a table row's identity and its visual position
//! consistent across moves, deletions and insertions, turns drag gestures
//! into move requests, and synchronises every structural change with the
//! wiki's REST handler, which answers with a freshly rendered table.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod host;
pub mod instrument;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod response;
pub mod session;
pub mod table;
pub mod transport;

mod client;

pub use client::*;
pub use config::EditConfig;
pub use instrument::instrument;
pub use response::Fragment;
pub use response::SaveOutcome;
pub use session::TableSession;
