//! Data model: identities, embedded metadata and the change list.

mod change;
mod ids;
mod metadata;

pub use change::*;
pub use ids::*;
pub use metadata::*;
