//! Commands understood by the wiki's row-editing REST handler

mod command;

pub use command::Command;
pub use command::CellEdit;
