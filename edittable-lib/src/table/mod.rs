//! Row Index Table and Structural Mutator

mod editable;
mod index;
pub mod labels;
mod scan;
pub mod sort;
pub mod stripe;

pub use editable::*;
pub use index::*;
pub use scan::*;

/// Class marking a table the editor manages.
pub const TABLE_CLASS: &str = "erpJS_table";

/// Class marking the element whose contents a server response replaces.
pub const CONTAINER_CLASS: &str = "erpJS_container";

/// Element data key holding a body row's identity.
pub const ROW_ID_KEY: &str = "erp-row";

/// Hidden field with the table's total row count.
pub const ROWS_FIELD: &str = "etrows";

/// Hidden field with the encoded change list.
pub const CHANGES_FIELD: &str = "ettablechanges";
