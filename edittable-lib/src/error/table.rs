//! Table operation error types

use crate::model::RowId;

/// Errors from structural table operations and drag handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No body row carries this identity.
    #[error("Unknown row {0}")]
    UnknownRow(RowId),

    /// Two body rows claim the same identity.
    #[error("Duplicate row identity {0}")]
    DuplicateRow(RowId),

    /// A position outside the body rows.
    #[error("Position {position} out of range for {len} rows")]
    PositionOutOfRange {
        /// The requested position.
        position: usize,
        /// Number of body rows.
        len: usize,
    },

    /// The table has no body row group.
    #[error("Table {0} has no body")]
    MissingBody(String),

    /// A drag was started while another is in progress.
    #[error("A row drag is already in progress")]
    DragInProgress,

    /// A drop or cancel arrived with no drag in progress.
    #[error("No row drag in progress")]
    NotDragging,

    /// The table is marked read-only.
    #[error("Table is read-only")]
    ReadOnly,

    /// The row is marked read-only.
    #[error("Row {0} is read-only")]
    ReadOnlyRow(RowId),

    /// The cell's editor does not accept input.
    #[error("Column {column} of row {row} is not editable")]
    ReadOnlyCell {
        /// The row holding the cell.
        row: RowId,
        /// Zero-based column index.
        column: usize,
    },

    /// The row has no cell at this column.
    #[error("Row {row} has no column {column}")]
    UnknownColumn {
        /// The row searched.
        row: RowId,
        /// Zero-based column index.
        column: usize,
    },

    /// The session is showing a login form instead of the table.
    #[error("Table is waiting for re-authentication")]
    AwaitingLogin,

    /// The index and the rows on the page disagree.
    #[error("Row index inconsistent: {0}")]
    Inconsistent(String),
}
