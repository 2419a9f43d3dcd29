//! Structural and cell commands
//!
//! Every change is a single form POST. Positions on the wire are absolute
//! row indices within the table, header rows included, because that is how
//! the server numbers the rows of the topic's table source.
//!
//! # Example
//!
//! ```
//! use edittable_lib::api::Command;
//! use edittable_lib::model::{RowId, TableRef};
//!
//! let cmd = Command::MoveRow {
//!     table: TableRef::new("Sandbox.Test", 0),
//!     row: RowId(1),
//!     old_pos: 1,
//!     new_pos: 2,
//! };
//! assert_eq!(cmd.action(), "moveRowCmd");
//! ```

use crate::model::RowId;
use crate::model::TableRef;

/// A new value for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: RowId,
    /// Zero-based column index.
    pub column: usize,
    pub value: String,
}

/// One request to the REST handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move a row from one absolute position to another.
    MoveRow {
        table: TableRef,
        row: RowId,
        old_pos: usize,
        new_pos: usize,
    },
    /// Delete a row.
    DeleteRow { table: TableRef, row: RowId },
    /// Add an empty row after `after`, or at the end.
    AddRow {
        table: TableRef,
        after: Option<RowId>,
    },
    /// Save one cell.
    SaveCell { table: TableRef, edit: CellEdit },
}

impl Command {
    /// The handler action name.
    pub fn action(&self) -> &'static str {
        match self {
            Self::MoveRow { .. } => "moveRowCmd",
            Self::DeleteRow { .. } => "deleteRowCmd",
            Self::AddRow { .. } => "addRowCmd",
            Self::SaveCell { .. } => "saveCellCmd",
        }
    }

    pub fn table(&self) -> &TableRef {
        match self {
            Self::MoveRow { table, .. }
            | Self::DeleteRow { table, .. }
            | Self::AddRow { table, .. }
            | Self::SaveCell { table, .. } => table,
        }
    }

    /// Whether the server answers with a replacement for the whole table.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::SaveCell { .. })
    }

    /// The form body for this command.
    pub fn form_fields(&self, validation_key: Option<&str>) -> Vec<(String, String)> {
        let table = self.table();
        let mut fields = vec![
            field("action", self.action()),
            field("erp_topic", &table.topic),
            field("erp_table", table.table.to_string()),
        ];

        match self {
            Self::MoveRow {
                row,
                old_pos,
                new_pos,
                ..
            } => {
                fields.push(field("erp_row", row.to_string()));
                fields.push(field("old_pos", old_pos.to_string()));
                fields.push(field("new_pos", new_pos.to_string()));
            }
            Self::DeleteRow { row, .. } => {
                fields.push(field("erp_row", row.to_string()));
            }
            Self::AddRow { after, .. } => {
                // -1 asks the handler to append
                let row = after.map_or_else(|| "-1".to_string(), |id| id.to_string());
                fields.push(field("erp_row", row));
            }
            Self::SaveCell { edit, .. } => {
                fields.push(field("erp_row", edit.row.to_string()));
                fields.push(field("erp_col", edit.column.to_string()));
                fields.push(field("CELLDATA", &edit.value));
            }
        }

        fields.push(field("noredirect", "1"));
        if let Some(key) = validation_key {
            fields.push(field("validation_key", key));
        }
        fields
    }
}

fn field(name: &str, value: impl Into<String>) -> (String, String) {
    (name.to_string(), value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_move_row_fields() {
        let cmd = Command::MoveRow {
            table: TableRef::new("Sandbox.Test", 3),
            row: RowId(7),
            old_pos: 1,
            new_pos: 4,
        };
        let fields = cmd.form_fields(Some("key-1"));
        assert_eq!(lookup(&fields, "action"), Some("moveRowCmd"));
        assert_eq!(lookup(&fields, "erp_topic"), Some("Sandbox.Test"));
        assert_eq!(lookup(&fields, "erp_table"), Some("3"));
        assert_eq!(lookup(&fields, "erp_row"), Some("7"));
        assert_eq!(lookup(&fields, "old_pos"), Some("1"));
        assert_eq!(lookup(&fields, "new_pos"), Some("4"));
        assert_eq!(lookup(&fields, "noredirect"), Some("1"));
        assert_eq!(lookup(&fields, "validation_key"), Some("key-1"));
        assert!(cmd.is_structural());
    }

    #[test]
    fn test_save_cell_fields() {
        let cmd = Command::SaveCell {
            table: TableRef::new("Main.Web", 0),
            edit: CellEdit {
                row: RowId(2),
                column: 1,
                value: "a & b".to_string(),
            },
        };
        let fields = cmd.form_fields(None);
        assert_eq!(lookup(&fields, "action"), Some("saveCellCmd"));
        assert_eq!(lookup(&fields, "erp_col"), Some("1"));
        assert_eq!(lookup(&fields, "CELLDATA"), Some("a & b"));
        assert_eq!(lookup(&fields, "validation_key"), None);
        assert_eq!(lookup(&fields, "old_pos"), None);
        assert!(!cmd.is_structural());
    }

    #[test]
    fn test_add_row_at_end() {
        let cmd = Command::AddRow {
            table: TableRef::new("Main.Web", 0),
            after: None,
        };
        assert_eq!(lookup(&cmd.form_fields(None), "erp_row"), Some("-1"));
        assert_eq!(cmd.action(), "addRowCmd");
    }

    #[test]
    fn test_delete_row() {
        let cmd = Command::DeleteRow {
            table: TableRef::new("Main.Web", 0),
            row: RowId(5),
        };
        let fields = cmd.form_fields(None);
        assert_eq!(lookup(&fields, "action"), Some("deleteRowCmd"));
        assert_eq!(lookup(&fields, "erp_row"), Some("5"));
    }
}
