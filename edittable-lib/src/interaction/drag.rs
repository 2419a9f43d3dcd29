//! Drag-and-drop row reordering
//!
//! A drag goes `Idle → Dragging → Dropped → Idle`, or back to `Idle` from
//! either middle state when cancelled. Nothing here reorders rows: a drop
//! only works out where the row should go. The caller posts the move and
//! calls [`DragController::finish`] once the server's table is installed,
//! or [`DragController::cancel`] if the round trip fails.

use edittable_dom::Element;
use edittable_dom::LayoutResult;
use edittable_dom::for_each_mut;
use edittable_dom::hit_test_tag;

use crate::config::EditConfig;
use crate::error::TableError;
use crate::model::RowId;
use crate::table::EditableTable;
use crate::table::ROW_ID_KEY;
use crate::table::row_id_of;

/// Class on the floating copy of the dragged row.
pub const DRAG_HELPER_CLASS: &str = "erpJS_dragHelper";

/// Class on rows that accept a drop.
pub const DROP_ZONE_CLASS: &str = "erpJS_dropZone";

/// Pointer position in the same coordinates as the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPoint {
    pub x: u32,
    pub y: u32,
}

impl DropPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Move `row` to just before `to`, or to the end when `to` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub row: RowId,
    pub to: Option<RowId>,
}

/// What a release amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResolution {
    Move(MoveIntent),
    /// Released somewhere that is not a drop target; the row is restored.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        source: RowId,
        ghost: Element,
    },
    Dropped {
        intent: MoveIntent,
    },
}

/// Turns press and release on a table's rows into move intents.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    opacity: f32,
}

impl DragController {
    pub fn new(config: &EditConfig) -> Self {
        Self {
            state: DragState::Idle,
            opacity: config.drag_opacity,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The row being dragged or awaiting confirmation.
    pub fn source(&self) -> Option<RowId> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { source, .. } => Some(*source),
            DragState::Dropped { intent } => Some(intent.row),
        }
    }

    /// The floating copy that follows the pointer.
    pub fn ghost(&self) -> Option<&Element> {
        match &self.state {
            DragState::Dragging { ghost, .. } => Some(ghost),
            _ => None,
        }
    }

    /// Lifts `source`: fades it, copies it for the pointer and marks every
    /// other body row as a drop zone.
    pub fn press(&mut self, table: &mut EditableTable, source: RowId) -> Result<(), TableError> {
        if !self.is_idle() {
            return Err(TableError::DragInProgress);
        }
        table.ensure_row_editable(source)?;

        let row = table
            .row_element(source)
            .ok_or(TableError::UnknownRow(source))?;
        let mut ghost = row.clone();
        for_each_mut(&mut ghost, &mut |element| element.regenerate_id());
        ghost.remove_data(ROW_ID_KEY);
        ghost.add_class(DRAG_HELPER_CLASS);

        let opacity = self.opacity;
        for row in table.body_rows_mut()? {
            if row_id_of(row) == Some(source) {
                row.style = row.style.opacity(opacity);
            } else {
                row.add_class(DROP_ZONE_CLASS);
            }
        }

        log::trace!("drag started on row {source}");
        self.state = DragState::Dragging { source, ghost };
        Ok(())
    }

    /// Resolves the drop at `point`.
    ///
    /// Over a body row, the upper half means before that row and the lower
    /// half means after it. Over a footer row, or over the table but outside
    /// every row, the row goes to the end. A header row or anywhere outside
    /// the table cancels the drag.
    pub fn release(
        &mut self,
        table: &mut EditableTable,
        layout: &LayoutResult,
        point: DropPoint,
    ) -> Result<DropResolution, TableError> {
        let DragState::Dragging { source, .. } = &self.state else {
            return Err(TableError::NotDragging);
        };
        let source = *source;

        let resolution = match resolve_target(table, layout, point) {
            Some(to) => DropResolution::Move(MoveIntent { row: source, to }),
            None => DropResolution::Cancelled,
        };

        match resolution {
            DropResolution::Move(intent) => {
                clear_drop_zones(table)?;
                log::debug!("row {source} dropped, target {:?}", intent.to);
                self.state = DragState::Dropped { intent };
            }
            DropResolution::Cancelled => {
                log::debug!("row {source} dropped outside any target");
                restore(table)?;
                self.state = DragState::Idle;
            }
        }
        Ok(resolution)
    }

    /// Abandons the drag and restores the rows.
    pub fn cancel(&mut self, table: &mut EditableTable) -> Result<(), TableError> {
        if self.is_idle() {
            return Err(TableError::NotDragging);
        }
        restore(table)?;
        self.state = DragState::Idle;
        Ok(())
    }

    /// Ends a drag whose move the server confirmed.
    pub fn finish(&mut self) {
        self.state = DragState::Idle;
    }
}

/// `Some(target)` for a valid drop, where a `None` target is the end.
fn resolve_target(
    table: &EditableTable,
    layout: &LayoutResult,
    point: DropPoint,
) -> Option<Option<RowId>> {
    let table_element = table.table_element()?;
    let Some(hit) = hit_test_tag(layout, table_element, "tr", point.x, point.y) else {
        let inside = layout
            .get(&table_element.id)
            .is_some_and(|rect| rect.contains(point.x, point.y));
        return inside.then_some(None);
    };

    if let Some(position) = table.body_rows().iter().position(|row| row.id == hit) {
        let target = table.index().identity_at(position)?;
        let upper = layout.get(&hit)?.in_upper_half(point.y);
        return Some(if upper {
            Some(target)
        } else {
            table.index().identity_at(position + 1)
        });
    }
    if table.footer_rows().iter().any(|row| row.id == hit) {
        return Some(None);
    }
    None
}

fn clear_drop_zones(table: &mut EditableTable) -> Result<(), TableError> {
    for row in table.body_rows_mut()? {
        row.remove_class(DROP_ZONE_CLASS);
    }
    Ok(())
}

fn restore(table: &mut EditableTable) -> Result<(), TableError> {
    for row in table.body_rows_mut()? {
        row.remove_class(DROP_ZONE_CLASS);
        row.style = row.style.opacity(1.0);
    }
    Ok(())
}
