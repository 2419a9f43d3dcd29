//! Per-table editing sessions
//!
//! A [`TableSession`] owns everything one table on the page needs: the
//! table itself, its drag controller, its dirty flag and the save latches
//! of its edit forms. Nothing is shared between tables.
//!
//! Structural changes that go through the server are never applied locally
//! first. The session posts the change and, when the server answers with a
//! replacement table, throws its state away and rebuilds it from that
//! markup.

use std::collections::HashMap;

use edittable_dom::Element;
use edittable_dom::LayoutResult;
use edittable_dom::to_html;

use crate::api::CellEdit;
use crate::api::Command;
use crate::auth::LoginForm;
use crate::client::EditTableClient;
use crate::config::EditConfig;
use crate::error::Error;
use crate::error::TableError;
use crate::host::UiHost;
use crate::interaction::DirtyState;
use crate::interaction::DragController;
use crate::interaction::DropPoint;
use crate::interaction::DropResolution;
use crate::interaction::SaveLatch;
use crate::model::RowId;
use crate::model::TableId;
use crate::model::TableRef;
use crate::response::Fragment;
use crate::response::SaveOutcome;
use crate::table::EditableTable;
use crate::table::Relocation;

/// Result of dropping a dragged row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The server confirmed the move and the new table is installed.
    Moved(Relocation),
    /// The row was dropped where it already was.
    Unchanged,
    /// Dropped outside any target.
    Cancelled,
    /// The server wants a login; the login form is showing.
    AuthRequired,
}

/// Result of a save or structural request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; the server's table is installed.
    Applied,
    /// The server wants a login; the login form is showing.
    AuthRequired,
    /// A save from the same form is still in flight; nothing was sent.
    Suppressed,
    /// The user chose to keep unsaved edits; nothing was sent.
    Declined,
}

/// What an edit form's submit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Saved(SaveOutcome),
    Suppressed,
}

/// The edit form of one row.
///
/// Submitting only needs `&self`, so duplicate submit events can race; the
/// form's latch lets the first through and suppresses the rest until it
/// completes.
#[derive(Debug, Clone)]
pub struct EditForm {
    table: TableRef,
    row: RowId,
    latch: SaveLatch,
}

impl EditForm {
    pub fn row(&self) -> RowId {
        self.row
    }

    pub fn is_saving(&self) -> bool {
        self.latch.is_busy()
    }

    /// Saves one cell of this form's row.
    pub async fn submit(
        &self,
        client: &EditTableClient,
        column: usize,
        value: impl Into<String>,
    ) -> Result<FormSubmission, Error> {
        let Some(_guard) = self.latch.try_begin() else {
            log::debug!("save for row {} already in flight, suppressing", self.row);
            return Ok(FormSubmission::Suppressed);
        };
        let command = Command::SaveCell {
            table: self.table.clone(),
            edit: CellEdit {
                row: self.row,
                column,
                value: value.into(),
            },
        };
        let outcome = client.send(&command).await?;
        Ok(FormSubmission::Saved(outcome))
    }
}

/// Editing state for one table on the page.
#[derive(Debug)]
pub struct TableSession {
    id: TableId,
    table: EditableTable,
    login: Option<Element>,
    drag: DragController,
    dirty: DirtyState,
    latches: HashMap<RowId, SaveLatch>,
    config: EditConfig,
}

impl TableSession {
    /// Takes over the table inside `container`.
    pub fn new(container: Element, config: &EditConfig) -> Result<Self, Error> {
        let id = TableId(container.id.clone());
        let table = EditableTable::build(container, config)?;
        Ok(Self {
            id,
            table,
            login: None,
            drag: DragController::new(config),
            dirty: DirtyState::new(),
            latches: HashMap::new(),
            config: config.clone(),
        })
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    pub fn table(&self) -> &EditableTable {
        &self.table
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn dirty(&self) -> &DirtyState {
        &self.dirty
    }

    /// What the container currently shows: the table, or the login form.
    pub fn container(&self) -> &Element {
        self.login.as_ref().unwrap_or_else(|| self.table.container())
    }

    pub fn to_html(&self) -> String {
        to_html(self.container())
    }

    pub fn is_awaiting_login(&self) -> bool {
        self.login.is_some()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty.mark_dirty();
    }

    /// Starts dragging `row`.
    pub fn begin_drag(&mut self, row: RowId) -> Result<(), Error> {
        self.ensure_active()?;
        self.drag.press(&mut self.table, row)?;
        Ok(())
    }

    /// Abandons the current drag.
    pub fn cancel_drag(&mut self) -> Result<(), Error> {
        self.drag.cancel(&mut self.table)?;
        Ok(())
    }

    /// Drops the dragged row and has the server move it.
    ///
    /// On success the server's table replaces this one. When the server asks
    /// for a login the form is shown and the table is left as it was. A
    /// failed request restores the row, alerts the user and returns the
    /// error.
    pub async fn drop_row(
        &mut self,
        layout: &LayoutResult,
        point: DropPoint,
        client: &EditTableClient,
        host: &dyn UiHost,
    ) -> Result<DropOutcome, Error> {
        self.ensure_active()?;
        let DropResolution::Move(intent) = self.drag.release(&mut self.table, layout, point)? else {
            return Ok(DropOutcome::Cancelled);
        };
        let Some(plan) = self.table.plan_move(intent.row, intent.to)? else {
            self.drag.cancel(&mut self.table)?;
            return Ok(DropOutcome::Unchanged);
        };

        let command = Command::MoveRow {
            table: self.table.table_ref(),
            row: plan.row,
            old_pos: self.table.wire_position(plan.from),
            new_pos: self.table.wire_position(plan.to),
        };
        match round_trip(client, host, &command).await {
            Ok(SaveOutcome::Applied(fragment)) if fragment.is_empty() => {
                // Confirmed without replacement markup
                self.drag.cancel(&mut self.table)?;
                self.table.move_row(plan.row, intent.to)?;
                Ok(DropOutcome::Moved(plan))
            }
            Ok(SaveOutcome::Applied(fragment)) => {
                if let Err(e) = self.install(&fragment) {
                    self.drag.cancel(&mut self.table)?;
                    host.alert(&alert_text(&e));
                    return Err(e);
                }
                self.drag.finish();
                Ok(DropOutcome::Moved(plan))
            }
            Ok(SaveOutcome::AuthRequired(form)) => {
                self.drag.cancel(&mut self.table)?;
                self.show_login(&form);
                Ok(DropOutcome::AuthRequired)
            }
            Err(e) => {
                self.drag.cancel(&mut self.table)?;
                Err(e)
            }
        }
    }

    /// Drops the dragged row and moves it on the page only, for tables
    /// edited as a whole and saved later.
    pub fn drop_row_local(
        &mut self,
        layout: &LayoutResult,
        point: DropPoint,
    ) -> Result<Option<Relocation>, Error> {
        self.ensure_active()?;
        let DropResolution::Move(intent) = self.drag.release(&mut self.table, layout, point)? else {
            return Ok(None);
        };
        let moved = self.table.move_row(intent.row, intent.to);
        self.drag.cancel(&mut self.table)?;
        let moved = moved?;
        if moved.is_some() {
            self.dirty.mark_dirty();
        }
        Ok(moved)
    }

    /// Has the server delete `row`.
    pub async fn delete_row_remote(
        &mut self,
        row: RowId,
        client: &EditTableClient,
        host: &dyn UiHost,
    ) -> Result<SubmitOutcome, Error> {
        self.ensure_active()?;
        if !self.table.index().contains(row) {
            return Err(TableError::UnknownRow(row).into());
        }
        let command = Command::DeleteRow {
            table: self.table.table_ref(),
            row,
        };
        let outcome = round_trip(client, host, &command).await?;
        self.apply_outcome(outcome, host)
    }

    /// Has the server add a row after `after`, or at the end.
    ///
    /// Adding a row re-renders the table, so unsaved edits are confirmed
    /// first.
    pub async fn add_row_remote(
        &mut self,
        after: Option<RowId>,
        client: &EditTableClient,
        host: &dyn UiHost,
    ) -> Result<SubmitOutcome, Error> {
        self.ensure_active()?;
        if !self.request_navigation(host) {
            return Ok(SubmitOutcome::Declined);
        }
        let command = Command::AddRow {
            table: self.table.table_ref(),
            after,
        };
        let outcome = round_trip(client, host, &command).await?;
        self.apply_outcome(outcome, host)
    }

    /// Deletes a row on the page only.
    pub fn delete_row_local(&mut self, row: RowId) -> Result<usize, Error> {
        self.ensure_active()?;
        let position = self.table.delete_row(row)?;
        self.dirty.mark_dirty();
        Ok(position)
    }

    /// Adds a blank row on the page only.
    pub fn add_row_local(&mut self, after: Option<RowId>) -> Result<RowId, Error> {
        self.ensure_active()?;
        let row = self.table.blank_row();
        let id = self.table.add_row(after, row)?;
        self.dirty.mark_dirty();
        Ok(id)
    }

    /// Sorts the body rows by a column.
    pub fn sort(&mut self, column: usize, reverse: bool) -> Result<(), Error> {
        self.ensure_active()?;
        self.table.sort_rows(column, reverse)?;
        Ok(())
    }

    /// Opens the edit form of `row`. Forms of the same row share a latch.
    pub fn open_form(&mut self, row: RowId) -> Result<EditForm, Error> {
        self.ensure_active()?;
        if !self.table.index().contains(row) {
            return Err(TableError::UnknownRow(row).into());
        }
        self.table.ensure_row_editable(row)?;
        let latch = self.latches.entry(row).or_default().clone();
        Ok(EditForm {
            table: self.table.table_ref(),
            row,
            latch,
        })
    }

    /// Saves one cell through the row's edit form.
    ///
    /// Label and row-number cells are display only and are refused without
    /// a request.
    pub async fn save_cell(
        &mut self,
        row: RowId,
        column: usize,
        value: impl Into<String>,
        client: &EditTableClient,
        host: &dyn UiHost,
    ) -> Result<SubmitOutcome, Error> {
        let form = self.open_form(row)?;
        if !self.table.cell_meta(row, column)?.kind.is_editable() {
            return Err(TableError::ReadOnlyCell { row, column }.into());
        }
        host.set_busy(true);
        let submission = form.submit(client, column, value).await;
        host.set_busy(false);
        match submission {
            Ok(submission) => self.apply_save(submission, host),
            Err(e) => {
                host.alert(&alert_text(&e));
                Err(e)
            }
        }
    }

    /// Applies what an edit form's submit produced.
    pub fn apply_save(
        &mut self,
        submission: FormSubmission,
        host: &dyn UiHost,
    ) -> Result<SubmitOutcome, Error> {
        match submission {
            FormSubmission::Suppressed => Ok(SubmitOutcome::Suppressed),
            FormSubmission::Saved(outcome) => self.apply_outcome(outcome, host),
        }
    }

    fn apply_outcome(&mut self, outcome: SaveOutcome, host: &dyn UiHost) -> Result<SubmitOutcome, Error> {
        match outcome {
            SaveOutcome::Applied(fragment) => {
                if !fragment.is_empty() {
                    if let Err(e) = self.install(&fragment) {
                        host.alert(&alert_text(&e));
                        return Err(e);
                    }
                }
                self.dirty.clear();
                Ok(SubmitOutcome::Applied)
            }
            SaveOutcome::AuthRequired(form) => {
                self.show_login(&form);
                Ok(SubmitOutcome::AuthRequired)
            }
        }
    }

    /// Replaces the container's contents with the server's markup and
    /// rebuilds all table state from it.
    ///
    /// On error the session is left exactly as it was.
    pub fn install(&mut self, fragment: &Fragment) -> Result<(), Error> {
        let nodes = fragment.parse()?;
        let mut container = self.table.container().clone();
        container.set_children(nodes);
        let table = EditableTable::build(container, &self.config)?;

        self.table = table;
        self.login = None;
        self.drag = DragController::new(&self.config);
        self.latches.retain(|row, _| self.table.index().contains(*row));
        log::debug!("installed replacement for {}", self.id);
        Ok(())
    }

    /// Shows a login form in place of the table. The table state is kept
    /// for when the form is dismissed.
    pub fn show_login(&mut self, form: &LoginForm) {
        let mut shown = self.table.container().clone();
        shown.set_children(form.to_elements());
        self.login = Some(shown);
        log::info!("{} is waiting for the user to log in", self.id);
    }

    /// Puts the table back after a login form.
    pub fn dismiss_login(&mut self) {
        self.login = None;
    }

    /// Whether an action that discards unsaved edits may go ahead, asking
    /// the user if there are any.
    pub fn request_navigation(&mut self, host: &dyn UiHost) -> bool {
        self.dirty.confirm_discard(host, &self.config.discard_prompt)
    }

    /// Consumes the veto armed when the user declined to discard edits.
    pub fn take_veto(&mut self) -> bool {
        self.dirty.take_veto()
    }

    pub fn check_consistency(&self) -> Result<(), Error> {
        self.table.check_consistency()?;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), TableError> {
        if self.login.is_some() {
            return Err(TableError::AwaitingLogin);
        }
        Ok(())
    }
}

/// Sends `command` with the busy cursor on, alerting on failure.
async fn round_trip(
    client: &EditTableClient,
    host: &dyn UiHost,
    command: &Command,
) -> Result<SaveOutcome, Error> {
    host.set_busy(true);
    let result = client.send(command).await;
    host.set_busy(false);
    if let Err(e) = &result {
        log::warn!("{} failed: {e}", command.action());
        host.alert(&alert_text(e));
    }
    result
}

fn alert_text(error: &Error) -> String {
    match error {
        Error::Api(api) => api.alert_text(),
        other => other.to_string(),
    }
}
