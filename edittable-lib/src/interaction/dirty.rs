//! Unsaved-edit tracking and the navigation veto

use crate::host::UiHost;

/// Whether a table has unsaved edits, and whether the user just refused to
/// throw them away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyState {
    dirty: bool,
    veto: bool,
}

impl DirtyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that an editable field changed.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forgets unsaved edits, e.g. after they were saved.
    pub fn clear(&mut self) {
        self.dirty = false;
    }

    /// Asks before an action that would discard unsaved edits.
    ///
    /// Returns whether the action may go ahead. When the user declines the
    /// veto is armed for the caller to consume with
    /// [`DirtyState::take_veto`].
    pub fn confirm_discard(&mut self, host: &dyn UiHost, prompt: &str) -> bool {
        if !self.dirty {
            return true;
        }
        if host.confirm(prompt) {
            self.dirty = false;
            true
        } else {
            self.veto = true;
            false
        }
    }

    /// Consumes the veto; `true` at most once per refusal.
    pub fn take_veto(&mut self) -> bool {
        std::mem::take(&mut self.veto)
    }
}
