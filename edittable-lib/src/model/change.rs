//! Net row additions and removals since the page was loaded

use std::collections::BTreeMap;

use super::RowId;
use crate::error::MetadataError;

/// Net change state of one row slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeFlag {
    #[default]
    Unchanged,
    Added,
    Removed,
}

impl ChangeFlag {
    /// Wire code used in the hidden change-list field.
    pub fn code(self) -> i8 {
        match self {
            Self::Unchanged => 0,
            Self::Added => 1,
            Self::Removed => -1,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Unchanged),
            1 => Some(Self::Added),
            -1 => Some(Self::Removed),
            _ => None,
        }
    }
}

/// Per-slot add/remove flags, keyed by row identity.
///
/// A row's identity is its slot at load time, so moving rows never touches
/// the flags. Only net changes are stored; every other slot is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeList {
    flags: BTreeMap<RowId, ChangeFlag>,
}

impl ChangeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(&self, slot: RowId) -> ChangeFlag {
        self.flags.get(&slot).copied().unwrap_or_default()
    }

    pub fn mark_added(&mut self, slot: RowId) {
        self.flags.insert(slot, ChangeFlag::Added);
    }

    /// Flags a slot removed and returns the resulting flag.
    ///
    /// A slot added in this session cancels back to unchanged.
    pub fn mark_removed(&mut self, slot: RowId) -> ChangeFlag {
        match self.flag(slot) {
            ChangeFlag::Added => {
                self.flags.remove(&slot);
                ChangeFlag::Unchanged
            }
            _ => {
                self.flags.insert(slot, ChangeFlag::Removed);
                ChangeFlag::Removed
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Changed slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, ChangeFlag)> + '_ {
        self.flags.iter().map(|(slot, flag)| (*slot, *flag))
    }

    /// Encodes as `slot=flag` pairs joined by commas.
    pub fn encode(&self) -> String {
        self.flags
            .iter()
            .map(|(slot, flag)| format!("{}={}", slot, flag.code()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decodes the hidden field written by [`ChangeList::encode`].
    pub fn decode(encoded: &str) -> Result<Self, MetadataError> {
        let mut list = Self::new();
        for entry in encoded.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let invalid = || MetadataError::ChangeList {
                entry: entry.to_string(),
            };
            let (slot, code) = entry.split_once('=').ok_or_else(invalid)?;
            let slot: u32 = slot.trim().parse().map_err(|_| invalid())?;
            let code: i8 = code.trim().parse().map_err(|_| invalid())?;
            match ChangeFlag::from_code(code).ok_or_else(invalid)? {
                ChangeFlag::Unchanged => {}
                flag => {
                    list.flags.insert(RowId(slot), flag);
                }
            }
        }
        Ok(list)
    }
}
