//! Bidirectional row identity ↔ position index

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::TableError;
use crate::model::RowId;

/// A row whose position changed, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub id: RowId,
    pub delta: isize,
}

/// Maps body-row identities to positions and back.
///
/// Positions are zero-based among body rows only; header and footer rows
/// live outside this space. For every indexed identity
/// `identity_at(position_of(id)) == id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndex {
    position_of: HashMap<RowId, usize>,
    identity_at: Vec<RowId>,
}

impl RowIndex {
    /// Builds the index from identities in display order.
    pub fn build(ids: impl IntoIterator<Item = RowId>) -> Result<Self, TableError> {
        let mut index = Self::default();
        for id in ids {
            let position = index.identity_at.len();
            if index.position_of.insert(id, position).is_some() {
                return Err(TableError::DuplicateRow(id));
            }
            index.identity_at.push(id);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.identity_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identity_at.is_empty()
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.position_of.contains_key(&id)
    }

    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.position_of.get(&id).copied()
    }

    pub fn identity_at(&self, position: usize) -> Option<RowId> {
        self.identity_at.get(position).copied()
    }

    /// Identities in position order.
    pub fn order(&self) -> &[RowId] {
        &self.identity_at
    }

    /// Largest identity in use.
    pub fn max_id(&self) -> Option<RowId> {
        self.identity_at.iter().max().copied()
    }

    /// Moves the row at `from` so it ends up at `to`.
    ///
    /// Every row strictly between the two slots shifts one step against the
    /// direction of travel. Returns every row whose position changed, the
    /// moved row first.
    pub fn relocate(&mut self, from: usize, to: usize) -> Result<Vec<Shifted>, TableError> {
        let len = self.len();
        for position in [from, to] {
            if position >= len {
                return Err(TableError::PositionOutOfRange { position, len });
            }
        }
        if from == to {
            return Ok(Vec::new());
        }

        let id = self.identity_at.remove(from);
        self.identity_at.insert(to, id);

        let mut shifted = vec![Shifted {
            id,
            delta: to as isize - from as isize,
        }];
        let (between, delta) = if from < to {
            (from..to, -1)
        } else {
            (to + 1..from + 1, 1)
        };
        for position in between {
            shifted.push(Shifted {
                id: self.identity_at[position],
                delta,
            });
        }
        self.reindex(from.min(to)..from.max(to) + 1);
        Ok(shifted)
    }

    /// Removes a row; every later row shifts down by one.
    ///
    /// Returns the vacated position and the shifted rows.
    pub fn remove(&mut self, id: RowId) -> Result<(usize, Vec<Shifted>), TableError> {
        let position = self
            .position_of
            .remove(&id)
            .ok_or(TableError::UnknownRow(id))?;
        self.identity_at.remove(position);
        let shifted = self.identity_at[position..]
            .iter()
            .map(|&id| Shifted { id, delta: -1 })
            .collect();
        self.reindex(position..self.len());
        Ok((position, shifted))
    }

    /// Inserts a row at `position`; every later row shifts up by one.
    pub fn insert(&mut self, position: usize, id: RowId) -> Result<Vec<Shifted>, TableError> {
        let len = self.len();
        if position > len {
            return Err(TableError::PositionOutOfRange { position, len });
        }
        if self.contains(id) {
            return Err(TableError::DuplicateRow(id));
        }
        self.identity_at.insert(position, id);
        let shifted = self.identity_at[position + 1..]
            .iter()
            .map(|&id| Shifted { id, delta: 1 })
            .collect();
        self.reindex(position..self.len());
        Ok(shifted)
    }

    /// Replaces the whole order, e.g. after a sort. The identity set must not
    /// change.
    pub fn reorder(&mut self, order: Vec<RowId>) -> Result<(), TableError> {
        let distinct: HashSet<RowId> = order.iter().copied().collect();
        if order.len() != self.len()
            || distinct.len() != order.len()
            || !distinct.iter().all(|id| self.contains(*id))
        {
            return Err(TableError::Inconsistent(
                "reorder must keep the same rows".to_string(),
            ));
        }
        self.identity_at = order;
        self.reindex(0..self.len());
        Ok(())
    }

    fn reindex(&mut self, range: std::ops::Range<usize>) {
        for position in range {
            self.position_of.insert(self.identity_at[position], position);
        }
    }

    /// Verifies the bijection and, if given, agreement with the rows as they
    /// appear on the page.
    pub fn check_consistency(&self, document_order: Option<&[RowId]>) -> Result<(), TableError> {
        if self.position_of.len() != self.identity_at.len() {
            return Err(TableError::Inconsistent(format!(
                "{} positions for {} identities",
                self.identity_at.len(),
                self.position_of.len()
            )));
        }
        for (position, id) in self.identity_at.iter().enumerate() {
            if self.position_of.get(id) != Some(&position) {
                return Err(TableError::Inconsistent(format!(
                    "row {id} at position {position} maps to {:?}",
                    self.position_of.get(id)
                )));
            }
        }
        if let Some(order) = document_order {
            if order != self.identity_at.as_slice() {
                return Err(TableError::Inconsistent(format!(
                    "page order {order:?} differs from index {:?}",
                    self.identity_at
                )));
            }
        }
        Ok(())
    }
}
