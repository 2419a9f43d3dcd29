//! One editable table: its rows, index, change list and hidden fields

use std::collections::HashSet;

use edittable_dom::Element;
use edittable_dom::descendants;
use edittable_dom::find_by_name;
use edittable_dom::find_by_name_mut;
use edittable_dom::find_element;
use edittable_dom::find_element_mut;
use edittable_dom::find_first_mut;

use super::CHANGES_FIELD;
use super::ROW_ID_KEY;
use super::ROWS_FIELD;
use super::RowIndex;
use super::Shifted;
use super::TABLE_CLASS;
use super::TableSections;
use super::labels;
use super::scan::section_rows;
use super::sort;
use super::stripe;
use crate::config::EditConfig;
use crate::error::Error;
use crate::error::MetadataError;
use crate::error::TableError;
use crate::model::CellMeta;
use crate::model::ChangeList;
use crate::model::RowId;
use crate::model::RowMeta;
use crate::model::TableMeta;
use crate::model::TableRef;
use crate::model::read_meta_or_default;

/// A planned move, in body positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub row: RowId,
    pub from: usize,
    /// Final position of the row once the move is done.
    pub to: usize,
}

/// A table the editor has taken over.
///
/// Owns the container element the table lives in, so the hidden fields next
/// to the table and the table itself change together. Every structural edit
/// keeps the row index, the rows on the page, the row-number labels, the
/// striping and the hidden fields in step.
#[derive(Debug, Clone)]
pub struct EditableTable {
    container: Element,
    table_id: String,
    meta: TableMeta,
    header_len: usize,
    footer_len: usize,
    index: RowIndex,
    read_only_rows: HashSet<RowId>,
    changes: ChangeList,
    row_count: usize,
    next_id: RowId,
    config: EditConfig,
}

impl EditableTable {
    /// Scans a container and builds the table state from its markup.
    ///
    /// The table is the first `erpJS_table` element in the container, or
    /// failing that the first `<table>`. Its rows are normalised into
    /// `<thead>`, `<tbody>` and `<tfoot>`. Rows without a server-assigned
    /// identity get the next free one in load order.
    pub fn build(mut container: Element, config: &EditConfig) -> Result<Self, Error> {
        let container_id = container.id.clone();
        let marked = descendants(&container)
            .iter()
            .any(|element| element.has_class(TABLE_CLASS));
        let table = if marked {
            find_first_mut(&mut container, &|e: &Element| e.has_class(TABLE_CLASS))
        } else {
            find_first_mut(&mut container, &|e: &Element| e.tag == "table")
        };
        let Some(table) = table else {
            return Err(MetadataError::missing("table", container_id).into());
        };

        let meta: TableMeta = read_meta_or_default(table)?;
        let table_id = table.id.clone();
        let mut sections = TableSections::scan(table, meta.header_rows, meta.footer_rows);

        let mut assigned = Vec::with_capacity(sections.body.len());
        let mut locked = Vec::with_capacity(sections.body.len());
        for row in sections.body.iter_mut() {
            let row_meta: RowMeta = read_meta_or_default(row)?;
            assigned.push(row_meta.row);
            locked.push(row_meta.readonly);
        }
        let mut next = assigned
            .iter()
            .flatten()
            .max()
            .map_or(RowId(0), |id| id.next());
        let mut ids = Vec::with_capacity(assigned.len());
        for (row, id) in sections.body.iter_mut().zip(assigned) {
            let id = id.unwrap_or_else(|| {
                let id = next;
                next = next.next();
                id
            });
            row.set_data(ROW_ID_KEY, id.to_string());
            ids.push(id);
        }
        let read_only_rows = ids
            .iter()
            .zip(locked)
            .filter_map(|(id, locked)| locked.then_some(*id))
            .collect();
        let index = RowIndex::build(ids)?;

        let header_len = sections.header.len();
        let footer_len = sections.footer.len();
        let total_rows = header_len + index.len() + footer_len;
        sections.restore(table);

        let row_count = find_by_name(&container, ROWS_FIELD)
            .and_then(|field| field.get_attr("value"))
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(total_rows);
        let changes = match find_by_name(&container, CHANGES_FIELD).and_then(|f| f.get_attr("value")) {
            Some(encoded) => ChangeList::decode(encoded)?,
            None => ChangeList::new(),
        };

        // Slots removed earlier in the session must not be handed out again
        let next_id = index
            .max_id()
            .into_iter()
            .chain(changes.iter().map(|(slot, _)| slot))
            .max()
            .map_or(RowId(0), |id| id.next());

        let mut editable = Self {
            container,
            table_id,
            meta,
            header_len,
            footer_len,
            index,
            read_only_rows,
            changes,
            row_count,
            next_id,
            config: config.clone(),
        };
        editable.write_fields();
        if let Some(spec) = editable.meta.sort {
            editable.sort_rows(spec.column, spec.reverse)?;
        }
        log::debug!(
            "instrumented table {} of {} with {} body rows",
            editable.meta.table,
            editable.meta.topic,
            editable.index.len()
        );
        Ok(editable)
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::from(&self.meta)
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub fn changes(&self) -> &ChangeList {
        &self.changes
    }

    /// Total rows as reported in the hidden row-count field.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn header_len(&self) -> usize {
        self.header_len
    }

    pub fn footer_len(&self) -> usize {
        self.footer_len
    }

    pub fn is_read_only(&self) -> bool {
        self.meta.disabled
    }

    /// Whether `id` was rendered as a read-only row.
    pub fn is_row_read_only(&self, id: RowId) -> bool {
        self.read_only_rows.contains(&id)
    }

    /// Rejects edits of a read-only table or a read-only row.
    pub fn ensure_row_editable(&self, id: RowId) -> Result<(), TableError> {
        self.ensure_editable()?;
        if self.is_row_read_only(id) {
            return Err(TableError::ReadOnlyRow(id));
        }
        Ok(())
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn into_container(self) -> Element {
        self.container
    }

    pub fn table_element(&self) -> Option<&Element> {
        find_element(&self.container, &self.table_id)
    }

    pub fn header_rows(&self) -> &[Element] {
        self.table_element()
            .map(|table| section_rows(table, "thead"))
            .unwrap_or(&[])
    }

    pub fn body_rows(&self) -> &[Element] {
        self.table_element()
            .map(|table| section_rows(table, "tbody"))
            .unwrap_or(&[])
    }

    pub fn footer_rows(&self) -> &[Element] {
        self.table_element()
            .map(|table| section_rows(table, "tfoot"))
            .unwrap_or(&[])
    }

    pub fn row_element(&self, id: RowId) -> Option<&Element> {
        let position = self.index.position_of(id)?;
        self.body_rows().get(position)
    }

    pub(crate) fn row_element_mut(&mut self, id: RowId) -> Option<&mut Element> {
        let position = self.index.position_of(id)?;
        body_rows_mut(&mut self.container, &self.table_id)
            .ok()?
            .get_mut(position)
    }

    /// Editor metadata of the cell at `column` in `id`'s row.
    ///
    /// A cell without an annotation is plain text.
    pub fn cell_meta(&self, id: RowId, column: usize) -> Result<CellMeta, Error> {
        let row = self.row_element(id).ok_or(TableError::UnknownRow(id))?;
        let mut cell = row
            .child_elements()
            .iter()
            .filter(|cell| cell.tag == "td" || cell.tag == "th")
            .nth(column)
            .ok_or(TableError::UnknownColumn { row: id, column })?
            .clone();
        Ok(read_meta_or_default(&mut cell)?)
    }

    /// Body rows for presentation changes; the row order must not change.
    pub(crate) fn body_rows_mut(&mut self) -> Result<&mut [Element], TableError> {
        body_rows_mut(&mut self.container, &self.table_id).map(Vec::as_mut_slice)
    }

    /// Body row identities as they appear on the page.
    pub fn document_order(&self) -> Result<Vec<RowId>, TableError> {
        self.body_rows()
            .iter()
            .map(|row| {
                row_id_of(row).ok_or_else(|| {
                    TableError::Inconsistent(format!("row {} has no identity", row.id))
                })
            })
            .collect()
    }

    /// Absolute row index for a body position, as the server counts rows.
    pub fn wire_position(&self, position: usize) -> usize {
        self.header_len + position
    }

    /// Works out where `from` would land if dropped before `to`, without
    /// changing anything.
    ///
    /// `None` as the target means after the last body row. When the target
    /// lies after the source the row ends up one slot before it, because
    /// taking the source out shifts the target up. Returns `None` when the
    /// row would not move.
    pub fn plan_move(&self, from: RowId, to: Option<RowId>) -> Result<Option<Relocation>, TableError> {
        let from_pos = self
            .index
            .position_of(from)
            .ok_or(TableError::UnknownRow(from))?;
        let to_pos = match to {
            Some(target) => self
                .index
                .position_of(target)
                .ok_or(TableError::UnknownRow(target))?,
            None => self.index.len(),
        };
        let landing = if to_pos > from_pos { to_pos - 1 } else { to_pos };
        if landing == from_pos {
            return Ok(None);
        }
        Ok(Some(Relocation {
            row: from,
            from: from_pos,
            to: landing,
        }))
    }

    /// Moves a body row to just before `to`, or to the end.
    ///
    /// Moves never touch the change list.
    pub fn move_row(&mut self, from: RowId, to: Option<RowId>) -> Result<Option<Relocation>, TableError> {
        self.ensure_row_editable(from)?;
        let Some(plan) = self.plan_move(from, to)? else {
            log::trace!("move of row {from} is a no-op");
            return Ok(None);
        };

        let shifted = self.index.relocate(plan.from, plan.to)?;
        let rows = body_rows_mut(&mut self.container, &self.table_id)?;
        let row = rows.remove(plan.from);
        rows.insert(plan.to, row);
        renumber_shifted(rows, &self.index, &shifted);
        stripe::restripe(rows, &self.config);

        log::debug!("moved row {} from {} to {}", plan.row, plan.from, plan.to);
        Ok(Some(plan))
    }

    /// Deletes a body row and returns the position it held.
    pub fn delete_row(&mut self, id: RowId) -> Result<usize, TableError> {
        self.ensure_row_editable(id)?;
        let (position, shifted) = self.index.remove(id)?;
        let rows = body_rows_mut(&mut self.container, &self.table_id)?;
        rows.remove(position);
        renumber_shifted(rows, &self.index, &shifted);
        stripe::restripe(rows, &self.config);

        let flag = self.changes.mark_removed(id);
        self.row_count = self.row_count.saturating_sub(1);
        self.write_fields();
        log::debug!("deleted row {id} at {position}, slot now {flag:?}");
        Ok(position)
    }

    /// Inserts `row` after `after`, or at the end, and returns the identity
    /// allocated for it.
    pub fn add_row(&mut self, after: Option<RowId>, mut row: Element) -> Result<RowId, TableError> {
        self.ensure_editable()?;
        let position = match after {
            Some(anchor) => {
                self.index
                    .position_of(anchor)
                    .ok_or(TableError::UnknownRow(anchor))?
                    + 1
            }
            None => self.index.len(),
        };

        let id = self.next_id;
        let rows = body_rows_mut(&mut self.container, &self.table_id)?;
        let number = match position.checked_sub(1) {
            Some(previous) => labels::read(&rows[previous]).map(|n| n.checked_add(1)),
            None => rows.first().and_then(labels::read).map(Some),
        };
        match number {
            Some(Some(number)) => labels::set(&mut row, number),
            Some(None) => labels::invalidate(&mut row),
            None => {}
        }
        row.set_data(ROW_ID_KEY, id.to_string());

        let shifted = self.index.insert(position, id)?;
        rows.insert(position, row);
        renumber_shifted(rows, &self.index, &shifted);
        stripe::restripe(rows, &self.config);

        self.next_id = id.next();
        self.changes.mark_added(id);
        self.row_count += 1;
        self.write_fields();
        log::debug!("added row {id} at {position}");
        Ok(id)
    }

    /// An empty row shaped like the table's body rows.
    ///
    /// Cells holding a row-number label keep an empty label so
    /// [`EditableTable::add_row`] can number it.
    pub fn blank_row(&self) -> Element {
        let template = self
            .body_rows()
            .first()
            .or_else(|| self.header_rows().last());
        let mut row = Element::new("tr");
        if let Some(template) = template {
            for cell in template.child_elements().iter().filter(|c| !c.is_text()) {
                let mut blank = Element::new("td");
                if !edittable_dom::find_by_class(cell, labels::ROW_NUMBER_CLASS).is_empty() {
                    blank = blank.child(Element::new("span").class(labels::ROW_NUMBER_CLASS));
                }
                row = row.child(blank);
            }
        }
        row
    }

    /// Sorts body rows by a column. Labels stay with their rows and the
    /// change list is untouched.
    pub fn sort_rows(&mut self, column: usize, reverse: bool) -> Result<(), TableError> {
        let rows = body_rows_mut(&mut self.container, &self.table_id)?;
        let cells: Vec<String> = rows.iter().map(|row| sort::cell_text(row, column)).collect();
        let order = sort::sort_order(&cells, reverse);

        let ids = order
            .iter()
            .map(|&position| {
                self.index
                    .identity_at(position)
                    .ok_or(TableError::PositionOutOfRange {
                        position,
                        len: self.index.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.index.reorder(ids)?;

        let mut taken: Vec<Option<Element>> = std::mem::take(rows).into_iter().map(Some).collect();
        rows.extend(order.iter().filter_map(|&position| taken[position].take()));
        stripe::restripe(rows, &self.config);
        log::debug!("sorted {} rows by column {column}", rows.len());
        Ok(())
    }

    /// Checks the index bijection and that it matches the rows on the page.
    pub fn check_consistency(&self) -> Result<(), TableError> {
        let order = self.document_order()?;
        self.index.check_consistency(Some(&order))
    }

    fn ensure_editable(&self) -> Result<(), TableError> {
        if self.meta.disabled {
            return Err(TableError::ReadOnly);
        }
        Ok(())
    }

    /// Writes the row count and change list into their hidden fields,
    /// creating the fields if the markup had none.
    fn write_fields(&mut self) {
        let values = [
            (ROWS_FIELD, self.row_count.to_string()),
            (CHANGES_FIELD, self.changes.encode()),
        ];
        for (name, value) in values {
            match find_by_name_mut(&mut self.container, name) {
                Some(field) => field.set_attr("value", value),
                None => self.container.child_elements_mut().push(
                    Element::new("input")
                        .attr("type", "hidden")
                        .attr("name", name)
                        .attr("value", value),
                ),
            }
        }
    }
}

/// A body row's identity as recorded at build time.
pub fn row_id_of(row: &Element) -> Option<RowId> {
    row.get_data(ROW_ID_KEY)
        .and_then(|raw| raw.parse().ok())
        .map(RowId)
}

fn body_rows_mut<'a>(container: &'a mut Element, table_id: &str) -> Result<&'a mut Vec<Element>, TableError> {
    let table = find_element_mut(container, table_id)
        .ok_or_else(|| TableError::MissingBody(table_id.to_string()))?;
    table
        .child_elements_mut()
        .iter_mut()
        .find(|child| child.tag == "tbody")
        .map(Element::child_elements_mut)
        .ok_or_else(|| TableError::MissingBody(table_id.to_string()))
}

fn renumber_shifted(rows: &mut [Element], index: &RowIndex, shifted: &[Shifted]) {
    for shift in shifted {
        if let Some(row) = index.position_of(shift.id).and_then(|p| rows.get_mut(p)) {
            labels::renumber(row, shift.delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeFlag;
    use crate::model::META_ATTR;

    fn body_row(id: u32, label: i64) -> Element {
        Element::new("tr")
            .attr(META_ATTR, format!(r#"{{"row":{id}}}"#))
            .child(Element::new("td").child(
                Element::new("span")
                    .class(labels::ROW_NUMBER_CLASS)
                    .with_text(label.to_string()),
            ))
            .child(Element::new("td").with_text(format!("row {id}")))
    }

    /// One header row, body rows 1, 2, 3.
    fn sample() -> EditableTable {
        let table = Element::new("table")
            .class(TABLE_CLASS)
            .attr(META_ATTR, r#"{"topic":"Sandbox.Test","table":0,"headerrows":1}"#)
            .child(Element::new("tr").child(Element::new("th").with_text("#")))
            .children([body_row(1, 1), body_row(2, 2), body_row(3, 3)]);
        let container = Element::new("div").class(super::super::CONTAINER_CLASS).child(table);
        EditableTable::build(container, &EditConfig::default()).unwrap()
    }

    fn order(table: &EditableTable) -> Vec<u32> {
        table.index().order().iter().map(|id| id.get()).collect()
    }

    fn labels_of(table: &EditableTable) -> Vec<Option<i64>> {
        table.body_rows().iter().map(labels::read).collect()
    }

    fn field(table: &EditableTable, name: &str) -> String {
        find_by_name(table.container(), name)
            .and_then(|f| f.get_attr("value"))
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_build_reads_identities() {
        let table = sample();
        assert_eq!(order(&table), [1, 2, 3]);
        assert_eq!(table.header_len(), 1);
        assert_eq!(table.row_count(), 4);
        assert_eq!(field(&table, ROWS_FIELD), "4");
        assert_eq!(field(&table, CHANGES_FIELD), "");
        assert_eq!(table.wire_position(0), 1);
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_move_before_later_row() {
        let mut table = sample();
        let plan = table.move_row(RowId(1), Some(RowId(3))).unwrap().unwrap();
        assert_eq!(plan, Relocation { row: RowId(1), from: 0, to: 1 });
        assert_eq!(order(&table), [2, 1, 3]);
        assert_eq!(table.index().position_of(RowId(2)), Some(0));
        assert_eq!(table.index().position_of(RowId(1)), Some(1));
        assert_eq!(table.index().position_of(RowId(3)), Some(2));
        assert_eq!(labels_of(&table), [Some(1), Some(2), Some(3)]);
        assert!(table.changes().is_empty());
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_move_to_end_and_to_front() {
        let mut table = sample();
        table.move_row(RowId(1), None).unwrap();
        assert_eq!(order(&table), [2, 3, 1]);
        table.move_row(RowId(1), Some(RowId(2))).unwrap();
        assert_eq!(order(&table), [1, 2, 3]);
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_move_onto_self_is_noop() {
        let mut table = sample();
        let before = table.container().clone();
        assert_eq!(table.move_row(RowId(2), Some(RowId(2))).unwrap(), None);
        // Dropping before the next row lands in the same place
        assert_eq!(table.move_row(RowId(2), Some(RowId(3))).unwrap(), None);
        assert_eq!(table.move_row(RowId(3), None).unwrap(), None);
        assert_eq!(table.container(), &before);
    }

    #[test]
    fn test_move_restripes() {
        let mut table = sample();
        table.move_row(RowId(3), Some(RowId(1))).unwrap();
        let rows = table.body_rows();
        assert_eq!(row_id_of(&rows[2]), Some(RowId(2)));
        assert!(rows[2].has_class("foswikiLast"));
        assert!(!rows[0].has_class("foswikiLast"));
        assert!(rows[1].has_class("foswikiTableOdd"));
    }

    #[test]
    fn test_delete_row() {
        let mut table = sample();
        assert_eq!(table.delete_row(RowId(2)).unwrap(), 1);
        assert_eq!(order(&table), [1, 3]);
        assert_eq!(table.index().position_of(RowId(3)), Some(1));
        assert_eq!(table.row_count(), 3);
        assert_eq!(field(&table, ROWS_FIELD), "3");
        assert_eq!(field(&table, CHANGES_FIELD), "2=-1");
        assert_eq!(labels_of(&table), [Some(1), Some(2)]);
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_added_then_deleted_nets_unchanged() {
        let mut table = sample();
        let added = table.add_row(Some(RowId(1)), table.blank_row()).unwrap();
        assert_eq!(added, RowId(4));
        assert_eq!(order(&table), [1, 4, 2, 3]);
        assert_eq!(labels_of(&table), [Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(table.changes().flag(added), ChangeFlag::Added);
        assert_eq!(field(&table, ROWS_FIELD), "5");

        table.delete_row(added).unwrap();
        assert_eq!(table.changes().flag(added), ChangeFlag::Unchanged);
        assert_eq!(field(&table, CHANGES_FIELD), "");
        assert_eq!(field(&table, ROWS_FIELD), "4");
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_removed_slot_not_reused() {
        let mut table = sample();
        table.delete_row(RowId(3)).unwrap();
        let container = table.into_container();
        let mut rebuilt = EditableTable::build(container, &EditConfig::default()).unwrap();
        assert_eq!(rebuilt.changes().flag(RowId(3)), ChangeFlag::Removed);
        assert_eq!(rebuilt.add_row(None, Element::new("tr")).unwrap(), RowId(4));
    }

    #[test]
    fn test_unknown_rows() {
        let mut table = sample();
        assert_eq!(
            table.move_row(RowId(9), None).unwrap_err(),
            TableError::UnknownRow(RowId(9))
        );
        assert_eq!(
            table.move_row(RowId(1), Some(RowId(9))).unwrap_err(),
            TableError::UnknownRow(RowId(9))
        );
        assert!(table.delete_row(RowId(9)).is_err());
        assert!(table.add_row(Some(RowId(9)), Element::new("tr")).is_err());
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_read_only_table() {
        let table = Element::new("table")
            .class(TABLE_CLASS)
            .attr(META_ATTR, r#"{"disabled":true}"#)
            .children([body_row(1, 1), body_row(2, 2)]);
        let mut table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();
        assert_eq!(table.move_row(RowId(1), None).unwrap_err(), TableError::ReadOnly);
        assert_eq!(table.delete_row(RowId(1)).unwrap_err(), TableError::ReadOnly);
    }

    #[test]
    fn test_read_only_row() {
        let locked = body_row(2, 2).attr(META_ATTR, r#"{"row":2,"readonly":true}"#);
        let table = Element::new("table")
            .class(TABLE_CLASS)
            .children([body_row(1, 1), locked, body_row(3, 3)]);
        let mut table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();
        assert!(table.is_row_read_only(RowId(2)));
        assert!(!table.is_row_read_only(RowId(1)));

        assert_eq!(table.delete_row(RowId(2)).unwrap_err(), TableError::ReadOnlyRow(RowId(2)));
        assert_eq!(table.move_row(RowId(2), None).unwrap_err(), TableError::ReadOnlyRow(RowId(2)));
        // Other rows may still move past it
        table.move_row(RowId(1), None).unwrap();
        assert_eq!(order(&table), [2, 3, 1]);
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_cell_meta() {
        let row = Element::new("tr")
            .attr(META_ATTR, r#"{"row":1}"#)
            .child(Element::new("td").attr(META_ATTR, r#"{"type":"row"}"#))
            .child(Element::new("td").class(r#"{"type":"select","values":["a"]}"#));
        let table = Element::new("table").class(TABLE_CLASS).child(row);
        let table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();

        assert!(!table.cell_meta(RowId(1), 0).unwrap().kind.is_editable());
        assert_eq!(table.cell_meta(RowId(1), 1).unwrap().values, ["a"]);
        assert!(matches!(
            table.cell_meta(RowId(1), 2),
            Err(Error::Table(TableError::UnknownColumn { column: 2, .. }))
        ));
        assert!(table.cell_meta(RowId(9), 0).is_err());
    }

    #[test]
    fn test_initial_sort_from_metadata() {
        let table = Element::new("table")
            .class(TABLE_CLASS)
            .attr(META_ATTR, r#"{"headerrows":1,"sort":{"column":1,"reverse":true}}"#)
            .child(Element::new("tr").child(Element::new("th").with_text("#")))
            .children([body_row(1, 1), body_row(2, 2), body_row(3, 3)]);
        let table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();
        assert_eq!(order(&table), [3, 2, 1]);
        assert_eq!(labels_of(&table), [Some(3), Some(2), Some(1)]);
        assert!(table.changes().is_empty());
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_add_after_overflowing_label() {
        let table = Element::new("table")
            .class(TABLE_CLASS)
            .children([body_row(1, 1), body_row(2, i64::MAX)]);
        let mut table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();

        let added = table.add_row(Some(RowId(2)), table.blank_row()).unwrap();
        assert_eq!(labels_of(&table), [Some(1), Some(i64::MAX), None]);
        let label = table.row_element(added).unwrap().text_content();
        assert_eq!(label, labels::INVALID_LABEL);

        // Inserting above it pushes the maximal label over the edge too
        table.add_row(Some(RowId(1)), table.blank_row()).unwrap();
        assert_eq!(labels_of(&table), [Some(1), Some(2), None, None]);
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_sequential_identities_without_metadata() {
        let table = Element::new("table").children((0..3).map(|i| {
            Element::new("tr").child(Element::new("td").with_text(i.to_string()))
        }));
        let table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();
        assert_eq!(order(&table), [0, 1, 2]);
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_header_block_after_body() {
        let table = Element::new("table")
            .class(TABLE_CLASS)
            .attr(META_ATTR, r#"{"headerrows":1}"#)
            .child(Element::new("tbody").children([body_row(5, 1), body_row(6, 2)]))
            .child(Element::new("thead").child(Element::new("tr").child(Element::new("th"))));
        let table = EditableTable::build(Element::new("div").child(table), &EditConfig::default()).unwrap();
        assert_eq!(order(&table), [5, 6]);
        assert_eq!(table.header_len(), 1);
        assert_eq!(table.wire_position(1), 2);
    }

    #[test]
    fn test_sort_rows() {
        let mut table = sample();
        table.sort_rows(1, true).unwrap();
        assert_eq!(order(&table), [3, 2, 1]);
        assert_eq!(labels_of(&table), [Some(3), Some(2), Some(1)]);
        assert!(table.changes().is_empty());
        table.check_consistency().unwrap();
    }

    #[test]
    fn test_missing_table() {
        let err = EditableTable::build(Element::new("div"), &EditConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Metadata(MetadataError::Missing { .. })));
    }

    #[test]
    fn test_reads_existing_hidden_fields() {
        let container = Element::new("div")
            .child(Element::new("table").children([body_row(1, 1)]))
            .child(Element::new("input").attr("name", ROWS_FIELD).attr("value", "9"))
            .child(Element::new("input").attr("name", CHANGES_FIELD).attr("value", "4=1"));
        let table = EditableTable::build(container, &EditConfig::default()).unwrap();
        assert_eq!(table.row_count(), 9);
        assert_eq!(table.changes().flag(RowId(4)), ChangeFlag::Added);
    }
}
