//! Splitting a table's rows into header, body and footer

use edittable_dom::Element;

/// A table's rows as three explicit sequences.
///
/// `<thead>` rows always head the table and `<tfoot>` rows always close it,
/// wherever they appear in the source; the configured header and footer
/// counts then claim further rows from the ends of the remaining run.
#[derive(Debug, Clone, Default)]
pub struct TableSections {
    pub header: Vec<Element>,
    pub body: Vec<Element>,
    pub footer: Vec<Element>,
    /// Non-row children such as `<caption>` and `<colgroup>`.
    pub extras: Vec<Element>,
}

impl TableSections {
    /// Takes every row out of `table` and classifies it.
    pub fn scan(table: &mut Element, header_rows: usize, footer_rows: usize) -> Self {
        let mut sections = Self::default();
        let mut head = Vec::new();
        let mut foot = Vec::new();

        for child in std::mem::take(table.child_elements_mut()) {
            match child.tag.as_str() {
                "thead" => head.extend(rows_of(child)),
                "tfoot" => foot.extend(rows_of(child)),
                "tbody" => sections.body.extend(rows_of(child)),
                "tr" => sections.body.push(child),
                _ if child.is_text() => {}
                _ => sections.extras.push(child),
            }
        }

        let claim_head = header_rows.saturating_sub(head.len()).min(sections.body.len());
        head.extend(sections.body.drain(..claim_head));

        let claim_foot = footer_rows.saturating_sub(foot.len()).min(sections.body.len());
        let split = sections.body.len() - claim_foot;
        let mut tail = sections.body.split_off(split);
        tail.append(&mut foot);

        sections.header = head;
        sections.footer = tail;
        log::trace!(
            "scanned table {}: {} header, {} body, {} footer rows",
            table.id,
            sections.header.len(),
            sections.body.len(),
            sections.footer.len()
        );
        sections
    }

    /// Writes the rows back as `<thead>`, `<tbody>`, `<tfoot>`.
    ///
    /// The body group is always present so rows can be inserted into an
    /// empty table.
    pub fn restore(self, table: &mut Element) {
        let mut children = self.extras;
        if !self.header.is_empty() {
            children.push(Element::new("thead").children(self.header));
        }
        children.push(Element::new("tbody").children(self.body));
        if !self.footer.is_empty() {
            children.push(Element::new("tfoot").children(self.footer));
        }
        table.set_children(children);
    }
}

fn rows_of(mut group: Element) -> Vec<Element> {
    std::mem::take(group.child_elements_mut())
        .into_iter()
        .filter(|row| row.tag == "tr")
        .collect()
}

/// The rows of one section of a normalised table.
pub fn section_rows<'a>(table: &'a Element, tag: &str) -> &'a [Element] {
    table
        .child_elements()
        .iter()
        .find(|child| child.tag == tag)
        .map(Element::child_elements)
        .unwrap_or(&[])
}
