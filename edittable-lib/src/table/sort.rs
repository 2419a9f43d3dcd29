//! Client-side column sort

use std::cmp::Ordering;

use chrono::NaiveDate;
use edittable_dom::Element;

/// Date formats the wiki renders.
const DATE_FORMATS: &[&str] = &["%d %b %Y", "%d-%b-%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// How a column compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Date,
    Text,
}

impl ColumnKind {
    /// Picks the strictest kind every cell parses as.
    pub fn detect<S: AsRef<str>>(cells: &[S]) -> Self {
        if cells.iter().all(|c| parse_number(c.as_ref()).is_some()) {
            Self::Number
        } else if cells.iter().all(|c| parse_date(c.as_ref()).is_some()) {
            Self::Date
        } else {
            Self::Text
        }
    }

    fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Number => {
                let (a, b) = (parse_number(a), parse_number(b));
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            Self::Date => parse_date(a).cmp(&parse_date(b)),
            Self::Text => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
}

/// The order cells should be shown in, as indices into `cells`.
///
/// Stable: equal cells keep their relative order in both directions.
pub fn sort_order<S: AsRef<str>>(cells: &[S], reverse: bool) -> Vec<usize> {
    let kind = ColumnKind::detect(cells);
    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.sort_by(|&a, &b| {
        let ordering = kind.compare(cells[a].as_ref(), cells[b].as_ref());
        if reverse { ordering.reverse() } else { ordering }
    });
    order
}

/// Text of a row's cell, counting `td` and `th` alike.
pub fn cell_text(row: &Element, column: usize) -> String {
    row.child_elements()
        .iter()
        .filter(|cell| cell.tag == "td" || cell.tag == "th")
        .nth(column)
        .map(|cell| cell.text_content().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_sort_numerically() {
        assert_eq!(sort_order(&["10", "9", "100", "-1.5"], false), [3, 1, 0, 2]);
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let cells = ["03 Feb 2024", "1 Jan 2025", "28 Dec 2023"];
        assert_eq!(ColumnKind::detect(&cells), ColumnKind::Date);
        assert_eq!(sort_order(&cells, false), [2, 0, 1]);
    }

    #[test]
    fn test_mixed_column_sorts_as_text() {
        let cells = ["beta", "10", "Alpha"];
        assert_eq!(ColumnKind::detect(&cells), ColumnKind::Text);
        assert_eq!(sort_order(&cells, false), [1, 2, 0]);
    }

    #[test]
    fn test_reverse_is_stable() {
        let cells = ["b", "a", "B", "c"];
        assert_eq!(sort_order(&cells, true), [3, 0, 2, 1]);
        assert_eq!(sort_order(&cells, false), [1, 0, 2, 3]);
    }

    #[test]
    fn test_cell_text_skips_non_cells() {
        let row = Element::new("tr")
            .child(Element::new("th").with_text(" 1 "))
            .child(Element::new("td").with_text("x"));
        assert_eq!(cell_text(&row, 0), "1");
        assert_eq!(cell_text(&row, 1), "x");
        assert_eq!(cell_text(&row, 5), "");
    }
}
