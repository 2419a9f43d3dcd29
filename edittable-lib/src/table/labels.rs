//! Visible row-number labels

use edittable_dom::Element;
use edittable_dom::for_each_mut;

/// Class marking an element that displays its row's number.
pub const ROW_NUMBER_CLASS: &str = "erpJS_rowNumber";

/// Shown in place of a label that was not a number.
pub const INVALID_LABEL: &str = "????";

/// Adjusts every row-number label inside `row` by `delta`.
///
/// A label with a `value` attribute (a form input) is adjusted there,
/// otherwise its text is. A label that does not hold a number, or whose
/// adjusted number does not fit, is replaced with [`INVALID_LABEL`].
pub fn renumber(row: &mut Element, delta: isize) {
    if delta == 0 {
        return;
    }
    for_each_mut(row, &mut |element| {
        if !element.has_class(ROW_NUMBER_CLASS) {
            return;
        }
        let current = match element.get_attr("value") {
            Some(value) => value.to_string(),
            None => element.text_content(),
        };
        let next = current
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_add(delta as i64));
        let next = match next {
            Some(n) => n.to_string(),
            None => {
                log::warn!("row label {:?} cannot be shifted by {delta}", current);
                INVALID_LABEL.to_string()
            }
        };
        write_label(element, next);
    });
}

/// The first label's number, if the row has one that parses.
pub fn read(row: &Element) -> Option<i64> {
    edittable_dom::find_by_class(row, ROW_NUMBER_CLASS)
        .into_iter()
        .next()
        .and_then(|label| match label.get_attr("value") {
            Some(value) => value.trim().parse().ok(),
            None => label.text_content().trim().parse().ok(),
        })
}

/// Sets every label in `row` to `number`.
pub fn set(row: &mut Element, number: i64) {
    for_each_mut(row, &mut |element| {
        if element.has_class(ROW_NUMBER_CLASS) {
            write_label(element, number.to_string());
        }
    });
}

/// Replaces every label in `row` with [`INVALID_LABEL`].
pub fn invalidate(row: &mut Element) {
    for_each_mut(row, &mut |element| {
        if element.has_class(ROW_NUMBER_CLASS) {
            write_label(element, INVALID_LABEL.to_string());
        }
    });
}

fn write_label(element: &mut Element, text: String) {
    if element.get_attr("value").is_some() {
        element.set_attr("value", text);
    } else {
        element.set_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(text: &str) -> Element {
        Element::new("tr").child(
            Element::new("td").child(Element::new("span").class(ROW_NUMBER_CLASS).with_text(text)),
        )
    }

    #[test]
    fn test_renumber_text_label() {
        let mut row = labelled("3");
        renumber(&mut row, -1);
        assert_eq!(row.text_content(), "2");
        renumber(&mut row, 2);
        assert_eq!(read(&row), Some(4));
    }

    #[test]
    fn test_renumber_input_value() {
        let mut row = Element::new("tr").child(
            Element::new("input")
                .class(ROW_NUMBER_CLASS)
                .attr("value", "7"),
        );
        renumber(&mut row, 1);
        assert_eq!(read(&row), Some(8));
        assert_eq!(row.child_elements()[0].get_attr("value"), Some("8"));
    }

    #[test]
    fn test_unparseable_label_is_flagged() {
        let mut row = labelled("seven");
        renumber(&mut row, 1);
        assert_eq!(row.text_content(), INVALID_LABEL);
        assert_eq!(read(&row), None);
    }

    #[test]
    fn test_overflowing_label_is_flagged() {
        let mut row = labelled(&i64::MAX.to_string());
        renumber(&mut row, 1);
        assert_eq!(row.text_content(), INVALID_LABEL);

        let mut row = labelled(&i64::MIN.to_string());
        renumber(&mut row, -1);
        assert_eq!(row.text_content(), INVALID_LABEL);
    }

    #[test]
    fn test_zero_delta_leaves_garbage_alone() {
        let mut row = labelled("n/a");
        renumber(&mut row, 0);
        assert_eq!(row.text_content(), "n/a");
    }

    #[test]
    fn test_set_overwrites() {
        let mut row = labelled("????");
        set(&mut row, 12);
        assert_eq!(read(&row), Some(12));
    }
}
