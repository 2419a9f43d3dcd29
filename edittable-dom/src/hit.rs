use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the deepest element at the given coordinates.
///
/// Elements the host did not measure are transparent: their children are still
/// searched, but they never match themselves. Hosts typically report boxes for
/// the table and its rows only, not for the row groups in between.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: u32, y: u32) -> Option<String> {
    hit_test_element(layout, root, x, y, &|_| true)
}

/// Find the deepest element with the given tag at the given coordinates.
pub fn hit_test_tag(
    layout: &LayoutResult,
    root: &Element,
    tag: &str,
    x: u32,
    y: u32,
) -> Option<String> {
    hit_test_element(layout, root, x, y, &|element| element.tag == tag)
}

fn hit_test_element<F>(
    layout: &LayoutResult,
    element: &Element,
    x: u32,
    y: u32,
    accept: &F,
) -> Option<String>
where
    F: Fn(&Element) -> bool,
{
    let rect = layout.get(&element.id);

    if let Some(rect) = rect {
        if !rect.contains(x, y) {
            return None;
        }
    }

    // Check children in reverse order (last rendered = on top)
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_test_element(layout, child, x, y, accept) {
                return Some(id);
            }
        }
    }

    if rect.is_some() && accept(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
