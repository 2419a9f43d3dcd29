use edittable_dom::{hit_test_any, hit_test_tag, Element, LayoutResult, Rect};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

fn table() -> Element {
    Element::new("table").id("t").child(
        Element::new("tbody")
            .child(Element::new("tr").id("r0").child(Element::new("td").id("c0")))
            .child(Element::new("tr").id("r1").child(Element::new("td").id("c1"))),
    )
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_any_returns_deepest_measured() {
    let root = table();
    let layout = create_layout(&[
        ("t", Rect::new(0, 0, 200, 40)),
        ("r0", Rect::new(0, 0, 200, 20)),
        ("r1", Rect::new(0, 20, 200, 20)),
        ("c1", Rect::new(0, 20, 100, 20)),
    ]);

    assert_eq!(hit_test_any(&layout, &root, 50, 25), Some("c1".to_string()));
    // c0 has no box, so the row is the deepest hit
    assert_eq!(hit_test_any(&layout, &root, 50, 5), Some("r0".to_string()));
}

#[test]
fn test_unmeasured_group_is_transparent() {
    // tbody has no rect but its rows are still found
    let root = table();
    let layout = create_layout(&[
        ("t", Rect::new(0, 0, 200, 40)),
        ("r1", Rect::new(0, 20, 200, 20)),
    ]);

    assert_eq!(hit_test_tag(&layout, &root, "tr", 10, 30), Some("r1".to_string()));
}

#[test]
fn test_hit_test_tag_filters() {
    let root = table();
    let layout = create_layout(&[
        ("t", Rect::new(0, 0, 200, 40)),
        ("r0", Rect::new(0, 0, 200, 20)),
        ("c0", Rect::new(0, 0, 100, 20)),
    ]);

    assert_eq!(hit_test_tag(&layout, &root, "tr", 10, 10), Some("r0".to_string()));
    assert_eq!(hit_test_tag(&layout, &root, "table", 10, 10), Some("t".to_string()));
}

#[test]
fn test_hit_outside_root_box() {
    let root = table();
    let layout = create_layout(&[
        ("t", Rect::new(0, 0, 200, 40)),
        ("r0", Rect::new(0, 0, 200, 20)),
    ]);

    assert_eq!(hit_test_any(&layout, &root, 10, 300), None);
    assert_eq!(hit_test_tag(&layout, &root, "tr", 10, 30), None);
}
