use edittable_dom::{
    descendants, find_by_class, find_by_name, find_by_name_mut, find_element, find_element_mut,
    Content, Element, Style,
};

fn form() -> Element {
    Element::new("div")
        .id("container")
        .class("erpJS_container")
        .child(
            Element::new("input")
                .attr("type", "hidden")
                .attr("name", "etrows")
                .attr("value", "3"),
        )
        .child(Element::new("span").id("label").class("erpJS_rowNumber").with_text("1"))
}

#[test]
fn test_find_element_by_id() {
    let root = form();
    assert_eq!(find_element(&root, "label").map(|e| e.tag.as_str()), Some("span"));
    assert!(find_element(&root, "missing").is_none());
}

#[test]
fn test_find_element_mut_edits_in_place() {
    let mut root = form();
    if let Some(label) = find_element_mut(&mut root, "label") {
        label.set_text("7");
    }
    assert_eq!(find_element(&root, "label").unwrap().text_content(), "7");
}

#[test]
fn test_find_by_name() {
    let mut root = form();
    assert_eq!(find_by_name(&root, "etrows").and_then(|e| e.get_attr("value")), Some("3"));

    find_by_name_mut(&mut root, "etrows").unwrap().set_attr("value", "2");
    assert_eq!(find_by_name(&root, "etrows").and_then(|e| e.get_attr("value")), Some("2"));
}

#[test]
fn test_find_by_class_in_document_order() {
    let root = Element::new("div")
        .child(Element::new("p").id("a").class("x"))
        .child(Element::new("div").child(Element::new("p").id("b").class("x")))
        .child(Element::new("p").id("c").class("x"));

    let ids: Vec<_> = find_by_class(&root, "x").iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_descendants_starts_with_root() {
    let root = form();
    let all = descendants(&root);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, "container");
}

#[test]
fn test_class_helpers() {
    let mut row = Element::new("tr").class("foswikiTableEven");
    row.add_class("foswikiTableEven");
    assert_eq!(row.classes.len(), 1);
    assert!(row.remove_class("foswikiTableEven"));
    assert!(!row.remove_class("foswikiTableEven"));
    assert!(row.classes.is_empty());
}

#[test]
fn test_generated_ids_are_unique() {
    let a = Element::new("tr");
    let b = Element::new("tr");
    assert_ne!(a.id, b.id);
    assert!(!a.explicit_id);
    assert!(Element::new("tr").id("x").explicit_id);
}

#[test]
fn test_data_is_separate_from_attributes() {
    let row = Element::new("tr").data("erp-row", "4");
    assert_eq!(row.get_data("erp-row").map(String::as_str), Some("4"));
    assert!(row.get_attr("erp-row").is_none());
}

#[test]
fn test_style_opacity_is_clamped() {
    let style = Style::new().opacity(3.0);
    assert_eq!(style.opacity, 1.0);
    assert!(!style.is_faded());
    assert!(Style::new().opacity(0.5).is_faded());
}

#[test]
fn test_set_children_replaces_text() {
    let mut cell = Element::new("td").with_text("old");
    cell.set_children(vec![Element::new("b").with_text("new")]);
    assert!(matches!(cell.content, Content::Children(_)));
    assert_eq!(cell.text_content(), "new");
}
