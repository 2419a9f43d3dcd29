use crate::element::{Content, Element};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Serialise an element and its subtree.
///
/// Generated ids, element data and style state are not written.
pub fn to_html(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    if element.is_text() {
        out.push_str(&escape_text(&element.text_content()));
        return;
    }

    out.push('<');
    out.push_str(&element.tag);
    if element.explicit_id {
        push_attr(out, "id", &element.id);
    }
    if !element.classes.is_empty() {
        push_attr(out, "class", &element.classes.join(" "));
    }
    for (name, value) in &element.attrs {
        push_attr(out, name, value);
    }

    if VOID_TAGS.contains(&element.tag.as_str()) {
        out.push_str(" />");
        return;
    }
    out.push('>');

    match &element.content {
        Content::None => {}
        Content::Text(text) if matches!(element.tag.as_str(), "script" | "style") => {
            out.push_str(text);
        }
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
