use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::Style;

/// Tag given to bare text nodes.
pub const TEXT_TAG: &str = "#text";

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    /// False when `id` was generated rather than read from markup.
    pub explicit_id: bool,
    pub tag: String,

    // Markup
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub content: Content,

    // Visual
    pub style: Style,

    // Element-associated storage, never serialised
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            explicit_id: false,
            tag: "div".to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            content: Content::None,
            style: Style::default(),
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    /// A bare text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: TEXT_TAG.to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self.explicit_id = true;
        self
    }

    /// Fresh generated id; used when cloning a subtree that must not share ids.
    pub fn regenerate_id(&mut self) {
        self.id = generate_id(&self.tag);
        self.explicit_id = false;
    }

    // Markup
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn remove_data(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    // Classes
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    // Attributes
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into().to_ascii_lowercase(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.child_elements_mut().push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.child_elements_mut().extend(new_children);
        self
    }

    /// Child nodes, or an empty slice for leaf and text content.
    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Child nodes as a mutable list.
    ///
    /// Text content is converted into a leading text node so nothing is lost.
    pub fn child_elements_mut(&mut self) -> &mut Vec<Element> {
        if !matches!(self.content, Content::Children(_)) {
            let previous = std::mem::take(&mut self.content);
            self.content = match previous {
                Content::Text(text) if !text.is_empty() => {
                    Content::Children(vec![Element::text(text)])
                }
                _ => Content::Children(Vec::new()),
            };
        }
        match &mut self.content {
            Content::Children(children) => children,
            _ => unreachable!("content was just converted to children"),
        }
    }

    pub fn set_children(&mut self, children: Vec<Element>) {
        self.content = Content::Children(children);
    }

    /// Child elements with a given tag, skipping text nodes.
    pub fn children_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().iter().filter(move |c| c.tag == tag)
    }

    // Text
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }
}

/// Split a `class` attribute into tokens.
///
/// A `{...}` group is kept as a single token even when it contains spaces, so
/// metadata annotations embedded in the class list survive intact.
pub fn split_classes(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for ch in value.chars() {
        if depth > 0 {
            current.push(ch);
            if in_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_string = false;
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            continue;
        }

        match ch {
            '{' => {
                depth = 1;
                current.push(ch);
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_classes() {
        assert_eq!(
            split_classes("  foswikiTable   erpJS_table "),
            vec!["foswikiTable", "erpJS_table"]
        );
    }

    #[test]
    fn test_split_keeps_brace_group() {
        let classes = split_classes(r#"erpJS_table {"headerrows": 1, "topic": "A B"} last"#);
        assert_eq!(
            classes,
            vec![
                "erpJS_table".to_string(),
                r#"{"headerrows": 1, "topic": "A B"}"#.to_string(),
                "last".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_brace_inside_string() {
        let classes = split_classes(r#"{"topic": "a } b"}"#);
        assert_eq!(classes, vec![r#"{"topic": "a } b"}"#.to_string()]);
    }

    #[test]
    fn test_child_elements_mut_preserves_text() {
        let mut cell = Element::new("td").with_text("42");
        cell.child_elements_mut().push(Element::new("input"));
        assert_eq!(cell.child_elements().len(), 2);
        assert!(cell.child_elements()[0].is_text());
        assert_eq!(cell.text_content(), "42");
    }
}
