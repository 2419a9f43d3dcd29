use crate::element::{split_classes, Content, Element};

/// Elements that never have content or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose body is raw text up to the matching closing tag.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea"];

/// Elements whose closing tag may be omitted.
const OPTIONAL_CLOSE_TAGS: &[&str] = &[
    "p", "li", "dt", "dd", "tr", "td", "th", "thead", "tbody", "tfoot", "option", "colgroup",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected closing tag </{tag}> at byte {offset}")]
    UnexpectedClose { tag: String, offset: usize },

    #[error("closing tag </{found}> at byte {offset} does not match <{expected}>")]
    Mismatched {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("<{tag}> is never closed")]
    Unclosed { tag: String },

    #[error("malformed tag at byte {offset}")]
    MalformedTag { offset: usize },
}

/// Parse an HTML fragment into a list of top-level nodes.
///
/// This reads the markup the wiki's REST handlers emit: elements, attributes
/// (quoted, unquoted or bare), text, comments and the common entities.
/// Whitespace-only text between tags is dropped.
pub fn parse_fragment(input: &str) -> Result<Vec<Element>, ParseError> {
    let mut parser = Parser {
        input,
        pos: 0,
        stack: Vec::new(),
        roots: Vec::new(),
    };
    parser.run()?;
    log::trace!("parsed fragment into {} top-level nodes", parser.roots.len());
    Ok(parser.roots)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    stack: Vec<Element>,
    roots: Vec<Element>,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_past("-->");
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">");
            } else if rest.starts_with("</") {
                self.close_tag()?;
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.open_tag()?;
            } else {
                self.text();
            }
        }

        while let Some(open) = self.stack.pop() {
            if !OPTIONAL_CLOSE_TAGS.contains(&open.tag.as_str()) {
                return Err(ParseError::Unclosed { tag: open.tag });
            }
            self.append(finish(open));
        }
        Ok(())
    }

    fn skip_past(&mut self, terminator: &str) {
        match self.rest().find(terminator) {
            Some(at) => self.pos += at + terminator.len(),
            None => self.pos = self.input.len(),
        }
    }

    fn text(&mut self) {
        let rest = self.rest();
        // Skip the leading char so a stray '<' becomes text instead of looping.
        let skip = rest.chars().next().map(char::len_utf8).unwrap_or(0);
        let end = rest[skip..].find('<').map(|i| i + skip).unwrap_or(rest.len());
        let raw = &rest[..end];
        self.pos += end;
        if raw.trim().is_empty() {
            return;
        }
        self.append(Element::text(decode_entities(raw)));
    }

    fn append(&mut self, node: Element) {
        match self.stack.last_mut() {
            Some(parent) => parent.child_elements_mut().push(node),
            None => self.roots.push(node),
        }
    }

    fn open_tag(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let end = tag_end(rest).ok_or(ParseError::MalformedTag { offset: start })?;
        let inner = &rest[1..end];
        self.pos += end + 1;

        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (inner, false),
        };
        let name_end = inner
            .find(|c: char| c.is_whitespace())
            .unwrap_or(inner.len());
        let tag = inner[..name_end].to_ascii_lowercase();
        if tag.is_empty() {
            return Err(ParseError::MalformedTag { offset: start });
        }

        let mut element = Element::new(&tag);
        for (name, value) in parse_attributes(&inner[name_end..]) {
            match name.as_str() {
                "id" => element = element.id(value),
                "class" => element.classes = split_classes(&value),
                _ => element.set_attr(name, value),
            }
        }

        // A new row or cell implicitly closes the previous open sibling.
        self.close_implied_by(&tag);

        if self_closing || VOID_TAGS.contains(&tag.as_str()) {
            self.append(element);
            return Ok(());
        }

        if RAW_TEXT_TAGS.contains(&tag.as_str()) {
            let closing = format!("</{tag}");
            let rest = self.rest();
            let body_end = find_ascii_ci(rest, &closing).unwrap_or(rest.len());
            let body = &rest[..body_end];
            if !body.is_empty() {
                let text = if tag == "textarea" {
                    decode_entities(body)
                } else {
                    body.to_string()
                };
                element.content = Content::Text(text);
            }
            self.pos += body_end;
            self.skip_past(">");
            self.append(element);
            return Ok(());
        }

        self.stack.push(element);
        Ok(())
    }

    fn close_implied_by(&mut self, tag: &str) {
        let closes: &[&str] = match tag {
            "tr" => &["tr", "td", "th"],
            "td" | "th" => &["td", "th"],
            "tbody" | "tfoot" | "thead" => &["tbody", "thead", "tfoot", "tr", "td", "th"],
            "li" => &["li"],
            "option" => &["option"],
            _ => return,
        };
        // Only close within the nearest table or list scope.
        while let Some(open) = self.stack.last() {
            if !closes.contains(&open.tag.as_str()) {
                break;
            }
            let Some(done) = self.stack.pop() else { break };
            self.append(finish(done));
        }
    }

    fn close_tag(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let end = rest.find('>').ok_or(ParseError::MalformedTag { offset: start })?;
        let tag = rest[2..end].trim().to_ascii_lowercase();
        self.pos += end + 1;

        let Some(depth) = self.stack.iter().rposition(|open| open.tag == tag) else {
            return Err(ParseError::UnexpectedClose { tag, offset: start });
        };

        // Everything opened after the match must be implicitly closable.
        if let Some(blocker) = self.stack[depth + 1..]
            .iter()
            .find(|open| !OPTIONAL_CLOSE_TAGS.contains(&open.tag.as_str()))
        {
            return Err(ParseError::Mismatched {
                expected: blocker.tag.clone(),
                found: tag,
                offset: start,
            });
        }

        while self.stack.len() > depth {
            let Some(done) = self.stack.pop() else { break };
            self.append(finish(done));
        }
        Ok(())
    }
}

/// Collapse a lone text child into plain text content.
fn finish(mut element: Element) -> Element {
    if let Content::Children(children) = &mut element.content {
        if children.len() == 1 && children[0].is_text() {
            let text = children.remove(0).text_content();
            element.content = Content::Text(text);
        }
    }
    element
}

/// Index of the `>` closing a start tag, honouring quoted attribute values.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in rest.char_indices().skip(1) {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '>' => return Some(i),
            None => {}
        }
    }
    None
}

fn parse_attributes(source: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let mut name_end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || c == '=' {
                break;
            }
            name_end = i + c.len_utf8();
            chars.next();
        }
        let name = source[start..name_end].to_ascii_lowercase();

        while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            chars.next();
        }

        if !matches!(chars.peek(), Some(&(_, '='))) {
            if !name.is_empty() {
                attrs.push((name, String::new()));
            }
            continue;
        }
        chars.next();
        while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            chars.next();
        }

        let value = match chars.peek() {
            Some(&(i, q)) if q == '"' || q == '\'' => {
                chars.next();
                let value_start = i + 1;
                let mut value_end = source.len();
                for (j, c) in chars.by_ref() {
                    if c == q {
                        value_end = j;
                        break;
                    }
                }
                &source[value_start..value_end.max(value_start)]
            }
            Some(&(i, _)) => {
                let mut value_end = source.len();
                while let Some(&(j, c)) = chars.peek() {
                    if c.is_whitespace() {
                        value_end = j;
                        break;
                    }
                    chars.next();
                }
                &source[i..value_end]
            }
            None => "",
        };

        if !name.is_empty() {
            attrs.push((name, decode_entities(value)));
        }
    }

    attrs
}

/// Decode the character references the wiki emits.
///
/// Unknown named references are left untouched.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            decode_entity(entity).map(|ch| (ch, semi + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#39;x&#x27;"), "'x'");
        assert_eq!(decode_entities("&bogus; & alone"), "&bogus; & alone");
    }

    #[test]
    fn test_attributes_all_quoting_styles() {
        let attrs = parse_attributes(r#" a="1" b='two words' c=bare d"#);
        assert_eq!(
            attrs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
                ("c".to_string(), "bare".to_string()),
                ("d".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_tag_end_skips_quoted_gt() {
        assert_eq!(tag_end(r#"<a title="x>y">"#), Some(14));
    }
}
