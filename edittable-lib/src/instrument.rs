//! Finding editable tables on a page

use edittable_dom::Element;
use edittable_dom::parse_fragment;

use crate::config::EditConfig;
use crate::error::Error;
use crate::model::TableId;
use crate::session::TableSession;
use crate::table::CONTAINER_CLASS;
use crate::table::TABLE_CLASS;

/// A table that could not be taken over.
#[derive(Debug)]
pub struct InstrumentFailure {
    pub container: TableId,
    pub error: Error,
}

/// Sessions for every editable table found, plus the tables that failed.
#[derive(Debug, Default)]
pub struct Instrumented {
    pub sessions: Vec<TableSession>,
    pub failures: Vec<InstrumentFailure>,
}

impl Instrumented {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds a session for each editable table under `document`.
///
/// An `erpJS_container` element is taken as a whole; an `erpJS_table`
/// outside any container gets a container of its own. A table whose
/// metadata is broken is reported, not skipped, and does not stop the
/// others.
pub fn instrument(document: &Element, config: &EditConfig) -> Instrumented {
    let mut containers = Vec::new();
    collect_containers(document, &mut containers);

    let mut result = Instrumented::default();
    for container in containers {
        let id = TableId(container.id.clone());
        match TableSession::new(container, config) {
            Ok(session) => result.sessions.push(session),
            Err(error) => {
                log::warn!("could not instrument {id}: {error}");
                result.failures.push(InstrumentFailure {
                    container: id,
                    error,
                });
            }
        }
    }
    log::debug!(
        "instrumented {} tables, {} failed",
        result.sessions.len(),
        result.failures.len()
    );
    result
}

/// Parses page markup and instruments it.
pub fn instrument_html(html: &str, config: &EditConfig) -> Result<Instrumented, Error> {
    let page = Element::new("body").children(parse_fragment(html)?);
    Ok(instrument(&page, config))
}

fn collect_containers(element: &Element, out: &mut Vec<Element>) {
    if element.has_class(CONTAINER_CLASS) {
        out.push(element.clone());
    } else if element.has_class(TABLE_CLASS) {
        out.push(Element::new("div").class(CONTAINER_CLASS).child(element.clone()));
    } else {
        for child in element.child_elements() {
            collect_containers(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;

    #[test]
    fn test_finds_containers_and_bare_tables() {
        let html = r#"
            <div class="erpJS_container" id="c1">
              <table class="erpJS_table" data-erp='{"topic":"Main.A","table":0}'>
                <tr><td>a</td></tr>
              </table>
            </div>
            <p>text</p>
            <table class="erpJS_table {&quot;topic&quot;:&quot;Main.A&quot;,&quot;table&quot;:1}">
              <tr><td>b</td></tr><tr><td>c</td></tr>
            </table>
            <table><tr><td>plain</td></tr></table>
        "#;
        let found = instrument_html(html, &EditConfig::default()).unwrap();
        assert!(found.is_clean());
        assert_eq!(found.sessions.len(), 2);
        assert_eq!(found.sessions[0].id().as_str(), "c1");
        assert_eq!(found.sessions[0].table().meta().table, 0);
        assert_eq!(found.sessions[1].table().meta().table, 1);
        assert_eq!(found.sessions[1].table().index().len(), 2);
    }

    #[test]
    fn test_broken_metadata_is_reported() {
        let document = Element::new("body")
            .child(Element::new("table").id("bad").class(TABLE_CLASS).class("{headerrows: 1}"))
            .child(
                Element::new("table")
                    .class(TABLE_CLASS)
                    .child(Element::new("tr").child(Element::new("td"))),
            );
        let found = instrument(&document, &EditConfig::default());
        assert_eq!(found.sessions.len(), 1);
        assert_eq!(found.failures.len(), 1);
        assert!(matches!(
            found.failures[0].error,
            Error::Metadata(MetadataError::InvalidJson { .. })
        ));
    }
}
