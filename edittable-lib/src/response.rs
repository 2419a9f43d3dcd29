//! Interpreted save responses

use edittable_dom::Element;
use edittable_dom::ParseError;
use edittable_dom::parse_fragment;

use crate::auth::LoginForm;

/// Replacement markup confirmed by the server.
///
/// Only [`SaveOutcome::from_body`] can produce one, so holding a `Fragment`
/// means the server accepted the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    html: String,
}

impl Fragment {
    pub(crate) fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }

    /// Parses the markup into top-level nodes.
    pub fn parse(&self) -> Result<Vec<Element>, ParseError> {
        parse_fragment(&self.html)
    }
}

/// What a completed round trip means for the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The change was accepted; install this markup.
    Applied(Fragment),
    /// The session lapsed; show this form and leave the table alone.
    AuthRequired(LoginForm),
}

impl SaveOutcome {
    /// Classifies a success-status body by its sentinel prefix.
    ///
    /// The marker must start the body exactly; anything else is taken to be
    /// a login page.
    pub fn from_body(body: &str, marker: &str) -> Self {
        match body.strip_prefix(marker) {
            Some(html) => Self::Applied(Fragment::new(html)),
            None => {
                log::debug!("response lacks the '{marker}' marker, treating it as a login prompt");
                Self::AuthRequired(LoginForm::extract(body))
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Applied(fragment) => Some(fragment),
            Self::AuthRequired(_) => None,
        }
    }
}
