//! Login form extraction from an authentication-lapsed response

use std::sync::LazyLock;

use edittable_dom::Element;
use edittable_dom::parse_fragment;
use regex::Regex;

static LOGIN_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<form\b[^>]*\bname\s*=\s*(?:"loginform"|'loginform'|loginform\b)[^>]*>.*?</form\s*>"#)
        .unwrap_or_else(|e| panic!("login form pattern is invalid: {e}"))
});

/// The login prompt a wiki answers with when the session has lapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    html: String,
}

impl LoginForm {
    /// Pulls the `<form name="loginform">` out of a response body.
    ///
    /// When the body has no such form the whole body is kept, so the user
    /// still sees whatever the server said.
    pub fn extract(body: &str) -> Self {
        let html = match LOGIN_FORM.find(body) {
            Some(found) => found.as_str(),
            None => {
                log::debug!("no login form in response, keeping the whole body");
                body
            }
        };
        Self {
            html: html.to_string(),
        }
    }

    /// The form markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Parses the form into elements ready to splice into the page.
    ///
    /// Markup that cannot be parsed is shown as text rather than dropped.
    pub fn to_elements(&self) -> Vec<Element> {
        match parse_fragment(&self.html) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("login response is not well-formed ({e}), showing it as text");
                vec![Element::new("div").class("erpJS_login").with_text(self.html.clone())]
            }
        }
    }
}
