//! Editor configuration

use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;

/// Configuration for the row editor.
///
/// Every field has a default matching a stock wiki install, so a page only
/// needs to supply what it overrides.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use edittable_lib::EditConfig;
///
/// let config = EditConfig::default()
///     .with_script_url_path("/cgi-bin")
///     .with_timeout(Duration::from_secs(20));
/// assert_eq!(config.rest_path, "/rest/EditRowPlugin/save");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Script path prefix of the wiki (the `SCRIPTURLPATH` preference).
    ///
    /// Default: `/bin`
    pub script_url_path: String,

    /// REST handler path below the script path.
    ///
    /// Default: `/rest/EditRowPlugin/save`
    pub rest_path: String,

    /// Marker the handler prefixes a successful response with.
    ///
    /// Default: `RESPONSE`
    pub response_marker: String,

    /// Per-request timeout in seconds. `None` leaves it to the HTTP client.
    pub timeout_secs: Option<u64>,

    /// Class for rows at even body positions.
    pub even_class: String,

    /// Class for rows at odd body positions.
    pub odd_class: String,

    /// Class marking the last body row.
    pub last_class: String,

    /// Opacity applied to a row while it is being dragged.
    pub drag_opacity: f32,

    /// Confirmation shown before discarding unsaved edits.
    pub discard_prompt: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            script_url_path: "/bin".to_string(),
            rest_path: "/rest/EditRowPlugin/save".to_string(),
            response_marker: "RESPONSE".to_string(),
            timeout_secs: None,
            even_class: "foswikiTableEven".to_string(),
            odd_class: "foswikiTableOdd".to_string(),
            last_class: "foswikiLast".to_string(),
            drag_opacity: 0.5,
            discard_prompt: "You have unsaved changes. Discard them?".to_string(),
        }
    }
}

impl EditConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a config from a JSON preference blob.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    /// Sets the script path prefix.
    pub fn with_script_url_path(mut self, path: impl Into<String>) -> Self {
        self.script_url_path = path.into();
        self
    }

    /// Sets the REST handler path.
    pub fn with_rest_path(mut self, path: impl Into<String>) -> Self {
        self.rest_path = path.into();
        self
    }

    /// Sets the success marker.
    pub fn with_response_marker(mut self, marker: impl Into<String>) -> Self {
        self.response_marker = marker.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Sets the drag fade.
    pub fn with_drag_opacity(mut self, opacity: f32) -> Self {
        self.drag_opacity = opacity;
        self
    }

    /// Sets the stripe classes.
    pub fn with_stripes(mut self, even: impl Into<String>, odd: impl Into<String>) -> Self {
        self.even_class = even.into();
        self.odd_class = odd.into();
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Script path and REST path joined, e.g. `/bin/rest/EditRowPlugin/save`.
    pub fn save_path(&self) -> String {
        format!(
            "{}/{}",
            self.script_url_path.trim_end_matches('/'),
            self.rest_path.trim_start_matches('/')
        )
    }
}
