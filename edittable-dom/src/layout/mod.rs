mod rect;

use std::collections::HashMap;

pub use rect::Rect;

/// Rendered boxes keyed by element id, as measured by the host.
pub type LayoutResult = HashMap<String, Rect>;
