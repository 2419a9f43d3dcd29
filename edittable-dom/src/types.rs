/// Presentation state the row editor toggles directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub opacity: f32,
    pub hidden: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            hidden: false,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn is_faded(&self) -> bool {
        self.opacity < 1.0
    }
}
