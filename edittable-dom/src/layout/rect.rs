#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn left(&self) -> u32 {
        self.x
    }

    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    pub const fn top(&self) -> u32 {
        self.y
    }

    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `y` falls in the strict upper half of this box.
    ///
    /// A point exactly on the midline belongs to the lower half.
    pub fn in_upper_half(&self, y: u32) -> bool {
        let offset = y.saturating_sub(self.y);
        offset.saturating_mul(2) < self.height
    }

    /// Get the center point of this rectangle.
    pub const fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}
