//! The system cursor as seen by the window.

use crate::geometry::Rect;

/// Cursor position and state, refreshed from the backend every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
    /// A disabled cursor focuses nothing.
    pub enabled: bool,
    pub visible: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { x: 0, y: 0, enabled: true, visible: true }
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cursor lies inside `rect` (right and bottom edges
    /// excluded).
    pub fn over(&self, rect: Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_is_half_open() {
        let mut c = Cursor::new();
        let r = Rect::new(0, 0, 20, 20);
        c.move_to(0, 0);
        assert!(c.over(r));
        c.move_to(20, 5);
        assert!(!c.over(r));
        c.move_to(19, 19);
        assert!(c.over(r));
    }

    #[test]
    fn toggles() {
        let mut c = Cursor::new();
        assert!(c.enabled && c.visible);
        c.disable();
        c.hide();
        assert!(!c.enabled && !c.visible);
        c.enable();
        c.show();
        assert!(c.enabled && c.visible);
    }
}
