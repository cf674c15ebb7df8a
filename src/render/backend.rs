//! The rendering and input provider the window draws through.
//!
//! A [`Backend`] answers window geometry and cursor queries, manages font
//! and image resources, and performs primitive draws in window-local
//! coordinates. Everything the core knows about the outside world goes
//! through this trait.

use crate::event::Button;
use crate::geometry::{Offset, Rect};
use crate::style::Color;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Opaque handle to a loaded font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Opaque handle to a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

// ---------------------------------------------------------------------------
// ResourceError
// ---------------------------------------------------------------------------

/// A backend could not provide a resource. Propagated to the host, never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("font {family:?} at size {size} is unavailable")]
    FontUnavailable { family: String, size: u32 },
    #[error("image {path:?} is unavailable")]
    ImageUnavailable { path: String },
    #[error("backend error: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Rendering and input provider.
pub trait Backend {
    /// Window width and height in pixels.
    fn window_size(&self) -> (i32, i32);

    /// Cursor position in window coordinates.
    fn cursor_position(&self) -> (i32, i32);

    /// Whether `button` is currently held.
    fn is_button_down(&self, button: Button) -> bool;

    fn load_font(&mut self, family: &str, size: u32) -> Result<FontHandle, ResourceError>;

    fn unload_font(&mut self, font: FontHandle);

    /// Rendered width of `text` in `font`.
    fn text_width(&self, font: FontHandle, text: &str) -> i32;

    fn load_image(&mut self, path: &str) -> Result<ImageHandle, ResourceError>;

    fn unload_image(&mut self, image: ImageHandle);

    /// Natural width and height of a loaded image.
    fn image_size(&self, image: ImageHandle) -> (i32, i32);

    /// Restrict subsequent draws to `rect` until the matching `pop_clip`.
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw an image at its natural size.
    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32, color: Color);

    /// Draw an image mapped onto four corners (top-left, top-right,
    /// bottom-left, bottom-right).
    fn draw_image_stretched(&mut self, image: ImageHandle, corners: [Offset; 4], color: Color);

    fn draw_text(&mut self, font: FontHandle, x: i32, y: i32, text: &str, color: Color);

    fn show_window(&mut self) {}

    fn hide_window(&mut self) {}

    fn close_window(&mut self) {}

    fn set_title(&mut self, _title: &str) {}
}

/// Corners of `rect` in the order expected by [`Backend::draw_image_stretched`].
pub fn corners(rect: Rect) -> [Offset; 4] {
    [
        Offset::new(rect.x1, rect.y1),
        Offset::new(rect.x2, rect.y1),
        Offset::new(rect.x1, rect.y2),
        Offset::new(rect.x2, rect.y2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_order() {
        let c = corners(Rect::new(1, 2, 3, 4));
        assert_eq!(
            c,
            [
                Offset::new(1, 2),
                Offset::new(3, 2),
                Offset::new(1, 4),
                Offset::new(3, 4)
            ]
        );
    }

    #[test]
    fn resource_error_messages() {
        let e = ResourceError::FontUnavailable { family: "Verdana".into(), size: 20 };
        assert_eq!(e.to_string(), "font \"Verdana\" at size 20 is unavailable");
        let e = ResourceError::ImageUnavailable { path: "a.png".into() };
        assert_eq!(e.to_string(), "image \"a.png\" is unavailable");
    }
}
