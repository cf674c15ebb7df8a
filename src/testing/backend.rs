//! HeadlessBackend: a [`Backend`] that records draws instead of painting.
//!
//! Clones share state, so a test can hand one clone to a
//! [`MainWindow`](crate::window::MainWindow) and keep another to move the
//! cursor, resize the window and inspect what was drawn.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::event::Button;
use crate::geometry::{Offset, Rect};
use crate::render::{Backend, FontHandle, ImageHandle, ResourceError};
use crate::style::Color;

/// Width of every character in headless text, in pixels.
pub const CHAR_WIDTH: i32 = 10;

// ---------------------------------------------------------------------------
// DrawCommand
// ---------------------------------------------------------------------------

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Image { image: ImageHandle, x: i32, y: i32, color: Color },
    ImageStretched { image: ImageHandle, corners: [Offset; 4], color: Color },
    Text { x: i32, y: i32, text: String, color: Color },
    PushClip(Rect),
    PopClip,
}

// ---------------------------------------------------------------------------
// HeadlessBackend
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct HeadlessState {
    size: (i32, i32),
    cursor: (i32, i32),
    pressed: HashSet<Button>,
    commands: Vec<DrawCommand>,
    missing_fonts: HashSet<String>,
    fonts: HashSet<u32>,
    images: HashMap<String, (i32, i32)>,
    loaded_images: HashMap<u32, (i32, i32)>,
    next_handle: u32,
    visible: bool,
    closed: bool,
    title: Option<String>,
}

/// In-memory backend for tests.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessBackend {
    /// A visible window of the given size with the cursor at the origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                size: (width, height),
                cursor: (0, 0),
                pressed: HashSet::new(),
                commands: Vec::new(),
                missing_fonts: HashSet::new(),
                fonts: HashSet::new(),
                images: HashMap::new(),
                loaded_images: HashMap::new(),
                next_handle: 1,
                visible: true,
                closed: false,
                title: None,
            })),
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn set_cursor(&self, x: i32, y: i32) {
        self.state.borrow_mut().cursor = (x, y);
    }

    /// Resize the window; picked up on the next update.
    pub fn set_size(&self, width: i32, height: i32) {
        self.state.borrow_mut().size = (width, height);
    }

    pub fn press(&self, button: Button) {
        self.state.borrow_mut().pressed.insert(button);
    }

    pub fn release(&self, button: Button) {
        self.state.borrow_mut().pressed.remove(&button);
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Make `path` loadable with the given natural size.
    pub fn add_image(&self, path: &str, width: i32, height: i32) {
        self.state.borrow_mut().images.insert(path.to_owned(), (width, height));
    }

    /// Make every size of `family` fail to load.
    pub fn mark_font_missing(&self, family: &str) {
        self.state.borrow_mut().missing_fonts.insert(family.to_owned());
    }

    /// Fonts loaded and not yet unloaded.
    pub fn loaded_fonts(&self) -> usize {
        self.state.borrow().fonts.len()
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.state.borrow().commands.clone()
    }

    /// Return the recorded commands and start a fresh log.
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.state.borrow_mut().commands)
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    pub fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    fn record(&self, command: DrawCommand) {
        self.state.borrow_mut().commands.push(command);
    }

    fn next_handle(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let handle = state.next_handle;
        state.next_handle += 1;
        handle
    }
}

impl Backend for HeadlessBackend {
    fn window_size(&self) -> (i32, i32) {
        self.state.borrow().size
    }

    fn cursor_position(&self) -> (i32, i32) {
        self.state.borrow().cursor
    }

    fn is_button_down(&self, button: Button) -> bool {
        self.state.borrow().pressed.contains(&button)
    }

    fn load_font(&mut self, family: &str, size: u32) -> Result<FontHandle, ResourceError> {
        if self.state.borrow().missing_fonts.contains(family) {
            return Err(ResourceError::FontUnavailable { family: family.to_owned(), size });
        }
        let handle = self.next_handle();
        self.state.borrow_mut().fonts.insert(handle);
        Ok(FontHandle(handle))
    }

    fn unload_font(&mut self, font: FontHandle) {
        self.state.borrow_mut().fonts.remove(&font.0);
    }

    fn text_width(&self, _font: FontHandle, text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH
    }

    fn load_image(&mut self, path: &str) -> Result<ImageHandle, ResourceError> {
        let size = self.state.borrow().images.get(path).copied();
        let Some(size) = size else {
            return Err(ResourceError::ImageUnavailable { path: path.to_owned() });
        };
        let handle = self.next_handle();
        self.state.borrow_mut().loaded_images.insert(handle, size);
        Ok(ImageHandle(handle))
    }

    fn unload_image(&mut self, image: ImageHandle) {
        self.state.borrow_mut().loaded_images.remove(&image.0);
    }

    fn image_size(&self, image: ImageHandle) -> (i32, i32) {
        self.state
            .borrow()
            .loaded_images
            .get(&image.0)
            .copied()
            .unwrap_or((0, 0))
    }

    fn push_clip(&mut self, rect: Rect) {
        self.record(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.record(DrawCommand::PopClip);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::Rect { rect, color });
    }

    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32, color: Color) {
        self.record(DrawCommand::Image { image, x, y, color });
    }

    fn draw_image_stretched(&mut self, image: ImageHandle, corners: [Offset; 4], color: Color) {
        self.record(DrawCommand::ImageStretched { image, corners, color });
    }

    fn draw_text(&mut self, _font: FontHandle, x: i32, y: i32, text: &str, color: Color) {
        self.record(DrawCommand::Text { x, y, text: text.to_owned(), color });
    }

    fn show_window(&mut self) {
        self.state.borrow_mut().visible = true;
    }

    fn hide_window(&mut self) {
        self.state.borrow_mut().visible = false;
    }

    fn close_window(&mut self) {
        self.state.borrow_mut().closed = true;
    }

    fn set_title(&mut self, title: &str) {
        self.state.borrow_mut().title = Some(title.to_owned());
    }
}
