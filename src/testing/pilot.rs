//! Pilot: programmatic interaction with a headless window.
//!
//! The `Pilot` owns a [`MainWindow`] drawing into a [`HeadlessBackend`] and
//! provides methods to simulate user input (cursor moves, presses, clicks,
//! resizes), run frames and inspect what was drawn.

use crate::event::{Button, Key, MouseButton};
use crate::render::ResourceError;
use crate::window::{MainWindow, WindowConfig};

use super::backend::{DrawCommand, HeadlessBackend};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless window driver for testing.
///
/// # Examples
///
/// ```
/// use wicker::geometry::Rect;
/// use wicker::testing::Pilot;
///
/// let mut pilot = Pilot::new(100, 100);
/// let root = pilot.window().root();
/// let button = pilot.window_mut().create_widget();
/// pilot.window_mut().set_region(button, Rect::new(0, 0, 20, 20));
/// pilot.window_mut().add(root, button).unwrap();
///
/// pilot.click(10, 10).unwrap();
/// assert!(pilot.window().is_active(button));
/// ```
pub struct Pilot {
    window: MainWindow,
    backend: HeadlessBackend,
}

impl Pilot {
    /// Create a headless window with the given size and default config.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, WindowConfig::default())
    }

    /// Create a headless window from a [`WindowConfig`].
    pub fn with_config(width: i32, height: i32, config: WindowConfig) -> Self {
        let backend = HeadlessBackend::new(width, height);
        let window = MainWindow::new(backend.clone(), config);
        Self { window, backend }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Move the cursor. Focus follows on the next [`tick`](Self::tick).
    pub fn move_cursor(&mut self, x: i32, y: i32) {
        self.backend.set_cursor(x, y);
    }

    /// Press and route `button`.
    pub fn press(&mut self, button: Button) {
        self.backend.press(button);
        self.window.button_down(button);
    }

    /// Release and route `button`.
    pub fn release(&mut self, button: Button) {
        self.backend.release(button);
        self.window.button_up(button);
    }

    /// Press then release a key.
    pub fn press_key(&mut self, key: Key) {
        self.press(Button::Key(key));
        self.release(Button::Key(key));
    }

    /// Move to `(x, y)`, run a frame so focus settles, then press and
    /// release the left button.
    pub fn click(&mut self, x: i32, y: i32) -> Result<(), ResourceError> {
        self.move_cursor(x, y);
        self.tick()?;
        self.press(Button::Mouse(MouseButton::Left));
        self.release(Button::Mouse(MouseButton::Left));
        Ok(())
    }

    /// Simulate a window resize; applied on the next tick.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.backend.set_size(width, height);
    }

    // ── Processing ───────────────────────────────────────────────────

    /// One frame: update then draw.
    pub fn tick(&mut self) -> Result<bool, ResourceError> {
        self.window.update();
        self.window.draw()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn window(&self) -> &MainWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut MainWindow {
        &mut self.window
    }

    /// The backend handle shared with the window.
    pub fn backend(&self) -> &HeadlessBackend {
        &self.backend
    }

    /// Draw commands recorded so far.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.backend.commands()
    }

    /// Draw commands recorded since the last call.
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        self.backend.take_commands()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::geometry::Rect;
    use crate::style::Color;
    use crate::tree::WidgetId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn with_widget(pilot: &mut Pilot, rect: Rect) -> WidgetId {
        let w = pilot.window_mut();
        let root = w.root();
        let id = w.create_widget();
        w.set_region(id, rect);
        w.add(root, id).unwrap();
        id
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_sizes_root() {
        let pilot = Pilot::new(120, 40);
        let root = pilot.window().root();
        assert_eq!(pilot.window().rect(root), Some(Rect::new(0, 0, 120, 40)));
    }

    #[test]
    fn with_config_applies_title() {
        let pilot = Pilot::with_config(10, 10, WindowConfig::new().with_title("t"));
        assert_eq!(pilot.backend().title().as_deref(), Some("t"));
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn click_focuses_and_activates() {
        let mut pilot = Pilot::new(100, 100);
        let id = with_widget(&mut pilot, Rect::new(10, 10, 30, 30));
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        pilot.window_mut().on(id, Event::Click, vec![], move |_, s| {
            sink.borrow_mut().push((s.int(0), s.int(1)));
        });

        pilot.click(15, 20).unwrap();
        assert!(pilot.window().is_focused(id));
        assert!(pilot.window().is_active(id));
        assert!(!pilot.window().is_dragging());
        assert_eq!(*clicks.borrow(), vec![(Some(15), Some(20))]);
    }

    #[test]
    fn press_updates_backend_buttons() {
        let mut pilot = Pilot::new(10, 10);
        pilot.press(Button::MOUSE_MIDDLE);
        assert!(pilot.window().is_button_down(Button::MOUSE_MIDDLE));
        pilot.release(Button::MOUSE_MIDDLE);
        assert!(!pilot.window().is_button_down(Button::MOUSE_MIDDLE));
    }

    #[test]
    fn key_presses_reach_focused_widget() {
        let mut pilot = Pilot::new(100, 100);
        let id = with_widget(&mut pilot, Rect::new(0, 0, 50, 50));
        let keys = Rc::new(RefCell::new(0));
        let sink = keys.clone();
        let only_a = vec![Button::Key(Key::Char('a')).into()];
        pilot.window_mut().on(id, Event::ButtonDown, only_a, move |_, _| {
            *sink.borrow_mut() += 1;
        });
        pilot.move_cursor(5, 5);
        pilot.tick().unwrap();
        pilot.press_key(Key::Char('a'));
        pilot.press_key(Key::Char('b'));
        assert_eq!(*keys.borrow(), 1);
    }

    // ── Frames ───────────────────────────────────────────────────────

    #[test]
    fn tick_draws() {
        let mut pilot = Pilot::new(100, 100);
        let id = with_widget(&mut pilot, Rect::new(0, 0, 5, 5));
        pilot.window_mut().edit_style(id, |s| s.set_color(Color::BLACK));
        assert_eq!(pilot.tick(), Ok(true));
        assert_eq!(
            pilot.take_commands(),
            vec![DrawCommand::Rect { rect: Rect::new(0, 0, 5, 5), color: Color::BLACK }]
        );
    }

    #[test]
    fn resize_applies_on_tick() {
        let mut pilot = Pilot::new(100, 100);
        pilot.resize(50, 60);
        pilot.tick().unwrap();
        let root = pilot.window().root();
        assert_eq!(pilot.window().rect(root), Some(Rect::new(0, 0, 50, 60)));
    }
}
