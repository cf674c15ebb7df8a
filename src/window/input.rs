//! Input routing and the per-tick update pass.

use crate::event::{Arg, Button, ButtonAction, DragPhase, Event, MouseButton};
use crate::geometry::{Offset, Rect};
use crate::tree::{NodeKind, WidgetId};

use super::MainWindow;

impl MainWindow {
    // ── Buttons ──────────────────────────────────────────────────────

    /// Route a translated backend event.
    pub fn handle(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Down(button) => self.button_down(button),
            ButtonAction::Up(button) => self.button_up(button),
        }
    }

    /// Route a press.
    ///
    /// The left button activates the focused widget (the root when the
    /// focused widget is not activatable), sends it `MouseDown` and starts a
    /// drag on the active widget. Middle and right only send `MouseDown`.
    /// Anything else reaches the focused widget as `ButtonDown`.
    pub fn button_down(&mut self, button: Button) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        let focused = self.focused;
        match button {
            Button::Mouse(MouseButton::Left) => {
                let target = if self.widget(focused).is_some_and(|s| s.activatable) {
                    focused
                } else {
                    self.root
                };
                if target != self.active {
                    self.set_active(target);
                }
                let args = vec![MouseButton::Left.into(), x.into(), y.into()];
                self.signal(focused, Event::MouseDown, args);

                let active = self.active;
                let args = vec![DragPhase::Start.into(), x.into(), y.into()];
                self.signal(active, Event::MouseDrag, args);
                self.dragged = active;
                self.in_drag = true;
                self.drag_anchor = Offset::new(x, y);
                tracing::debug!(?active, x, y, "drag started");
            }
            Button::Mouse(mouse) => {
                self.signal(focused, Event::MouseDown, vec![mouse.into()]);
            }
            other => {
                self.signal(focused, Event::ButtonDown, vec![other.into()]);
            }
        }
    }

    /// Route a release.
    ///
    /// The left button sends `MouseUp` then `Click` to the focused widget and
    /// ends the drag on the dragged widget.
    pub fn button_up(&mut self, button: Button) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        let focused = self.focused;
        match button {
            Button::Mouse(MouseButton::Left) => {
                let args = vec![MouseButton::Left.into(), x.into(), y.into()];
                self.signal(focused, Event::MouseUp, args);
                self.signal(focused, Event::Click, vec![x.into(), y.into()]);
                let dragged = self.dragged;
                let args = vec![DragPhase::End.into(), x.into(), y.into()];
                self.signal(dragged, Event::MouseDrag, args);
                self.in_drag = false;
                tracing::debug!(?dragged, x, y, "drag ended");
            }
            Button::Mouse(mouse) => {
                self.signal(focused, Event::MouseUp, vec![mouse.into(), x.into(), y.into()]);
            }
            other => {
                self.signal(focused, Event::ButtonUp, vec![other.into()]);
            }
        }
    }

    /// Whether the backend reports `button` as held.
    pub fn is_button_down(&self, button: Button) -> bool {
        self.backend.is_button_down(button)
    }

    // ── Update ───────────────────────────────────────────────────────

    /// Run one update pass: refresh the cursor and window size, resolve
    /// focus, continue any drag, then fire `Update` across the tree.
    pub fn update(&mut self) {
        let (x, y) = self.backend.cursor_position();
        self.cursor.move_to(x, y);

        let (width, height) = self.backend.window_size();
        let root = self.root;
        let resized = self
            .rect(root)
            .is_some_and(|r| r.width() != width || r.height() != height);
        if resized {
            tracing::debug!(width, height, "window resized");
            self.set_region(root, Rect::from_size(0, 0, width, height));
        }

        self.update_focus();
        self.update_drag();
        self.update_widget(root);
    }

    fn update_drag(&mut self) {
        if !self.in_drag {
            return;
        }
        let cursor = Offset::new(self.cursor.x, self.cursor.y);
        let delta = cursor - self.drag_anchor;
        let dragged = self.dragged;
        self.signal(
            dragged,
            Event::MouseDrag,
            vec![DragPhase::Continue.into(), Arg::Int(delta.x), Arg::Int(delta.y)],
        );
        self.signal(dragged, Event::Drag, vec![Arg::Int(delta.x), Arg::Int(delta.y)]);
        self.drag_anchor = cursor;
    }

    /// Containers update their children before themselves; compounds update
    /// themselves before their internal container.
    fn update_widget(&mut self, id: WidgetId) {
        let (is_container, internal) = match self.tree.get(id).map(|n| &n.kind) {
            None => return,
            Some(NodeKind::Container(_)) => (true, None),
            Some(NodeKind::Compound(c)) => (false, Some(c.container)),
            Some(NodeKind::Widget) => (false, None),
        };
        if is_container {
            for child in self.tree.children(id).to_vec() {
                self.update_widget(child);
            }
        }
        self.signal(id, Event::Update, vec![]);
        if let Some(internal) = internal {
            self.update_widget(internal);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Signal;
    use crate::testing::HeadlessBackend;
    use crate::window::WindowConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(WidgetId, Event, Vec<Arg>)>>>;

    fn record(w: &mut MainWindow, id: WidgetId, events: &[Event], log: &Log) {
        for &event in events {
            let sink = log.clone();
            w.on(id, event, vec![], move |_, s: &Signal| {
                sink.borrow_mut().push((id, s.event, s.args.clone()));
            });
        }
    }

    fn setup() -> (MainWindow, HeadlessBackend, WidgetId) {
        let backend = HeadlessBackend::new(200, 200);
        let mut w = MainWindow::new(backend.clone(), WindowConfig::default());
        let root = w.root();
        let a = w.create_widget();
        w.set_region(a, Rect::new(0, 0, 50, 50));
        w.add(root, a).unwrap();
        (w, backend, a)
    }

    const POINTER: [Event; 6] = [
        Event::MouseDown,
        Event::MouseUp,
        Event::Click,
        Event::MouseDrag,
        Event::Drag,
        Event::Activate,
    ];

    #[test]
    fn left_press_activates_and_starts_drag() {
        let (mut w, backend, a) = setup();
        let log: Log = Rc::default();
        record(&mut w, a, &POINTER, &log);
        backend.set_cursor(10, 20);
        w.update();
        assert!(w.is_focused(a));

        w.button_down(Button::MOUSE_LEFT);
        assert!(w.is_active(a));
        assert!(w.is_dragging());
        assert_eq!(w.dragged_widget(), a);
        assert_eq!(
            *log.borrow(),
            vec![
                (a, Event::Activate, vec![]),
                (a, Event::MouseDown, vec![MouseButton::Left.into(), Arg::Int(10), Arg::Int(20)]),
                (a, Event::MouseDrag, vec![DragPhase::Start.into(), Arg::Int(10), Arg::Int(20)]),
            ]
        );
    }

    #[test]
    fn drag_reports_deltas_then_ends() {
        let (mut w, backend, a) = setup();
        backend.set_cursor(10, 10);
        w.update();
        w.button_down(Button::MOUSE_LEFT);

        let log: Log = Rc::default();
        record(&mut w, a, &POINTER, &log);
        backend.set_cursor(15, 8);
        w.update();
        backend.set_cursor(16, 8);
        w.update();
        w.button_up(Button::MOUSE_LEFT);
        assert!(!w.is_dragging());

        let log = log.borrow();
        assert_eq!(
            log[..2],
            [
                (a, Event::MouseDrag, vec![DragPhase::Continue.into(), Arg::Int(5), Arg::Int(-2)]),
                (a, Event::Drag, vec![Arg::Int(5), Arg::Int(-2)]),
            ]
        );
        assert_eq!(log[3], (a, Event::Drag, vec![Arg::Int(1), Arg::Int(0)]));
        assert_eq!(
            log[4..],
            [
                (a, Event::MouseUp, vec![MouseButton::Left.into(), Arg::Int(16), Arg::Int(8)]),
                (a, Event::Click, vec![Arg::Int(16), Arg::Int(8)]),
                (a, Event::MouseDrag, vec![DragPhase::End.into(), Arg::Int(16), Arg::Int(8)]),
            ]
        );
    }

    #[test]
    fn non_activatable_focus_activates_root() {
        let (mut w, backend, a) = setup();
        let root = w.root();
        w.set_activatable(a, false);
        w.activate(root);
        backend.set_cursor(5, 5);
        w.update();
        w.button_down(Button::MOUSE_LEFT);
        assert_eq!(w.active_widget(), root);
        assert_eq!(w.dragged_widget(), root);
    }

    #[test]
    fn right_button_leaves_activation_alone() {
        let (mut w, backend, a) = setup();
        let log: Log = Rc::default();
        record(&mut w, a, &POINTER, &log);
        backend.set_cursor(5, 5);
        w.update();
        w.button_down(Button::MOUSE_RIGHT);
        w.button_up(Button::MOUSE_RIGHT);
        assert!(!w.is_active(a));
        assert!(!w.is_dragging());
        assert_eq!(
            *log.borrow(),
            vec![
                (a, Event::MouseDown, vec![MouseButton::Right.into()]),
                (a, Event::MouseUp, vec![MouseButton::Right.into(), Arg::Int(5), Arg::Int(5)]),
            ]
        );
    }

    #[test]
    fn other_buttons_reach_focused_widget() {
        let (mut w, backend, a) = setup();
        let log: Log = Rc::default();
        record(&mut w, a, &[Event::ButtonDown, Event::ButtonUp], &log);
        backend.set_cursor(5, 5);
        w.update();
        let key = Button::Key(crate::event::Key::Enter);
        w.handle(ButtonAction::Down(key));
        w.handle(ButtonAction::Up(key));
        assert_eq!(
            *log.borrow(),
            vec![
                (a, Event::ButtonDown, vec![Arg::Button(key)]),
                (a, Event::ButtonUp, vec![Arg::Button(key)]),
            ]
        );
    }

    #[test]
    fn update_order_children_first() {
        let (mut w, _, a) = setup();
        let root = w.root();
        let compound = w.create_compound();
        let internal = w.internal_container(compound).unwrap();
        w.add(root, compound).unwrap();
        let log: Log = Rc::default();
        for id in [root, a, compound, internal] {
            record(&mut w, id, &[Event::Update], &log);
        }
        w.update();
        let order: Vec<_> = log.borrow().iter().map(|(id, _, _)| *id).collect();
        assert_eq!(order, vec![a, compound, internal, root]);
    }

    #[test]
    fn window_resize_re_regions_root() {
        let (mut w, backend, _) = setup();
        backend.set_size(300, 150);
        w.update();
        assert_eq!(w.rect(w.root()), Some(Rect::new(0, 0, 300, 150)));
    }
}
