//! The main window: widget arena owner, input router and frame driver.
//!
//! [`MainWindow`] owns every widget (in a [`WidgetTree`]), every style (in a
//! [`StyleRegistry`]) and the [`Backend`]. Widgets are addressed by
//! [`WidgetId`]; all widget, container and compound operations are methods
//! on the window so that the signals they raise can reach handlers with
//! mutable access to the whole tree.
//!
//! The host drives a frame by calling [`update`](MainWindow::update) then
//! [`draw`](MainWindow::draw), and forwards input through
//! [`button_down`](MainWindow::button_down) and
//! [`button_up`](MainWindow::button_up).

pub mod config;
pub mod cursor;

mod container;
mod draw;
mod focus;
mod input;
mod widget;

pub use config::WindowConfig;
pub use cursor::Cursor;

use crate::damage::{Damage, Marked};
use crate::event::{publish, Arg, Attr, Event, EventHost, Publisher, Signal, Source, Subscription};
use crate::geometry::{Offset, Rect};
use crate::layout::Layout;
use crate::render::Backend;
use crate::style::{Style, StyleId, StyleRegistry};
use crate::tree::{ContainerState, Node, NodeKind, WidgetId, WidgetState, WidgetTree};

// ---------------------------------------------------------------------------
// MainWindow
// ---------------------------------------------------------------------------

/// The root container plus the focus, activation and drag state machine.
pub struct MainWindow {
    tree: WidgetTree,
    styles: StyleRegistry,
    backend: Box<dyn Backend>,
    config: WindowConfig,
    root: WidgetId,
    cursor: Cursor,
    focused: WidgetId,
    active: WidgetId,
    dragged: WidgetId,
    in_drag: bool,
    drag_anchor: Offset,
    throttle_render: bool,
}

impl MainWindow {
    /// Create a window covering the backend's full window area.
    pub fn new(backend: impl Backend + 'static, config: WindowConfig) -> Self {
        let mut backend: Box<dyn Backend> = Box::new(backend);
        if let Some(title) = &config.title {
            backend.set_title(title);
        }
        let (width, height) = backend.window_size();

        let mut styles = StyleRegistry::new();
        let style = styles.insert_private(config.container_style.clone());
        styles.retain(style);

        let mut tree = WidgetTree::new();
        let layout = config.default_layout.build();
        let root = tree.insert_with(|id| {
            let mut node = Node::new(id, style, NodeKind::Container(ContainerState::new(layout)));
            node.state.rect = Rect::from_size(0, 0, width, height);
            node.state.auto_size_width = false;
            node.state.auto_size_height = false;
            node.state.window = Some(id);
            node
        });

        let throttle_render = config.throttle_render;
        let mut window = Self {
            tree,
            styles,
            backend,
            config,
            root,
            cursor: Cursor::new(),
            focused: root,
            active: root,
            dragged: root,
            in_drag: false,
            drag_anchor: Offset::ZERO,
            throttle_render,
        };
        window.bind_style(root, style);
        window
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The root container. It is the window itself as far as focus,
    /// activation and drag are concerned.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn throttle_render(&self) -> bool {
        self.throttle_render
    }

    pub fn set_throttle_render(&mut self, throttle: bool) {
        self.throttle_render = throttle;
    }

    /// The widget under the cursor.
    pub fn focused_widget(&self) -> WidgetId {
        self.focused
    }

    /// The widget latched by the last activating click.
    pub fn active_widget(&self) -> WidgetId {
        self.active
    }

    /// The target of the current (or last) drag gesture.
    pub fn dragged_widget(&self) -> WidgetId {
        self.dragged
    }

    pub fn is_dragging(&self) -> bool {
        self.in_drag
    }

    /// Whether `id` names a live widget.
    pub fn exists(&self, id: WidgetId) -> bool {
        self.tree.contains(id)
    }

    pub fn node(&self, id: WidgetId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Attributes of a widget.
    pub fn widget(&self, id: WidgetId) -> Option<&WidgetState> {
        self.tree.get(id).map(|n| &n.state)
    }

    pub(crate) fn state_mut(&mut self, id: WidgetId) -> Option<&mut WidgetState> {
        self.tree.get_mut(id).map(|n| &mut n.state)
    }

    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.widget(id).map(|s| s.rect)
    }

    pub fn z(&self, id: WidgetId) -> Option<f64> {
        self.widget(id).map(|s| s.z)
    }

    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.widget(id).map(|s| s.text.as_str())
    }

    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|s| s.enabled)
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|s| s.visible)
    }

    pub fn is_floating(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|s| s.floating)
    }

    /// The container holding `id` (the compound, for an internal container).
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.tree.parent(id)
    }

    /// The root of the window `id` is attached to, if any.
    pub fn window_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.widget(id).and_then(|s| s.window)
    }

    pub fn is_container(&self, id: WidgetId) -> bool {
        self.tree.get(id).is_some_and(Node::is_container)
    }

    pub fn is_compound(&self, id: WidgetId) -> bool {
        self.tree.get(id).is_some_and(Node::is_compound)
    }

    /// The private container of a compound widget.
    pub fn internal_container(&self, id: WidgetId) -> Option<WidgetId> {
        self.tree.internal_container(id)
    }

    /// The active layout of a container, unless it is currently running.
    pub fn layout(&self, id: WidgetId) -> Option<&dyn Layout> {
        self.tree
            .get(id)
            .and_then(Node::container_state)
            .and_then(ContainerState::layout)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Publish `event` with `args` from `source`. Returns the number of
    /// handlers invoked.
    pub fn signal(&mut self, source: impl Into<Source>, event: Event, args: Vec<Arg>) -> usize {
        let signal = Signal::new(event, source, args);
        publish(self, &signal)
    }

    /// Subscribe `handler` to `event` on `source`. `None` if the source does
    /// not exist.
    pub fn subscribe<F>(
        &mut self,
        source: impl Into<Source>,
        event: Event,
        name: Option<&str>,
        modifiers: Vec<Arg>,
        handler: F,
    ) -> Option<Subscription>
    where
        F: FnMut(&mut MainWindow, &Signal) + 'static,
    {
        self.publisher_mut(source.into())
            .map(|p| p.subscribe(event, name, modifiers, handler))
    }

    /// Subscribe an anonymous handler.
    pub fn on<F>(
        &mut self,
        source: impl Into<Source>,
        event: Event,
        modifiers: Vec<Arg>,
        handler: F,
    ) -> Option<Subscription>
    where
        F: FnMut(&mut MainWindow, &Signal) + 'static,
    {
        self.subscribe(source, event, None, modifiers, handler)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.publisher_mut(subscription.source())
            .is_some_and(|p| p.unsubscribe(subscription))
    }

    pub fn unsubscribe_named(
        &mut self,
        source: impl Into<Source>,
        event: Event,
        name: &str,
    ) -> usize {
        self.publisher_mut(source.into())
            .map_or(0, |p| p.unsubscribe_named(event, name))
    }

    // ── Damage ───────────────────────────────────────────────────────

    fn damage_mut(&mut self, source: Source) -> Option<&mut Damage> {
        match source {
            Source::Widget(id) => self.tree.get_mut(id).map(|n| &mut n.damage),
            Source::Style(id) => self.styles.entry_mut(id).map(|e| &mut e.damage),
        }
    }

    fn damage_ref(&self, source: Source) -> Option<&Damage> {
        match source {
            Source::Widget(id) => self.tree.get(id).map(|n| &n.damage),
            Source::Style(id) => self.styles.entry(id).map(|e| &e.damage),
        }
    }

    /// Mark `source` as changed in `attr` and, unless suppressed, raise
    /// `Modified` with the attribute. Returns whether the flag was set.
    pub fn damage(&mut self, source: impl Into<Source>, attr: Attr) -> bool {
        let source = source.into();
        let marked = match self.damage_mut(source) {
            Some(damage) => damage.mark(),
            None => return false,
        };
        match marked {
            Marked::Suppressed => false,
            Marked::Flagged => true,
            Marked::Report => {
                self.signal(source, Event::Modified, vec![Arg::Attr(attr)]);
                true
            }
        }
    }

    pub fn is_damaged(&self, source: impl Into<Source>) -> bool {
        self.damage_ref(source.into()).is_some_and(Damage::is_damaged)
    }

    pub fn clear_damage(&mut self, source: impl Into<Source>) {
        if let Some(damage) = self.damage_mut(source.into()) {
            damage.clear();
        }
    }

    /// Run `f` with both flagging and reporting suppressed on `source`.
    pub fn unchecked<R>(&mut self, source: impl Into<Source>, f: impl FnOnce(&mut Self) -> R) -> R {
        let source = source.into();
        if let Some(d) = self.damage_mut(source) {
            d.enter_unchecked();
        }
        let result = f(self);
        if let Some(d) = self.damage_mut(source) {
            d.exit_unchecked();
        }
        result
    }

    /// Run `f` with reporting suppressed on `source`; the flag still sets.
    pub fn unreported<R>(
        &mut self,
        source: impl Into<Source>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let source = source.into();
        if let Some(d) = self.damage_mut(source) {
            d.enter_unreported();
        }
        let result = f(self);
        if let Some(d) = self.damage_mut(source) {
            d.exit_unreported();
        }
        result
    }

    // ── Styles ───────────────────────────────────────────────────────

    /// Register a style that several widgets can share.
    pub fn create_style(&mut self, style: Style) -> StyleId {
        self.styles.insert(style)
    }

    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id)
    }

    /// The style id a widget currently holds.
    pub fn style_id(&self, id: WidgetId) -> Option<StyleId> {
        self.widget(id).map(|s| s.style)
    }

    /// The style a widget currently holds.
    pub fn style_for(&self, id: WidgetId) -> Option<&Style> {
        self.style_id(id).and_then(|s| self.styles.get(s))
    }

    /// Mutate a style and damage it, which damages every widget holding it.
    pub fn update_style(&mut self, id: StyleId, f: impl FnOnce(&mut Style)) -> bool {
        let Some(entry) = self.styles.entry_mut(id) else {
            return false;
        };
        f(&mut entry.style);
        self.damage(id, Attr::Style);
        true
    }

    /// Mutate the style `widget` currently holds.
    pub fn edit_style(&mut self, widget: WidgetId, f: impl FnOnce(&mut Style)) -> bool {
        match self.style_id(widget) {
            Some(style) => self.update_style(style, f),
            None => false,
        }
    }

    /// Forward `Modified` on `style` into `Attr::Style` damage on `widget`.
    fn bind_style(&mut self, widget: WidgetId, style: StyleId) {
        let link = self.on(style, Event::Modified, vec![], move |w, _| {
            w.damage(widget, Attr::Style);
        });
        if let Some(state) = self.state_mut(widget) {
            state.style_link = link;
        }
    }

    // ── Window lifecycle ─────────────────────────────────────────────

    /// Close the OS window. It cannot be reopened.
    pub fn close(&mut self) {
        tracing::debug!("close window");
        self.backend.close_window();
    }
}

impl EventHost for MainWindow {
    fn publisher_mut(&mut self, source: Source) -> Option<&mut Publisher<Self>> {
        match source {
            Source::Widget(id) => self.tree.get_mut(id).map(|n| &mut n.publisher),
            Source::Style(id) => self.styles.entry_mut(id).map(|e| &mut e.publisher),
        }
    }
}

impl std::fmt::Debug for MainWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainWindow")
            .field("root", &self.root)
            .field("widgets", &self.tree.len())
            .field("styles", &self.styles.len())
            .field("cursor", &self.cursor)
            .field("focused", &self.focused)
            .field("active", &self.active)
            .field("dragged", &self.dragged)
            .field("in_drag", &self.in_drag)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HeadlessBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn window() -> MainWindow {
        MainWindow::new(HeadlessBackend::new(640, 480), WindowConfig::default())
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn root_covers_backend_window() {
        let w = window();
        let root = w.root();
        assert_eq!(w.rect(root), Some(Rect::new(0, 0, 640, 480)));
        assert_eq!(w.window_of(root), Some(root));
        assert_eq!(w.focused_widget(), root);
        assert_eq!(w.active_widget(), root);
        assert_eq!(w.dragged_widget(), root);
        assert!(w.is_container(root));
        assert!(!w.throttle_render());
    }

    #[test]
    fn title_is_forwarded() {
        let backend = HeadlessBackend::new(10, 10);
        let _w = MainWindow::new(backend.clone(), WindowConfig::new().with_title("hello"));
        assert_eq!(backend.title().as_deref(), Some("hello"));
    }

    // ── Damage ───────────────────────────────────────────────────────

    #[test]
    fn damage_raises_modified_with_attr() {
        let mut w = window();
        let id = w.create_widget();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        w.on(id, Event::Modified, vec![], move |_, s| log.borrow_mut().push(s.attr()));
        assert!(w.damage(id, Attr::Text));
        assert!(w.is_damaged(id));
        assert_eq!(*seen.borrow(), vec![Some(Attr::Text)]);
    }

    #[test]
    fn unreported_flags_without_signal() {
        let mut w = window();
        let id = w.create_widget();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        w.on(id, Event::Modified, vec![], move |_, _| *c.borrow_mut() += 1);
        w.unreported(id, |w| w.damage(id, Attr::X));
        assert!(w.is_damaged(id));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn unchecked_suppresses_everything() {
        let mut w = window();
        let id = w.create_widget();
        let flagged = w.unchecked(id, |w| w.damage(id, Attr::X));
        assert!(!flagged);
        assert!(!w.is_damaged(id));
        assert!(w.damage(id, Attr::X));
    }

    #[test]
    fn damage_missing_source_is_false() {
        let mut w = window();
        let id = w.create_widget();
        w.destroy(id).unwrap();
        assert!(!w.damage(id, Attr::X));
        assert!(!w.is_damaged(id));
    }

    // ── Styles ───────────────────────────────────────────────────────

    #[test]
    fn style_update_damages_holders() {
        let mut w = window();
        let a = w.create_widget();
        let b = w.create_widget();
        let shared = w.create_style(Style::new());
        w.set_style(a, shared).unwrap();
        w.set_style(b, shared).unwrap();
        w.clear_damage(a);
        w.clear_damage(b);

        assert!(w.update_style(shared, |s| s.line_spacing = 3));
        assert!(w.is_damaged(a));
        assert!(w.is_damaged(b));
        assert_eq!(w.style_for(a).unwrap().line_spacing, 3);
    }

    #[test]
    fn edit_style_targets_widget_style() {
        let mut w = window();
        let a = w.create_widget();
        let b = w.create_widget();
        w.clear_damage(b);
        assert!(w.edit_style(a, |s| s.margin = crate::geometry::Spacing::ZERO));
        assert_eq!(w.style_for(a).unwrap().margin, crate::geometry::Spacing::ZERO);
        assert_eq!(w.style_for(b).unwrap().margin, crate::geometry::Spacing::all(5));
        assert!(!w.is_damaged(b));
    }

    // ── Subscriptions ────────────────────────────────────────────────

    #[test]
    fn unsubscribe_through_window() {
        let mut w = window();
        let id = w.create_widget();
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        let sub = w.on(id, Event::Update, vec![], move |_, _| *h.borrow_mut() += 1).unwrap();
        w.signal(id, Event::Update, vec![]);
        assert!(w.unsubscribe(sub));
        w.signal(id, Event::Update, vec![]);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn named_subscriptions() {
        let mut w = window();
        let id = w.create_widget();
        w.subscribe(id, Event::Click, Some("a"), vec![], |_, _| {});
        w.subscribe(id, Event::Click, Some("a"), vec![], |_, _| {});
        assert_eq!(w.unsubscribe_named(id, Event::Click, "a"), 2);
        assert_eq!(w.signal(id, Event::Click, vec![]), 0);
    }

    #[test]
    fn close_reaches_backend() {
        let backend = HeadlessBackend::new(10, 10);
        let mut w = MainWindow::new(backend.clone(), WindowConfig::default());
        w.close();
        assert!(backend.is_closed());
    }
}
