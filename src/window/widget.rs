//! Widget creation, attributes and teardown.

use crate::event::{Attr, Event};
use crate::geometry::{Offset, Rect};
use crate::layout::Layout;
use crate::render::{ResourceError, WidgetView};
use crate::style::{Style, StyleId, StyleRegistry};
use crate::tree::{
    CompoundState, ContainerState, Node, NodeKind, TreeError, WidgetId, WidgetState, WidgetTree,
};

use super::MainWindow;

/// Snapshot of a widget for its renderer. Takes the arenas separately so the
/// backend stays mutably borrowable alongside it.
pub(super) fn view_of<'a>(
    tree: &'a WidgetTree,
    styles: &'a StyleRegistry,
    id: WidgetId,
    focused: WidgetId,
    active: WidgetId,
) -> Option<WidgetView<'a>> {
    let state = &tree.get(id)?.state;
    let style = styles.get(state.style)?;
    Some(WidgetView {
        id,
        rect: state.rect,
        z: state.z,
        text: &state.text,
        style,
        enabled: state.enabled,
        focused: focused == id,
        active: active == id,
    })
}

impl MainWindow {
    // ── Creation ─────────────────────────────────────────────────────

    /// Create a detached widget with a private copy of the default widget
    /// style.
    pub fn create_widget(&mut self) -> WidgetId {
        let style = self.config.widget_style.clone();
        self.insert_node(style, NodeKind::Widget)
    }

    /// Create a detached container using the default layout.
    pub fn create_container(&mut self) -> WidgetId {
        let layout = self.config.default_layout.build();
        self.create_container_with(layout)
    }

    /// Create a detached container driven by `layout`.
    pub fn create_container_with(&mut self, layout: Box<dyn Layout>) -> WidgetId {
        let style = self.config.container_style.clone();
        self.insert_node(style, NodeKind::Container(ContainerState::new(layout)))
    }

    /// Create a detached compound widget together with its internal
    /// container.
    ///
    /// The internal container floats, is reachable through
    /// [`internal_container`](Self::internal_container) and damages the
    /// compound (`Attr::Container`) whenever it is modified.
    pub fn create_compound(&mut self) -> WidgetId {
        let internal = self.create_container();
        if let Some(state) = self.state_mut(internal) {
            state.floating = true;
        }
        let style = self.config.widget_style.clone();
        let kind = NodeKind::Compound(CompoundState {
            container: internal,
            auto_size_container: true,
            link: None,
        });
        let id = self.insert_node(style, kind);
        self.tree.adopt_internal(id, internal);

        let link = self.on(internal, Event::Modified, vec![], move |w, _| {
            w.damage(id, Attr::Container);
        });
        if let Some(compound) = self.tree.get_mut(id).and_then(Node::compound_state_mut) {
            compound.link = link;
        }
        id
    }

    fn insert_node(&mut self, style: Style, kind: NodeKind) -> WidgetId {
        let style_id = self.styles.insert_private(style);
        self.styles.retain(style_id);
        let id = self.tree.insert_with(|id| Node::new(id, style_id, kind));
        self.bind_style(id, style_id);
        id
    }

    /// Apply `f` to a widget's attributes and damage `attr` if it reports a
    /// change.
    fn update_state(
        &mut self,
        id: WidgetId,
        attr: Attr,
        f: impl FnOnce(&mut WidgetState) -> bool,
    ) -> bool {
        let changed = match self.state_mut(id) {
            Some(state) => f(state),
            None => return false,
        };
        if changed {
            self.damage(id, attr);
        }
        changed
    }

    // ── Geometry ─────────────────────────────────────────────────────

    /// Move horizontally without resizing.
    pub fn set_x(&mut self, id: WidgetId, x: i32) -> bool {
        self.update_state(id, Attr::X, |s| {
            let dx = x - s.rect.x1;
            s.rect = s.rect.translate(Offset::new(dx, 0));
            dx != 0
        })
    }

    /// Move vertically without resizing.
    pub fn set_y(&mut self, id: WidgetId, y: i32) -> bool {
        self.update_state(id, Attr::Y, |s| {
            let dy = y - s.rect.y1;
            s.rect = s.rect.translate(Offset::new(0, dy));
            dy != 0
        })
    }

    /// Set the left edge. Turns horizontal auto-size off.
    pub fn set_x1(&mut self, id: WidgetId, x1: i32) -> bool {
        self.update_state(id, Attr::X1, |s| {
            s.auto_size_width = false;
            std::mem::replace(&mut s.rect.x1, x1) != x1
        })
    }

    /// Set the top edge. Turns vertical auto-size off.
    pub fn set_y1(&mut self, id: WidgetId, y1: i32) -> bool {
        self.update_state(id, Attr::Y1, |s| {
            s.auto_size_height = false;
            std::mem::replace(&mut s.rect.y1, y1) != y1
        })
    }

    /// Set the right edge. Turns horizontal auto-size off.
    pub fn set_x2(&mut self, id: WidgetId, x2: i32) -> bool {
        self.update_state(id, Attr::X2, |s| {
            s.auto_size_width = false;
            std::mem::replace(&mut s.rect.x2, x2) != x2
        })
    }

    /// Set the bottom edge. Turns vertical auto-size off.
    pub fn set_y2(&mut self, id: WidgetId, y2: i32) -> bool {
        self.update_state(id, Attr::Y2, |s| {
            s.auto_size_height = false;
            std::mem::replace(&mut s.rect.y2, y2) != y2
        })
    }

    /// Resize from the fixed left edge. Turns horizontal auto-size off.
    pub fn set_width(&mut self, id: WidgetId, width: i32) -> bool {
        self.update_state(id, Attr::Width, |s| {
            s.auto_size_width = false;
            let x2 = s.rect.x1 + width;
            std::mem::replace(&mut s.rect.x2, x2) != x2
        })
    }

    /// Resize from the fixed top edge. Turns vertical auto-size off.
    pub fn set_height(&mut self, id: WidgetId, height: i32) -> bool {
        self.update_state(id, Attr::Height, |s| {
            s.auto_size_height = false;
            let y2 = s.rect.y1 + height;
            std::mem::replace(&mut s.rect.y2, y2) != y2
        })
    }

    /// Set all four edges at once, with a single `Region` damage. Turns
    /// auto-size off on both axes. Re-applying the current rect is not a
    /// change and raises nothing.
    pub fn set_region(&mut self, id: WidgetId, rect: Rect) -> bool {
        self.update_state(id, Attr::Region, |s| {
            s.auto_size_width = false;
            s.auto_size_height = false;
            std::mem::replace(&mut s.rect, rect) != rect
        })
    }

    /// Move the top-left corner to `(x, y)` without resizing.
    pub fn move_to(&mut self, id: WidgetId, x: i32, y: i32) -> bool {
        self.update_state(id, Attr::Region, |s| {
            let delta = Offset::new(x, y) - s.rect.origin();
            s.rect = s.rect.translate(delta);
            delta != Offset::ZERO
        })
    }

    /// [`move_to`](Self::move_to) plus [`set_z`](Self::set_z).
    pub fn move_to_z(&mut self, id: WidgetId, x: i32, y: i32, z: f64) -> bool {
        let moved = self.move_to(id, x, y);
        let raised = self.set_z(id, z);
        moved || raised
    }

    /// Resize from the fixed top-left corner.
    pub fn resize(&mut self, id: WidgetId, width: i32, height: i32) -> bool {
        match self.rect(id) {
            Some(r) => self.set_region(id, Rect::from_size(r.x1, r.y1, width, height)),
            None => false,
        }
    }

    /// Move a widget on behalf of its container's layout. The widget is
    /// damaged but raises no `Modified`, so the container is not damaged
    /// again by its own relayout.
    pub fn place(&mut self, id: WidgetId, x: i32, y: i32) -> bool {
        self.unreported(id, |w| w.move_to(id, x, y))
    }

    /// Set the focus precedence of a widget.
    ///
    /// A container with `auto_z_order` shifts each child (recursively) by
    /// the same delta first, preserving their relative order.
    pub fn set_z(&mut self, id: WidgetId, z: f64) -> bool {
        let Some(node) = self.tree.get(id) else {
            return false;
        };
        let delta = z - node.state.z;
        if delta == 0.0 {
            return false;
        }
        let shift_children = node.container_state().is_some_and(|c| c.auto_z_order);
        if shift_children {
            for child in self.tree.children(id).to_vec() {
                if let Some(child_z) = self.z(child) {
                    self.set_z(child, child_z + delta);
                }
            }
        }
        self.update_state(id, Attr::Z, |s| {
            s.z = z;
            true
        })
    }

    /// Turn auto-size on or off for both axes.
    pub fn set_auto_size(&mut self, id: WidgetId, auto_size: bool) -> bool {
        self.update_state(id, Attr::AutoSize, |s| {
            let changed = s.auto_size_width != auto_size || s.auto_size_height != auto_size;
            s.auto_size_width = auto_size;
            s.auto_size_height = auto_size;
            changed
        })
    }

    pub fn set_auto_size_width(&mut self, id: WidgetId, auto_size: bool) -> bool {
        self.update_state(id, Attr::AutoSize, |s| {
            std::mem::replace(&mut s.auto_size_width, auto_size) != auto_size
        })
    }

    pub fn set_auto_size_height(&mut self, id: WidgetId, auto_size: bool) -> bool {
        self.update_state(id, Attr::AutoSize, |s| {
            std::mem::replace(&mut s.auto_size_height, auto_size) != auto_size
        })
    }

    /// Size the widget to its renderer's natural size on every axis whose
    /// auto-size flag is on. Returns whether the region changed.
    pub fn auto_size(&mut self, id: WidgetId) -> Result<bool, ResourceError> {
        let Some(state) = self.widget(id) else {
            return Ok(false);
        };
        let (auto_width, auto_height, rect) =
            (state.auto_size_width, state.auto_size_height, state.rect);
        if !auto_width && !auto_height {
            return Ok(false);
        }
        let Some(renderer) = self.style_for(id).and_then(|s| s.renderer.clone()) else {
            return Ok(false);
        };
        let Some(view) = view_of(&self.tree, &self.styles, id, self.focused, self.active) else {
            return Ok(false);
        };
        let Some((width, height)) = renderer.suggested_size(self.backend.as_mut(), &view)? else {
            return Ok(false);
        };

        let sized = Rect::new(
            rect.x1,
            rect.y1,
            if auto_width { rect.x1 + width } else { rect.x2 },
            if auto_height { rect.y1 + height } else { rect.y2 },
        );
        if sized == rect {
            return Ok(false);
        }
        // Written directly so the auto-size flags survive.
        self.unreported(id, |w| {
            if let Some(state) = w.state_mut(id) {
                state.rect = sized;
            }
            w.damage(id, Attr::Region)
        });
        Ok(true)
    }

    // ── Flags ────────────────────────────────────────────────────────

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> bool {
        self.update_state(id, Attr::Enabled, |s| {
            std::mem::replace(&mut s.enabled, enabled) != enabled
        })
    }

    pub fn enable(&mut self, id: WidgetId) -> bool {
        self.set_enabled(id, true)
    }

    pub fn disable(&mut self, id: WidgetId) -> bool {
        self.set_enabled(id, false)
    }

    /// Show or hide a widget. On the root this also shows or hides the OS
    /// window.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> bool {
        if id == self.root {
            if visible {
                self.backend.show_window();
            } else {
                self.backend.hide_window();
            }
        }
        self.update_state(id, Attr::Visible, |s| {
            std::mem::replace(&mut s.visible, visible) != visible
        })
    }

    pub fn show(&mut self, id: WidgetId) -> bool {
        self.set_visible(id, true)
    }

    pub fn hide(&mut self, id: WidgetId) -> bool {
        self.set_visible(id, false)
    }

    /// Take the widget out of its parent's layout.
    pub fn float(&mut self, id: WidgetId) -> bool {
        self.set_floating(id, true)
    }

    /// Hand the widget back to its parent's layout.
    pub fn snap(&mut self, id: WidgetId) -> bool {
        self.set_floating(id, false)
    }

    // Always damages, so the parent relayouts even when the flag is unchanged.
    fn set_floating(&mut self, id: WidgetId, floating: bool) -> bool {
        self.update_state(id, Attr::Floating, |s| {
            s.floating = floating;
            true
        })
    }

    pub fn set_activatable(&mut self, id: WidgetId, activatable: bool) -> bool {
        self.update_state(id, Attr::Activatable, |s| {
            std::mem::replace(&mut s.activatable, activatable) != activatable
        })
    }

    pub fn set_draggable(&mut self, id: WidgetId, draggable: bool) -> bool {
        self.update_state(id, Attr::Draggable, |s| {
            std::mem::replace(&mut s.draggable, draggable) != draggable
        })
    }

    /// Opt a widget in or out of render throttling. Throttling only applies
    /// while the window throttles too.
    pub fn set_throttle(&mut self, id: WidgetId, throttle: bool) -> bool {
        self.update_state(id, Attr::ThrottleRender, |s| {
            std::mem::replace(&mut s.throttle_render, throttle) != throttle
        })
    }

    pub fn set_text(&mut self, id: WidgetId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update_state(id, Attr::Text, |s| {
            if s.text == text {
                return false;
            }
            s.text = text;
            true
        })
    }

    // ── Observable attributes ────────────────────────────────────────

    /// Make `id` hold `style`. The widget is damaged now and whenever the
    /// style is updated later. A private style left without holders is
    /// freed.
    pub fn set_style(&mut self, id: WidgetId, style: StyleId) -> Result<bool, TreeError> {
        if !self.styles.contains(style) {
            return Err(TreeError::MissingStyle(style));
        }
        let state = self.widget(id).ok_or(TreeError::Missing(id))?;
        let (old, link) = (state.style, state.style_link);
        if old == style {
            return Ok(false);
        }
        if let Some(link) = link {
            self.unsubscribe(link);
        }
        self.styles.release(old);
        if let Some(state) = self.state_mut(id) {
            state.style = style;
            state.style_link = None;
        }
        self.damage(id, Attr::Style);
        self.styles.retain(style);
        self.bind_style(id, style);
        Ok(true)
    }

    /// Associate a label widget. The widget is damaged whenever the label
    /// is modified.
    pub fn set_label(&mut self, id: WidgetId, label: Option<WidgetId>) -> Result<bool, TreeError> {
        if let Some(label) = label.filter(|&l| !self.tree.contains(l)) {
            return Err(TreeError::Missing(label));
        }
        let state = self.widget(id).ok_or(TreeError::Missing(id))?;
        let (old, link) = (state.label, state.label_link);
        if old == label {
            return Ok(false);
        }
        if let Some(link) = link {
            self.unsubscribe(link);
        }
        if let Some(state) = self.state_mut(id) {
            state.label = label;
            state.label_link = None;
        }
        self.damage(id, Attr::Label);
        if let Some(label) = label {
            let link = self.on(label, Event::Modified, vec![], move |w, _| {
                w.damage(id, Attr::Label);
            });
            if let Some(state) = self.state_mut(id) {
                state.label_link = link;
            }
        }
        Ok(true)
    }

    pub fn label(&self, id: WidgetId) -> Option<WidgetId> {
        self.widget(id).and_then(|s| s.label)
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// Detach `id` and free it along with everything it owns.
    ///
    /// Focus and activation held by a destroyed widget return to the root
    /// without signals. A drag in progress keeps its (now dangling) target.
    pub fn destroy(&mut self, id: WidgetId) -> Result<usize, TreeError> {
        if id == self.root {
            return Err(TreeError::Root);
        }
        if !self.tree.contains(id) {
            return Err(TreeError::Missing(id));
        }
        if self.tree.is_internal(id) {
            return Err(TreeError::Internal(id));
        }
        if let Some(parent) = self.tree.parent(id) {
            self.remove(parent, id)?;
        }

        let removed = self.tree.remove_subtree(id);
        let count = removed.len();
        for (gone, node) in removed {
            if let Some(link) = node.state.label_link {
                self.unsubscribe(link);
            }
            if let Some(link) = node.state.style_link {
                self.unsubscribe(link);
            }
            self.styles.release(node.state.style);
            if self.focused == gone {
                self.focused = self.root;
            }
            if self.active == gone {
                self.active = self.root;
            }
        }
        tracing::debug!(?id, count, "destroyed widget");
        Ok(count)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
