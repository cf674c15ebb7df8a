//! The draw pass: rendering, relayout and overflow handling.

use crate::event::Event;
use crate::geometry::Rect;
use crate::render::ResourceError;
use crate::style::Overflow;
use crate::tree::{Node, NodeKind, WidgetId};

use super::widget::view_of;
use super::MainWindow;

impl MainWindow {
    /// Draw the whole tree. Returns whether the root was visible.
    ///
    /// Children are painted in insertion order; z only affects focus.
    /// Resource failures abort the pass and reach the caller.
    pub fn draw(&mut self) -> Result<bool, ResourceError> {
        let root = self.root;
        self.draw_widget(root)
    }

    fn draw_widget(&mut self, id: WidgetId) -> Result<bool, ResourceError> {
        let compound = match self.tree.get(id).map(|n| &n.kind) {
            None => return Ok(false),
            Some(NodeKind::Widget) => return self.draw_leaf(id),
            Some(NodeKind::Container(_)) => return self.draw_container(id),
            Some(NodeKind::Compound(c)) => *c,
        };
        self.draw_compound(id, compound.container, compound.auto_size_container)
    }

    /// Render one widget, fire `Draw` and clear its damage. Invisible
    /// widgets keep their damage.
    fn draw_leaf(&mut self, id: WidgetId) -> Result<bool, ResourceError> {
        let Some(node) = self.tree.get(id) else {
            return Ok(false);
        };
        if !node.state.visible {
            return Ok(false);
        }
        let throttled =
            node.state.throttle_render && self.throttle_render && !node.damage.is_damaged();
        let renderer = self.styles.get(node.state.style).and_then(|s| s.renderer.clone());

        if let (false, Some(renderer)) = (throttled, renderer) {
            if let Some(view) = view_of(&self.tree, &self.styles, id, self.focused, self.active) {
                renderer.draw(self.backend.as_mut(), &view)?;
            }
        }
        self.signal(id, Event::Draw, vec![]);
        self.clear_damage(id);
        Ok(true)
    }

    fn draw_container(&mut self, id: WidgetId) -> Result<bool, ResourceError> {
        let was_damaged = self.is_damaged(id);
        if !self.draw_leaf(id)? {
            return Ok(false);
        }
        if was_damaged {
            self.relayout(id)?;
        }

        let children = self.tree.children(id).to_vec();
        match self.overflow(id) {
            Some(clip) => {
                self.backend.push_clip(clip);
                let drawn = self.draw_children(&children);
                self.backend.pop_clip();
                drawn?;
            }
            None => self.draw_children(&children)?,
        }
        Ok(true)
    }

    fn draw_children(&mut self, children: &[WidgetId]) -> Result<(), ResourceError> {
        for &child in children {
            self.draw_widget(child)?;
        }
        Ok(())
    }

    /// Size the children, then run the container's layout with reporting
    /// suppressed on the container.
    fn relayout(&mut self, id: WidgetId) -> Result<(), ResourceError> {
        let children = self.tree.children(id).to_vec();
        for &child in &children {
            self.auto_size(child)?;
        }

        let taken = self
            .tree
            .get_mut(id)
            .and_then(Node::container_state_mut)
            .and_then(|state| state.layout.take());
        let Some(mut layout) = taken else {
            return Ok(());
        };
        let extent = self.unreported(id, |w| layout.align(w, id, &children));

        if let Some(state) = self.tree.get_mut(id).and_then(Node::container_state_mut) {
            // A layout installed by a handler mid-pass wins.
            if state.layout.is_none() {
                state.layout = Some(layout);
            }
            state.extent = extent;
        }
        tracing::debug!(container = ?id, x = extent.x, y = extent.y, "relayout");
        Ok(())
    }

    /// Apply the overflow policy of each axis against the last extent.
    /// Returns the clip rectangle if either axis clips. `Stretch` grows the
    /// container instead.
    fn overflow(&mut self, id: WidgetId) -> Option<Rect> {
        let rect = self.rect(id)?;
        let extent = self.extent(id)?;
        let style = self.style_for(id)?;
        let (padding, horizontal, vertical) =
            (style.padding, style.horizontal_overflow, style.vertical_overflow);
        let content = rect.shrink(padding);
        let (window_width, window_height) = self.backend.window_size();

        let mut clip = Rect::new(content.x1, content.y1, window_width, window_height);
        let mut clipped = false;

        if extent.x > content.x2 {
            match horizontal {
                Overflow::Auto | Overflow::Hide | Overflow::Scroll => {
                    clip.x2 = content.x2;
                    clipped = true;
                }
                Overflow::Show => {}
                Overflow::Stretch => {
                    let x2 = extent.x + padding.right;
                    tracing::debug!(container = ?id, x2, "stretched");
                    self.set_x2(id, x2);
                }
            }
        }
        if extent.y > content.y2 {
            match vertical {
                Overflow::Auto | Overflow::Hide | Overflow::Scroll => {
                    clip.y2 = content.y2;
                    clipped = true;
                }
                Overflow::Show => {}
                Overflow::Stretch => {
                    let y2 = extent.y + padding.bottom;
                    tracing::debug!(container = ?id, y2, "stretched");
                    self.set_y2(id, y2);
                }
            }
        }
        clipped.then_some(clip)
    }

    /// A damaged compound re-regions its internal container to its own
    /// bounds first; the internal container is drawn after the compound.
    fn draw_compound(
        &mut self,
        id: WidgetId,
        internal: WidgetId,
        auto_size_container: bool,
    ) -> Result<bool, ResourceError> {
        if auto_size_container && self.is_damaged(id) {
            if let Some(state) = self.widget(id) {
                let (rect, z) = (state.rect, state.z);
                self.set_region(internal, rect);
                self.set_z(internal, z);
            }
        }
        if !self.draw_leaf(id)? {
            return Ok(false);
        }
        self.draw_widget(internal)?;
        Ok(true)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
