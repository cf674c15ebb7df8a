//! Container and compound operations: membership, traversal, z-order and
//! layout selection.

use crate::event::{Attr, Event};
use crate::geometry::Extent;
use crate::layout::{Layout, LayoutKind};
use crate::tree::{Node, TreeError, WidgetId};

use super::MainWindow;

impl MainWindow {
    // ── Membership ───────────────────────────────────────────────────

    /// Direct children of a container, in insertion (paint) order.
    pub fn children(&self, container: WidgetId) -> &[WidgetId] {
        self.tree.children(container)
    }

    /// Append `child` to `container`, moving it out of its current parent.
    ///
    /// The container is damaged (`Attr::Children`) now and whenever the
    /// child is modified. The child and everything it owns join the
    /// container's window.
    pub fn add(&mut self, container: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        if !self.tree.contains(container) {
            return Err(TreeError::Missing(container));
        }
        if !self.tree.contains(child) {
            return Err(TreeError::Missing(child));
        }
        if !self.is_container(container) {
            return Err(TreeError::NotAContainer(container));
        }
        if child == self.root {
            return Err(TreeError::Root);
        }
        if self.tree.is_internal(child) {
            return Err(TreeError::Internal(child));
        }
        if child == container || self.tree.ancestors(container).contains(&child) {
            return Err(TreeError::Cycle { container, child });
        }
        if let Some(old) = self.tree.parent(child) {
            self.remove(old, child)?;
        }

        self.damage(container, Attr::Children);
        self.tree.attach(container, child);
        let link = self.on(child, Event::Modified, vec![], move |w, _| {
            w.damage(container, Attr::Children);
        });
        let state = self.tree.get_mut(container).and_then(Node::container_state_mut);
        if let (Some(link), Some(state)) = (link, state) {
            state.links.insert(child, link);
        }
        let window = self.window_of(container);
        self.assign_window(child, window);
        tracing::debug!(?container, ?child, "added child");
        Ok(())
    }

    /// Take `child` out of `container`. Sibling order is preserved.
    pub fn remove(&mut self, container: WidgetId, child: WidgetId) -> Result<WidgetId, TreeError> {
        if !self.tree.contains(container) {
            return Err(TreeError::Missing(container));
        }
        if self.tree.parent(child) != Some(container) || self.tree.is_internal(child) {
            return Err(TreeError::NotAChild { container, child });
        }
        self.tree.detach(child);
        self.unlink_child(container, child);
        self.assign_window(child, None);
        self.damage(container, Attr::Children);
        tracing::debug!(?container, ?child, "removed child");
        Ok(child)
    }

    /// Remove every child of `container`. Returns how many were removed.
    pub fn clear(&mut self, container: WidgetId) -> Result<usize, TreeError> {
        if !self.tree.contains(container) {
            return Err(TreeError::Missing(container));
        }
        if !self.is_container(container) {
            return Err(TreeError::NotAContainer(container));
        }
        let former = self.tree.detach_all(container);
        for &child in &former {
            self.unlink_child(container, child);
            self.assign_window(child, None);
        }
        self.damage(container, Attr::Children);
        tracing::debug!(?container, count = former.len(), "cleared children");
        Ok(former.len())
    }

    /// Remove `widget` from whichever container under `container` holds it.
    pub fn recursive_remove(
        &mut self,
        container: WidgetId,
        widget: WidgetId,
    ) -> Result<WidgetId, TreeError> {
        if !self.recursive_contains(container, widget) {
            return Err(TreeError::NotAChild { container, child: widget });
        }
        let parent = self
            .tree
            .parent(widget)
            .ok_or(TreeError::NotAChild { container, child: widget })?;
        self.remove(parent, widget)
    }

    /// Whether `widget` is a direct child of `container`.
    pub fn contains(&self, container: WidgetId, widget: WidgetId) -> bool {
        self.tree.children(container).contains(&widget)
    }

    /// Whether `widget` is nested anywhere under `container` (through nested
    /// containers, not compound internals).
    pub fn recursive_contains(&self, container: WidgetId, widget: WidgetId) -> bool {
        self.tree.walk_depth_first(container).contains(&widget)
    }

    /// Everything nested under `container`, depth-first, pre-order.
    pub fn descendants(&self, container: WidgetId) -> Vec<WidgetId> {
        self.tree.walk_depth_first(container)
    }

    /// Call `f` on every widget nested under `container`, depth-first,
    /// pre-order. The set is captured before the first call.
    pub fn recursive_each(
        &mut self,
        container: WidgetId,
        mut f: impl FnMut(&mut MainWindow, WidgetId),
    ) {
        for widget in self.tree.walk_depth_first(container) {
            f(self, widget);
        }
    }

    fn unlink_child(&mut self, container: WidgetId, child: WidgetId) {
        let link = self
            .tree
            .get_mut(container)
            .and_then(Node::container_state_mut)
            .and_then(|state| state.links.remove(&child));
        if let Some(link) = link {
            self.unsubscribe(link);
        }
    }

    /// Point `id` and everything it owns at `window`.
    fn assign_window(&mut self, id: WidgetId, window: Option<WidgetId>) {
        for owned in self.tree.subtree(id) {
            if let Some(state) = self.state_mut(owned) {
                state.window = window;
            }
        }
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: WidgetId) -> bool {
        self.tree.contains(id) && (id == self.root || self.tree.ancestors(id).contains(&self.root))
    }

    // ── Z-order ──────────────────────────────────────────────────────

    /// Raise `child` just above the highest of its siblings. `None` if it is
    /// not a direct child of `container`.
    pub fn bring_child_to_front(&mut self, container: WidgetId, child: WidgetId) -> Option<f64> {
        if !self.contains(container, child) {
            return None;
        }
        let top = self
            .tree
            .children(container)
            .iter()
            .filter_map(|&c| self.z(c))
            .fold(f64::NEG_INFINITY, f64::max);
        let z = top + 0.1;
        self.set_z(child, z);
        Some(z)
    }

    /// Lower `child` just below the lowest of its siblings. `None` if it is
    /// not a direct child of `container`.
    pub fn send_child_to_back(&mut self, container: WidgetId, child: WidgetId) -> Option<f64> {
        if !self.contains(container, child) {
            return None;
        }
        let bottom = self
            .tree
            .children(container)
            .iter()
            .filter_map(|&c| self.z(c))
            .fold(f64::INFINITY, f64::min);
        let z = bottom - 0.1;
        self.set_z(child, z);
        Some(z)
    }

    /// [`bring_child_to_front`](Self::bring_child_to_front) in the widget's
    /// own parent.
    pub fn bring_to_front(&mut self, id: WidgetId) -> Option<f64> {
        let parent = self.tree.parent(id)?;
        self.bring_child_to_front(parent, id)
    }

    /// [`send_child_to_back`](Self::send_child_to_back) in the widget's own
    /// parent.
    pub fn send_to_back(&mut self, id: WidgetId) -> Option<f64> {
        let parent = self.tree.parent(id)?;
        self.send_child_to_back(parent, id)
    }

    pub fn set_auto_z_order(&mut self, container: WidgetId, auto_z_order: bool) -> bool {
        let changed = match self.tree.get_mut(container).and_then(Node::container_state_mut) {
            Some(state) => std::mem::replace(&mut state.auto_z_order, auto_z_order) != auto_z_order,
            None => return false,
        };
        if changed {
            self.damage(container, Attr::AutoZOrder);
        }
        changed
    }

    // ── Layout ───────────────────────────────────────────────────────

    /// Switch a container to a built-in layout.
    pub fn set_layout(&mut self, container: WidgetId, kind: LayoutKind) -> bool {
        self.set_custom_layout(container, kind.build())
    }

    /// Switch a container to any layout. The next draw relayouts.
    pub fn set_custom_layout(&mut self, container: WidgetId, layout: Box<dyn Layout>) -> bool {
        match self.tree.get_mut(container).and_then(Node::container_state_mut) {
            Some(state) => state.layout = Some(layout),
            None => return false,
        }
        self.damage(container, Attr::Layout);
        true
    }

    /// Which built-in layout a container runs, if any.
    pub fn layout_kind(&self, container: WidgetId) -> Option<LayoutKind> {
        self.layout(container).and_then(|l| l.kind())
    }

    /// Extent reported by the container's last layout pass.
    pub fn extent(&self, container: WidgetId) -> Option<Extent> {
        self.tree
            .get(container)
            .and_then(Node::container_state)
            .map(|s| s.extent)
    }

    // ── Compound ─────────────────────────────────────────────────────

    /// Whether a compound re-regions its internal container to its own
    /// bounds when drawn.
    pub fn set_auto_size_container(&mut self, compound: WidgetId, auto_size: bool) -> bool {
        let changed = match self.tree.get_mut(compound).and_then(Node::compound_state_mut) {
            Some(state) => {
                std::mem::replace(&mut state.auto_size_container, auto_size) != auto_size
            }
            None => return false,
        };
        if changed {
            self.damage(compound, Attr::AutoSizeContainer);
        }
        changed
    }
}

// ===========================================================================
// Tests
// ===========================================================================
