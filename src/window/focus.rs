//! Focus and activation.
//!
//! The window holds one focused and one active widget. `is_focused` and
//! `is_active` compare against those slots, so at most one widget of a
//! window can answer `true` to either.

use crate::event::{Attr, Event};
use crate::tree::{NodeKind, WidgetId};

use super::MainWindow;

impl MainWindow {
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == id && self.is_attached(id)
    }

    pub fn is_active(&self, id: WidgetId) -> bool {
        self.active == id && self.is_attached(id)
    }

    /// Give `id` the focus. `false` if it is detached or already focused.
    pub fn focus(&mut self, id: WidgetId) -> bool {
        if self.focused == id || !self.is_attached(id) {
            return false;
        }
        self.set_focused(id);
        true
    }

    /// Return the focus to the root if `id` holds it.
    pub fn blur(&mut self, id: WidgetId) -> bool {
        if self.focused != id || id == self.root {
            return false;
        }
        let root = self.root;
        self.set_focused(root);
        true
    }

    /// Latch `id` as the active widget. Rejected for widgets that are not
    /// activatable, detached or already active.
    pub fn activate(&mut self, id: WidgetId) -> bool {
        let activatable = self.widget(id).is_some_and(|s| s.activatable);
        if !activatable || self.active == id || !self.is_attached(id) {
            return false;
        }
        self.set_active(id);
        true
    }

    /// Return activation to the root if `id` holds it.
    pub fn deactivate(&mut self, id: WidgetId) -> bool {
        if self.active != id || id == self.root {
            return false;
        }
        let root = self.root;
        self.set_active(root);
        true
    }

    /// Move the focus slot, then blur the old holder and focus the new one.
    pub(super) fn set_focused(&mut self, id: WidgetId) {
        let old = std::mem::replace(&mut self.focused, id);
        if old == id {
            return;
        }
        tracing::debug!(?old, new = ?id, "focus changed");
        self.damage(old, Attr::Focused);
        self.signal(old, Event::Blur, vec![]);
        // A blur handler may have moved the focus on.
        if self.focused != id {
            return;
        }
        self.damage(id, Attr::Focused);
        self.signal(id, Event::Focus, vec![]);
    }

    /// Move the activation slot, then deactivate the old holder and activate
    /// the new one.
    pub(super) fn set_active(&mut self, id: WidgetId) {
        let old = std::mem::replace(&mut self.active, id);
        if old == id {
            return;
        }
        tracing::debug!(?old, new = ?id, "activation changed");
        self.damage(old, Attr::Active);
        self.signal(old, Event::Deactivate, vec![]);
        if self.active != id {
            return;
        }
        self.damage(id, Attr::Active);
        self.signal(id, Event::Activate, vec![]);
    }

    /// Find the widget under the cursor and move the focus to it.
    ///
    /// Scans the children of the current container for the last enabled one
    /// under the cursor whose z is at least the current candidate's, then
    /// descends into containers and compound internals until a leaf (or an
    /// unclaimed container) is reached.
    pub(super) fn update_focus(&mut self) {
        let mut container = self.root;
        let mut candidate = self.root;
        loop {
            if self.cursor.enabled {
                let mut candidate_z = self.z(candidate).unwrap_or(0.0);
                for &child in self.tree.children(container) {
                    let Some(state) = self.widget(child) else {
                        continue;
                    };
                    if state.enabled && self.cursor.over(state.rect) && state.z >= candidate_z {
                        candidate = child;
                        candidate_z = state.z;
                    }
                }
            }
            if candidate == container {
                break;
            }
            match self.tree.get(candidate).map(|n| &n.kind) {
                Some(NodeKind::Compound(c)) if c.container == container => break,
                Some(NodeKind::Compound(c)) => container = c.container,
                Some(NodeKind::Container(_)) => container = candidate,
                _ => break,
            }
        }
        if candidate != self.focused {
            self.set_focused(candidate);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
