//! Absolute positioning: Free and Relative.

use std::collections::HashSet;

use crate::geometry::{Extent, Offset};
use crate::tree::WidgetId;
use crate::window::MainWindow;

use super::{content_extent, Layout, LayoutKind};

// ---------------------------------------------------------------------------
// Free
// ---------------------------------------------------------------------------

/// Leaves children where they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Free;

impl Layout for Free {
    fn align(
        &mut self,
        window: &mut MainWindow,
        _container: WidgetId,
        children: &[WidgetId],
    ) -> Extent {
        content_extent(window, children)
    }

    fn kind(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Free)
    }
}

// ---------------------------------------------------------------------------
// Relative
// ---------------------------------------------------------------------------

/// Keeps children at a fixed offset from the container's origin.
///
/// Children seen on an earlier pass are translated by however far the
/// container moved since then. Newly added children are only recorded.
#[derive(Debug, Clone, Default)]
pub struct Relative {
    last_origin: Option<Offset>,
    known: HashSet<WidgetId>,
}

impl Relative {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layout for Relative {
    fn align(
        &mut self,
        window: &mut MainWindow,
        container: WidgetId,
        children: &[WidgetId],
    ) -> Extent {
        let Some(origin) = window.rect(container).map(|r| r.origin()) else {
            return Extent::ZERO;
        };
        let delta = origin - self.last_origin.unwrap_or(origin);
        self.last_origin = Some(origin);
        self.known.retain(|k| children.contains(k));

        for &child in children {
            if !self.known.insert(child) && delta != Offset::ZERO && !window.is_floating(child) {
                if let Some(rect) = window.rect(child) {
                    window.place(child, rect.x1 + delta.x, rect.y1 + delta.y);
                }
            }
        }
        content_extent(window, children)
    }

    fn kind(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Relative)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::testing::HeadlessBackend;
    use crate::window::{MainWindow, WindowConfig};

    fn window() -> MainWindow {
        MainWindow::new(HeadlessBackend::new(800, 600), WindowConfig::default())
    }

    fn child(w: &mut MainWindow, container: WidgetId, rect: Rect) -> WidgetId {
        let c = w.create_widget();
        w.set_region(c, rect);
        w.add(container, c).unwrap();
        c
    }

    // ── Free ─────────────────────────────────────────────────────────

    #[test]
    fn free_extent_is_max_corner() {
        let mut w = window();
        let root = w.root();
        let a = child(&mut w, root, Rect::new(0, 0, 50, 50));
        let b = child(&mut w, root, Rect::new(0, 0, 100, 30));
        assert_eq!(Free.align(&mut w, root, &[a, b]), Extent::new(100, 50));
    }

    #[test]
    fn free_empty_is_zero() {
        let mut w = window();
        let root = w.root();
        assert_eq!(Free.align(&mut w, root, &[]), Extent::ZERO);
    }

    #[test]
    fn free_counts_floating_children() {
        let mut w = window();
        let root = w.root();
        let a = child(&mut w, root, Rect::new(0, 0, 10, 10));
        let f = child(&mut w, root, Rect::new(0, 0, 70, 80));
        w.float(f);
        assert_eq!(Free.align(&mut w, root, &[a, f]), Extent::new(70, 80));
        assert_eq!(w.rect(f), Some(Rect::new(0, 0, 70, 80)));
    }

    // ── Relative ─────────────────────────────────────────────────────

    #[test]
    fn relative_follows_container_movement() {
        let mut w = window();
        let root = w.root();
        let c = w.create_container();
        w.set_region(c, Rect::new(10, 10, 110, 110));
        w.add(root, c).unwrap();
        let a = child(&mut w, c, Rect::new(20, 20, 30, 30));

        let mut layout = Relative::new();
        layout.align(&mut w, c, &[a]);
        assert_eq!(w.rect(a), Some(Rect::new(20, 20, 30, 30)));

        w.move_to(c, 15, 40);
        let extent = layout.align(&mut w, c, &[a]);
        assert_eq!(w.rect(a), Some(Rect::new(25, 50, 35, 60)));
        assert_eq!(extent, Extent::new(35, 60));

        // Stationary container: nothing moves.
        layout.align(&mut w, c, &[a]);
        assert_eq!(w.rect(a), Some(Rect::new(25, 50, 35, 60)));
    }

    #[test]
    fn relative_records_new_children_without_moving_them() {
        let mut w = window();
        let root = w.root();
        let c = w.create_container();
        w.set_region(c, Rect::new(0, 0, 100, 100));
        w.add(root, c).unwrap();
        let a = child(&mut w, c, Rect::new(0, 0, 10, 10));

        let mut layout = Relative::new();
        layout.align(&mut w, c, &[a]);
        w.move_to(c, 5, 5);
        let b = child(&mut w, c, Rect::new(50, 50, 60, 60));
        layout.align(&mut w, c, &[a, b]);
        assert_eq!(w.rect(a), Some(Rect::new(5, 5, 15, 15)));
        assert_eq!(w.rect(b), Some(Rect::new(50, 50, 60, 60)));
    }

    #[test]
    fn relative_leaves_floating_children() {
        let mut w = window();
        let root = w.root();
        let c = w.create_container();
        w.set_region(c, Rect::new(0, 0, 100, 100));
        w.add(root, c).unwrap();
        let f = child(&mut w, c, Rect::new(0, 0, 10, 10));
        w.float(f);

        let mut layout = Relative::new();
        layout.align(&mut w, c, &[f]);
        w.move_to(c, 30, 30);
        layout.align(&mut w, c, &[f]);
        assert_eq!(w.rect(f), Some(Rect::new(0, 0, 10, 10)));
    }
}
