//! Layout strategies: child placement and content extent.
//!
//! A container re-runs its [`Layout`] on the first draw after it was
//! damaged. The layout moves non-floating children through
//! [`MainWindow::place`] and reports the [`Extent`] reached, which the
//! container compares against its padded content box to decide on clipping
//! or stretching.
//!
//! Each container owns its layout instance, so strategies that remember
//! things between passes ([`Relative`]) keep that memory per container.

pub mod flow;
pub mod free;

pub use flow::{Horizontal, Vertical};
pub use free::{Free, Relative};

use std::fmt;

use crate::geometry::Extent;
use crate::tree::WidgetId;
use crate::window::MainWindow;

/// Computes child placement for a container.
pub trait Layout: fmt::Debug {
    /// Position `children` (never the floating ones) inside `container` and
    /// return the extent reached. An empty child list returns
    /// [`Extent::ZERO`] without doing any work.
    fn align(
        &mut self,
        window: &mut MainWindow,
        container: WidgetId,
        children: &[WidgetId],
    ) -> Extent;

    /// The built-in strategy this is, if any.
    fn kind(&self) -> Option<LayoutKind> {
        None
    }
}

/// The built-in layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutKind {
    #[default]
    Free,
    Relative,
    Vertical,
    Horizontal,
}

impl LayoutKind {
    /// A fresh instance of the strategy.
    pub fn build(self) -> Box<dyn Layout> {
        match self {
            LayoutKind::Free => Box::new(Free),
            LayoutKind::Relative => Box::new(Relative::new()),
            LayoutKind::Vertical => Box::new(Vertical),
            LayoutKind::Horizontal => Box::new(Horizontal),
        }
    }
}

/// Furthest `x2` and `y2` over `children`, floating ones included.
pub fn content_extent(window: &MainWindow, children: &[WidgetId]) -> Extent {
    children
        .iter()
        .filter_map(|&child| window.rect(child))
        .fold(Extent::ZERO, |e, r| Extent::new(e.x.max(r.x2), e.y.max(r.y2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_reports_kind() {
        for kind in [
            LayoutKind::Free,
            LayoutKind::Relative,
            LayoutKind::Vertical,
            LayoutKind::Horizontal,
        ] {
            assert_eq!(kind.build().kind(), Some(kind));
        }
    }

    #[test]
    fn default_is_free() {
        assert_eq!(LayoutKind::default(), LayoutKind::Free);
    }
}
