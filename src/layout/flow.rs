//! Flow layouts: Vertical (columns) and Horizontal (rows).
//!
//! Children are stacked inside the container's padded content box, each
//! surrounded by its own margin. With `Auto` overflow on the flow axis, a
//! child that would cross the far edge starts a new column (or row) offset
//! by the widest (tallest) child of the current one. Other policies keep
//! stacking and leave the overflow to the container. Children are never
//! shrunk.
//!
//! The returned extent is the bounding corner of everything placed: the far
//! edge of the last column (row) and the furthest edge reached on the flow
//! axis. It is not the position the flow cursor stopped at, so an earlier,
//! longer column still counts toward overflow.

use crate::geometry::{Extent, Rect, Spacing};
use crate::style::Overflow;
use crate::tree::WidgetId;
use crate::window::MainWindow;

use super::{Layout, LayoutKind};

/// Container attributes the flow needs.
struct FlowBox {
    content: Rect,
    horizontal: Overflow,
    vertical: Overflow,
}

impl FlowBox {
    fn of(window: &MainWindow, container: WidgetId) -> Option<Self> {
        let rect = window.rect(container)?;
        let style = window.style_for(container)?;
        Some(Self {
            content: rect.shrink(style.padding),
            horizontal: style.horizontal_overflow,
            vertical: style.vertical_overflow,
        })
    }
}

/// Child attributes the flow needs.
struct FlowItem {
    width: i32,
    height: i32,
    margin: Spacing,
}

impl FlowItem {
    /// `None` for floating or missing children.
    fn of(window: &MainWindow, child: WidgetId) -> Option<Self> {
        if window.is_floating(child) {
            return None;
        }
        let rect = window.rect(child)?;
        let margin = window.style_for(child).map_or(Spacing::ZERO, |s| s.margin);
        Some(Self { width: rect.width(), height: rect.height(), margin })
    }
}

// ---------------------------------------------------------------------------
// Vertical
// ---------------------------------------------------------------------------

/// Top-to-bottom columns, wrapping left-to-right.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertical;

impl Layout for Vertical {
    fn align(
        &mut self,
        window: &mut MainWindow,
        container: WidgetId,
        children: &[WidgetId],
    ) -> Extent {
        if children.is_empty() {
            return Extent::ZERO;
        }
        let Some(flow) = FlowBox::of(window, container) else {
            return Extent::ZERO;
        };
        let content = flow.content;
        let (mut x, mut y) = (content.x1, content.y1);
        let mut column_width = 0;
        let mut bottom = y;

        for &child in children {
            let Some(item) = FlowItem::of(window, child) else {
                continue;
            };
            let needed = item.margin.top + item.height + item.margin.bottom;
            if y + needed > content.y2 && flow.vertical == Overflow::Auto {
                y = content.y1;
                x += column_width;
                column_width = 0;
            }
            y += item.margin.top;
            window.place(child, x + item.margin.left, y);
            y += item.height + item.margin.bottom;
            bottom = bottom.max(y);
            column_width = column_width.max(item.margin.left + item.width + item.margin.right);
        }
        Extent::new(x + column_width, bottom)
    }

    fn kind(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Vertical)
    }
}

// ---------------------------------------------------------------------------
// Horizontal
// ---------------------------------------------------------------------------

/// Left-to-right rows, wrapping top-to-bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct Horizontal;

impl Layout for Horizontal {
    fn align(
        &mut self,
        window: &mut MainWindow,
        container: WidgetId,
        children: &[WidgetId],
    ) -> Extent {
        if children.is_empty() {
            return Extent::ZERO;
        }
        let Some(flow) = FlowBox::of(window, container) else {
            return Extent::ZERO;
        };
        let content = flow.content;
        let (mut x, mut y) = (content.x1, content.y1);
        let mut row_height = 0;
        let mut right = x;

        for &child in children {
            let Some(item) = FlowItem::of(window, child) else {
                continue;
            };
            let needed = item.margin.left + item.width + item.margin.right;
            if x + needed > content.x2 && flow.horizontal == Overflow::Auto {
                x = content.x1;
                y += row_height;
                row_height = 0;
            }
            x += item.margin.left;
            window.place(child, x, y + item.margin.top);
            x += item.width + item.margin.right;
            right = right.max(x);
            row_height = row_height.max(item.margin.top + item.height + item.margin.bottom);
        }
        Extent::new(right, y + row_height)
    }

    fn kind(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Horizontal)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
