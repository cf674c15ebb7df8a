//! # wicker
//!
//! A retained-mode widget core: an arena-backed widget tree, publish/subscribe
//! events, per-attribute damage tracking, pluggable container layouts and a
//! window that routes pointer and key input to the widget under the cursor.
//!
//! Drawing goes through a [`Backend`](render::Backend) trait, so the same tree
//! can paint into a real display or into the recording
//! [`HeadlessBackend`](testing::HeadlessBackend) used by tests.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Offset, Rect, Spacing and Extent primitives
//! - **[`event`]**: Signals, the publisher and backend input translation
//! - **[`damage`]**: Per-attribute change counters
//! - **[`style`]**: Shared, reference-counted styles
//! - **[`tree`]**: Slotmap-backed widget arena
//! - **[`layout`]**: Free, Relative, Vertical and Horizontal layouts
//! - **[`render`]**: Backend trait and the stock renderers
//! - **[`window`]**: MainWindow: widget operations, focus, input, draw
//! - **[`testing`]**: Headless backend and Pilot

// Foundation
pub mod geometry;

// Events and state
pub mod damage;
pub mod event;
pub mod style;
pub mod tree;

// Layout and rendering
pub mod layout;
pub mod render;

// Window
pub mod window;

// Testing
pub mod testing;

pub use event::{Arg, Attr, Button, Event, Signal};
pub use geometry::{Extent, Offset, Rect, Spacing};
pub use layout::{Layout, LayoutKind};
pub use style::{Color, Overflow, Style, StyleId};
pub use tree::{TreeError, WidgetId};
pub use window::{MainWindow, WindowConfig};
