//! Headless testing framework: recording backend and Pilot.
//!
//! Use the [`Pilot`] to drive a [`MainWindow`](crate::window::MainWindow)
//! without a real display. Use the [`HeadlessBackend`] directly when a test
//! needs finer control over the window it builds.

pub mod backend;
pub mod pilot;

pub use backend::{DrawCommand, HeadlessBackend, CHAR_WIDTH};
pub use pilot::Pilot;
