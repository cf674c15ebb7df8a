//! Rendering: backend capability, resource errors, widget renderers.

pub mod backend;
pub mod renderer;

pub use backend::{corners, Backend, FontHandle, ImageHandle, ResourceError};
pub use renderer::{draw_text, FontCache, ImageRenderer, Renderer, SolidRenderer, WidgetView};
