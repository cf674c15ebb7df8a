//! Renderers paint a single widget through the backend.
//!
//! A style selects its [`Renderer`]. The window hands it a [`WidgetView`],
//! a read-only snapshot of the attributes a renderer may need, and lets it
//! suggest a natural size for auto-sizing widgets.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::geometry::Rect;
use crate::style::{Align, Color, Font, Style, VerticalAlign};
use crate::tree::WidgetId;

use super::backend::{corners, Backend, FontHandle, ImageHandle, ResourceError};

// ---------------------------------------------------------------------------
// WidgetView
// ---------------------------------------------------------------------------

/// What a renderer sees of a widget.
#[derive(Debug, Clone, Copy)]
pub struct WidgetView<'a> {
    pub id: WidgetId,
    pub rect: Rect,
    pub z: f64,
    pub text: &'a str,
    pub style: &'a Style,
    pub enabled: bool,
    pub focused: bool,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Paints widgets.
pub trait Renderer: fmt::Debug {
    /// Draw `widget`. Resource failures propagate to the caller.
    fn draw(&self, backend: &mut dyn Backend, widget: &WidgetView<'_>) -> Result<(), ResourceError>;

    /// The natural `(width, height)` of `widget`, if the renderer has one.
    fn suggested_size(
        &self,
        _backend: &mut dyn Backend,
        _widget: &WidgetView<'_>,
    ) -> Result<Option<(i32, i32)>, ResourceError> {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// One loaded font, reloaded when the requested family or size changes.
#[derive(Debug, Default)]
pub struct FontCache {
    slot: RefCell<Option<(Font, FontHandle)>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for `font`, loading it on first use.
    pub fn handle(
        &self,
        backend: &mut dyn Backend,
        font: &Font,
    ) -> Result<FontHandle, ResourceError> {
        let mut slot = self.slot.borrow_mut();
        if let Some((cached, handle)) = slot.as_ref() {
            if cached.family == font.family && cached.size == font.size {
                return Ok(*handle);
            }
        }
        if let Some((_, old)) = slot.take() {
            backend.unload_font(old);
        }
        let handle = backend.load_font(&font.family, font.size)?;
        *slot = Some((font.clone(), handle));
        Ok(handle)
    }
}

/// Draw the widget's text inside its padded box, honouring alignment and
/// line spacing. Each `\n`-separated line is placed independently.
pub fn draw_text(
    backend: &mut dyn Backend,
    fonts: &FontCache,
    widget: &WidgetView<'_>,
) -> Result<(), ResourceError> {
    if widget.text.is_empty() {
        return Ok(());
    }
    let style = widget.style;
    let font = fonts.handle(backend, &style.font)?;
    let area = widget.rect.shrink(style.padding);
    let line_height = i32::try_from(style.font.size).unwrap_or(i32::MAX);

    let lines: Vec<&str> = widget.text.lines().collect();
    let count = lines.len() as i32;
    let block = count * line_height + (count - 1).max(0) * style.line_spacing;
    let top = match style.vertical_align {
        VerticalAlign::Top => area.y1,
        VerticalAlign::Middle => area.y1 + (area.height() - block) / 2,
        VerticalAlign::Bottom => area.y2 - block,
    };

    for (i, line) in lines.iter().enumerate() {
        let width = backend.text_width(font, line);
        let x = match style.align {
            Align::Left => area.x1,
            Align::Center => area.x1 + (area.width() - width) / 2,
            Align::Right => area.x2 - width,
        };
        let y = top + i as i32 * (line_height + style.line_spacing);
        backend.draw_text(font, x, y, line, style.font.color);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SolidRenderer
// ---------------------------------------------------------------------------

/// Fills the widget's box with a colour, then draws its text.
#[derive(Debug)]
pub struct SolidRenderer {
    color: Color,
    fonts: FontCache,
}

impl SolidRenderer {
    pub fn new(color: Color) -> Self {
        Self { color, fonts: FontCache::new() }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Renderer for SolidRenderer {
    fn draw(
        &self,
        backend: &mut dyn Backend,
        widget: &WidgetView<'_>,
    ) -> Result<(), ResourceError> {
        backend.draw_rect(widget.rect, self.color);
        draw_text(backend, &self.fonts, widget)
    }
}

// ---------------------------------------------------------------------------
// ImageRenderer
// ---------------------------------------------------------------------------

/// Draws an image at the widget's origin, then its text.
///
/// With `auto_size` the image keeps its natural size; otherwise it is
/// stretched over the widget's box. The image is loaded on first use.
#[derive(Debug)]
pub struct ImageRenderer {
    path: String,
    auto_size: bool,
    image: Cell<Option<ImageHandle>>,
    fonts: FontCache,
}

impl ImageRenderer {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            auto_size: false,
            image: Cell::new(None),
            fonts: FontCache::new(),
        }
    }

    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn image(&self, backend: &mut dyn Backend) -> Result<ImageHandle, ResourceError> {
        if let Some(handle) = self.image.get() {
            return Ok(handle);
        }
        let handle = backend.load_image(&self.path)?;
        self.image.set(Some(handle));
        Ok(handle)
    }
}

impl Renderer for ImageRenderer {
    fn draw(
        &self,
        backend: &mut dyn Backend,
        widget: &WidgetView<'_>,
    ) -> Result<(), ResourceError> {
        let image = self.image(backend)?;
        if self.auto_size {
            backend.draw_image(image, widget.rect.x1, widget.rect.y1, Color::WHITE);
        } else {
            backend.draw_image_stretched(image, corners(widget.rect), Color::WHITE);
        }
        draw_text(backend, &self.fonts, widget)
    }

    fn suggested_size(
        &self,
        backend: &mut dyn Backend,
        _widget: &WidgetView<'_>,
    ) -> Result<Option<(i32, i32)>, ResourceError> {
        let image = self.image(backend)?;
        Ok(Some(backend.image_size(image)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCommand, HeadlessBackend};
    use slotmap::SlotMap;

    fn view<'a>(style: &'a Style, text: &'a str, rect: Rect) -> WidgetView<'a> {
        let mut sm: SlotMap<WidgetId, ()> = SlotMap::with_key();
        WidgetView {
            id: sm.insert(()),
            rect,
            z: 0.0,
            text,
            style,
            enabled: true,
            focused: false,
            active: false,
        }
    }

    // ── SolidRenderer ────────────────────────────────────────────────

    #[test]
    fn solid_fills_box() {
        let backend = HeadlessBackend::new(100, 100);
        let mut b = backend.clone();
        let style = Style::new();
        let r = SolidRenderer::new(Color::rgb(1, 2, 3));
        r.draw(&mut b, &view(&style, "", Rect::new(0, 0, 10, 10))).unwrap();
        assert_eq!(
            backend.commands(),
            vec![DrawCommand::Rect { rect: Rect::new(0, 0, 10, 10), color: Color::rgb(1, 2, 3) }]
        );
    }

    #[test]
    fn solid_draws_centred_text() {
        // Headless text is 10px per char.
        let backend = HeadlessBackend::new(100, 100);
        let mut b = backend.clone();
        let style = Style::new();
        let r = SolidRenderer::new(Color::WHITE);
        r.draw(&mut b, &view(&style, "ab", Rect::new(0, 0, 100, 40))).unwrap();
        let cmds = backend.commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            DrawCommand::Text { x: 40, y: 10, text: "ab".into(), color: Color::BLACK }
        );
    }

    #[test]
    fn left_top_alignment_uses_padding() {
        let backend = HeadlessBackend::new(100, 100);
        let mut b = backend.clone();
        let style = Style::new()
            .with_padding(crate::geometry::Spacing::new(2, 0, 0, 3))
            .with_align(Align::Left)
            .with_vertical_align(VerticalAlign::Top);
        let r = SolidRenderer::new(Color::WHITE);
        r.draw(&mut b, &view(&style, "x\ny", Rect::new(10, 10, 60, 90))).unwrap();
        let texts: Vec<_> = backend
            .commands()
            .into_iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .collect();
        assert_eq!(
            texts,
            vec![
                DrawCommand::Text { x: 13, y: 12, text: "x".into(), color: Color::BLACK },
                DrawCommand::Text { x: 13, y: 32, text: "y".into(), color: Color::BLACK },
            ]
        );
    }

    #[test]
    fn missing_font_propagates() {
        let backend = HeadlessBackend::new(100, 100);
        backend.mark_font_missing("Verdana");
        let mut b = backend.clone();
        let style = Style::new();
        let r = SolidRenderer::new(Color::WHITE);
        let err = r.draw(&mut b, &view(&style, "hi", Rect::new(0, 0, 10, 10))).unwrap_err();
        assert_eq!(err, ResourceError::FontUnavailable { family: "Verdana".into(), size: 20 });
    }

    #[test]
    fn font_cache_reuses_handle() {
        let mut backend = HeadlessBackend::new(10, 10);
        let cache = FontCache::new();
        let font = Font::default();
        let a = cache.handle(&mut backend, &font).unwrap();
        let b = cache.handle(&mut backend, &font).unwrap();
        assert_eq!(a, b);
        assert_eq!(backend.loaded_fonts(), 1);
        let bigger = Font::new("Verdana", 30, Color::BLACK);
        cache.handle(&mut backend, &bigger).unwrap();
        assert_eq!(backend.loaded_fonts(), 1);
    }

    // ── ImageRenderer ────────────────────────────────────────────────

    #[test]
    fn image_suggests_natural_size() {
        let mut backend = HeadlessBackend::new(100, 100);
        backend.add_image("logo.png", 32, 16);
        let style = Style::new();
        let r = ImageRenderer::new("logo.png");
        let size = r.suggested_size(&mut backend, &view(&style, "", Rect::EMPTY)).unwrap();
        assert_eq!(size, Some((32, 16)));
    }

    #[test]
    fn image_stretches_unless_auto_sized() {
        let backend = HeadlessBackend::new(100, 100);
        backend.add_image("a.png", 4, 4);
        let mut b = backend.clone();
        let style = Style::new();
        let rect = Rect::new(0, 0, 20, 20);

        ImageRenderer::new("a.png").draw(&mut b, &view(&style, "", rect)).unwrap();
        ImageRenderer::new("a.png")
            .with_auto_size(true)
            .draw(&mut b, &view(&style, "", rect))
            .unwrap();
        let cmds = backend.commands();
        assert!(matches!(cmds[0], DrawCommand::ImageStretched { .. }));
        assert!(matches!(cmds[1], DrawCommand::Image { x: 0, y: 0, .. }));
    }

    #[test]
    fn missing_image_propagates() {
        let mut backend = HeadlessBackend::new(100, 100);
        let style = Style::new();
        let err = ImageRenderer::new("nope.png")
            .draw(&mut backend, &view(&style, "", Rect::EMPTY))
            .unwrap_err();
        assert_eq!(err, ResourceError::ImageUnavailable { path: "nope.png".into() });
    }
}
