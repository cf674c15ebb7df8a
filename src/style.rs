//! Visual and layout style of widgets, and the registry that owns styles.
//!
//! A [`Style`] controls how a widget is laid out inside its parent (margin,
//! alignment), how its own children overflow (per-axis [`Overflow`]), how
//! its text is set (padding, font, line spacing) and which [`Renderer`]
//! paints it.
//!
//! Styles live in a [`StyleRegistry`] owned by the window and are observable:
//! updating a style damages it, and every widget holding the style is damaged
//! in turn.

use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::damage::Damage;
use crate::event::Publisher;
use crate::geometry::Spacing;
use crate::render::{ImageRenderer, Renderer, SolidRenderer};
use crate::window::MainWindow;

new_key_type! {
    /// Handle to a style inside a [`StyleRegistry`].
    pub struct StyleId;
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What a container does with content that exceeds its padded content box
/// along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    /// Flow layouts wrap; anything still outside is clipped.
    #[default]
    Auto,
    /// Never clip.
    Show,
    /// Clip at the padded content edge.
    Hide,
    /// Clip; an external scrollbar consumes the clipped extent.
    Scroll,
    /// Grow the container to fit its content.
    Stretch,
}

/// Horizontal alignment of text (and of a child inside a vertical flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment of text (and of a child inside a horizontal flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// Font family, pixel size and colour used for widget text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: String,
    pub size: u32,
    pub color: Color,
}

impl Font {
    pub const DEFAULT_FAMILY: &'static str = "Verdana";
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(family: impl Into<String>, size: u32, color: Color) -> Self {
        Self { family: family.into(), size, color }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAMILY, Self::DEFAULT_SIZE, Color::BLACK)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Layout and rendering attributes of a widget.
#[derive(Clone)]
pub struct Style {
    /// Space kept between the widget and its siblings in flow layouts.
    pub margin: Spacing,
    /// Space between the widget's border and its content.
    pub padding: Spacing,
    pub horizontal_overflow: Overflow,
    pub vertical_overflow: Overflow,
    pub align: Align,
    pub vertical_align: VerticalAlign,
    pub line_spacing: i32,
    pub font: Font,
    /// Fill colour, when painted by a [`SolidRenderer`].
    pub color: Option<Color>,
    /// Image path, when painted by an [`ImageRenderer`].
    pub image: Option<String>,
    pub renderer: Option<Rc<dyn Renderer>>,
}

impl Style {
    /// The default widget style: margin 5, no padding, centred text.
    pub fn new() -> Self {
        Self {
            margin: Spacing::all(5),
            padding: Spacing::ZERO,
            horizontal_overflow: Overflow::Auto,
            vertical_overflow: Overflow::Auto,
            align: Align::Center,
            vertical_align: VerticalAlign::Middle,
            line_spacing: 0,
            font: Font::default(),
            color: None,
            image: None,
            renderer: None,
        }
    }

    /// The default container style.
    pub fn container() -> Self {
        Self::new()
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    /// Set the same overflow policy on both axes.
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.horizontal_overflow = overflow;
        self.vertical_overflow = overflow;
        self
    }

    pub fn with_horizontal_overflow(mut self, overflow: Overflow) -> Self {
        self.horizontal_overflow = overflow;
        self
    }

    pub fn with_vertical_overflow(mut self, overflow: Overflow) -> Self {
        self.vertical_overflow = overflow;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    pub fn with_line_spacing(mut self, spacing: i32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Paint the widget as a solid rectangle of `color`.
    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    /// Paint the widget with the image at `path`, sized to the image.
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.set_image(path);
        self
    }

    /// Paint the widget with an arbitrary renderer.
    pub fn with_renderer(mut self, renderer: Rc<dyn Renderer>) -> Self {
        self.set_renderer(Some(renderer));
        self
    }

    /// Replace the renderer. Clears any colour or image shorthand.
    pub fn set_renderer(&mut self, renderer: Option<Rc<dyn Renderer>>) {
        self.color = None;
        self.image = None;
        self.renderer = renderer;
    }

    pub fn set_color(&mut self, color: Color) {
        self.image = None;
        self.color = Some(color);
        self.renderer = Some(Rc::new(SolidRenderer::new(color)));
    }

    pub fn set_image(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.color = None;
        self.renderer = Some(Rc::new(ImageRenderer::new(path.clone()).with_auto_size(true)));
        self.image = Some(path);
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("margin", &self.margin)
            .field("padding", &self.padding)
            .field("horizontal_overflow", &self.horizontal_overflow)
            .field("vertical_overflow", &self.vertical_overflow)
            .field("align", &self.align)
            .field("vertical_align", &self.vertical_align)
            .field("line_spacing", &self.line_spacing)
            .field("font", &self.font)
            .field("color", &self.color)
            .field("image", &self.image)
            .field("renderer", &self.renderer)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// StyleRegistry
// ---------------------------------------------------------------------------

/// A registered style plus its observable state.
#[derive(Debug)]
pub struct StyleEntry {
    pub style: Style,
    pub damage: Damage,
    pub publisher: Publisher<MainWindow>,
    /// Number of widgets currently holding the style.
    pub(crate) holders: usize,
    /// Private styles are freed once no widget holds them.
    pub(crate) private: bool,
}

/// Arena of observable styles.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    entries: SlotMap<StyleId, StyleEntry>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared style. Shared styles outlive the widgets using them.
    pub fn insert(&mut self, style: Style) -> StyleId {
        self.insert_entry(style, false)
    }

    /// Register a style that is freed with its last holder.
    pub(crate) fn insert_private(&mut self, style: Style) -> StyleId {
        self.insert_entry(style, true)
    }

    fn insert_entry(&mut self, style: Style, private: bool) -> StyleId {
        self.entries.insert_with_key(|id| StyleEntry {
            style,
            damage: Damage::new(),
            publisher: Publisher::new(id),
            holders: 0,
            private,
        })
    }

    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.entries.get(id).map(|e| &e.style)
    }

    pub fn entry(&self, id: StyleId) -> Option<&StyleEntry> {
        self.entries.get(id)
    }

    pub(crate) fn entry_mut(&mut self, id: StyleId) -> Option<&mut StyleEntry> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: StyleId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record one more widget holding `id`.
    pub(crate) fn retain(&mut self, id: StyleId) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.holders += 1;
        }
    }

    /// Record one fewer holder; frees a private style left without holders.
    /// Returns `true` if the style was freed.
    pub(crate) fn release(&mut self, id: StyleId) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.holders = entry.holders.saturating_sub(1);
        if entry.private && entry.holders == 0 {
            self.entries.remove(id);
            return true;
        }
        false
    }

    /// Remove a style outright. Widgets still holding it fall back to
    /// drawing nothing.
    pub fn remove(&mut self, id: StyleId) -> Option<Style> {
        self.entries.remove(id).map(|e| e.style)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
