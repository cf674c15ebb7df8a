//! Signal vocabulary: event kinds, arguments, attribute names, sources.
//!
//! A [`Signal`] is what a publisher hands to each matching handler: the event
//! kind, the object that emitted it, and an ordered argument list. Handlers
//! subscribed with modifiers only fire when every modifier is present in the
//! argument list.

use crate::event::input::{Button, DragPhase, MouseButton};
use crate::style::StyleId;
use crate::tree::WidgetId;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// The kind of a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// The widget gained cursor focus.
    Focus,
    /// The widget lost cursor focus.
    Blur,
    /// The widget was latched as the active widget.
    Activate,
    /// The widget stopped being the active widget.
    Deactivate,
    /// `[MouseButton, x?, y?]`
    MouseDown,
    /// `[MouseButton, x, y]`
    MouseUp,
    /// `[x, y]`, synthesized after a left `MouseUp`.
    Click,
    /// `[DragPhase, x|dx, y|dy]`
    MouseDrag,
    /// `[dx, dy]`, fired alongside `MouseDrag(Continue)`.
    Drag,
    /// `[Button]` for any non-mouse input.
    ButtonDown,
    /// `[Button]` for any non-mouse input.
    ButtonUp,
    /// Fired every tick.
    Update,
    /// Fired after the widget was drawn.
    Draw,
    /// `[Attr]`, raised by damage tracking.
    Modified,
    /// Application-defined event.
    Custom(&'static str),
}

// ---------------------------------------------------------------------------
// Attr
// ---------------------------------------------------------------------------

/// Names the attribute whose mutation raised a `Modified` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Region,
    X,
    Y,
    X1,
    Y1,
    X2,
    Y2,
    Z,
    Width,
    Height,
    Enabled,
    Visible,
    Focused,
    Active,
    Floating,
    Activatable,
    Draggable,
    ThrottleRender,
    AutoSize,
    Text,
    Style,
    Label,
    Children,
    Layout,
    AutoZOrder,
    Container,
    AutoSizeContainer,
}

// ---------------------------------------------------------------------------
// Arg
// ---------------------------------------------------------------------------

/// A single signal argument. Modifier matching compares arguments by equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Mouse(MouseButton),
    Button(Button),
    Drag(DragPhase),
    Int(i32),
    Attr(Attr),
    Symbol(&'static str),
    Text(String),
}

impl From<MouseButton> for Arg {
    fn from(b: MouseButton) -> Self {
        Arg::Mouse(b)
    }
}

impl From<Button> for Arg {
    fn from(b: Button) -> Self {
        Arg::Button(b)
    }
}

impl From<DragPhase> for Arg {
    fn from(p: DragPhase) -> Self {
        Arg::Drag(p)
    }
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Int(v)
    }
}

impl From<Attr> for Arg {
    fn from(a: Attr) -> Self {
        Arg::Attr(a)
    }
}

impl From<&'static str> for Arg {
    fn from(s: &'static str) -> Self {
        Arg::Symbol(s)
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// The observable object a signal was emitted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Widget(WidgetId),
    Style(StyleId),
}

impl From<WidgetId> for Source {
    fn from(id: WidgetId) -> Self {
        Source::Widget(id)
    }
}

impl From<StyleId> for Source {
    fn from(id: StyleId) -> Self {
        Source::Style(id)
    }
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// An emitted event as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub event: Event,
    pub source: Source,
    pub args: Vec<Arg>,
}

impl Signal {
    /// Create a new signal.
    pub fn new(event: Event, source: impl Into<Source>, args: Vec<Arg>) -> Self {
        Self { event, source: source.into(), args }
    }

    /// The emitting widget, if the source is a widget.
    pub fn widget(&self) -> Option<WidgetId> {
        match self.source {
            Source::Widget(id) => Some(id),
            Source::Style(_) => None,
        }
    }

    /// The integer argument at `index`, if there is one.
    pub fn int(&self, index: usize) -> Option<i32> {
        match self.args.get(index) {
            Some(Arg::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// The attribute carried by a `Modified` signal.
    pub fn attr(&self) -> Option<Attr> {
        self.args.iter().find_map(|a| match a {
            Arg::Attr(attr) => Some(*attr),
            _ => None,
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
