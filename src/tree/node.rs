//! Node types: WidgetId, WidgetState, NodeKind, Node.

use std::collections::HashMap;
use std::fmt;

use slotmap::new_key_type;

use crate::damage::Damage;
use crate::event::{Publisher, Subscription};
use crate::geometry::{Extent, Rect};
use crate::layout::Layout;
use crate::style::StyleId;
use crate::window::MainWindow;

new_key_type! {
    /// Unique identifier for a widget in the window's arena. Copy, lightweight (u64).
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// WidgetState
// ---------------------------------------------------------------------------

/// Per-widget attributes shared by every node kind.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Bounding box in window coordinates.
    pub rect: Rect,
    /// Focus and hit-testing precedence; never affects paint order.
    pub z: f64,
    pub enabled: bool,
    pub visible: bool,
    pub activatable: bool,
    pub draggable: bool,
    /// Opted out of positioning by the parent's layout.
    pub floating: bool,
    /// Skip the renderer when the widget is not damaged (and the window
    /// throttles too).
    pub throttle_render: bool,
    pub auto_size_width: bool,
    pub auto_size_height: bool,
    pub text: String,
    pub style: StyleId,
    pub label: Option<WidgetId>,
    /// The root of the window this widget is attached to.
    pub window: Option<WidgetId>,
    pub(crate) style_link: Option<Subscription>,
    pub(crate) label_link: Option<Subscription>,
}

impl WidgetState {
    pub(crate) fn new(style: StyleId) -> Self {
        Self {
            rect: Rect::EMPTY,
            z: 0.0,
            enabled: true,
            visible: true,
            activatable: true,
            draggable: false,
            floating: false,
            throttle_render: true,
            auto_size_width: true,
            auto_size_height: true,
            text: String::new(),
            style,
            label: None,
            window: None,
            style_link: None,
            label_link: None,
        }
    }

    /// Both axes size themselves.
    pub fn auto_size(&self) -> bool {
        self.auto_size_width && self.auto_size_height
    }
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Container-only state.
pub struct ContainerState {
    pub(crate) layout: Option<Box<dyn Layout>>,
    pub auto_z_order: bool,
    /// Extent reported by the last layout pass.
    pub extent: Extent,
    /// Forwarding subscriptions on each child's `Modified` event.
    pub(crate) links: HashMap<WidgetId, Subscription>,
}

impl ContainerState {
    pub(crate) fn new(layout: Box<dyn Layout>) -> Self {
        Self {
            layout: Some(layout),
            auto_z_order: true,
            extent: Extent::ZERO,
            links: HashMap::new(),
        }
    }

    /// The active layout, unless it is currently running.
    pub fn layout(&self) -> Option<&dyn Layout> {
        self.layout.as_deref()
    }
}

impl fmt::Debug for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerState")
            .field("layout", &self.layout)
            .field("auto_z_order", &self.auto_z_order)
            .field("extent", &self.extent)
            .field("links", &self.links.len())
            .finish()
    }
}

/// Compound-only state.
#[derive(Debug, Clone, Copy)]
pub struct CompoundState {
    /// The privately owned container hosting the sub-widgets.
    pub container: WidgetId,
    /// Re-region the internal container to the compound's bounds on draw.
    pub auto_size_container: bool,
    pub(crate) link: Option<Subscription>,
}

/// What a node is, beyond its widget attributes.
#[derive(Debug)]
pub enum NodeKind {
    Widget,
    Container(ContainerState),
    Compound(CompoundState),
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A widget in the arena: its attributes, damage state, publisher and kind.
#[derive(Debug)]
pub struct Node {
    pub state: WidgetState,
    pub damage: Damage,
    pub publisher: Publisher<MainWindow>,
    pub kind: NodeKind,
}

impl Node {
    pub(crate) fn new(id: WidgetId, style: StyleId, kind: NodeKind) -> Self {
        Self {
            state: WidgetState::new(style),
            damage: Damage::new(),
            publisher: Publisher::new(id),
            kind,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.kind, NodeKind::Compound(_))
    }

    pub fn container_state(&self) -> Option<&ContainerState> {
        match &self.kind {
            NodeKind::Container(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn container_state_mut(&mut self) -> Option<&mut ContainerState> {
        match &mut self.kind {
            NodeKind::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn compound_state(&self) -> Option<&CompoundState> {
        match &self.kind {
            NodeKind::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn compound_state_mut(&mut self) -> Option<&mut CompoundState> {
        match &mut self.kind {
            NodeKind::Compound(c) => Some(c),
            _ => None,
        }
    }
}
