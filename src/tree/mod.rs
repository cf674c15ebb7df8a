//! Widget arena: ids, node state, tree structure.

pub mod arena;
pub mod node;

pub use arena::WidgetTree;
pub use node::{CompoundState, ContainerState, Node, NodeKind, WidgetId, WidgetState};

use crate::style::StyleId;

/// Structural failures of tree operations. Returned, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("widget {0:?} does not exist")]
    Missing(WidgetId),
    #[error("style {0:?} does not exist")]
    MissingStyle(StyleId),
    #[error("widget {0:?} is not a container")]
    NotAContainer(WidgetId),
    #[error("widget {child:?} is not a child of {container:?}")]
    NotAChild { container: WidgetId, child: WidgetId },
    #[error("adding {child:?} to {container:?} would create a cycle")]
    Cycle { container: WidgetId, child: WidgetId },
    #[error("the window root cannot be reparented or destroyed")]
    Root,
    #[error("widget {0:?} is the private container of a compound widget")]
    Internal(WidgetId),
}
