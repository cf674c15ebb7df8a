//! Tree operations: insert, attach, detach, walk, remove.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Node, NodeKind, WidgetId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

/// The widget arena.
///
/// All widgets live in a single `SlotMap`. Child lists exist only for
/// containers and keep insertion order. A compound widget's internal
/// container has the compound as its parent but does not appear in any child
/// list.
#[derive(Debug)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Insert an unattached node built from its own id.
    pub fn insert_with(&mut self, build: impl FnOnce(WidgetId) -> Node) -> WidgetId {
        let id = self.nodes.insert_with_key(build);
        let is_container = self.nodes.get(id).is_some_and(Node::is_container);
        if is_container {
            self.children.insert(id, Vec::new());
        }
        id
    }

    /// Immutable access to a node.
    pub fn get(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Children of a container, in insertion order. Empty for anything else.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// The internal container of a compound widget.
    pub fn internal_container(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes
            .get(id)
            .and_then(Node::compound_state)
            .map(|c| c.container)
    }

    /// Whether `id` is the internal container of some compound widget.
    pub fn is_internal(&self, id: WidgetId) -> bool {
        self.parent(id)
            .and_then(|p| self.internal_container(p))
            .is_some_and(|c| c == id)
    }

    /// Walk from `id` up to the topmost ancestor.
    ///
    /// The returned vec does **not** include `id` itself. Compound widgets
    /// count as the parent of their internal container.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Append `child` to `container`'s child list.
    ///
    /// The caller has already detached `child` and checked for cycles.
    pub(crate) fn attach(&mut self, container: WidgetId, child: WidgetId) -> bool {
        let Some(list) = self.children.get_mut(container) else {
            return false;
        };
        list.push(child);
        self.parent.insert(child, container);
        true
    }

    /// Record `internal` as the private container of `compound`.
    pub(crate) fn adopt_internal(&mut self, compound: WidgetId, internal: WidgetId) {
        self.parent.insert(internal, compound);
    }

    /// Remove `child` from its parent's child list, preserving the order of
    /// the remaining children. Returns the former parent.
    pub(crate) fn detach(&mut self, child: WidgetId) -> Option<WidgetId> {
        let parent = self.parent.get(child).copied()?;
        let list = self.children.get_mut(parent)?;
        let index = list.iter().position(|&c| c == child)?;
        list.remove(index);
        self.parent.remove(child);
        Some(parent)
    }

    /// Empty a container's child list, returning the former children.
    pub(crate) fn detach_all(&mut self, container: WidgetId) -> Vec<WidgetId> {
        let Some(list) = self.children.get_mut(container) else {
            return Vec::new();
        };
        let former = std::mem::take(list);
        for &child in &former {
            self.parent.remove(child);
        }
        former
    }

    /// Pre-order depth-first walk of the children of `start`, descending into
    /// nested containers (but not into compound internals).
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack: Vec<WidgetId> = self.children(start).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Every node owned by `id`: itself, its children and compound
    /// internals, recursively. Breadth-first.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            result.push(current);
            queue.extend(self.children(current).iter().copied());
            if let NodeKind::Compound(c) = &node.kind {
                queue.push_back(c.container);
            }
        }
        result
    }

    /// Remove `id` and everything it owns from the arena.
    ///
    /// Detaches `id` from its parent first. Returns the removed nodes,
    /// `id` first.
    pub(crate) fn remove_subtree(&mut self, id: WidgetId) -> Vec<(WidgetId, Node)> {
        self.detach(id);
        let ids = self.subtree(id);
        let mut removed = Vec::with_capacity(ids.len());
        for current in ids {
            self.children.remove(current);
            self.parent.remove(current);
            if let Some(node) = self.nodes.remove(current) {
                removed.push((current, node));
            }
        }
        removed
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}
