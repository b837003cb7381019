//! Core data structures for the score tree
//!
//! Components live in an arena owned by [`crate::score::Score`]. A component
//! refers to its parent and children by [`ComponentId`] handle, and a leaf
//! refers to the spanners attached to it by [`SpannerId`] handle, so there
//! are no owning cycles anywhere in the graph.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use super::duration::Duration;
pub use super::elements::{ContainerKind, LeafKind, Mark};

/// Stable handle of a component in its score's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub(crate) usize);

/// Stable handle of a spanner in its score's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpannerId(pub(crate) usize);

impl ComponentId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl SpannerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl fmt::Display for SpannerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spanner#{}", self.0)
    }
}

/// Terminal component carrying a duration
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub kind: LeafKind,

    /// Written duration (before tuplet scaling)
    pub duration: Duration,

    pub marks: Vec<Mark>,

    /// Active spanners referencing this leaf, in attachment order
    pub(crate) spanners: Vec<SpannerId>,
}

impl Leaf {
    pub fn new(kind: LeafKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            marks: Vec::new(),
            spanners: Vec::new(),
        }
    }

    /// Spanners attached to this leaf, in attachment order
    pub fn spanners(&self) -> &[SpannerId] {
        &self.spanners
    }
}

/// Component owning an ordered list of children
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub kind: ContainerKind,
    pub(crate) children: Vec<ComponentId>,
}

impl Container {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentBody {
    Leaf(Leaf),
    Container(Container),
}

/// One node of the score tree
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub(crate) parent: Option<ComponentId>,
    pub body: ComponentBody,
}

impl Component {
    pub fn leaf(leaf: Leaf) -> Self {
        Self {
            parent: None,
            body: ComponentBody::Leaf(leaf),
        }
    }

    pub fn container(container: Container) -> Self {
        Self {
            parent: None,
            body: ComponentBody::Container(container),
        }
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.body, ComponentBody::Leaf(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.body, ComponentBody::Container(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.body {
            ComponentBody::Leaf(leaf) => Some(leaf),
            ComponentBody::Container(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match &mut self.body {
            ComponentBody::Leaf(leaf) => Some(leaf),
            ComponentBody::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.body {
            ComponentBody::Container(container) => Some(container),
            ComponentBody::Leaf(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.body {
            ComponentBody::Container(container) => Some(container),
            ComponentBody::Leaf(_) => None,
        }
    }

    /// Direct children; empty for leaves
    pub fn children(&self) -> &[ComponentId] {
        match &self.body {
            ComponentBody::Container(container) => &container.children,
            ComponentBody::Leaf(_) => &[],
        }
    }
}
