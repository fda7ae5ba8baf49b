//! Component behavior - what a node does beyond being markup.
//!
//! Every [`Node`] carries one boxed [`Component`]. Plain tags use
//! [`Plain`]; class-style components are types implementing
//! [`ComponentClass`], instantiated by the element factory with their
//! `NAME` as tag.

use crate::pipeline::host::HostSurface;
use crate::types::{Attributes, StyleMap};

use super::node::Node;

/// Per-type behavior of a node.
///
/// All methods have defaults: identity render, no extra style, no-op
/// mount/create hooks, and listener attachment on load.
pub trait Component: 'static {
    /// Extra style declarations, resolved through the alias table.
    ///
    /// Called once, during construction, before the node exists.
    fn style(&self, _attributes: &Attributes) -> StyleMap {
        StyleMap::new()
    }

    /// Layout components wrap their children in a container on render and
    /// are flattened one level when nested in another layout.
    fn is_layout(&self) -> bool {
        false
    }

    /// Produce what is displayed for `node`. Identity by default.
    fn render(&self, node: &Node) -> Node {
        node.clone()
    }

    /// Runs at the end of construction.
    fn on_mount(&self, _node: &Node) {}

    /// Runs after the node was mounted into a host.
    fn on_create(&self, _node: &Node) {}

    /// Runs on the document-ready pass.
    fn on_load(&self, node: &Node, host: &dyn HostSurface) {
        node.attach_listeners(host);
    }
}

/// A component type the element factory can instantiate.
pub trait ComponentClass: Component + Default {
    /// Tag name used for instances (the type's own name).
    const NAME: &'static str;
}

/// Behavior of plain tag elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Component for Plain {}
