//! Component Registry - the render context every node is created in.
//!
//! Tracks:
//! - every live node constructed through it (weak, for lifecycle passes)
//! - the id counter behind auto-generated ids
//! - the scoped stylesheet side channel
//! - the render configuration
//!
//! A `Registry` is a cheap handle; clones share the same context. Separate
//! registries are fully independent, so tests and pages can each own one.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::pipeline::config::RenderConfig;
use crate::pipeline::host::HostSurface;
use crate::style::StyleSheet;
use crate::types::StyleMap;

use super::node::{Node, NodeInner};

// =============================================================================
// Registry State
// =============================================================================

struct RegistryInner {
    config: RenderConfig,
    /// Registration order. Stale entries are swept on the next register.
    nodes: RefCell<Vec<Weak<NodeInner>>>,
    registered: Cell<usize>,
    /// Counter for generating unique IDs.
    id_counter: Cell<usize>,
    stylesheet: RefCell<StyleSheet>,
}

/// Shared render context.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryInner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                config,
                nodes: RefCell::new(Vec::new()),
                registered: Cell::new(0),
                id_counter: Cell::new(0),
                stylesheet: RefCell::new(StyleSheet::new()),
            }),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.inner.config
    }

    /// Generate the next unique node id.
    pub fn next_id(&self) -> String {
        let n = self.inner.id_counter.get();
        self.inner.id_counter.set(n + 1);
        format!("{}{}", self.inner.config.id_prefix, n)
    }

    // =========================================================================
    // Node tracking
    // =========================================================================

    pub(crate) fn register(&self, node: &Node) {
        let mut nodes = self.inner.nodes.borrow_mut();
        nodes.retain(|w| w.strong_count() > 0);
        nodes.push(node.downgrade());
        self.inner.registered.set(self.inner.registered.get() + 1);
    }

    /// Live nodes in registration order.
    pub fn nodes(&self) -> Vec<Node> {
        self.inner
            .nodes
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .map(Node::from_inner)
            .collect()
    }

    /// Number of live nodes.
    pub fn live_count(&self) -> usize {
        self.inner
            .nodes
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Number of nodes ever registered, live or not.
    pub fn registered_count(&self) -> usize {
        self.inner.registered.get()
    }

    /// First live node registered with this id.
    ///
    /// A mounted node and its rendered wrapper share an id; the node itself
    /// was registered first and is the one returned.
    pub fn find(&self, id: &str) -> Option<Node> {
        self.nodes().into_iter().find(|node| node.id() == id)
    }

    /// Document-ready pass: run `on_load` on every live node, in
    /// registration order.
    pub fn load(&self, host: &dyn HostSurface) {
        let nodes = self.nodes();
        trace!(count = nodes.len(), "load pass");
        for node in &nodes {
            node.on_load(host);
        }
    }

    // =========================================================================
    // Stylesheet
    // =========================================================================

    /// Append a `#<id> {...}` rule for a node.
    pub fn add_style(&self, node: &Node, declarations: &StyleMap) {
        self.inner
            .stylesheet
            .borrow_mut()
            .add_rule(&node.id(), declarations);
    }

    /// The accumulated stylesheet text.
    pub fn stylesheet(&self) -> String {
        self.inner.stylesheet.borrow().as_str().to_string()
    }

    pub fn style_rule_count(&self) -> usize {
        self.inner.stylesheet.borrow().len()
    }
}

// =============================================================================
// Tests
// =============================================================================
