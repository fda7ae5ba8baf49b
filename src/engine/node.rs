//! Node - the component tree entity.
//!
//! A node is a tag, an ordered attribute map (always holding a unique `id`),
//! ordered child content, and the classes and inline style resolved once at
//! construction. Nodes are cheap `Rc` handles; cloning shares the node.
//!
//! # Serialization
//!
//! ```text
//! childless:  <tag k="v" .../>
//! otherwise:  <tag k="v" ...>children</tag>
//! ```
//!
//! Children serialize by kind: nodes recursively (recording this node as
//! their traversal parent), observables as a snapshot of their current
//! value, literals verbatim. Nothing is escaped.
//!
//! # Lifecycle
//!
//! Nodes are never reused: every element-creation call (including every
//! re-render) builds a new one, registers it with the [`Registry`] and runs
//! the component's `on_mount` hook.

use std::cell::RefCell;
use std::fmt;
use std::fmt::Write as _;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::pipeline::host::HostSurface;
use crate::state::observable::{Notifiable, Observable, Subscriber};
use crate::style::resolver::{self, LayoutFlags};
use crate::types::{format_number, AttrValue, Attributes, Value};

use super::component::Component;
use super::registry::Registry;

// =============================================================================
// Child Content
// =============================================================================

/// One entry of a node's content.
#[derive(Clone, Debug)]
pub enum Child {
    Node(Node),
    State(Observable),
    Text(String),
    Number(f64),
}

impl Child {
    fn write_markup(&self, parent: &Weak<NodeInner>, out: &mut String) {
        match self {
            Child::Node(node) => {
                *node.0.parent.borrow_mut() = parent.clone();
                node.write_markup(out);
            }
            Child::State(observable) => out.push_str(&observable.get().to_string()),
            Child::Text(text) => out.push_str(text),
            Child::Number(n) => out.push_str(&format_number(*n)),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&Node> for Child {
    fn from(node: &Node) -> Self {
        Child::Node(node.clone())
    }
}

impl From<Observable> for Child {
    fn from(observable: Observable) -> Self {
        Child::State(observable)
    }
}

impl From<&Observable> for Child {
    fn from(observable: &Observable) -> Self {
        Child::State(observable.clone())
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Number(n)
    }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self {
        Child::Number(n as f64)
    }
}

/// Build a `Vec<Child>` from mixed content.
///
/// ```ignore
/// let content = children!["Count: ", count, child_node];
/// ```
#[macro_export]
macro_rules! children {
    () => { ::std::vec::Vec::<$crate::engine::Child>::new() };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::engine::Child::from($child)),+]
    };
}

// =============================================================================
// Node
// =============================================================================

/// What a mounted node was displayed as.
enum RenderedForm {
    /// The node rendered to itself.
    Identity,
    /// The node rendered to a separate wrapper node.
    Wrapper(Node),
}

struct MountState {
    host: Rc<dyn HostSurface>,
    rendered: RenderedForm,
}

pub(crate) struct NodeInner {
    tag: String,
    attributes: RefCell<Attributes>,
    content: RefCell<Vec<Child>>,
    classes: RefCell<Vec<String>>,
    style: String,
    flags: LayoutFlags,
    state: RefCell<IndexMap<String, Value>>,
    component: Box<dyn Component>,
    parent: RefCell<Weak<NodeInner>>,
    mount: RefCell<Option<MountState>>,
    registry: Registry,
    this: Weak<NodeInner>,
}

impl Notifiable for NodeInner {
    fn refresh(&self) {
        if let Some(inner) = self.this.upgrade() {
            Node(inner).refresh();
        }
    }
}

/// Handle to a component tree node.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

impl Node {
    /// Construct and register a node.
    ///
    /// An `id` is generated when the attributes carry none. Classes and
    /// inline style are resolved here, then `on_mount` runs.
    pub fn new(
        registry: &Registry,
        tag: impl Into<String>,
        attributes: Attributes,
        content: Vec<Child>,
        component: Box<dyn Component>,
    ) -> Node {
        let mut attributes = attributes;
        if !attributes.contains_key("id") {
            attributes.insert("id".to_string(), AttrValue::Text(registry.next_id()));
        }

        let own_style = component.style(&attributes);
        let resolved = resolver::resolve(&attributes, &registry.config().base_class, own_style);
        let tag = tag.into();

        let inner = Rc::new_cyclic(|this| NodeInner {
            tag,
            attributes: RefCell::new(attributes),
            content: RefCell::new(content),
            classes: RefCell::new(resolved.classes),
            style: resolved.style,
            flags: resolved.flags,
            state: RefCell::new(IndexMap::new()),
            component,
            parent: RefCell::new(Weak::new()),
            mount: RefCell::new(None),
            registry: registry.clone(),
            this: this.clone(),
        });
        let node = Node(inner);

        registry.register(&node);
        trace!(tag = %node.tag(), id = %node.id(), "node created");
        node.0.component.on_mount(&node);
        node
    }

    // -------------------------------------------------------------------------
    // Identity and attributes
    // -------------------------------------------------------------------------

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn id(&self) -> String {
        self.0
            .attributes
            .borrow()
            .get("id")
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn attribute(&self, key: &str) -> Option<AttrValue> {
        self.0.attributes.borrow().get(key).cloned()
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.0.attributes.borrow().contains_key(key)
    }

    /// Snapshot of the attribute map, in declaration order.
    pub fn attributes(&self) -> Attributes {
        self.0.attributes.borrow().clone()
    }

    /// Overwrite this node's `id` with another node's identity.
    ///
    /// The `id` keeps its position in the attribute order.
    pub fn alias_id(&self, id: &str) {
        self.0
            .attributes
            .borrow_mut()
            .insert("id".to_string(), AttrValue::Text(id.to_string()));
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn registry(&self) -> &Registry {
        &self.0.registry
    }

    pub(crate) fn downgrade(&self) -> Weak<NodeInner> {
        Rc::downgrade(&self.0)
    }

    pub(crate) fn from_inner(inner: Rc<NodeInner>) -> Node {
        Node(inner)
    }

    // -------------------------------------------------------------------------
    // Resolved presentation
    // -------------------------------------------------------------------------

    /// Resolved presentation classes, base class first.
    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().clone()
    }

    /// Add a class unless already present.
    pub fn add_class(&self, class: &str) {
        let mut classes = self.0.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    /// Resolved inline style string.
    pub fn style(&self) -> &str {
        &self.0.style
    }

    pub fn flags(&self) -> LayoutFlags {
        self.0.flags
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    /// Snapshot of the child content.
    pub fn children(&self) -> Vec<Child> {
        self.0.content.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.content.borrow().len()
    }

    pub fn add_child(&self, child: impl Into<Child>) {
        self.0.content.borrow_mut().push(child.into());
    }

    pub fn add_children<C: Into<Child>>(&self, children: impl IntoIterator<Item = C>) {
        self.0
            .content
            .borrow_mut()
            .extend(children.into_iter().map(Into::into));
    }

    /// Traversal parent, recorded when the parent last serialized this node.
    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    // -------------------------------------------------------------------------
    // Component behavior
    // -------------------------------------------------------------------------

    pub fn is_layout(&self) -> bool {
        self.0.component.is_layout()
    }

    /// What this node displays as.
    pub fn render(&self) -> Node {
        self.0.component.render(self)
    }

    pub fn on_create(&self) {
        self.0.component.on_create(self);
    }

    pub fn on_load(&self, host: &dyn HostSurface) {
        self.0.component.on_load(self, host);
    }

    /// Attach an `onclick` callback attribute to this node's host element.
    pub fn attach_listeners(&self, host: &dyn HostSurface) {
        let Some(AttrValue::Callback(handler)) = self.attribute("onclick") else {
            return;
        };
        let id = self.id();
        if !host.has_element(&id) {
            warn!(%id, "no host element for click listener");
            return;
        }
        if let Err(err) = host.attach_click(&id, handler) {
            warn!(%err, "click listener not attached");
        }
    }

    // -------------------------------------------------------------------------
    // State bag
    // -------------------------------------------------------------------------

    pub fn state(&self, key: &str) -> Option<Value> {
        self.0.state.borrow().get(key).cloned()
    }

    /// Merge entries into the state bag, then refresh.
    pub fn set_state<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        {
            let mut state = self.0.state.borrow_mut();
            for (key, value) in entries {
                state.insert(key.into(), value.into());
            }
        }
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    /// Serialize this node and its content to markup.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    /// Serialize only the content, as placed inside this node's element.
    pub fn serialize_content(&self) -> String {
        let mut out = String::new();
        let this = self.downgrade();
        for child in self.children() {
            child.write_markup(&this, &mut out);
        }
        out
    }

    fn write_markup(&self, out: &mut String) {
        let tag = &self.0.tag;
        out.push('<');
        out.push_str(tag);
        for (key, value) in self.0.attributes.borrow().iter() {
            if value.is_callback() {
                continue;
            }
            let _ = write!(out, " {key}=\"{value}\"");
        }

        let content = self.children();
        if content.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        let this = self.downgrade();
        for child in &content {
            child.write_markup(&this, out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    // -------------------------------------------------------------------------
    // Mounting and refresh
    // -------------------------------------------------------------------------

    /// Record where and as what this node was mounted.
    pub(crate) fn set_mounted(&self, host: Rc<dyn HostSurface>, rendered: &Node) {
        let rendered = if rendered.ptr_eq(self) {
            RenderedForm::Identity
        } else {
            RenderedForm::Wrapper(rendered.clone())
        };
        *self.0.mount.borrow_mut() = Some(MountState { host, rendered });
    }

    pub fn is_mounted(&self) -> bool {
        self.0.mount.borrow().is_some()
    }

    /// The node this one was last displayed as, if mounted.
    pub fn rendered(&self) -> Option<Node> {
        self.0.mount.borrow().as_ref().map(|m| match &m.rendered {
            RenderedForm::Identity => self.clone(),
            RenderedForm::Wrapper(node) => node.clone(),
        })
    }

    /// Re-render and overwrite this node's host element content in place.
    ///
    /// No-op unless the node was mounted. The fresh rendered form takes this
    /// node's id and replaces the stored one.
    pub fn refresh(&self) {
        let Some(host) = self.0.mount.borrow().as_ref().map(|m| m.host.clone()) else {
            return;
        };

        let id = self.id();
        let rendered = self.render();
        rendered.alias_id(&id);
        let inner = rendered.serialize_content();
        self.set_mounted(host.clone(), &rendered);

        trace!(%id, "node refresh");
        if let Err(err) = host.set_inner_markup(&id, &inner) {
            warn!(%err, "refresh skipped");
        }
    }

    /// Handle for an observable's subscriber list.
    pub fn subscriber(&self) -> Subscriber {
        let weak: Weak<dyn Notifiable> = self.downgrade();
        Subscriber::from_weak(weak)
    }
}

impl From<&Node> for Subscriber {
    fn from(node: &Node) -> Self {
        node.subscriber()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("tag", &self.0.tag)
            .field("id", &self.id())
            .field("children", &self.child_count())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
