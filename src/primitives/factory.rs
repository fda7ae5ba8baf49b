//! Element factory - the single entry point for building nodes.
//!
//! ```text
//! Descriptor::Tag(t)       ─▶ Node(t, attributes, content) with Plain behavior
//! Descriptor::Function(f)  ─▶ f(registry, content)          (attributes unused)
//! Descriptor::Class(C)     ─▶ Node(C::NAME, attributes, content) with C behavior
//! ```

use tracing::trace;

use crate::engine::{Child, Node, Plain, Registry};
use crate::types::Attributes;

use super::types::Descriptor;

/// Create an element in `registry`.
///
/// # Example
///
/// ```ignore
/// let reg = Registry::new();
/// let title = create_element(&reg, "h1", attrs! { "foreground" => "red" }, children!["Hi"]);
/// let page = create_element(&reg, Descriptor::class::<FlexLayout>(), attrs! {}, children![title]);
/// ```
pub fn create_element(
    registry: &Registry,
    descriptor: impl Into<Descriptor>,
    attributes: Attributes,
    content: Vec<Child>,
) -> Node {
    match descriptor.into() {
        Descriptor::Tag(tag) => Node::new(registry, tag, attributes, content, Box::new(Plain)),
        Descriptor::Function(f) => {
            trace!(children = content.len(), "function component");
            f(registry, content)
        }
        Descriptor::Class(class) => {
            Node::new(registry, class.name, attributes, content, class.instantiate())
        }
    }
}
