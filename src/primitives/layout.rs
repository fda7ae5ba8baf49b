//! Layout Primitives - containers that render to a classed `div`.
//!
//! A layout renders as a fresh `div` carrying its resolved classes and
//! inline style. Each child that is itself a layout contributes its own
//! rendered form; every other child is passed through unchanged. Only one
//! level is flattened per render: a layout nested inside a plain node is
//! left as-is.
//!
//! ```text
//! Layout(flex)                     <div class="void-layout void-flex">
//!   ├─ Layout(center)      ─▶        <div class="void-layout void-align-center">..</div>
//!   └─ span                          <span>..</span>
//!                                  </div>
//! ```

use crate::engine::{Child, Component, ComponentClass, Node};
use crate::style::FLEX_CLASS;
use crate::types::{AttrValue, Attributes};

use super::factory::create_element;

/// Render `node` as a layout container.
pub fn render_layout(node: &Node) -> Node {
    let mut attributes = Attributes::new();
    attributes.insert("class".to_string(), AttrValue::Text(node.classes().join(" ")));
    if !node.style().is_empty() {
        attributes.insert("style".to_string(), AttrValue::Text(node.style().to_string()));
    }

    let content = node
        .children()
        .into_iter()
        .map(|child| match child {
            Child::Node(inner) if inner.is_layout() => Child::Node(inner.render()),
            other => other,
        })
        .collect();

    create_element(node.registry(), "div", attributes, content)
}

// =============================================================================
// Layout
// =============================================================================

/// Generic layout container.
#[derive(Debug, Default, Clone, Copy)]
pub struct Layout;

impl Component for Layout {
    fn is_layout(&self) -> bool {
        true
    }

    fn render(&self, node: &Node) -> Node {
        render_layout(node)
    }
}

impl ComponentClass for Layout {
    const NAME: &'static str = "Layout";
}

// =============================================================================
// FlexLayout
// =============================================================================

/// Layout that always carries the flex class.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlexLayout;

impl Component for FlexLayout {
    fn is_layout(&self) -> bool {
        true
    }

    fn render(&self, node: &Node) -> Node {
        render_layout(node)
    }

    fn on_mount(&self, node: &Node) {
        node.add_class(FLEX_CLASS);
    }
}

impl ComponentClass for FlexLayout {
    const NAME: &'static str = "FlexLayout";
}
