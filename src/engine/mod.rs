//! Engine - nodes, component behavior, and the registry they live in.
//!
//! - Registry: render context (node tracking, ids, stylesheet, config)
//! - Node: tree entity with resolved presentation and serialization
//! - Component: per-type behavior (render, style override, lifecycle hooks)
//!
//! # Architecture
//!
//! ```text
//! create_element ─▶ Node::new ─▶ resolve attributes ─▶ register ─▶ on_mount
//!                                                         │
//!                         mount / refresh ◀── serialize ◀─┘
//! ```

mod component;
mod node;
mod registry;

pub use component::{Component, ComponentClass, Plain};
pub use node::{Child, Node};
pub use registry::Registry;
