//! Presentation - attribute resolution and the scoped stylesheet.
//!
//! - [`resolver`] - flags to classes, aliases and modifiers to inline style
//! - [`stylesheet`] - append-only `#id { ... }` rules

pub mod resolver;
pub mod stylesheet;

pub use resolver::{
    alias_property, expand_modifiers, resolve, serialize_declarations, LayoutFlags, Resolved,
    FLEX_CLASS,
};
pub use stylesheet::StyleSheet;
