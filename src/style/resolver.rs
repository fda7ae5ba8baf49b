//! Attribute resolver - declared attributes to classes and inline style.
//!
//! Resolution runs once per node, at construction:
//!
//! 1. Presence-only flags (`flex`, `center`, ...) add one fixed class each,
//!    after the always-present base class.
//! 2. Aliased style keys (`grow`, `foreground`, ...) append
//!    `property:value;` in alias-table order.
//! 3. The component's own style map is extended with compound modifiers
//!    (`paddingHorizontal`, `marginV`, ...) and appended, re-running each key
//!    through the alias table.
//!
//! The style string is never deduplicated: when a property appears twice,
//! the later declaration wins in the browser.

use crate::types::{Attributes, StyleMap};

// =============================================================================
// Layout Flags
// =============================================================================

bitflags::bitflags! {
    /// Presence-only layout flags declared on a component.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayoutFlags: u8 {
        const NONE = 0;
        const FLEX = 1 << 0;
        const CENTER = 1 << 1;
        const CENTER_HORIZONTAL = 1 << 2;
        const CENTER_VERTICAL = 1 << 3;
    }
}

/// Flag attribute name, flag bit, presentation class. Declaration order is
/// class order.
const FLAG_CLASSES: [(&str, LayoutFlags, &str); 4] = [
    ("flex", LayoutFlags::FLEX, FLEX_CLASS),
    ("center", LayoutFlags::CENTER, "void-align-center"),
    ("centerHorizontal", LayoutFlags::CENTER_HORIZONTAL, "void-align-center-horizontal"),
    ("centerVertical", LayoutFlags::CENTER_VERTICAL, "void-align-center-vertical"),
];

/// Class added by the `flex` flag and by flex layouts.
pub const FLEX_CLASS: &str = "void-flex";

impl LayoutFlags {
    /// Collect the flags present in an attribute map.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        FLAG_CLASSES
            .iter()
            .filter(|(name, _, _)| attributes.contains_key(*name))
            .fold(LayoutFlags::NONE, |flags, (_, flag, _)| flags | *flag)
    }

    /// Presentation classes for these flags, in declaration order.
    pub fn classes(self) -> impl Iterator<Item = &'static str> {
        FLAG_CLASSES
            .into_iter()
            .filter(move |(_, flag, _)| self.contains(*flag))
            .map(|(_, _, class)| class)
    }
}

// =============================================================================
// Alias Tables
// =============================================================================

/// Semantic attribute key to style property, in resolution order.
const STYLE_ALIASES: [(&str, &str); 6] = [
    ("grow", "flex-grow"),
    ("background", "background"),
    ("foreground", "color"),
    ("color", "color"),
    ("padding", "padding"),
    ("margin", "margin"),
];

/// Accepted synonyms per compound modifier and the two longhands it sets.
const COMPOUND_MODIFIERS: [(&[&str], [&str; 2]); 4] = [
    (&["paddingHorizontal", "paddingHor", "paddingH"], ["padding-left", "padding-right"]),
    (&["paddingVertical", "paddingVert", "paddingV"], ["padding-top", "padding-bottom"]),
    (&["marginHorizontal", "marginHor", "marginH"], ["margin-left", "margin-right"]),
    (&["marginVertical", "marginVert", "marginV"], ["margin-top", "margin-bottom"]),
];

/// Map a key through the alias table; unknown keys pass through.
pub fn alias_property(key: &str) -> &str {
    STYLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, property)| *property)
}

/// Value of the first synonym present in the attributes.
fn first_present(attributes: &Attributes, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| attributes.get(*name))
        .map(ToString::to_string)
}

/// Expand compound modifiers into their longhand declarations.
///
/// Writes into `style`; an existing key keeps its position and takes the
/// new value.
pub fn expand_modifiers(attributes: &Attributes, style: &mut StyleMap) {
    for (synonyms, longhands) in COMPOUND_MODIFIERS {
        if let Some(value) = first_present(attributes, synonyms) {
            for property in longhands {
                style.insert(property.to_string(), value.clone());
            }
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Classes and inline style derived from a node's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved {
    pub flags: LayoutFlags,
    pub classes: Vec<String>,
    pub style: String,
}

/// Resolve attributes into classes and a serialized inline style.
///
/// `component_style` is the per-type style override; compound modifiers are
/// merged into it before it is serialized.
pub fn resolve(attributes: &Attributes, base_class: &str, component_style: StyleMap) -> Resolved {
    let flags = LayoutFlags::from_attributes(attributes);

    let mut classes = vec![base_class.to_string()];
    classes.extend(flags.classes().map(str::to_string));

    let mut style = String::new();
    for (alias, property) in STYLE_ALIASES {
        if let Some(value) = attributes.get(alias) {
            push_declaration(&mut style, property, &value.to_string());
        }
    }

    let mut component_style = component_style;
    expand_modifiers(attributes, &mut component_style);
    for (key, value) in &component_style {
        push_declaration(&mut style, alias_property(key), value);
    }

    Resolved { flags, classes, style }
}

fn push_declaration(out: &mut String, property: &str, value: &str) {
    out.push_str(property);
    out.push(':');
    out.push_str(value);
    out.push(';');
}

/// Serialize declarations as `property:value;` pairs, unaliased.
pub fn serialize_declarations<'a>(declarations: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
    let mut out = String::new();
    for (property, value) in declarations {
        push_declaration(&mut out, property, value);
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
