//! Primitive types - element descriptors.
//!
//! A [`Descriptor`] says what `create_element` should build. The caller
//! picks the variant; nothing is inferred from the shape of a value.

use std::fmt;
use std::rc::Rc;

use crate::engine::{Child, Component, ComponentClass, Node, Registry};

// =============================================================================
// Function Components
// =============================================================================

/// A function component: receives the content, builds its own tree.
///
/// Function components never see the element's attributes.
pub type FunctionComponent = Rc<dyn Fn(&Registry, Vec<Child>) -> Node>;

// =============================================================================
// Class Components
// =============================================================================

/// A component type, erased so it can travel in a [`Descriptor`].
#[derive(Clone, Copy)]
pub struct ClassDescriptor {
    /// Tag of every instance.
    pub name: &'static str,
    construct: fn() -> Box<dyn Component>,
}

impl ClassDescriptor {
    pub fn of<C: ComponentClass>() -> Self {
        fn construct<C: ComponentClass>() -> Box<dyn Component> {
            Box::new(C::default())
        }
        Self {
            name: C::NAME,
            construct: construct::<C>,
        }
    }

    /// A fresh behavior instance.
    pub fn instantiate(&self) -> Box<dyn Component> {
        (self.construct)()
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor").field("name", &self.name).finish()
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// What to create.
#[derive(Clone)]
pub enum Descriptor {
    /// A plain element with this tag name.
    Tag(String),
    /// A function component, called with the content.
    Function(FunctionComponent),
    /// A component type, instantiated with its `NAME` as tag.
    Class(ClassDescriptor),
}

impl Descriptor {
    pub fn tag(name: impl Into<String>) -> Self {
        Descriptor::Tag(name.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Registry, Vec<Child>) -> Node + 'static,
    {
        Descriptor::Function(Rc::new(f))
    }

    pub fn class<C: ComponentClass>() -> Self {
        Descriptor::Class(ClassDescriptor::of::<C>())
    }
}

impl From<&str> for Descriptor {
    fn from(name: &str) -> Self {
        Descriptor::Tag(name.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(name: String) -> Self {
        Descriptor::Tag(name)
    }
}

impl From<ClassDescriptor> for Descriptor {
    fn from(class: ClassDescriptor) -> Self {
        Descriptor::Class(class)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Tag(name) => f.debug_tuple("Tag").field(name).finish(),
            Descriptor::Function(_) => f.write_str("Function(<fn>)"),
            Descriptor::Class(class) => f.debug_tuple("Class").field(&class.name).finish(),
        }
    }
}
