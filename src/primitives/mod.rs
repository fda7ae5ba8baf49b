//! Primitives - element creation and the built-in components.
//!
//! - [`create_element`] - build a node from a [`Descriptor`]
//! - [`Layout`] / [`FlexLayout`] - classed `div` containers
//! - [`Text`] - paragraph content
//!
//! # Example
//!
//! ```ignore
//! use spark_markup::{attrs, children, create_element, Descriptor, FlexLayout, Registry};
//!
//! let reg = Registry::new();
//! let title = create_element(&reg, "h1", attrs! { "foreground" => "teal" }, children!["Hello"]);
//! let page = create_element(
//!     &reg,
//!     Descriptor::class::<FlexLayout>(),
//!     attrs! { "center" => true, "paddingH" => "1rem" },
//!     children![title],
//! );
//! ```

mod factory;
mod layout;
mod text;
mod types;

pub use factory::create_element;
pub use layout::{render_layout, FlexLayout, Layout};
pub use text::Text;
pub use types::{ClassDescriptor, Descriptor, FunctionComponent};
