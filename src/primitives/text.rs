//! Text Primitive - a paragraph of mixed content.
//!
//! `Text` counts as a layout (it is flattened like one when nested) but
//! renders to a `<p>` holding its content as-is, without the container
//! classes or style.
//!
//! # Example
//!
//! ```ignore
//! let count = Observable::new(0);
//! let label = create_element(&reg, Descriptor::class::<Text>(), attrs! {}, children!["Count: ", &count]);
//! ```

use crate::engine::{Component, ComponentClass, Node};

use super::factory::create_element;
use crate::types::Attributes;

#[derive(Debug, Default, Clone, Copy)]
pub struct Text;

impl Component for Text {
    fn is_layout(&self) -> bool {
        true
    }

    fn render(&self, node: &Node) -> Node {
        create_element(node.registry(), "p", Attributes::new(), node.children())
    }
}

impl ComponentClass for Text {
    const NAME: &'static str = "Text";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, children};
    use crate::engine::Registry;
    use crate::primitives::{Descriptor, Layout};
    use crate::state::Observable;

    #[test]
    fn test_text_renders_paragraph() {
        let reg = Registry::new();
        let count = Observable::new(4);
        let text = create_element(
            &reg,
            Descriptor::class::<Text>(),
            attrs! { "id" => "t", "foreground" => "red" },
            children!["Count: ", &count],
        );

        let rendered = text.render();
        rendered.alias_id("t");
        assert_eq!(rendered.serialize(), "<p id=\"t\">Count: 4</p>");
    }

    #[test]
    fn test_text_is_flattened_inside_layouts() {
        let reg = Registry::new();
        let text = create_element(&reg, Descriptor::class::<Text>(), attrs! {}, children!["hi"]);
        let layout = create_element(&reg, Descriptor::class::<Layout>(), attrs! {}, children![&text]);

        let markup = layout.render().serialize();
        assert!(markup.contains("<p id=\""));
        assert!(markup.contains(">hi</p>"));
        assert!(!markup.contains("<Text"));
    }
}
