//! Mount API - first-time insertion of a node into a host.
//!
//! ```text
//! node.render() ─▶ alias id ─▶ remember (host, rendered) ─▶ append markup ─▶ on_create
//! ```
//!
//! The rendered form takes the source node's `id`, so the host element is
//! addressed by the logical component. This is the only place two live
//! nodes share an id. The source node keeps its host and rendered form, which
//! is what makes a later [`Node::refresh`] able to update it in place.
//!
//! # Example
//!
//! ```ignore
//! use spark_markup::pipeline::{mount, MemorySurface};
//!
//! let surface = Rc::new(MemorySurface::new());
//! mount(&page, surface.clone());
//! ```

use std::rc::Rc;

use tracing::debug;

use crate::engine::Node;

use super::host::HostSurface;

/// Mount `node` into `host`. Returns the rendered form that was appended.
///
/// Mounting is additive: mounting twice appends twice.
pub fn mount(node: &Node, host: Rc<dyn HostSurface>) -> Node {
    let rendered = node.render();
    let id = node.id();
    rendered.alias_id(&id);
    node.set_mounted(host.clone(), &rendered);

    let markup = rendered.serialize();
    debug!(%id, tag = %node.tag(), bytes = markup.len(), "mount");
    host.append_markup(&markup);

    node.on_create();
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, children};
    use crate::engine::{Component, ComponentClass, Registry};
    use crate::pipeline::host::MemorySurface;
    use crate::primitives::{create_element, Descriptor, Layout};
    use crate::state::Observable;
    use std::cell::Cell;

    thread_local! {
        static CREATED: Cell<u32> = const { Cell::new(0) };
    }

    #[derive(Default)]
    struct Tracked;

    impl Component for Tracked {
        fn on_create(&self, _node: &Node) {
            CREATED.with(|c| c.set(c.get() + 1));
        }
    }

    impl ComponentClass for Tracked {
        const NAME: &'static str = "Tracked";
    }

    #[test]
    fn test_mount_appends_identity_render() {
        let reg = Registry::new();
        let surface = Rc::new(MemorySurface::with_markup("<h1>head</h1>"));
        let node = create_element(&reg, "div", attrs! { "id" => "x" }, vec![]);

        let rendered = mount(&node, surface.clone());
        assert!(rendered.ptr_eq(&node));
        assert_eq!(surface.markup(), "<h1>head</h1><div id=\"x\"/>");
    }

    #[test]
    fn test_mount_twice_appends_twice() {
        let reg = Registry::new();
        let surface = Rc::new(MemorySurface::new());
        let node = create_element(&reg, "div", attrs! { "id" => "x" }, vec![]);

        mount(&node, surface.clone());
        mount(&node, surface.clone());
        assert_eq!(surface.markup(), "<div id=\"x\"/><div id=\"x\"/>");
    }

    #[test]
    fn test_rendered_wrapper_takes_node_id() {
        let reg = Registry::new();
        let surface = Rc::new(MemorySurface::new());
        let layout = create_element(&reg, Descriptor::class::<Layout>(), attrs! { "id" => "main" }, children!["hi"]);

        let rendered = mount(&layout, surface.clone());
        assert!(!rendered.ptr_eq(&layout));
        assert_eq!(rendered.id(), "main");
        assert_eq!(layout.id(), "main");
        assert!(layout.rendered().unwrap().ptr_eq(&rendered));
        assert_eq!(surface.markup(), "<div class=\"void-layout\" id=\"main\">hi</div>");
    }

    #[test]
    fn test_on_create_runs_after_mount() {
        let reg = Registry::new();
        let surface = Rc::new(MemorySurface::new());
        let tracked = create_element(&reg, Descriptor::class::<Tracked>(), attrs! {}, vec![]);

        let before = CREATED.with(Cell::get);
        mount(&tracked, surface.clone());
        assert_eq!(CREATED.with(Cell::get), before + 1);
    }

    #[test]
    fn test_subscribed_layout_refreshes_in_place() {
        let reg = Registry::new();
        let surface = Rc::new(MemorySurface::new());
        let count = Observable::new(1);
        let layout = create_element(
            &reg,
            Descriptor::class::<Layout>(),
            attrs! { "id" => "counter" },
            children!["n=", &count],
        );
        count.subscribe(&layout);

        mount(&layout, surface.clone());
        count.increment();
        assert_eq!(surface.markup(), "<div class=\"void-layout\" id=\"counter\">n=2</div>");
    }
}
