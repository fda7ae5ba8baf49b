//! Application - named pages and the host root they render into.
//!
//! ```text
//! register(name, renderer) ─▶ pages[name]
//! render(name)  ─▶ renderer() or placeholder ─▶ mount (append)
//! refresh()     ─▶ renderer() or placeholder ─▶ clear root ─▶ mount
//! ```
//!
//! The name of the page rendered last is kept in a spark-signals
//! [`Signal`], so effects can follow navigation.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use spark_signals::{signal, Signal};
use tracing::debug;

use crate::engine::{Node, Registry};
use crate::pipeline::host::HostSurface;
use crate::pipeline::mount::mount;
use crate::primitives::create_element;
use crate::types::{Attributes, Value};

// =============================================================================
// Pages
// =============================================================================

/// Builds a page's content. `None` means the page has nothing to show.
pub type PageRenderer = Rc<dyn Fn(&Registry) -> Option<Node>>;

/// Free-form page configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOptions {
    pub title: Option<String>,
    pub extra: IndexMap<String, Value>,
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A registered page.
#[derive(Clone)]
pub struct Page {
    renderer: PageRenderer,
    pub options: PageOptions,
}

impl Page {
    pub fn new(renderer: PageRenderer, options: PageOptions) -> Self {
        Self { renderer, options }
    }

    /// Run the renderer.
    pub fn render(&self, registry: &Registry) -> Option<Node> {
        (self.renderer)(registry)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page").field("options", &self.options).finish_non_exhaustive()
    }
}

/// Text shown when a page renders nothing.
pub fn placeholder_text(name: &str) -> String {
    format!("Page '{name}' is has nothing to render")
}

// =============================================================================
// App
// =============================================================================

/// Page directory bound to one host root.
pub struct App {
    root: Rc<dyn HostSurface>,
    registry: Registry,
    pages: IndexMap<String, Page>,
    current: Option<String>,
    current_page: Signal<Option<String>>,
    /// Content of the page rendered last. Keeps its nodes alive.
    mounted: Option<Node>,
}

impl App {
    pub fn new(root: Rc<dyn HostSurface>) -> Self {
        Self::with_registry(root, Registry::new())
    }

    pub fn with_registry(root: Rc<dyn HostSurface>, registry: Registry) -> Self {
        Self {
            root,
            registry,
            pages: IndexMap::new(),
            current: None,
            current_page: signal(None),
            mounted: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn root(&self) -> &Rc<dyn HostSurface> {
        &self.root
    }

    /// Register a page, replacing any page of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, renderer: F, options: PageOptions)
    where
        F: Fn(&Registry) -> Option<Node> + 'static,
    {
        self.pages
            .insert(name.into(), Page::new(Rc::new(renderer), options));
    }

    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.get(name)
    }

    /// Registered page names, in registration order.
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Render a page into the root, after any existing markup.
    ///
    /// Returns false, touching nothing, when no such page is registered.
    pub fn render(&mut self, name: &str) -> bool {
        let Some(page) = self.pages.get(name) else {
            debug!(%name, "render of unregistered page");
            return false;
        };
        let component = self.page_content(name, page);
        debug!(%name, "page render");
        mount(&component, self.root.clone());

        self.mounted = Some(component);
        self.current = Some(name.to_string());
        self.current_page.set(Some(name.to_string()));
        true
    }

    /// Re-render the current page over a cleared root.
    ///
    /// Returns false when nothing has been rendered yet.
    pub fn refresh(&mut self) -> bool {
        let Some(name) = self.current.clone() else {
            return false;
        };
        let Some(page) = self.pages.get(&name) else {
            return false;
        };
        let component = self.page_content(&name, page);
        debug!(%name, "page refresh");
        self.root.replace_markup("");
        mount(&component, self.root.clone());
        self.mounted = Some(component);
        true
    }

    fn page_content(&self, name: &str, page: &Page) -> Node {
        page.render(&self.registry).unwrap_or_else(|| {
            create_element(
                &self.registry,
                self.registry.config().fallback_tag.as_str(),
                Attributes::new(),
                vec![placeholder_text(name).into()],
            )
        })
    }

    /// Name of the page rendered last.
    pub fn current_page(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Root node of the page rendered last.
    pub fn mounted(&self) -> Option<&Node> {
        self.mounted.as_ref()
    }

    /// Reactive view of [`current_page`](Self::current_page).
    pub fn current_page_signal(&self) -> Signal<Option<String>> {
        self.current_page.clone()
    }

    /// Run the document-ready pass over every live node.
    pub fn load(&self) {
        self.registry.load(self.root.as_ref());
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("pages", &self.pages.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::host::MemorySurface;
    use crate::pipeline::RenderConfig;
    use crate::state::Observable;
    use crate::types::AttrValue;
    use crate::{attrs, children};
    use spark_signals::effect;
    use std::cell::{Cell, RefCell};

    fn app_with_surface() -> (App, Rc<MemorySurface>) {
        let surface = Rc::new(MemorySurface::new());
        (App::new(surface.clone()), surface)
    }

    fn hello(reg: &Registry) -> Option<Node> {
        Some(create_element(reg, "h1", attrs! { "id" => "hi" }, children!["Hello"]))
    }

    #[test]
    fn test_render_missing_page_is_noop() {
        let surface = Rc::new(MemorySurface::with_markup("<p>keep</p>"));
        let mut app = App::new(surface.clone());
        assert!(!app.render("missing"));
        assert_eq!(surface.markup(), "<p>keep</p>");
        assert_eq!(app.current_page(), None);
    }

    #[test]
    fn test_render_appends_page() {
        let (mut app, surface) = app_with_surface();
        app.register("home", hello, PageOptions::new().with_title("Home"));

        assert!(app.render("home"));
        assert!(app.render("home"));
        assert_eq!(surface.markup(), "<h1 id=\"hi\">Hello</h1><h1 id=\"hi\">Hello</h1>");
        assert_eq!(app.current_page(), Some("home"));
        assert_eq!(app.page("home").unwrap().options.title.as_deref(), Some("Home"));
    }

    #[test]
    fn test_empty_page_renders_placeholder() {
        let (mut app, surface) = app_with_surface();
        app.register("blank", |_| None, PageOptions::default());

        app.render("blank");
        assert_eq!(
            surface.markup(),
            "<pre id=\"v-0\">Page 'blank' is has nothing to render</pre>"
        );
    }

    #[test]
    fn test_placeholder_tag_from_config() {
        let surface = Rc::new(MemorySurface::new());
        let registry = Registry::with_config(RenderConfig::new().with_fallback_tag("p"));
        let mut app = App::with_registry(surface.clone(), registry);
        app.register("blank", |_| None, PageOptions::default());

        app.render("blank");
        assert!(surface.markup().starts_with("<p id="));
    }

    #[test]
    fn test_refresh_replaces_markup() {
        let (mut app, surface) = app_with_surface();
        assert!(!app.refresh());

        let visits = Rc::new(Cell::new(0));
        let visits_clone = visits.clone();
        app.register(
            "count",
            move |reg: &Registry| {
                visits_clone.set(visits_clone.get() + 1);
                let n = visits_clone.get();
                Some(create_element(reg, "span", attrs! { "id" => "c" }, children![n]))
            },
            PageOptions::default(),
        );

        app.render("count");
        assert!(app.refresh());
        assert_eq!(visits.get(), 2);
        assert_eq!(surface.markup(), "<span id=\"c\">2</span>");
    }

    #[test]
    fn test_rerendered_page_keeps_one_subscription() {
        let (mut app, surface) = app_with_surface();
        let count = Observable::new(0);
        let page_count = count.clone();
        app.register(
            "count",
            move |reg: &Registry| {
                let page = create_element(reg, "span", attrs! { "id" => "c" }, children![&page_count]);
                page_count.subscribe(&page);
                Some(page)
            },
            PageOptions::default(),
        );

        app.render("count");
        for _ in 0..5 {
            assert!(app.refresh());
        }
        assert_eq!(count.subscriber_count(), 1);

        count.increment();
        assert_eq!(surface.markup(), "<span id=\"c\">1</span>");
        assert_eq!(count.subscriber_count(), 1);
    }

    #[test]
    fn test_register_overwrites_and_keeps_order() {
        let (mut app, _surface) = app_with_surface();
        app.register("a", hello, PageOptions::default());
        app.register("b", hello, PageOptions::default());
        app.register("a", |_| None, PageOptions::new().with("theme", "dark"));

        assert_eq!(app.page_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            app.page("a").unwrap().options.extra.get("theme"),
            Some(&Value::text("dark"))
        );
    }

    #[test]
    fn test_current_page_signal_tracks_navigation() {
        let (mut app, _surface) = app_with_surface();
        app.register("a", hello, PageOptions::default());
        app.register("b", hello, PageOptions::default());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let current = app.current_page_signal();
        let _e = effect(move || {
            seen_clone.borrow_mut().push(current.get());
        });

        app.render("a");
        app.render("b");
        assert_eq!(
            *seen.borrow(),
            vec![None, Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[test]
    fn test_load_attaches_page_handlers() {
        let (mut app, surface) = app_with_surface();
        let clicks = Rc::new(Cell::new(0));
        let clicks_clone = clicks.clone();
        app.register(
            "button",
            move |reg: &Registry| {
                let clicks = clicks_clone.clone();
                let handler = AttrValue::callback(move || clicks.set(clicks.get() + 1));
                Some(create_element(reg, "button", attrs! { "id" => "go", "onclick" => handler }, children!["Go"]))
            },
            PageOptions::default(),
        );

        app.render("button");
        app.load();
        surface.click("go");
        assert_eq!(clicks.get(), 1);
    }
}
