//! Host surface - the document the pipeline writes markup into.
//!
//! The core needs exactly four capabilities from its host:
//!
//! - append markup (first mount)
//! - replace all markup (page refresh)
//! - address an element by id (node refresh overwrites its inner markup)
//! - attach a click listener to an element
//!
//! [`MemorySurface`] implements them over an in-memory markup string. It is
//! what tests and headless rendering use; a browser binding implements the
//! same trait over the real DOM.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::types::Callback;

// =============================================================================
// Host Trait
// =============================================================================

/// The side-effecting surface nodes are mounted into.
///
/// Methods take `&self`: hosts are shared (`Rc<dyn HostSurface>`) between
/// every node mounted into them, so implementations use interior mutability.
pub trait HostSurface {
    /// Append markup after the existing content.
    fn append_markup(&self, markup: &str);

    /// Replace the whole content.
    fn replace_markup(&self, markup: &str);

    /// Whether an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Overwrite the inner markup of the element with this id.
    fn set_inner_markup(&self, id: &str, markup: &str) -> Result<()>;

    /// Attach a click listener to the element with this id.
    fn attach_click(&self, id: &str, handler: Callback) -> Result<()>;
}

// =============================================================================
// Markup Scanning
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    SelfClosing,
    Close,
}

#[derive(Debug, Clone, Copy)]
struct Tag<'a> {
    name: &'a str,
    start: usize,
    /// One past the closing `>`.
    end: usize,
    kind: TagKind,
}

/// Find the next tag at or after `from`. Quoted attribute values may
/// contain `>`; a `<` not followed by a tag name is text.
fn next_tag(markup: &str, from: usize) -> Option<Tag<'_>> {
    let bytes = markup.as_bytes();
    let mut cursor = from;

    while let Some(offset) = markup.get(cursor..)?.find('<') {
        let start = cursor + offset;
        let closing = bytes.get(start + 1) == Some(&b'/');
        let name_from = if closing { start + 2 } else { start + 1 };
        let tail = markup.get(name_from..).unwrap_or("");
        let name_len = tail
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(tail.len());
        let name = &tail[..name_len];

        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            cursor = start + 1;
            continue;
        }

        let mut in_quote = false;
        let mut end = None;
        for (i, byte) in bytes[name_from + name_len..].iter().enumerate() {
            match byte {
                b'"' => in_quote = !in_quote,
                b'>' if !in_quote => {
                    end = Some(name_from + name_len + i + 1);
                    break;
                }
                _ => {}
            }
        }
        let end = end?;

        let kind = if closing {
            TagKind::Close
        } else if bytes[end - 2] == b'/' {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };
        return Some(Tag { name, start, end, kind });
    }
    None
}

/// Position of an addressed element inside the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Located {
    name: String,
    start: usize,
    open_end: usize,
    inner: Range<usize>,
    end: usize,
    self_closing: bool,
}

fn locate(markup: &str, id: &str) -> Option<Located> {
    let needle = format!(" id=\"{id}\"");
    let mut cursor = 0;

    while let Some(tag) = next_tag(markup, cursor) {
        cursor = tag.end;
        if tag.kind == TagKind::Close || !markup[tag.start..tag.end].contains(&needle) {
            continue;
        }

        if tag.kind == TagKind::SelfClosing {
            return Some(Located {
                name: tag.name.to_string(),
                start: tag.start,
                open_end: tag.end,
                inner: tag.end..tag.end,
                end: tag.end,
                self_closing: true,
            });
        }

        // Balance same-name tags to find the matching close
        let mut depth = 1usize;
        let mut scan = tag.end;
        while let Some(inner) = next_tag(markup, scan) {
            scan = inner.end;
            if inner.name != tag.name {
                continue;
            }
            match inner.kind {
                TagKind::Open => depth += 1,
                TagKind::Close => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Located {
                            name: tag.name.to_string(),
                            start: tag.start,
                            open_end: tag.end,
                            inner: tag.end..inner.start,
                            end: inner.end,
                            self_closing: false,
                        });
                    }
                }
                TagKind::SelfClosing => {}
            }
        }
        return None;
    }
    None
}

// =============================================================================
// Memory Surface
// =============================================================================

/// In-memory host surface.
#[derive(Default)]
pub struct MemorySurface {
    markup: RefCell<String>,
    listeners: RefCell<HashMap<String, Vec<Callback>>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface with existing content.
    pub fn with_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: RefCell::new(markup.into()),
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Snapshot of the current markup.
    pub fn markup(&self) -> String {
        self.markup.borrow().clone()
    }

    /// Full markup of the element with this id, tags included.
    pub fn element_markup(&self, id: &str) -> Option<String> {
        let markup = self.markup.borrow();
        locate(&markup, id).map(|at| markup[at.start..at.end].to_string())
    }

    /// Inner markup of the element with this id.
    pub fn inner_markup(&self, id: &str) -> Option<String> {
        let markup = self.markup.borrow();
        locate(&markup, id).map(|at| markup[at.inner].to_string())
    }

    /// Number of click listeners attached to an id.
    pub fn listener_count(&self, id: &str) -> usize {
        self.listeners.borrow().get(id).map_or(0, Vec::len)
    }

    /// Dispatch a click to an element's listeners, in attachment order.
    ///
    /// Returns how many listeners ran.
    pub fn click(&self, id: &str) -> usize {
        // Clone out so listeners may touch the surface
        let handlers: Vec<Callback> = self.listeners.borrow().get(id).cloned().unwrap_or_default();
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }
}

impl HostSurface for MemorySurface {
    fn append_markup(&self, markup: &str) {
        self.markup.borrow_mut().push_str(markup);
    }

    fn replace_markup(&self, markup: &str) {
        *self.markup.borrow_mut() = markup.to_string();
    }

    fn has_element(&self, id: &str) -> bool {
        locate(&self.markup.borrow(), id).is_some()
    }

    fn set_inner_markup(&self, id: &str, inner: &str) -> Result<()> {
        let mut markup = self.markup.borrow_mut();
        let at = locate(&markup, id).ok_or_else(|| Error::element_not_found(id))?;

        if at.self_closing {
            // `<tag attrs/>` becomes `<tag attrs>inner</tag>`
            let head = markup[at.start..at.open_end - 2].to_string();
            let replacement = format!("{head}>{inner}</{}>", at.name);
            markup.replace_range(at.start..at.end, &replacement);
        } else {
            markup.replace_range(at.inner, inner);
        }
        Ok(())
    }

    fn attach_click(&self, id: &str, handler: Callback) -> Result<()> {
        if !self.has_element(id) {
            return Err(Error::element_not_found(id));
        }
        self.listeners
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .push(handler);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_append_and_replace() {
        let host = MemorySurface::new();
        host.append_markup("<a/>");
        host.append_markup("<b/>");
        assert_eq!(host.markup(), "<a/><b/>");
        host.replace_markup("<c/>");
        assert_eq!(host.markup(), "<c/>");
    }

    #[test]
    fn test_locate_self_closing() {
        let host = MemorySurface::with_markup("<div id=\"x\"/>");
        assert!(host.has_element("x"));
        assert!(!host.has_element("y"));
        assert_eq!(host.inner_markup("x").as_deref(), Some(""));
    }

    #[test]
    fn test_locate_balances_nested_same_name_tags() {
        let host = MemorySurface::with_markup(
            "<div id=\"outer\"><div id=\"inner\">a</div><p>b</p></div><div>tail</div>",
        );
        assert_eq!(
            host.inner_markup("outer").as_deref(),
            Some("<div id=\"inner\">a</div><p>b</p>")
        );
        assert_eq!(host.inner_markup("inner").as_deref(), Some("a"));
    }

    #[test]
    fn test_prefix_tag_names_are_distinct() {
        let host = MemorySurface::with_markup("<p id=\"a\"><pre>x</pre></p>");
        assert_eq!(host.inner_markup("a").as_deref(), Some("<pre>x</pre>"));
    }

    #[test]
    fn test_quoted_gt_and_text_lt() {
        let host = MemorySurface::with_markup("<div id=\"a\" title=\"1 > 0\">x < y</div>");
        assert_eq!(host.inner_markup("a").as_deref(), Some("x < y"));
    }

    #[test]
    fn test_set_inner_markup_in_place() {
        let host = MemorySurface::with_markup("<main><div id=\"x\">old</div></main>");
        host.set_inner_markup("x", "new").unwrap();
        assert_eq!(host.markup(), "<main><div id=\"x\">new</div></main>");
    }

    #[test]
    fn test_set_inner_markup_expands_self_closing() {
        let host = MemorySurface::with_markup("<span id=\"x\"/>");
        host.set_inner_markup("x", "hi").unwrap();
        assert_eq!(host.markup(), "<span id=\"x\">hi</span>");
    }

    #[test]
    fn test_set_inner_markup_missing_element() {
        let host = MemorySurface::new();
        assert_eq!(
            host.set_inner_markup("nope", "x"),
            Err(Error::element_not_found("nope"))
        );
    }

    #[test]
    fn test_click_listeners() {
        let host = MemorySurface::with_markup("<button id=\"b\">go</button>");
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        host.attach_click("b", Rc::new(move || count_clone.set(count_clone.get() + 1)))
            .unwrap();

        assert_eq!(host.listener_count("b"), 1);
        assert_eq!(host.click("b"), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(host.click("missing"), 0);
        assert!(host.attach_click("missing", Rc::new(|| {})).is_err());
    }
}
