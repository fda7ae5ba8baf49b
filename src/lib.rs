//! # spark-markup
//!
//! Component markup and reactive state for Rust.
//!
//! Components are tree nodes that serialize to markup. Observables hold state
//! and refresh the nodes subscribed to them, in place, every time they change.
//! Page-level navigation state is a
//! [spark-signals](https://github.com/RLabs-Inc/spark-signals) signal.
//!
//! ## Architecture
//!
//! ```text
//! create_element ─▶ Node ─▶ mount ─▶ HostSurface
//!                    ▲                   │
//!     Observable ────┘ refresh (inner) ◀─┘
//! ```
//!
//! Everything is single-threaded: a mutation refreshes its subscribers and
//! emits its events before it returns.
//!
//! ## Modules
//!
//! - [`types`] - Attribute and state values, number formatting, fonts
//! - [`engine`] - Node, Component behavior, Registry context
//! - [`primitives`] - Element factory, Layout, FlexLayout, Text
//! - [`style`] - Attribute resolution and the scoped stylesheet
//! - [`state`] - Observable, events, hooks, storage
//! - [`pipeline`] - Host surface, mount, render configuration
//! - [`app`] - Named pages

pub mod app;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod state;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, Result};

pub use engine::{Child, Component, ComponentClass, Node, Plain, Registry};

pub use primitives::{
    create_element, render_layout, ClassDescriptor, Descriptor, FlexLayout, FunctionComponent,
    Layout, Text,
};

pub use style::{LayoutFlags, StyleSheet, FLEX_CLASS};

pub use state::{
    use_effect, use_state, EventEmitter, ListenerId, Notifiable, Observable, StateEvent, Storage,
    Subscriber,
};

pub use pipeline::{mount, HostSurface, MemorySurface, RenderConfig};

pub use app::{App, Page, PageOptions, PageRenderer};
