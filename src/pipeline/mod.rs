//! Render Pipeline
//!
//! Connects the component tree to a host surface.
//!
//! ```text
//! Node ─▶ render() ─▶ serialize() ─▶ HostSurface
//!   ▲                                    │
//!   └──── Node::refresh (inner markup) ◀─┘
//! ```
//!
//! - [`config`] - render configuration (id prefix, base class, fallback tag)
//! - [`host`] - the host capability trait and the in-memory surface
//! - [`mount`] - first insertion and identity aliasing

pub mod config;
pub mod host;
pub mod mount;

pub use config::RenderConfig;
pub use host::{HostSurface, MemorySurface};
pub use mount::mount;
