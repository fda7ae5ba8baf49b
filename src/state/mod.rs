//! State Module - observable values and the plumbing around them.
//!
//! - **Observable** - boxed value, subscriber refresh, arithmetic helpers
//! - **Events** - named-event emitter used by observables
//! - **Hooks** - `use_state` / `use_effect` shorthand
//! - **Storage** - ordered key/value store

pub mod events;
pub mod hooks;
pub mod observable;
pub mod storage;

pub use events::{EventEmitter, Listener, ListenerId, StateEvent};
pub use hooks::{use_effect, use_state};
pub use observable::{parse_float_prefix, parse_int_prefix, Notifiable, Observable, Subscriber};
pub use storage::Storage;
