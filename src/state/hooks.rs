//! Hooks - shorthand for wiring observables to nodes and callbacks.

use std::rc::Rc;

use crate::types::Value;

use super::events::{ListenerId, StateEvent};
use super::observable::{Observable, Subscriber};

/// Create an observable that refreshes `targets` on every mutation.
///
/// # Example
///
/// ```ignore
/// let count = use_state(0, [&label]);
/// count.increment(); // label refreshes
/// ```
pub fn use_state<S: Into<Subscriber>>(
    value: impl Into<Value>,
    targets: impl IntoIterator<Item = S>,
) -> Observable {
    Observable::with_subscribers(value, targets)
}

/// Run `callback` after any of `observables` mutates.
///
/// Returns one listener id per observable, in the same order, for `off`.
pub fn use_effect<F>(callback: F, observables: &[&Observable]) -> Vec<ListenerId>
where
    F: Fn(&Value) + 'static,
{
    let callback = Rc::new(callback);
    observables
        .iter()
        .map(|observable| {
            let callback = callback.clone();
            observable.on(StateEvent::Mutate, move |value| callback(value))
        })
        .collect()
}
