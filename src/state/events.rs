//! Event emitter - named events with ordered listener lists.
//!
//! Listeners are identified by the [`ListenerId`] returned from `on`, which
//! is what `off` takes. Listeners for one event run in registration order.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// State events
// =============================================================================

/// Events an observable emits after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateEvent {
    Mutate,
    Increment,
    Decrement,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl StateEvent {
    pub const ALL: [StateEvent; 7] = [
        StateEvent::Mutate,
        StateEvent::Increment,
        StateEvent::Decrement,
        StateEvent::Add,
        StateEvent::Subtract,
        StateEvent::Multiply,
        StateEvent::Divide,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateEvent::Mutate => "mutate",
            StateEvent::Increment => "increment",
            StateEvent::Decrement => "decrement",
            StateEvent::Add => "add",
            StateEvent::Subtract => "subtract",
            StateEvent::Multiply => "multiply",
            StateEvent::Divide => "divide",
        }
    }
}

impl fmt::Display for StateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::UnknownEvent { name: s.to_string() })
    }
}

// =============================================================================
// Emitter
// =============================================================================

/// Shared listener callback.
pub type Listener<T> = Rc<dyn Fn(&T)>;

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Registry of listeners keyed by event name.
pub struct EventEmitter<T> {
    listeners: HashMap<String, Vec<(ListenerId, Listener<T>)>>,
    next_id: usize,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener to an event.
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event.into())
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Unsubscribe a listener. Returns false when it was not registered.
    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        list.len() != before
    }

    /// Listeners of an event, in registration order.
    pub fn listeners(&self, event: &str) -> Vec<Listener<T>> {
        self.listeners
            .get(event)
            .map(|list| list.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Call every listener of an event. Returns how many ran.
    pub fn emit(&self, event: &str, value: &T) -> usize {
        let listeners = self.listeners(event);
        for listener in &listeners {
            listener(value);
        }
        listeners.len()
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(event, list)| (event.as_str(), list.len()))
            .collect();
        f.debug_struct("EventEmitter").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_event_names_round_trip() {
        for event in StateEvent::ALL {
            assert_eq!(event.as_str().parse::<StateEvent>(), Ok(event));
        }
        assert_eq!(
            "explode".parse::<StateEvent>(),
            Err(Error::UnknownEvent { name: "explode".to_string() })
        );
    }

    #[test]
    fn test_emit_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::<i32>::new();

        let l1 = log.clone();
        emitter.on("ping", move |v| l1.borrow_mut().push(format!("first {v}")));
        let l2 = log.clone();
        emitter.on("ping", move |v| l2.borrow_mut().push(format!("second {v}")));

        assert_eq!(emitter.emit("ping", &7), 2);
        assert_eq!(*log.borrow(), vec!["first 7", "second 7"]);
        assert_eq!(emitter.emit("pong", &7), 0);
    }

    #[test]
    fn test_off_removes_only_that_listener() {
        let mut emitter = EventEmitter::<()>::new();
        let a = emitter.on("e", |_| {});
        let _b = emitter.on("e", |_| {});

        assert!(emitter.off("e", a));
        assert!(!emitter.off("e", a));
        assert!(!emitter.off("other", a));
        assert_eq!(emitter.listener_count("e"), 1);
    }
}
