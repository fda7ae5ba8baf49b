//! Observable - a boxed value that refreshes dependents on mutation.
//!
//! # Design
//!
//! [`Observable`] wraps a [`Value`] in shared storage (`Rc<RefCell<..>>`)
//! together with two fan-out lists:
//!
//! - `subscribers`: weak [`Subscriber`] handles, refreshed in subscription
//!   order on every mutation
//! - `listeners`: an [`EventEmitter`] keyed by [`StateEvent`] name
//!
//! Every mutation runs to completion in this order before returning:
//!
//! ```text
//! update value ─▶ refresh subscribers (in order) ─▶ emit `mutate` ─▶ emit op event
//! ```
//!
//! Arithmetic only applies to numeric values, including text in
//! numeric-literal shape. On other text it is a silent no-op and nothing is
//! refreshed or emitted.
//!
//! No borrow is held while subscribers or listeners run, so either may read
//! or mutate the observable again.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::types::Value;

use super::events::{EventEmitter, ListenerId, StateEvent};

// =============================================================================
// Subscribers
// =============================================================================

/// Something an observable refreshes after it mutates.
pub trait Notifiable {
    fn refresh(&self);
}

/// Weak handle in an observable's subscriber list.
///
/// Holding a subscriber does not keep its target alive. A dropped target is
/// skipped on notification and pruned from the list.
#[derive(Clone)]
pub struct Subscriber(Weak<dyn Notifiable>);

impl Subscriber {
    pub fn new<T: Notifiable + 'static>(target: &Rc<T>) -> Self {
        let weak: Weak<T> = Rc::downgrade(target);
        Self(weak)
    }

    pub fn from_weak(weak: Weak<dyn Notifiable>) -> Self {
        Self(weak)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Whether both handles address the same target.
    pub fn same_target(&self, other: &Subscriber) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }

    /// Refresh the target if it is still alive.
    fn notify(&self) -> bool {
        match self.0.upgrade() {
            Some(target) => {
                target.refresh();
                true
            }
            None => false,
        }
    }
}

impl<T: Notifiable + 'static> From<&Rc<T>> for Subscriber {
    fn from(target: &Rc<T>) -> Self {
        Subscriber::new(target)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// =============================================================================
// Observable
// =============================================================================

struct ObservableInner {
    value: Value,
    subscribers: Vec<Subscriber>,
    listeners: EventEmitter<Value>,
}

/// A shared value with change notification.
///
/// Cloning creates a new handle to the same value, subscribers and
/// listeners.
#[derive(Clone)]
pub struct Observable {
    inner: Rc<RefCell<ObservableInner>>,
}

impl Observable {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_subscribers(value, Vec::<Subscriber>::new())
    }

    /// Create an observable that already refreshes `targets`.
    pub fn with_subscribers<S: Into<Subscriber>>(
        value: impl Into<Value>,
        targets: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value: value.into(),
                subscribers: targets.into_iter().map(Into::into).collect(),
                listeners: EventEmitter::new(),
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> Value {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, refresh subscribers, emit `mutate`.
    pub fn set(&self, value: impl Into<Value>) {
        self.inner.borrow_mut().value = value.into();
        self.mutate();
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    pub fn increment(&self) -> bool {
        self.apply(StateEvent::Increment, |n| n + 1.0)
    }

    pub fn decrement(&self) -> bool {
        self.apply(StateEvent::Decrement, |n| n - 1.0)
    }

    pub fn add(&self, amount: f64) -> bool {
        self.apply(StateEvent::Add, |n| n + amount)
    }

    pub fn subtract(&self, amount: f64) -> bool {
        self.apply(StateEvent::Subtract, |n| n - amount)
    }

    pub fn multiply(&self, amount: f64) -> bool {
        self.apply(StateEvent::Multiply, |n| n * amount)
    }

    pub fn divide(&self, amount: f64) -> bool {
        self.apply(StateEvent::Divide, |n| n / amount)
    }

    /// Apply a numeric operation. Returns false (and does nothing) when the
    /// current value is not numeric.
    fn apply(&self, event: StateEvent, op: impl FnOnce(f64) -> f64) -> bool {
        let current = self.inner.borrow().value.as_number();
        let Some(n) = current else {
            return false;
        };
        self.inner.borrow_mut().value = Value::Number(op(n));
        self.mutate();
        self.emit(event);
        true
    }

    // =========================================================================
    // Notification
    // =========================================================================

    fn mutate(&self) {
        let subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(Subscriber::is_alive);
            inner.subscribers.clone()
        };
        trace!(count = subscribers.len(), "refreshing subscribers");
        for subscriber in &subscribers {
            subscriber.notify();
        }
        self.emit(StateEvent::Mutate);
    }

    fn emit(&self, event: StateEvent) {
        let (listeners, value) = {
            let inner = self.inner.borrow();
            (inner.listeners.listeners(event.as_str()), inner.value.clone())
        };
        trace!(%event, listeners = listeners.len(), "emit");
        for listener in &listeners {
            listener(&value);
        }
    }

    /// Add a target to refresh on mutation.
    pub fn subscribe(&self, target: impl Into<Subscriber>) {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(Subscriber::is_alive);
        inner.subscribers.push(target.into());
    }

    /// Remove every entry addressing `target`. Returns false when none did.
    pub fn unsubscribe(&self, target: impl Into<Subscriber>) -> bool {
        let target = target.into();
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|s| !s.same_target(&target));
        inner.subscribers.len() != before
    }

    /// Number of subscribers whose target is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.is_alive())
            .count()
    }

    /// Listen for an event. The listener receives the new value.
    pub fn on<F>(&self, event: StateEvent, listener: F) -> ListenerId
    where
        F: Fn(&Value) + 'static,
    {
        self.inner.borrow_mut().listeners.on(event.as_str(), listener)
    }

    pub fn off(&self, event: StateEvent, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.off(event.as_str(), id)
    }

    // =========================================================================
    // Derived accessors
    // =========================================================================

    /// Length of the value's string form, in characters.
    pub fn length(&self) -> usize {
        self.with(|v| v.to_string().chars().count())
    }

    /// Leading integer of the string form; `NaN` if there is none.
    pub fn to_int(&self) -> f64 {
        self.with(|v| parse_int_prefix(&v.to_string()))
    }

    /// Leading decimal of the string form; `NaN` if there is none.
    pub fn to_float(&self) -> f64 {
        self.with(|v| parse_float_prefix(&v.to_string()))
    }
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

// =============================================================================
// Prefix parsing
// =============================================================================

static INT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("int prefix pattern"));

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?))")
        .expect("float prefix pattern")
});

/// Parse the leading integer of a string, or `NaN`.
pub fn parse_int_prefix(s: &str) -> f64 {
    INT_PREFIX
        .captures(s)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parse the leading decimal number of a string, or `NaN`.
pub fn parse_float_prefix(s: &str) -> f64 {
    FLOAT_PREFIX
        .captures(s)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Records refresh calls into a shared log.
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Notifiable for Recorder {
        fn refresh(&self) {
            self.log.borrow_mut().push(format!("refresh {}", self.name));
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Rc<Recorder> {
        Rc::new(Recorder { name, log: log.clone() })
    }

    fn count_events(obs: &Observable, event: StateEvent) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        obs.on(event, move |_| count_clone.set(count_clone.get() + 1));
        count
    }

    #[test]
    fn test_get_set() {
        let obs = Observable::new("hello");
        assert_eq!(obs.get(), Value::text("hello"));
        obs.set(42);
        assert_eq!(obs.get(), Value::Number(42.0));
    }

    #[test]
    fn test_numeric_strings_keep_their_text() {
        for literal in ["007", "1.50", "1e3", "02134"] {
            let obs = Observable::new(literal);
            assert_eq!(obs.get(), Value::text(literal));
            assert_eq!(obs.get().to_string(), literal);
            assert_eq!(obs.length(), literal.len());
        }

        let obs = Observable::new("007");
        obs.set("1.50");
        assert_eq!(obs.get().to_string(), "1.50");
        assert!(obs.increment());
        assert_eq!(obs.get(), Value::Number(2.5));
    }

    #[test]
    fn test_leading_zero_string_increments() {
        let obs = Observable::new("007");
        assert!(obs.increment());
        assert_eq!(obs.get(), Value::Number(8.0));
        assert_eq!(obs.get().to_string(), "8");
    }

    #[test]
    fn test_dead_subscribers_are_pruned() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let keep = recorder("keep", &log);
        let obs = Observable::new(0);
        obs.subscribe(&keep);
        for _ in 0..5 {
            obs.subscribe(&recorder("gone", &log));
        }
        assert_eq!(obs.subscriber_count(), 1);

        obs.set(1);
        assert_eq!(obs.inner.borrow().subscribers.len(), 1);
        assert_eq!(*log.borrow(), vec!["refresh keep"]);

        obs.subscribe(&recorder("gone", &log));
        obs.subscribe(&keep);
        // The dead entry is swept before the push
        assert_eq!(obs.inner.borrow().subscribers.len(), 2);
    }

    #[test]
    fn test_string_form_of_large_numbers() {
        let obs = Observable::new(1e21);
        assert_eq!(obs.get().to_string(), "1e+21");
        assert_eq!(obs.to_float(), 1e21);
        assert_eq!(obs.to_int(), 1.0);
        assert_eq!(obs.length(), 5);
    }

    #[test]
    fn test_increment_numeric_string() {
        let obs = Observable::new("5");
        let mutates = count_events(&obs, StateEvent::Mutate);
        let increments = count_events(&obs, StateEvent::Increment);

        assert!(obs.increment());
        assert_eq!(obs.get(), Value::Number(6.0));
        assert_eq!(obs.get().to_string(), "6");
        assert_eq!(mutates.get(), 1);
        assert_eq!(increments.get(), 1);
    }

    #[test]
    fn test_arithmetic_on_text_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let target = recorder("a", &log);
        let obs = Observable::with_subscribers("abc", [&target]);
        let mutates = count_events(&obs, StateEvent::Mutate);

        assert!(!obs.increment());
        assert!(!obs.decrement());
        assert!(!obs.add(3.0));
        assert!(!obs.subtract(1.0));
        assert!(!obs.multiply(2.0));
        assert!(!obs.divide(2.0));

        assert_eq!(obs.get(), Value::text("abc"));
        assert_eq!(mutates.get(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_each_operation_emits_its_event_once() {
        let obs = Observable::new(10);
        let ops: [(StateEvent, fn(&Observable) -> bool); 6] = [
            (StateEvent::Increment, |o| o.increment()),
            (StateEvent::Decrement, |o| o.decrement()),
            (StateEvent::Add, |o| o.add(5.0)),
            (StateEvent::Subtract, |o| o.subtract(2.0)),
            (StateEvent::Multiply, |o| o.multiply(3.0)),
            (StateEvent::Divide, |o| o.divide(4.0)),
        ];
        let mutates = count_events(&obs, StateEvent::Mutate);

        for (i, (event, op)) in ops.iter().enumerate() {
            let count = count_events(&obs, *event);
            assert!(op(&obs));
            assert_eq!(count.get(), 1, "{event} fired once");
            assert_eq!(mutates.get(), i as u32 + 1);
        }
        // ((10 + 1 - 1 + 5 - 2) * 3) / 4
        assert_eq!(obs.get(), Value::Number(9.75));
    }

    #[test]
    fn test_subscribers_refresh_in_order_before_listeners() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        let obs = Observable::new(0);
        obs.subscribe(&a);
        obs.subscribe(&b);

        let log_clone = log.clone();
        obs.on(StateEvent::Mutate, move |v| {
            log_clone.borrow_mut().push(format!("mutate {v}"));
        });

        obs.set("x");
        assert_eq!(*log.borrow(), vec!["refresh a", "refresh b", "mutate x"]);
    }

    #[test]
    fn test_arithmetic_emits_mutate_before_op_event() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let obs = Observable::new(1);
        obs.subscribe(&recorder("a", &log));
        // Dropped recorder is inert
        let l1 = log.clone();
        obs.on(StateEvent::Add, move |v| l1.borrow_mut().push(format!("add {v}")));
        let l2 = log.clone();
        obs.on(StateEvent::Mutate, move |v| l2.borrow_mut().push(format!("mutate {v}")));

        obs.add(2.0);
        assert_eq!(*log.borrow(), vec!["mutate 3", "add 3"]);
    }

    #[test]
    fn test_unsubscribe_by_identity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        let stranger = recorder("c", &log);
        let obs = Observable::with_subscribers(0, [&a, &b]);

        assert!(!obs.unsubscribe(&stranger));
        assert!(obs.unsubscribe(&a));
        assert_eq!(obs.subscriber_count(), 1);

        obs.set(1);
        assert_eq!(*log.borrow(), vec!["refresh b"]);
    }

    #[test]
    fn test_off_stops_listener() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let id = obs.on(StateEvent::Mutate, move |_| count_clone.set(count_clone.get() + 1));

        obs.set(1);
        assert!(obs.off(StateEvent::Mutate, id));
        obs.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listener_may_mutate_again() {
        let obs = Observable::new(0);
        let handle = obs.clone();
        obs.on(StateEvent::Increment, move |v| {
            if v.as_number() == Some(1.0) {
                handle.increment();
            }
        });
        obs.increment();
        assert_eq!(obs.get(), Value::Number(2.0));
    }

    #[test]
    fn test_derived_accessors() {
        let obs = Observable::new("12.5kg");
        assert_eq!(obs.length(), 6);
        assert_eq!(obs.to_int(), 12.0);
        assert_eq!(obs.to_float(), 12.5);

        obs.set("abc");
        assert!(obs.to_int().is_nan());
        assert!(obs.to_float().is_nan());

        obs.set(-3.75);
        assert_eq!(obs.length(), 5);
        assert_eq!(obs.to_int(), -3.0);
    }

    #[test]
    fn test_prefix_parsing() {
        assert_eq!(parse_int_prefix("  42px"), 42.0);
        assert_eq!(parse_float_prefix("3.5e2x"), 350.0);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("Infinity"), f64::INFINITY);
        assert!(parse_int_prefix("").is_nan());
    }
}
