//! Core types for spark-markup.
//!
//! These types define the foundation that everything builds on.
//! Attribute values flow from element creation into the resolver and the
//! serializer; state values flow through observables into markup.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Callbacks
// =============================================================================

/// Zero-argument callback (click handlers, listeners without payload).
///
/// `Rc` so one handler can be attached to several elements.
pub type Callback = Rc<dyn Fn()>;

// =============================================================================
// Number formatting
// =============================================================================

/// Format a number the way it appears in markup.
///
/// Integral values print without a fraction (`6`, not `6.0`), negative zero
/// prints as `0`, and non-finite values print as `NaN` / `Infinity`.
/// Magnitudes from `1e21` up, or below `1e-6`, use exponent form with an
/// explicit sign on non-negative exponents (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}

// =============================================================================
// Attribute values
// =============================================================================

/// A declared attribute value.
///
/// Attributes are presence-checked by the resolver and printed verbatim by
/// the serializer. Callbacks are kept for listener attachment and are never
/// printed into markup.
#[derive(Clone)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Callback(Callback),
}

impl AttrValue {
    /// Wrap a closure as a callback attribute (e.g. `onclick`).
    pub fn callback(f: impl Fn() + 'static) -> Self {
        AttrValue::Callback(Rc::new(f))
    }

    /// Returns the callback if this value holds one.
    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            AttrValue::Callback(cb) => Some(cb),
            _ => None,
        }
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, AttrValue::Callback(_))
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            AttrValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            AttrValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            AttrValue::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Number(n) => f.write_str(&format_number(*n)),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Callback(_) => Ok(()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Callback> for AttrValue {
    fn from(value: Callback) -> Self {
        AttrValue::Callback(value)
    }
}

/// Attribute mapping in declaration order.
pub type Attributes = IndexMap<String, AttrValue>;

/// Style declarations in resolution order.
pub type StyleMap = IndexMap<String, String>;

/// Build an [`Attributes`] map in declaration order.
///
/// ```
/// use spark_markup::attrs;
///
/// let a = attrs! { "id" => "main", "flex" => true, "grow" => 1 };
/// assert_eq!(a.len(), 3);
/// ```
#[macro_export]
macro_rules! attrs {
    () => { $crate::types::Attributes::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::types::Attributes::new();
        $( map.insert(::std::string::String::from($key), $crate::types::AttrValue::from($value)); )+
        map
    }};
}

// =============================================================================
// State values
// =============================================================================

/// Numeric-literal shape accepted for arithmetic: optional sign, digits and
/// dots, optional exponent.
static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9.]+(?:e-?[0-9]+)?$").expect("numeric literal pattern"));

/// Check whether a string has the numeric-literal shape.
pub fn is_numeric_literal(s: &str) -> bool {
    NUMERIC_LITERAL.is_match(s)
}

/// A value boxed by an observable or stored in a node's state bag.
///
/// Strings are stored verbatim as [`Value::Text`], so `"007"` prints as
/// `007`. A text value in numeric-literal shape still counts as a number
/// for arithmetic; see [`Value::as_number`]. Arithmetic replaces it with a
/// [`Value::Number`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// The number this value holds, if arithmetic may apply to it.
    ///
    /// Text counts when it has the numeric-literal shape and parses as a
    /// finite `f64`. Non-finite numbers do not print as numeric literals and
    /// are excluded.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) if is_numeric_literal(s) => {
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

// =============================================================================
// Font
// =============================================================================

/// A named font stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub name: &'static str,
    pub value: &'static str,
}

impl Font {
    /// The default system font stack (bootstrap 4 lineage).
    pub const DEFAULT: Font = Font {
        name: "System-UI",
        value: "system-ui,-apple-system,\"Segoe UI\",Roboto,\"Helvetica Neue\",Arial,\"Noto Sans\",\"Liberation Sans\",sans-serif,\"Apple Color Emoji\",\"Segoe UI Emoji\",\"Segoe UI Symbol\",\"Noto Color Emoji\"",
    };
}

// =============================================================================
// Tests
// =============================================================================
