//! Scoped stylesheet side channel.
//!
//! Accumulates `#<id> {property:value;...}` rules. Append-only: rules are
//! never replaced or removed, so a later rule for the same id overrides by
//! cascade order.

use crate::types::StyleMap;

use super::resolver::serialize_declarations;

/// Append-only collection of id-scoped style rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    text: String,
    rules: usize,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule scoped to `id`.
    pub fn add_rule(&mut self, id: &str, declarations: &StyleMap) {
        self.text.push('#');
        self.text.push_str(id);
        self.text.push_str(" {");
        self.text.push_str(&serialize_declarations(declarations));
        self.text.push('}');
        self.rules += 1;
    }

    /// The accumulated stylesheet text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of rules appended so far.
    pub fn len(&self) -> usize {
        self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_append() {
        let mut sheet = StyleSheet::new();
        let mut a = StyleMap::new();
        a.insert("color".to_string(), "red".to_string());
        sheet.add_rule("v-1", &a);

        let mut b = StyleMap::new();
        b.insert("margin".to_string(), "0".to_string());
        b.insert("color".to_string(), "blue".to_string());
        sheet.add_rule("v-1", &b);

        assert_eq!(sheet.as_str(), "#v-1 {color:red;}#v-1 {margin:0;color:blue;}");
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_empty_rule() {
        let mut sheet = StyleSheet::new();
        assert!(sheet.is_empty());
        sheet.add_rule("x", &StyleMap::new());
        assert_eq!(sheet.as_str(), "#x {}");
    }
}
