//! Render configuration.
//!
//! Naming knobs used by element creation and page rendering. A config lives
//! on the [`Registry`](crate::engine::Registry) it was created with.

/// Naming and fallback settings for a render context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Prefix of auto-generated node ids (`v-0`, `v-1`, ...).
    pub id_prefix: String,
    /// Class every node's resolved class list starts with.
    pub base_class: String,
    /// Tag of the placeholder element shown for pages that render nothing.
    pub fallback_tag: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            id_prefix: "v-".to_string(),
            base_class: "void-layout".to_string(),
            fallback_tag: "pre".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_base_class(mut self, class: impl Into<String>) -> Self {
        self.base_class = class.into();
        self
    }

    pub fn with_fallback_tag(mut self, tag: impl Into<String>) -> Self {
        self.fallback_tag = tag.into();
        self
    }
}
