//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Default path of the runtime crate in generated `use` lines.
pub const DEFAULT_RUNTIME_PATH: &str = "ironfb_core";

/// Options controlling the generated code.
///
/// Serializable so that build configurations can embed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Path of the runtime crate, e.g. `ironfb_core` or `ironfb::core`.
    pub runtime_path: String,
    /// Emit `get_root_as_*` for every table, not only the root type.
    pub all_tables_as_roots: bool,
    /// Carry schema documentation into the generated code.
    pub emit_doc_comments: bool,
}

impl GeneratorOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            all_tables_as_roots: false,
            emit_doc_comments: true,
        }
    }

    /// Sets the runtime crate path.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Emits root accessors for every table.
    #[must_use]
    pub fn all_tables_as_roots(mut self, enabled: bool) -> Self {
        self.all_tables_as_roots = enabled;
        self
    }

    /// Enables or disables documentation comments.
    #[must_use]
    pub fn emit_doc_comments(mut self, enabled: bool) -> Self {
        self.emit_doc_comments = enabled;
        self
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}
