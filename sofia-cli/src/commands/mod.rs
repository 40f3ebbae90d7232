//! Command implementations.

pub mod extract;
pub mod validate;

use sofia::JsonAnnotator;

/// Load an annotation file, mapping errors to CLI messages.
pub fn load_documents(path: &str) -> Result<JsonAnnotator, String> {
    JsonAnnotator::from_json_file(path).map_err(|e| format!("Failed to read {path}: {e}"))
}
