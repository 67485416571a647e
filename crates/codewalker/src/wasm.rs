//! WebAssembly bindings for the browser editor
//!
//! The chat widget and the code-visualization tab call these before handing
//! diagram text to Mermaid. JSON results keep the original source so the
//! page can show it when Mermaid still rejects the diagram.

use wasm_bindgen::prelude::*;

use crate::core::{extract_diagrams, SanitizeConfig};
use crate::passes::Sanitizer;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Sanitize Mermaid diagram source with every pass enabled
#[wasm_bindgen]
pub fn sanitize(source: &str) -> String {
    Sanitizer::new().run(source)
}

/// Sanitize and return JSON with the original and sanitized text
///
/// # Returns
/// * JSON string with fields: original, sanitized, changed, passes
#[wasm_bindgen]
pub fn sanitize_json(source: &str) -> String {
    let diagram = Sanitizer::new().sanitize_diagram(source);
    serde_json::json!({
        "original": diagram.original(),
        "sanitized": diagram.sanitized(),
        "changed": diagram.is_changed(),
        "passes": diagram.outcomes(),
    })
    .to_string()
}

/// Sanitize with a comma-separated pass list
///
/// # Arguments
/// * `source` - Mermaid diagram source
/// * `passes` - e.g. "fences,node-labels", "all" or "none"
///
/// # Returns
/// * The sanitized text
/// * Throws a JavaScript error if the pass list names an unknown pass
#[wasm_bindgen]
pub fn sanitize_with_passes(source: &str, passes: &str) -> Result<String, JsValue> {
    let config: SanitizeConfig = passes
        .parse()
        .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
    Ok(Sanitizer::with_config(&config).run(source))
}

/// Extract the mermaid blocks from a markdown response
///
/// # Returns
/// * JSON array of objects with fields: language, source, offset, sanitized
#[wasm_bindgen]
pub fn extract_diagrams_json(markdown: &str) -> String {
    let sanitizer = Sanitizer::new();
    let blocks: Vec<serde_json::Value> = extract_diagrams(markdown)
        .into_iter()
        .map(|block| {
            serde_json::json!({
                "language": block.language,
                "offset": block.offset,
                "sanitized": sanitizer.run(&block.source),
                "source": block.source,
            })
        })
        .collect();
    serde_json::Value::Array(blocks).to_string()
}
