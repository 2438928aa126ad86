//! Compilation orchestration: one component source in, one complete target
//! document out.
//!
//! The pipeline is a pure function of (source, file path, import info) plus
//! read-only filesystem contents. Nothing persists across calls, so the
//! surrounding build tool may compile independent files concurrently with no
//! coordination. Failure never yields a partial document: every fragment is
//! produced before any combining happens.

#[cfg(feature = "napi")]
use napi_derive::napi;
use std::path::Path;

use crate::error::CompilerError;
use crate::imports::{ImportInfo, ModuleInfo};
use crate::preprocess::preprocess;
use crate::reference::{generate_js_ref, generate_style_ref, generate_ux_refs};
use crate::template::generate_template;
use crate::utility::combine;
use crate::vdom::build_vdom;

/// Compile the template half of the document: `<import>` references for the
/// structural component imports, followed by the serialized template.
/// Exposed separately so reference resolution and template serialization can
/// be driven without the script/style steps.
pub fn compile_template(
    preprocessed: &str,
    ux_imported: &[ModuleInfo],
    file_path: &str,
) -> Result<String, CompilerError> {
    let ux_refs = generate_ux_refs(ux_imported);
    let vdom = build_vdom(preprocessed, file_path)?;
    let template = generate_template(&vdom);
    Ok(combine(&[ux_refs, template]))
}

/// Compile a component's markup into the full target document: template
/// section, script reference, style reference, in that order.
pub fn compile_to_ux(
    source: &str,
    file_src: &Path,
    import_info: &ImportInfo,
) -> Result<String, CompilerError> {
    let preprocessed = preprocess(source);

    let template_snippet = compile_template(
        &preprocessed,
        &import_info.ux,
        &file_src.to_string_lossy(),
    )?;

    let script_snippet = generate_js_ref(file_src);
    let style_snippet = generate_style_ref(&import_info.style);

    Ok(combine(&[template_snippet, script_snippet, style_snippet]))
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn compile_to_ux_native(
    source: String,
    file_path: String,
    import_info: serde_json::Value,
) -> napi::Result<String> {
    let import_info: ImportInfo = serde_json::from_value(import_info)
        .map_err(|e| napi::Error::from_reason(format!("Invalid import info: {}", e)))?;
    compile_to_ux(&source, Path::new(&file_path), &import_info)
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn compile_template_native(
    preprocessed: String,
    ux_imported: serde_json::Value,
    file_path: String,
) -> napi::Result<String> {
    let ux_imported: Vec<ModuleInfo> = serde_json::from_value(ux_imported)
        .map_err(|e| napi::Error::from_reason(format!("Invalid module info: {}", e)))?;
    compile_template(&preprocessed, &ux_imported, &file_path)
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
