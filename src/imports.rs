//! Import analysis for component sources.
//!
//! Walks the import declarations of a `.tsx` component with the oxc parser
//! and classifies each one: structural component modules feed the template
//! `<import>` references, stylesheet modules feed the `<style>` reference,
//! and everything else belongs to the script compiler and is ignored here.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::{ImportDeclarationSpecifier, Statement};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CompilerError, ERR_SCRIPT_PARSE};
use crate::utility::{absolute_path, is_css_module, is_ux_module, ux_path};

// ═══════════════════════════════════════════════════════════════════════════════
// IMPORT MODEL
// ═══════════════════════════════════════════════════════════════════════════════

/// What an import statement resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Another compilable component.
    Ux,
    /// A stylesheet.
    Style,
    /// An ordinary script module, not referenced from the target document.
    Plain,
}

/// One imported module, as seen from the file being compiled. Created once
/// during analysis and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    /// Local binding name from the import statement. Empty for side-effect
    /// imports (`import "./theme.css"`).
    pub name: String,
    /// Import path exactly as written in source.
    pub source: String,
    pub kind: ModuleKind,
    /// Path string to emit in the target document.
    pub ux_ref: String,
}

/// Per-file aggregate of the imports the target document must reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    pub ux: Vec<ModuleInfo>,
    pub style: Vec<ModuleInfo>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Classify a single import path from the perspective of `file_src`.
/// Stylesheets are recognized by suffix alone; component modules by probing
/// the resolved location on disk.
pub fn classify_module(file_src: &Path, import_src: &str) -> Result<ModuleKind, CompilerError> {
    if is_css_module(import_src) {
        return Ok(ModuleKind::Style);
    }
    let abs_src = absolute_path(file_src, import_src)?;
    if is_ux_module(&abs_src) {
        Ok(ModuleKind::Ux)
    } else {
        Ok(ModuleKind::Plain)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANALYSIS
// ═══════════════════════════════════════════════════════════════════════════════

fn local_binding_name(specifiers: Option<&[ImportDeclarationSpecifier]>) -> String {
    let Some(first) = specifiers.and_then(|s| s.first()) else {
        return String::new();
    };
    match first {
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.to_string(),
        ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.to_string(),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => s.local.name.to_string(),
    }
}

/// Analyze the import declarations of a component source and group them by
/// kind. Package-root imports that cannot be resolved through an ancestor
/// `node_modules` directory fail the analysis for this file.
pub fn analyze_imports(source: &str, file_src: &Path) -> Result<ImportInfo, CompilerError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true);
    let ret = Parser::new(&allocator, source, source_type).parse();

    if !ret.errors.is_empty() {
        return Err(CompilerError::new(
            ERR_SCRIPT_PARSE,
            &format!("Failed to parse component source: {}", ret.errors[0]),
            &file_src.to_string_lossy(),
        ));
    }

    let mut info = ImportInfo::default();

    for stmt in &ret.program.body {
        let Statement::ImportDeclaration(import_decl) = stmt else {
            continue;
        };
        if import_decl.import_kind.is_type() {
            continue;
        }

        let import_src = import_decl.source.value.to_string();
        let name = local_binding_name(import_decl.specifiers.as_deref().map(|v| &**v));

        match classify_module(file_src, &import_src)? {
            ModuleKind::Style => {
                let ux_ref = ux_path(file_src, &import_src)?;
                info.style.push(ModuleInfo {
                    name,
                    source: import_src,
                    kind: ModuleKind::Style,
                    ux_ref,
                });
            }
            ModuleKind::Ux => {
                let ux_ref = ux_path(file_src, &import_src)?;
                info.ux.push(ModuleInfo {
                    name,
                    source: import_src,
                    kind: ModuleKind::Ux,
                    ux_ref,
                });
            }
            ModuleKind::Plain => {}
        }
    }

    Ok(info)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn analyze_imports_native(source: String, file_path: String) -> napi::Result<serde_json::Value> {
    let info = analyze_imports(&source, Path::new(&file_path))
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(info).map_err(|e| napi::Error::from_reason(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
