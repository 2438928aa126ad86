//! Error types for the UX compiler core.
//!
//! Every failure surfaced by the compiler carries a stable code plus the path
//! of the file being compiled, so the surrounding build driver can report
//! which component broke without unwinding through JS glue.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

/// A package-root import could not be resolved through any ancestor
/// `node_modules` directory.
pub const ERR_UNRESOLVED_IMPORT: &str = "UX-ERR-IMPORT-001";
/// The JSX-like markup could not be parsed into a vdom.
pub const ERR_TEMPLATE_PARSE: &str = "UX-ERR-PARSE-001";
/// The component script could not be parsed during import analysis.
pub const ERR_SCRIPT_PARSE: &str = "UX-ERR-PARSE-002";
/// A component source file could not be read during discovery.
pub const ERR_SOURCE_READ: &str = "UX-ERR-IO-001";

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILER ERROR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct CompilerError {
    pub code: String,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl CompilerError {
    pub fn new(code: &str, message: &str, file: &str) -> Self {
        Self::with_location(code, message, file, 0, 0)
    }

    pub fn with_location(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        CompilerError {
            code: code.to_string(),
            message: message.to_string(),
            file: file.to_string(),
            line,
            column,
        }
    }

    /// Build the error for a package-root import with no `node_modules`
    /// ancestor. The raw import string and the importing file are both part
    /// of the message so the failure is actionable from build output alone.
    pub fn unresolved_import(file: &str, import_src: &str) -> Self {
        Self::new(
            ERR_UNRESOLVED_IMPORT,
            &format!(
                "Cannot resolve import '{}': no node_modules directory found in any ancestor of the importing file",
                import_src
            ),
            file,
        )
    }
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line > 0 {
            write!(
                f,
                "[{}] {} ({}:{}:{})",
                self.code, self.message, self.file, self.line, self.column
            )
        } else {
            write!(f, "[{}] {} ({})", self.code, self.message, self.file)
        }
    }
}

impl std::error::Error for CompilerError {}
