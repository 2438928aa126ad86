//! # UX Compiler Native Core
//!
//! Translates components written in a JSX-like authoring syntax into the
//! three-part document consumed by the target UI runtime: a template
//! section, a script reference, and a style reference.
//!
//! ## Pipeline Invariants
//!
//! 1. **Fragment Order**: the final document is always
//!    `imports -> template -> script ref -> style ref`, joined with the
//!    fixed `"\r\n\r\n"` separator. The target runtime depends on this
//!    ordering.
//! 2. **No Cross-Call State**: every compilation is a pure function of
//!    (source, file path, import info) plus read-only filesystem contents.
//!    Identical inputs with an unchanged filesystem produce byte-identical
//!    output, and independent files compile concurrently with no
//!    coordination.
//! 3. **Emitted Paths Are Relative**: references in the output are plain
//!    forward-slash relative paths, regardless of how the import was
//!    declared in source. Package-root imports are redirected through the
//!    nearest ancestor `node_modules` directory; when none exists the
//!    compilation fails with `UX-ERR-IMPORT-001`, never a malformed path.
//! 4. **All Or Nothing**: a failed compilation returns an error, never a
//!    partially combined document.

mod compiler;
mod discovery;
mod error;
mod imports;
mod preprocess;
mod reference;
mod template;
mod utility;
mod vdom;

pub use compiler::{compile_template, compile_to_ux};
pub use discovery::{discover_components, find_component_files, ComponentEntry};
pub use error::{
    CompilerError, ERR_SCRIPT_PARSE, ERR_SOURCE_READ, ERR_TEMPLATE_PARSE, ERR_UNRESOLVED_IMPORT,
};
pub use imports::{analyze_imports, classify_module, ImportInfo, ModuleInfo, ModuleKind};
pub use preprocess::preprocess;
pub use reference::{generate_js_ref, generate_style_ref, generate_ux_refs};
pub use template::generate_template;
pub use utility::{
    absolute_path, combine, is_css_module, is_data_model_keyword, is_ux_module,
    remove_data_model_keyword, to_dashed, to_underscored, ux_path, SNIPPET_SEPARATOR,
};
pub use vdom::{
    build_vdom, is_component_tag, AttributeNode, AttributeValue, ComponentNode, ElementNode,
    ExpressionNode, TextNode, VdomNode,
};

// Node bindings, compiled only for the addon build.
#[cfg(feature = "napi")]
pub use compiler::{compile_template_native, compile_to_ux_native};
#[cfg(feature = "napi")]
pub use discovery::discover_components_native;
#[cfg(feature = "napi")]
pub use imports::analyze_imports_native;
