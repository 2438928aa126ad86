//! Shared helpers for the UX compiler: identifier casing, module
//! classification, import path resolution, and snippet assembly.
//!
//! Path resolution is the one place the compiler touches the filesystem
//! outside of discovery. All probes are read-only; nothing here holds state
//! across calls, so concurrent compilation of independent files needs no
//! coordination.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::error::CompilerError;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIER CASING
// ═══════════════════════════════════════════════════════════════════════════════

/// Convert a camelCase component class name to the dashed tag name used by
/// the target runtime: `MyButton` -> `my-button`.
///
/// A hyphen is inserted before every uppercase letter that follows another
/// letter, so the first character never produces a leading separator.
pub fn to_dashed(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_is_letter = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_is_letter {
            out.push('-');
        }
        out.extend(c.to_lowercase());
        prev_is_letter = c.is_alphabetic();
    }
    out
}

/// Convert a camelCase component class name to the underscored form used for
/// compiled output file names: `TodoItem` -> `todo_item`.
///
/// An underscore is injected before every uppercase letter. When the first
/// character is uppercase that injection produces a leading separator, which
/// is stripped; a name that never received the injection keeps its first
/// character (`todo` stays `todo`, `_private` stays `_private`).
pub fn to_underscored(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    let leading_injected = name.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
    if leading_injected {
        out.remove(0);
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODULE CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Authoring-syntax source extension.
pub const UX_SOURCE_SUFFIX: &str = ".tsx";
/// Target-format document extension.
pub const UX_TARGET_SUFFIX: &str = ".ux";

const STYLE_SUFFIXES: [&str; 3] = [".css", ".scss", ".less"];

fn probe_with_suffix(abs_src: &Path, suffix: &str) -> bool {
    let raw = abs_src.to_string_lossy();
    if raw.ends_with(suffix) {
        abs_src.exists()
    } else {
        PathBuf::from(format!("{}{}", raw, suffix)).exists()
    }
}

/// Decide whether an absolute path refers to a compilable component module
/// by probing for an authoring-syntax file or an already-compiled target
/// file at that location. Existence is the whole test: an empty or
/// malformed file still classifies as a module.
pub fn is_ux_module(abs_src: &Path) -> bool {
    probe_with_suffix(abs_src, UX_SOURCE_SUFFIX) || probe_with_suffix(abs_src, UX_TARGET_SUFFIX)
}

/// Decide whether an import path refers to a stylesheet. Pure suffix test,
/// no filesystem access.
pub fn is_css_module(import_src: &str) -> bool {
    STYLE_SUFFIXES.iter().any(|suffix| import_src.ends_with(suffix))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PATH RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Well-known directory name under which third-party packages are installed.
pub const DEPENDENCY_ROOT: &str = "node_modules";

/// Walk upward from `start` through its ancestors, returning the first
/// directory that contains a child named `name`. Nearest ancestor wins.
fn find_up(start: &Path, name: &str) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}

/// Compute the relative path from directory `from` to `to`. Both paths must
/// be absolute; the result walks up with `..` segments past the common
/// prefix and down into the target.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from_components: Vec<Component> = from.components().collect();
    let to_components: Vec<Component> = to.components().collect();

    let mut shared = 0;
    while shared < from_components.len()
        && shared < to_components.len()
        && from_components[shared] == to_components[shared]
    {
        shared += 1;
    }

    let mut rel = PathBuf::new();
    for _ in shared..from_components.len() {
        rel.push("..");
    }
    for component in &to_components[shared..] {
        rel.push(component.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

/// Fold `.` and `..` segments of `relative` against `base` without touching
/// the filesystem. Mirrors how the target runtime resolves references, so a
/// path can be computed for a file that does not exist yet.
fn lexical_resolve(base: &Path, relative: &Path) -> PathBuf {
    let mut resolved: PathBuf = base.to_path_buf();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Compute the path string to emit in the target document for an import.
///
/// Imports already written relative (`./`, `../`) pass through unchanged.
/// Anything else is a package-root import: the nearest ancestor
/// `node_modules` directory of the importing file is located, the import is
/// resolved beneath it, and the result is re-expressed relative to the
/// importing file's directory with forward slashes. This keeps emitted
/// references free of hard-coded `../../node_modules/...` chains no matter
/// where in the tree the importing component sits.
pub fn ux_path(file_src: &Path, import_src: &str) -> Result<String, CompilerError> {
    if import_src.starts_with("./") || import_src.starts_with("../") {
        return Ok(import_src.to_string());
    }

    let from = file_src.parent().unwrap_or_else(|| Path::new(""));
    let modules_root = find_up(from, DEPENDENCY_ROOT).ok_or_else(|| {
        CompilerError::unresolved_import(&file_src.to_string_lossy(), import_src)
    })?;

    let target = modules_root.join(import_src);
    let rel = relative_path(from, &target);
    Ok(rel.to_string_lossy().replace('\\', "/"))
}

/// Resolve an import to an absolute filesystem path from the directory of
/// the importing file. Package-root imports are redirected through the
/// dependency root first, so the result is probe-able on disk.
pub fn absolute_path(file_src: &Path, import_src: &str) -> Result<PathBuf, CompilerError> {
    let dir = file_src.parent().unwrap_or_else(|| Path::new(""));
    let target_relative = ux_path(file_src, import_src)?;
    Ok(lexical_resolve(dir, Path::new(&target_relative)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// DATA MODEL KEYWORDS
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref DATA_MODEL_KEYWORDS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("data");
        s.insert("props");
        s.insert("private");
        s.insert("protected");
        s.insert("public");
        s
    };
}

/// Reserved accessor prefixes, in stripping order.
const DATA_MODEL_PREFIXES: [&str; 5] = [
    "this.data.",
    "this.props.",
    "this.private.",
    "this.protected.",
    "this.public.",
];

/// Membership test against the reserved data-model accessor names.
pub fn is_data_model_keyword(name: &str) -> bool {
    DATA_MODEL_KEYWORDS.contains(name)
}

/// Strip every occurrence of the reserved accessor prefixes from an
/// expression, converting `this.data.count` style state access into the bare
/// identifier form the target template expects. Textual substitution: a
/// string literal containing one of the prefixes is stripped too, which is
/// an accepted source-level limitation.
pub fn remove_data_model_keyword(text: &str) -> String {
    let mut out = text.to_string();
    for prefix in DATA_MODEL_PREFIXES {
        out = out.replace(prefix, "");
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// SNIPPET ASSEMBLY
// ═══════════════════════════════════════════════════════════════════════════════

/// Separator between generated document fragments.
pub const SNIPPET_SEPARATOR: &str = "\r\n\r\n";

/// Join generated fragments into one document. Order is significant and
/// preserved; empty fragments still contribute a segment.
pub fn combine<S: AsRef<str>>(snippets: &[S]) -> String {
    snippets
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(SNIPPET_SEPARATOR)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_tree(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ux-compiler-{}-{}", name, std::process::id()));
        if dir.exists() {
            let _ = fs::remove_dir_all(&dir);
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_to_dashed() {
        assert_eq!(to_dashed("MyButton"), "my-button");
        assert_eq!(to_dashed("TodoItem"), "todo-item");
        assert_eq!(to_dashed("div"), "div");
        assert_eq!(to_dashed("A"), "a");
    }

    #[test]
    fn test_to_underscored() {
        assert_eq!(to_underscored("TodoItem"), "todo_item");
        assert_eq!(to_underscored("A"), "a");
        // No injection at the first character: nothing real is removed.
        assert_eq!(to_underscored("todo"), "todo");
        assert_eq!(to_underscored("_private"), "_private");
    }

    #[test]
    fn test_is_css_module() {
        assert!(is_css_module("x.scss"));
        assert!(is_css_module("./theme/colors.css"));
        assert!(is_css_module("a.less"));
        assert!(!is_css_module("x.ts"));
        assert!(!is_css_module("x.tsx"));
    }

    #[test]
    fn test_is_ux_module_probes_both_suffixes() {
        let root = temp_tree("classify");
        fs::write(root.join("button.tsx"), "").unwrap();
        fs::write(root.join("legacy.ux"), "<template></template>").unwrap();

        assert!(is_ux_module(&root.join("button")));
        assert!(is_ux_module(&root.join("button.tsx")));
        assert!(is_ux_module(&root.join("legacy")));
        assert!(!is_ux_module(&root.join("missing")));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_ux_path_relative_passthrough() {
        assert_eq!(
            ux_path(Path::new("/proj/src/a.tsx"), "./b").unwrap(),
            "./b"
        );
        assert_eq!(
            ux_path(Path::new("/proj/src/a.tsx"), "../widgets/c").unwrap(),
            "../widgets/c"
        );
    }

    #[test]
    fn test_ux_path_package_import() {
        let root = temp_tree("uxpath");
        fs::create_dir_all(root.join("proj/node_modules/some-pkg")).unwrap();
        fs::create_dir_all(root.join("proj/src/pages")).unwrap();

        let file = root.join("proj/src/pages/index.tsx");
        let resolved = ux_path(&file, "some-pkg").unwrap();
        assert_eq!(resolved, "../../node_modules/some-pkg");
        assert!(!resolved.contains('\\'));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_ux_path_nearest_dependency_root_wins() {
        let root = temp_tree("nearest");
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("proj/node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("proj/src")).unwrap();

        let file = root.join("proj/src/a.tsx");
        let resolved = ux_path(&file, "pkg").unwrap();
        assert_eq!(resolved, "../node_modules/pkg");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_ux_path_unresolved_is_an_error() {
        let root = temp_tree("orphan");
        fs::create_dir_all(root.join("src")).unwrap();

        let file = root.join("src/a.tsx");
        let err = ux_path(&file, "ghost-pkg").unwrap_err();
        assert_eq!(err.code, crate::error::ERR_UNRESOLVED_IMPORT);
        assert!(err.message.contains("ghost-pkg"));
        assert!(err.file.contains("a.tsx"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_absolute_path_resolves_relative_import() {
        let resolved = absolute_path(Path::new("/proj/src/pages/index.tsx"), "../widgets/button")
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/proj/src/widgets/button"));
    }

    #[test]
    fn test_absolute_path_package_import() {
        let root = temp_tree("abs");
        fs::create_dir_all(root.join("proj/node_modules/ui-kit")).unwrap();
        fs::create_dir_all(root.join("proj/src")).unwrap();

        let file = root.join("proj/src/a.tsx");
        let resolved = absolute_path(&file, "ui-kit").unwrap();
        assert_eq!(resolved, root.join("proj/node_modules/ui-kit"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_is_data_model_keyword() {
        assert!(is_data_model_keyword("data"));
        assert!(is_data_model_keyword("props"));
        assert!(is_data_model_keyword("protected"));
        assert!(!is_data_model_keyword("state"));
        assert!(!is_data_model_keyword("this"));
    }

    #[test]
    fn test_remove_data_model_keyword() {
        assert_eq!(
            remove_data_model_keyword("this.data.count + this.props.max"),
            "count + max"
        );
        // Every occurrence goes, not just the first.
        assert_eq!(
            remove_data_model_keyword("this.data.a + this.data.b"),
            "a + b"
        );
        assert_eq!(
            remove_data_model_keyword("this.private.x || this.public.y"),
            "x || y"
        );
        assert_eq!(remove_data_model_keyword("count + 1"), "count + 1");
    }

    #[test]
    fn test_combine_separator() {
        assert_eq!(combine(&["a", "b", "c"]), "a\r\n\r\nb\r\n\r\nc");
        assert_eq!(combine(&["a", "", "c"]), "a\r\n\r\n\r\n\r\nc");
        assert_eq!(combine(&["solo"]), "solo");
    }
}
