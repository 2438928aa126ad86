//! Component discovery for the build driver.
//!
//! Recursively scans a source root for authoring-syntax components and runs
//! import analysis over each one, fanned out with rayon. One broken
//! component never fails the batch: its error is reported and the file is
//! skipped, matching how the surrounding build tool surfaces per-file
//! diagnostics.

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CompilerError, ERR_SOURCE_READ};
use crate::imports::{analyze_imports, ImportInfo};
use crate::utility::to_underscored;

/// One discovered component: where it lives, what its compiled document will
/// be called, and the imports its document must reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEntry {
    pub name: String,
    pub path: String,
    /// Output file name, underscored per the target convention
    /// (`TodoItem.tsx` compiles to `todo_item.ux`).
    pub output_name: String,
    pub imports: ImportInfo,
}

/// Recursively find all authoring-syntax component files under a directory.
pub fn find_component_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        if let Ok(entry) = entry {
            let path = entry.path();
            if path.is_file() && path.extension().map(|ext| ext == "tsx").unwrap_or(false) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files
}

fn analyze_component_file(file_path: &Path) -> Result<ComponentEntry, CompilerError> {
    let source = fs::read_to_string(file_path).map_err(|e| {
        CompilerError::new(
            ERR_SOURCE_READ,
            &format!("Failed to read component source: {}", e),
            &file_path.to_string_lossy(),
        )
    })?;

    let name = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let imports = analyze_imports(&source, file_path)?;

    Ok(ComponentEntry {
        output_name: format!("{}.ux", to_underscored(&name)),
        name,
        path: file_path.to_string_lossy().to_string(),
        imports,
    })
}

/// Discover every component under `base_dir` and analyze its imports.
/// Files that cannot be read or parsed are reported to stderr and skipped.
pub fn discover_components(base_dir: &Path) -> Vec<ComponentEntry> {
    if !base_dir.exists() {
        return Vec::new();
    }

    find_component_files(base_dir)
        .par_iter()
        .filter_map(|file_path| match analyze_component_file(file_path) {
            Ok(entry) => Some(entry),
            Err(e) => {
                eprintln!("[UxCompiler] Skipping component {:?}: {}", file_path, e);
                None
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn discover_components_native(base_dir: String) -> serde_json::Value {
    let entries = discover_components(Path::new(&base_dir));
    serde_json::to_value(entries).unwrap_or(serde_json::Value::Null)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_tree(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("ux-discovery-{}-{}", name, std::process::id()));
        if dir.exists() {
            let _ = fs::remove_dir_all(&dir);
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_component_files_recurses() {
        let root = temp_tree("find");
        fs::create_dir_all(root.join("src/pages")).unwrap();
        fs::write(root.join("src/App.tsx"), "").unwrap();
        fs::write(root.join("src/pages/Home.tsx"), "").unwrap();
        fs::write(root.join("src/notes.txt"), "").unwrap();
        fs::write(root.join("src/helper.ts"), "").unwrap();

        let files = find_component_files(&root);
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("src/App.tsx")));
        assert!(files.iter().any(|f| f.ends_with("src/pages/Home.tsx")));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_discover_components_analyzes_imports() {
        let root = temp_tree("discover");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/TodoItem.tsx"), "").unwrap();
        fs::write(
            root.join("src/TodoList.tsx"),
            r#"import TodoItem from "./TodoItem";
               import "./list.css";
            "#,
        )
        .unwrap();

        let entries = discover_components(&root);
        assert_eq!(entries.len(), 2);

        let list = entries.iter().find(|e| e.name == "TodoList").unwrap();
        assert_eq!(list.output_name, "todo_list.ux");
        assert_eq!(list.imports.ux.len(), 1);
        assert_eq!(list.imports.ux[0].name, "TodoItem");
        assert_eq!(list.imports.style.len(), 1);

        let item = entries.iter().find(|e| e.name == "TodoItem").unwrap();
        assert_eq!(item.output_name, "todo_item.ux");
        assert!(item.imports.ux.is_empty());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_discover_components_missing_dir() {
        let entries = discover_components(Path::new("/definitely/not/a/real/dir"));
        assert!(entries.is_empty());
    }
}
