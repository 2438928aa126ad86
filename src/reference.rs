//! Reference generators for the non-template sections of the target
//! document: `<import>` tags for structural component imports, the
//! `<script>` tag pointing at the compiled component script, and `<style>`
//! tags for imported stylesheets.

use std::path::Path;

use crate::imports::ModuleInfo;
use crate::utility::to_dashed;

/// Emit one `<import>` tag per structural component import. The tag name is
/// the dashed form of the local binding name, the src the resolved path.
/// Empty input produces an empty fragment.
pub fn generate_ux_refs(ux_imported: &[ModuleInfo]) -> String {
    ux_imported
        .iter()
        .map(|module| {
            format!(
                "<import name=\"{}\" src=\"{}\"></import>",
                to_dashed(&module.name),
                module.ux_ref
            )
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Emit the script reference for the compiled component. The script is
/// emitted next to the target document under the same stem.
pub fn generate_js_ref(file_src: &Path) -> String {
    let stem = file_src
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("<script src=\"./{}.js\"></script>", stem)
}

/// Emit one `<style>` tag per imported stylesheet. Empty input produces an
/// empty fragment.
pub fn generate_style_ref(style_imported: &[ModuleInfo]) -> String {
    style_imported
        .iter()
        .map(|module| format!("<style src=\"{}\"></style>", module.ux_ref))
        .collect::<Vec<_>>()
        .join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::ModuleKind;

    fn module(name: &str, source: &str, kind: ModuleKind, ux_ref: &str) -> ModuleInfo {
        ModuleInfo {
            name: name.to_string(),
            source: source.to_string(),
            kind,
            ux_ref: ux_ref.to_string(),
        }
    }

    #[test]
    fn test_generate_ux_refs() {
        let refs = generate_ux_refs(&[
            module("TodoItem", "./todo_item", ModuleKind::Ux, "./todo_item"),
            module(
                "Badge",
                "ui-kit/badge",
                ModuleKind::Ux,
                "../node_modules/ui-kit/badge",
            ),
        ]);
        assert_eq!(
            refs,
            "<import name=\"todo-item\" src=\"./todo_item\"></import>\r\n\
             <import name=\"badge\" src=\"../node_modules/ui-kit/badge\"></import>"
        );
    }

    #[test]
    fn test_generate_ux_refs_empty() {
        assert_eq!(generate_ux_refs(&[]), "");
    }

    #[test]
    fn test_generate_js_ref_uses_file_stem() {
        assert_eq!(
            generate_js_ref(Path::new("/proj/src/todo_item.tsx")),
            "<script src=\"./todo_item.js\"></script>"
        );
    }

    #[test]
    fn test_generate_style_ref() {
        let styles = generate_style_ref(&[module("", "./main.css", ModuleKind::Style, "./main.css")]);
        assert_eq!(styles, "<style src=\"./main.css\"></style>");
        assert_eq!(generate_style_ref(&[]), "");
    }
}
