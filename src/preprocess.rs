//! Source normalization ahead of the structural parse.
//!
//! The authoring syntax allows a few constructs the HTML5 tree builder
//! cannot digest; each pass below rewrites one of them so the vdom builder
//! sees regular markup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Brace-comment blocks: `{/* ... */}`.
    static ref BRACE_COMMENT_RE: Regex = Regex::new(r"(?s)\{\s*/\*.*?\*/\s*\}").unwrap();

    /// `className` attribute alias.
    static ref CLASS_NAME_RE: Regex = Regex::new(r"\bclassName(\s*=)").unwrap();

    /// Self-closing component tags: `<Foo ... />`.
    static ref SELF_CLOSING_COMPONENT_RE: Regex =
        Regex::new(r"<([A-Z][a-zA-Z0-9]*)\s*([^>]*?)\s*/>").unwrap();
}

/// Normalize authoring-syntax quirks prior to structural analysis.
///
/// Order matters: comments go first so a commented-out self-closing tag is
/// never expanded, and the tag expansion runs last because the HTML5 parser
/// would otherwise treat `<Foo />` as an opening tag and swallow every
/// following sibling as a child.
pub fn preprocess(source: &str) -> String {
    let without_comments = BRACE_COMMENT_RE.replace_all(source, "");
    let with_class = CLASS_NAME_RE.replace_all(&without_comments, "class$1");
    SELF_CLOSING_COMPONENT_RE
        .replace_all(&with_class, "<$1 $2></$1>")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_brace_comments() {
        let out = preprocess("<div>{/* remove me */}<span>keep</span></div>");
        assert!(!out.contains("remove me"));
        assert!(out.contains("<span>keep</span>"));
    }

    #[test]
    fn test_rewrites_class_name_attribute() {
        let out = preprocess(r#"<div className="row" data-className-like="x"></div>"#);
        assert!(out.contains(r#"class="row""#));
        // Only the attribute itself is rewritten.
        assert!(out.contains("data-className-like"));
    }

    #[test]
    fn test_expands_self_closing_components() {
        assert_eq!(preprocess("<TodoItem />"), "<TodoItem ></TodoItem>");
        let out = preprocess(r#"<Card title={this.data.title} /><footer></footer>"#);
        assert!(out.contains("</Card>"));
        assert!(out.contains("<footer>"));
    }

    #[test]
    fn test_plain_elements_untouched() {
        let src = "<div><br/><img src=\"a.png\"/></div>";
        assert_eq!(preprocess(src), src);
    }

    #[test]
    fn test_commented_component_is_not_expanded() {
        let out = preprocess("<div>{/* <Old /> */}</div>");
        assert_eq!(out, "<div></div>");
    }
}
