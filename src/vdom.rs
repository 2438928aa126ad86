//! Structural parse of the JSX-like markup into a vdom tree.
//!
//! The markup is HTML5-shaped once preprocessed, so the tree is built with
//! html5ever. Two things have to survive a round-trip through an HTML5
//! parser that the format does not natively allow:
//!
//! - brace expressions (`{this.data.count}`) are not markup; they are
//!   replaced with per-call placeholders before parsing and restored after;
//! - component tags are uppercase and html5ever lowercases every tag name,
//!   so original casing is smuggled through a marker attribute.
//!
//! The placeholder table lives on the call stack. Compiling the same source
//! twice produces an identical tree.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CompilerError, ERR_TEMPLATE_PARSE};

// ═══════════════════════════════════════════════════════════════════════════════
// VDOM TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VdomNode {
    Element(ElementNode),
    Component(ComponentNode),
    Text(TextNode),
    Expression(ExpressionNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<AttributeNode>,
    pub children: Vec<VdomNode>,
}

/// A structural component usage. Same shape as an element; kept distinct
/// because the serializer maps the name through the tag-name convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub name: String,
    pub attributes: Vec<AttributeNode>,
    pub children: Vec<VdomNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionNode {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeNode {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    Static(String),
    Dynamic(String),
}

/// Component tags start with an uppercase letter.
pub fn is_component_tag(tag_name: &str) -> bool {
    tag_name
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPRESSION PLACEHOLDERS
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref EXPR_PLACEHOLDER_RE: Regex = Regex::new(r"__UX_EXPR_(\d+)__").unwrap();
    static ref COMPONENT_OPEN_RE: Regex = Regex::new(r"<([A-Z][a-zA-Z0-9]*)(\s|/?>)").unwrap();
}

const CASING_MARKER: &str = "data-ux-name";

/// Find the index one past the `}` matching the `{` at `start`, skipping
/// string literals, template literals, and escapes inside the expression.
fn balanced_brace_end(chars: &[char], start: usize) -> Option<usize> {
    let mut depth = 0;
    let mut i = start;
    let mut in_string: Option<char> = None;
    let mut in_template = false;

    while i < chars.len() {
        let c = chars[i];

        if c == '\\' && i + 1 < chars.len() {
            i += 2;
            continue;
        }
        if let Some(quote) = in_string {
            if c == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }
        if in_template {
            if c == '`' {
                in_template = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' | '\'' => in_string = Some(c),
            '`' => in_template = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Replace every balanced `{...}` with a placeholder and return the markup
/// plus the placeholder table.
fn normalize_expressions(markup: &str) -> (String, HashMap<String, String>) {
    let chars: Vec<char> = markup.chars().collect();
    let mut normalized = String::with_capacity(markup.len());
    let mut expressions = HashMap::new();
    let mut counter = 0usize;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '{' {
            if let Some(end) = balanced_brace_end(&chars, i) {
                let code: String = chars[i + 1..end - 1].iter().collect();
                let placeholder = format!("__UX_EXPR_{}__", counter);
                normalized.push_str(&placeholder);
                expressions.insert(placeholder, code.trim().to_string());
                counter += 1;
                i = end;
                continue;
            }
        }
        normalized.push(chars[i]);
        i += 1;
    }

    (normalized, expressions)
}

/// Tag uppercase component opens with a marker attribute carrying the
/// original name, so casing survives the lowercasing HTML5 parse.
fn mark_component_tags(markup: &str) -> String {
    COMPONENT_OPEN_RE
        .replace_all(markup, |caps: &regex::Captures| {
            format!("<{} {}=\"{}\"{}", &caps[1], CASING_MARKER, &caps[1], &caps[2])
        })
        .to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// DOM CONVERSION
// ═══════════════════════════════════════════════════════════════════════════════

fn convert_attribute_value(raw: &str, expressions: &HashMap<String, String>) -> AttributeValue {
    if let Some(caps) = EXPR_PLACEHOLDER_RE.captures(raw) {
        let mat = caps.get(0).unwrap();
        // The whole value is one expression: a dynamic binding.
        if mat.start() == 0 && mat.end() == raw.len() {
            if let Some(code) = expressions.get(mat.as_str()) {
                return AttributeValue::Dynamic(code.clone());
            }
        }
    }
    // Mixed or plain value: restore any embedded expression text verbatim.
    let restored = EXPR_PLACEHOLDER_RE.replace_all(raw, |caps: &regex::Captures| {
        expressions
            .get(caps.get(0).unwrap().as_str())
            .map(|code| format!("{{{}}}", code))
            .unwrap_or_default()
    });
    AttributeValue::Static(restored.to_string())
}

/// Split a text run around expression placeholders into text and expression
/// nodes. Whitespace-only text segments are dropped.
fn convert_text(text: &str, expressions: &HashMap<String, String>) -> Vec<VdomNode> {
    let mut nodes = Vec::new();
    let mut last_end = 0;

    for mat in EXPR_PLACEHOLDER_RE.find_iter(text) {
        let before = &text[last_end..mat.start()];
        if !before.trim().is_empty() {
            nodes.push(VdomNode::Text(TextNode {
                value: before.to_string(),
            }));
        }
        if let Some(code) = expressions.get(mat.as_str()) {
            nodes.push(VdomNode::Expression(ExpressionNode { code: code.clone() }));
        }
        last_end = mat.end();
    }

    let rest = &text[last_end..];
    if !rest.trim().is_empty() {
        nodes.push(VdomNode::Text(TextNode {
            value: rest.to_string(),
        }));
    }

    nodes
}

fn convert_node(handle: &Handle, expressions: &HashMap<String, String>) -> Vec<VdomNode> {
    match &handle.data {
        NodeData::Document => convert_children(handle, expressions),

        NodeData::Text { contents } => convert_text(&contents.borrow(), expressions),

        NodeData::Element { name, attrs, .. } => {
            let mut tag = name.local.to_string();

            let dom_attrs = attrs.borrow();
            let mut attributes = Vec::new();
            for attr in dom_attrs.iter() {
                let attr_name = attr.name.local.to_string();
                if attr_name == CASING_MARKER {
                    tag = attr.value.to_string();
                    continue;
                }
                attributes.push(AttributeNode {
                    name: attr_name,
                    value: convert_attribute_value(&attr.value, expressions),
                });
            }

            // html5ever invents html/head/body wrappers around fragments.
            // Components never author document structure, so these are
            // always synthetic and always flattened.
            if tag == "html" || tag == "head" || tag == "body" {
                return convert_children(handle, expressions);
            }

            let children = convert_children(handle, expressions);
            if is_component_tag(&tag) {
                vec![VdomNode::Component(ComponentNode {
                    name: tag,
                    attributes,
                    children,
                })]
            } else {
                vec![VdomNode::Element(ElementNode {
                    tag,
                    attributes,
                    children,
                })]
            }
        }

        // Comments and doctypes carry nothing into the target template.
        _ => vec![],
    }
}

fn convert_children(handle: &Handle, expressions: &HashMap<String, String>) -> Vec<VdomNode> {
    let mut nodes = Vec::new();
    for child in handle.children.borrow().iter() {
        nodes.extend(convert_node(child, expressions));
    }
    nodes
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRY POINT
// ═══════════════════════════════════════════════════════════════════════════════

/// Build the vdom for a preprocessed component markup fragment.
pub fn build_vdom(preprocessed: &str, file_path: &str) -> Result<Vec<VdomNode>, CompilerError> {
    let (normalized, expressions) = normalize_expressions(preprocessed);
    let marked = mark_component_tags(&normalized);

    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut marked.as_bytes())
        .map_err(|e| {
            CompilerError::new(
                ERR_TEMPLATE_PARSE,
                &format!("Failed to parse component markup: {}", e),
                file_path,
            )
        })?;

    Ok(convert_node(&dom.document, &expressions))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
