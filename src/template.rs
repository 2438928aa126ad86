//! Serialization of the vdom into the target template syntax.
//!
//! The target format is declarative markup: component tags are dashed,
//! expressions become `{{...}}` bindings, and state access written against
//! the authoring syntax's `this.data.x` convention is rewritten to the bare
//! identifier the target runtime expects. Attribute names arrive lowercased
//! from the HTML5 parse, which already matches the target's lowercase
//! event-attribute convention (`onClick` -> `onclick`).

use crate::utility::{remove_data_model_keyword, to_dashed};
use crate::vdom::{AttributeNode, AttributeValue, VdomNode};

const INDENT: &str = "  ";
const LINE_END: &str = "\r\n";

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push_str(LINE_END);
}

fn serialize_attributes(attributes: &[AttributeNode]) -> String {
    let mut out = String::new();
    for attr in attributes {
        out.push(' ');
        match &attr.value {
            AttributeValue::Static(value) => {
                out.push_str(&format!("{}=\"{}\"", attr.name, value));
            }
            AttributeValue::Dynamic(code) => {
                out.push_str(&format!(
                    "{}=\"{{{{{}}}}}\"",
                    attr.name,
                    remove_data_model_keyword(code)
                ));
            }
        }
    }
    out
}

fn serialize_node(node: &VdomNode, depth: usize, out: &mut String) {
    match node {
        VdomNode::Element(el) => {
            serialize_tag(&el.tag, &el.attributes, &el.children, depth, out);
        }
        VdomNode::Component(comp) => {
            serialize_tag(&to_dashed(&comp.name), &comp.attributes, &comp.children, depth, out);
        }
        VdomNode::Text(text) => {
            push_line(out, depth, text.value.trim());
        }
        VdomNode::Expression(expr) => {
            push_line(
                out,
                depth,
                &format!("{{{{{}}}}}", remove_data_model_keyword(&expr.code)),
            );
        }
    }
}

fn serialize_tag(
    tag: &str,
    attributes: &[AttributeNode],
    children: &[VdomNode],
    depth: usize,
    out: &mut String,
) {
    let attrs = serialize_attributes(attributes);
    if children.is_empty() {
        push_line(out, depth, &format!("<{}{}></{}>", tag, attrs, tag));
        return;
    }
    push_line(out, depth, &format!("<{}{}>", tag, attrs));
    for child in children {
        serialize_node(child, depth + 1, out);
    }
    push_line(out, depth, &format!("</{}>", tag));
}

/// Serialize a vdom into the template section of the target document.
pub fn generate_template(nodes: &[VdomNode]) -> String {
    let mut out = String::new();
    push_line(&mut out, 0, "<template>");
    for node in nodes {
        serialize_node(node, 1, &mut out);
    }
    out.push_str("</template>");
    out
}
