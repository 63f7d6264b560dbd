//! Deterministic markup serialization.
//!
//! Output is compact (no added whitespace). Element attributes are written as
//! `id`, then `class`, then the rest in key order, so two equal trees always
//! serialize to the same string.

use std::fmt::Write;

use crate::dom::{Dom, NodeId};
use crate::markup::parser::is_void;

/// Serialize `node` and its subtree.
///
/// A `#document` node serializes as the concatenation of its children.
pub fn to_markup(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, node, &mut out);
    out
}

/// Serialize only the children of `node`.
pub fn inner_markup(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    for &child in dom.children(node) {
        write_node(dom, child, &mut out);
    }
    out
}

fn write_node(dom: &Dom, node: NodeId, out: &mut String) {
    let Some(data) = dom.get(node) else {
        return;
    };

    if data.is_text() {
        out.push_str(&escape_text(data.text.as_deref().unwrap_or_default()));
        return;
    }
    if data.tag == "#document" {
        for &child in dom.children(node) {
            write_node(dom, child, out);
        }
        return;
    }

    out.push('<');
    out.push_str(&data.tag);
    if let Some(id) = &data.id {
        let _ = write!(out, " id=\"{}\"", escape_attr(id));
    }
    if !data.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_attr(&data.classes.join(" ")));
    }
    for (name, value) in &data.attributes {
        if value.is_empty() {
            let _ = write!(out, " {name}");
        } else {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
    }
    out.push('>');

    if is_void(&data.tag) {
        return;
    }
    for &child in dom.children(node) {
        write_node(dom, child, out);
    }
    let _ = write!(out, "</{}>", data.tag);
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
