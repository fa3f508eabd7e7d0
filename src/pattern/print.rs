//! Indented multi-line rendering of a pattern AST, for diagnostics.

use std::fmt::{self, Write};

use super::ast::Node;

const INDENT: usize = 4;

pub fn render_tree(node: &Node) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &Node, indent: usize) -> fmt::Result {
    let pad = " ".repeat(indent);
    match node {
        Node::Char(c) => writeln!(out, "{pad}Char({c:?})"),
        Node::ExprRef(id) => writeln!(out, "{pad}ExprRef({id})"),
        Node::StrRef(id) => writeln!(out, "{pad}StrRef({id})"),
        Node::Concat(children) | Node::Alt(children) => {
            let name = if matches!(node, Node::Concat(_)) {
                "Concat"
            } else {
                "Alt"
            };
            writeln!(out, "{pad}{name}\n{pad}(")?;
            for child in children {
                write_node(out, child, indent + INDENT)?;
            }
            writeln!(out, "{pad})")
        }
        Node::Group { id, child } => {
            match id {
                Some(id) => writeln!(out, "{pad}Group\n{pad}({id},")?,
                None => writeln!(out, "{pad}Group\n{pad}(?:,")?,
            }
            write_node(out, child, indent + INDENT)?;
            writeln!(out, "{pad})")
        }
        Node::Star { child, .. } => {
            writeln!(out, "{pad}Star\n{pad}(")?;
            write_node(out, child, indent + INDENT)?;
            writeln!(out, "{pad})")
        }
    }
}
