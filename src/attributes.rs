//! Attribute grammar: the AST annotated with statically known match lengths.

use std::fmt::{self, Write};

use serde::{Serialize, Serializer};

use crate::pattern::{GroupId, Node};

/// A pattern node annotated with its match length, where one is defined.
///
/// Alternations, repetitions and references have no static length; a
/// concatenation or group has one only if all of its children do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Annotated {
    Char {
        value: char,
        length: usize,
    },
    Concat {
        children: Vec<Annotated>,
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<usize>,
    },
    Alt {
        children: Vec<Annotated>,
    },
    Group {
        #[serde(rename = "groupId", serialize_with = "serialize_group_id")]
        group_id: Option<GroupId>,
        child: Box<Annotated>,
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<usize>,
    },
    Star {
        child: Box<Annotated>,
        #[serde(rename = "minRepeats")]
        min: u32,
        #[serde(rename = "maxRepeats", skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
    ExprRef {
        #[serde(rename = "refId")]
        ref_id: GroupId,
    },
    StrRef {
        #[serde(rename = "refId")]
        ref_id: GroupId,
    },
}

impl Annotated {
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Char { length, .. } => Some(*length),
            Self::Concat { length, .. } | Self::Group { length, .. } => *length,
            Self::Alt { .. } | Self::Star { .. } | Self::ExprRef { .. } | Self::StrRef { .. } => {
                None
            }
        }
    }

    pub fn children(&self) -> Vec<&Annotated> {
        match self {
            Self::Concat { children, .. } | Self::Alt { children } => children.iter().collect(),
            Self::Group { child, .. } | Self::Star { child, .. } => vec![child.as_ref()],
            Self::Char { .. } | Self::ExprRef { .. } | Self::StrRef { .. } => vec![],
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Char { value, .. } => format!("Char ({value:?})"),
            Self::Concat { .. } => "Concat".to_string(),
            Self::Alt { .. } => "Alt".to_string(),
            Self::Group {
                group_id: Some(id), ..
            } => format!("Group (id={id})"),
            Self::Group { group_id: None, .. } => "Group (?:)".to_string(),
            Self::Star { min, max, .. } => match max {
                Some(max) => format!("Star (min={min}, max={max})"),
                None => format!("Star (min={min}, max=∞)"),
            },
            Self::ExprRef { ref_id } => format!("ExprRef (id={ref_id})"),
            Self::StrRef { ref_id } => format!("StrRef (id={ref_id})"),
        }
    }
}

/// Non-capturing groups carry the reserved id `-1` in serialized output.
fn serialize_group_id<S: Serializer>(id: &Option<GroupId>, s: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => s.serialize_i64(i64::from(*id)),
        None => s.serialize_i64(-1),
    }
}

/// Annotate `node` and its subtree.
pub fn annotate(node: &Node) -> Annotated {
    match node {
        Node::Char(c) => Annotated::Char {
            value: *c,
            length: 1,
        },
        Node::Concat(children) => {
            let children: Vec<Annotated> = children.iter().map(annotate).collect();
            let length = children.iter().map(Annotated::length).sum();
            Annotated::Concat { children, length }
        }
        Node::Alt(children) => Annotated::Alt {
            children: children.iter().map(annotate).collect(),
        },
        Node::Group { id, child } => {
            let child = annotate(child);
            Annotated::Group {
                group_id: *id,
                length: child.length(),
                child: Box::new(child),
            }
        }
        Node::Star { child, min, max } => Annotated::Star {
            child: Box::new(annotate(child)),
            min: *min,
            max: *max,
        },
        Node::ExprRef(id) => Annotated::ExprRef { ref_id: *id },
        Node::StrRef(id) => Annotated::StrRef { ref_id: *id },
    }
}

/// Draw the annotated tree with box-drawing connectors.
pub fn render_tree(tree: &Annotated) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_tree(&mut out, tree, "", true);
    out
}

fn write_tree(out: &mut String, tree: &Annotated, indent: &str, last: bool) -> fmt::Result {
    let branch = if last { "└── " } else { "├── " };
    writeln!(out, "{indent}{branch}{}", tree.label())?;

    let child_indent = format!("{indent}{}", if last { "    " } else { "│   " });
    if let Some(length) = tree.length() {
        writeln!(out, "{child_indent}└── [length={length}]")?;
    }
    let children = tree.children();
    for (i, child) in children.iter().enumerate() {
        write_tree(out, child, &child_indent, i + 1 == children.len())?;
    }
    Ok(())
}
