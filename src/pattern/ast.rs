//! AST types for patterns.

use std::fmt;

use itertools::Itertools;

/// Id of a capturing group. Ids start at 1 and follow the order in which
/// capturing `(` appear in the pattern.
pub type GroupId = u32;

/// A parsed pattern node.
///
/// `Concat` and `Alt` always hold at least two children; the parser returns a
/// lone child unwrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Char(char),
    Concat(Vec<Node>),
    Alt(Vec<Node>),
    /// `id` is `None` for a non-capturing `(?:…)` group.
    Group {
        id: Option<GroupId>,
        child: Box<Node>,
    },
    /// `<…>` repetition. `max = None` is unbounded.
    Star {
        child: Box<Node>,
        min: u32,
        max: Option<u32>,
    },
    /// `(?D)` — re-expands the expression of group `D`.
    ExprRef(GroupId),
    /// `(\D)` — re-uses the text matched by group `D`.
    StrRef(GroupId),
}

impl Node {
    pub fn group(id: Option<GroupId>, child: Node) -> Self {
        Self::Group {
            id,
            child: Box::new(child),
        }
    }

    /// Unbounded zero-or-more repetition, the only form the surface syntax produces.
    pub fn star(child: Node) -> Self {
        Self::Star {
            child: Box::new(child),
            min: 0,
            max: None,
        }
    }

    pub fn completion(&self) -> Completion {
        match self {
            Self::Char(c) => Completion::Char(*c),
            Self::Concat(_) => Completion::Concat,
            Self::Alt(_) => Completion::Alt,
            Self::Group { id, .. } => Completion::Group(*id),
            Self::Star { .. } => Completion::Star,
            Self::ExprRef(id) => Completion::ExprRef(*id),
            Self::StrRef(id) => Completion::StrRef(*id),
        }
    }
}

/// Canonical one-line form, e.g. `Concat(Char('a'), Group(1, Char('b')))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "Char({c:?})"),
            Self::Concat(children) => write!(f, "Concat({})", children.iter().join(", ")),
            Self::Alt(children) => write!(f, "Alt({})", children.iter().join(", ")),
            Self::Group { id: Some(id), child } => write!(f, "Group({id}, {child})"),
            Self::Group { id: None, child } => write!(f, "Group(?:, {child})"),
            Self::Star { child, min, max } => {
                write!(f, "Star({child}, min={min}, max=")?;
                match max {
                    Some(max) => write!(f, "{max})"),
                    None => write!(f, "∞)"),
                }
            }
            Self::ExprRef(id) => write!(f, "ExprRef({id})"),
            Self::StrRef(id) => write!(f, "StrRef({id})"),
        }
    }
}

/// One entry of the parser's completion-order list: the kind of a node and
/// the ids it carries, recorded when that node finished parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Char(char),
    Concat,
    Alt,
    Group(Option<GroupId>),
    Star,
    ExprRef(GroupId),
    StrRef(GroupId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_canonical_form() {
        let node = Node::Concat(vec![
            Node::Char('a'),
            Node::group(Some(1), Node::Alt(vec![Node::Char('b'), Node::StrRef(1)])),
            Node::star(Node::group(None, Node::ExprRef(1))),
        ]);
        assert_eq!(
            node.to_string(),
            "Concat(Char('a'), Group(1, Alt(Char('b'), StrRef(1))), \
             Star(Group(?:, ExprRef(1)), min=0, max=∞))"
        );
    }

    #[test]
    fn test_display_bounded_star() {
        let node = Node::Star {
            child: Box::new(Node::Char('x')),
            min: 2,
            max: Some(4),
        };
        assert_eq!(node.to_string(), "Star(Char('x'), min=2, max=4)");
    }

    #[test]
    fn test_completion_carries_ids() {
        assert_eq!(
            Node::group(Some(3), Node::Char('a')).completion(),
            Completion::Group(Some(3))
        );
        assert_eq!(Node::StrRef(2).completion(), Completion::StrRef(2));
        assert_eq!(Node::Char('z').completion(), Completion::Char('z'));
    }
}
