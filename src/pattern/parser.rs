//! Recursive descent parser for pattern strings.
//!
//! ```text
//! Alt    := Concat ('|' Concat)*
//! Concat := Atom+                     stops at '|', ')', '>' or end of input
//! Atom   := '(' Alt ')'               capturing group
//!         | '(' '\' DIGIT ')'         StrRef
//!         | '(' '?' DIGIT ')'         ExprRef
//!         | '(' '?' ':' Alt ')'       non-capturing group
//!         | '<' Alt '>'               Star
//!         | any other char            Char
//! ```

use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, trace};

use super::ast::*;
use super::preprocess::{REPEAT_CLOSE, REPEAT_OPEN};

/// Errors that can occur while parsing a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    UnclosedGroup,
    UnclosedRepetition,
    UnmatchedClose(char),
    UnrecognizedAtom(String),
    EmptyExpression,
    TooDeep,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedGroup => write!(f, "Unmatched '(' in pattern"),
            Self::UnclosedRepetition => write!(f, "Unmatched '<' in pattern"),
            Self::UnmatchedClose(c) => write!(f, "Unmatched '{c}' in pattern"),
            Self::UnrecognizedAtom(s) => write!(f, "Unrecognized construct {s:?} in pattern"),
            Self::EmptyExpression => write!(f, "Empty expression in pattern"),
            Self::TooDeep => write!(
                f,
                "Groups and repetitions nest deeper than {MAX_NESTING} levels in pattern"
            ),
        }
    }
}

impl std::error::Error for PatternError {}

/// Deepest group/repetition nesting accepted. Every later stage recurses over
/// the tree, so this also bounds their stack use.
pub const MAX_NESTING: usize = 256;

/// Everything the parser produces for one pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub root: Node,
    /// Every node, recorded as its own parse finished (after its children).
    pub completions: Vec<Completion>,
    /// One past the highest capturing-group id handed out.
    pub next_group_id: GroupId,
}

impl ParseResult {
    pub fn group_count(&self) -> u32 {
        self.next_group_id - 1
    }
}

/// Parse a (preprocessed) pattern string.
pub fn parse(input: &str) -> Result<ParseResult, PatternError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
        next_group_id: 1,
        completions: Vec::new(),
        depth: 0,
    };
    let root = parser.parse_alt()?;
    if let Some(&c) = parser.chars.peek() {
        return Err(PatternError::UnmatchedClose(c));
    }
    debug!(
        groups = parser.next_group_id - 1,
        nodes = parser.completions.len(),
        "parsed pattern"
    );
    Ok(ParseResult {
        root,
        completions: parser.completions,
        next_group_id: parser.next_group_id,
    })
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    next_group_id: GroupId,
    completions: Vec<Completion>,
    depth: usize,
}

impl Parser<'_> {
    fn finish(&mut self, node: Node) -> Node {
        self.completions.push(node.completion());
        node
    }

    fn parse_alt(&mut self) -> Result<Node, PatternError> {
        let mut branches = vec![self.parse_concat()?];
        while self.chars.peek() == Some(&'|') {
            self.chars.next(); // consume '|'
            branches.push(self.parse_concat()?);
        }
        if branches.len() == 1 {
            return Ok(branches.remove(0));
        }
        Ok(self.finish(Node::Alt(branches)))
    }

    fn parse_concat(&mut self) -> Result<Node, PatternError> {
        let mut atoms = Vec::new();
        loop {
            match self.chars.peek() {
                None | Some(&('|' | ')' | REPEAT_CLOSE)) => break,
                _ => atoms.push(self.parse_atom()?),
            }
        }
        match atoms.len() {
            0 => Err(PatternError::EmptyExpression),
            1 => Ok(atoms.remove(0)),
            _ => Ok(self.finish(Node::Concat(atoms))),
        }
    }

    fn parse_atom(&mut self) -> Result<Node, PatternError> {
        match self.chars.next() {
            None => Err(PatternError::EmptyExpression),
            Some('(') => self.parse_paren(),
            Some(REPEAT_OPEN) => {
                let child = self.parse_enclosed(REPEAT_CLOSE, PatternError::UnclosedRepetition)?;
                Ok(self.finish(Node::star(child)))
            }
            Some(c) => Ok(self.finish(Node::Char(c))),
        }
    }

    /// Parse whatever follows a `(` (already consumed).
    fn parse_paren(&mut self) -> Result<Node, PatternError> {
        match self.chars.peek() {
            Some('\\') => {
                self.chars.next();
                let id = self.parse_ref_digit('\\')?;
                Ok(self.finish(Node::StrRef(id)))
            }
            Some('?') => {
                self.chars.next();
                if self.chars.peek() == Some(&':') {
                    self.chars.next();
                    return self.parse_group_body(None);
                }
                let id = self.parse_ref_digit('?')?;
                Ok(self.finish(Node::ExprRef(id)))
            }
            _ => {
                let id = self.next_group_id;
                self.next_group_id += 1;
                trace!(id, "opened capturing group");
                self.parse_group_body(Some(id))
            }
        }
    }

    fn parse_group_body(&mut self, id: Option<GroupId>) -> Result<Node, PatternError> {
        let child = self.parse_enclosed(')', PatternError::UnclosedGroup)?;
        Ok(self.finish(Node::group(id, child)))
    }

    /// Parse an alternation body and its `close` delimiter. Running out of
    /// input before `close` is reported as `unclosed`.
    fn parse_enclosed(
        &mut self,
        close: char,
        unclosed: PatternError,
    ) -> Result<Node, PatternError> {
        if self.depth == MAX_NESTING {
            return Err(PatternError::TooDeep);
        }
        self.depth += 1;
        let body = self.parse_alt();
        self.depth -= 1;
        let child = match body {
            Err(PatternError::EmptyExpression) if self.chars.peek().is_none() => {
                return Err(unclosed);
            }
            body => body?,
        };
        match self.chars.next() {
            Some(c) if c == close => Ok(child),
            _ => Err(unclosed),
        }
    }

    /// Parse `D)` of a `(\D)` or `(?D)` reference.
    fn parse_ref_digit(&mut self, sigil: char) -> Result<GroupId, PatternError> {
        let id = match self.chars.next() {
            Some(c) => c
                .to_digit(10)
                .ok_or_else(|| PatternError::UnrecognizedAtom(format!("({sigil}{c}")))?,
            None => return Err(PatternError::UnclosedGroup),
        };
        match self.chars.next() {
            Some(')') => Ok(id),
            _ => Err(PatternError::UnclosedGroup),
        }
    }
}
