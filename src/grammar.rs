//! Context-free grammar produced from a pattern AST.

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

/// Name of the synthetic start nonterminal.
pub const START: &str = "S";

/// One right-hand-side symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(String),
    /// The empty sequence.
    Epsilon,
}

impl Symbol {
    pub fn nonterminal(name: impl Into<String>) -> Self {
        Self::NonTerminal(name.into())
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Self::NonTerminal(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(c) => write!(f, "{c:?}"),
            Self::NonTerminal(name) => write!(f, "{name}"),
            Self::Epsilon => write!(f, "ε"),
        }
    }
}

/// One alternative right-hand side.
pub type Production = Vec<Symbol>;

/// All productions of one nonterminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub lhs: String,
    pub productions: Vec<Production>,
}

/// A start symbol and its production table.
///
/// Rules keep the order in which their nonterminals were first defined; the
/// start rule comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub start: String,
    pub rules: Vec<Rule>,
}

impl Grammar {
    pub fn rule(&self, lhs: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.lhs == lhs)
    }

    pub fn productions(&self, lhs: &str) -> &[Production] {
        self.rule(lhs)
            .map(|rule| rule.productions.as_slice())
            .unwrap_or_default()
    }

    /// Nonterminals used on some right-hand side that have no rule of their
    /// own, in order of first use. Only references to a group that does not
    /// exist produce these.
    pub fn undefined_nonterminals(&self) -> Vec<&str> {
        let defined: HashSet<&str> = self.rules.iter().map(|rule| rule.lhs.as_str()).collect();
        self.rules
            .iter()
            .flat_map(|rule| rule.productions.iter().flatten())
            .filter_map(Symbol::as_nonterminal)
            .filter(|name| !defined.contains(name))
            .unique()
            .collect()
    }
}

/// One line per production: `LHS -> sym sym …`.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            for production in &rule.productions {
                writeln!(f, "{} -> {}", rule.lhs, production.iter().join(" "))?;
            }
        }
        Ok(())
    }
}
