//! Compiles a pattern AST into a context-free [`Grammar`].
//!
//! Every node gets its own nonterminal, named from a per-category counter
//! (`Char1`, `C1`, `A1`, `Ncg1`, `R1`). Capturing groups are named by id
//! (`G1`), so a reference compiles to the same name as its group whether the
//! group appears before or after it.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::grammar::{Grammar, Production, Rule, START, Symbol};
use crate::pattern::{GroupId, Node};

/// Compile a pattern AST into a [`Grammar`] with start symbol [`START`].
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(root: &Node) -> Grammar {
    let mut compiler = Compiler::default();
    compiler.define(START);
    let top = compiler.compile_node(root);
    compiler.push(START, vec![Symbol::NonTerminal(top)]);
    debug!(rules = compiler.rules.len(), "compiled grammar");
    Grammar {
        start: START.to_string(),
        rules: compiler.rules,
    }
}

#[derive(Debug, Clone, Copy)]
enum Category {
    Char,
    Concat,
    Alt,
    NonCapturing,
    Repeat,
}

impl Category {
    fn prefix(self) -> &'static str {
        match self {
            Self::Char => "Char",
            Self::Concat => "C",
            Self::Alt => "A",
            Self::NonCapturing => "Ncg",
            Self::Repeat => "R",
        }
    }
}

#[derive(Default)]
struct Compiler {
    /// Last index handed out per category, indexed by `Category as usize`.
    counters: [u32; 5],
    group_names: HashMap<GroupId, String>,
    rules: Vec<Rule>,
    rule_index: HashMap<String, usize>,
}

impl Compiler {
    fn compile_node(&mut self, node: &Node) -> String {
        match node {
            Node::Char(c) => {
                let name = self.fresh(Category::Char);
                self.push(&name, vec![Symbol::Terminal(*c)]);
                name
            }
            Node::Concat(children) => {
                let name = self.fresh(Category::Concat);
                let production = children
                    .iter()
                    .map(|child| Symbol::NonTerminal(self.compile_node(child)))
                    .collect();
                self.push(&name, production);
                name
            }
            Node::Alt(branches) => {
                let name = self.fresh(Category::Alt);
                for branch in branches {
                    let branch_name = self.compile_node(branch);
                    self.push(&name, vec![Symbol::NonTerminal(branch_name)]);
                }
                name
            }
            Node::Group { id, child } => {
                let name = match id {
                    Some(id) => {
                        let name = self.group_name(*id);
                        self.define(&name);
                        name
                    }
                    None => self.fresh(Category::NonCapturing),
                };
                let child_name = self.compile_node(child);
                self.push(&name, vec![Symbol::NonTerminal(child_name)]);
                name
            }
            // Bounds are not unrolled; every repetition is zero-or-more.
            Node::Star { child, .. } => {
                let name = self.fresh(Category::Repeat);
                let child_name = self.compile_node(child);
                self.push(
                    &name,
                    vec![Symbol::NonTerminal(child_name), Symbol::nonterminal(&name)],
                );
                self.push(&name, vec![Symbol::Epsilon]);
                name
            }
            Node::ExprRef(id) | Node::StrRef(id) => self.group_name(*id),
        }
    }

    /// Allocate the next name in `category` and give it an empty rule.
    fn fresh(&mut self, category: Category) -> String {
        let counter = &mut self.counters[category as usize];
        *counter += 1;
        let name = format!("{}{}", category.prefix(), counter);
        trace!(%name, "allocated nonterminal");
        self.define(&name);
        name
    }

    /// Name of capturing group `id`, created on first use.
    fn group_name(&mut self, id: GroupId) -> String {
        self.group_names
            .entry(id)
            .or_insert_with(|| format!("G{id}"))
            .clone()
    }

    /// Make sure `lhs` has a rule; rules keep their first-definition order.
    fn define(&mut self, lhs: &str) -> usize {
        if let Some(&index) = self.rule_index.get(lhs) {
            return index;
        }
        let index = self.rules.len();
        self.rules.push(Rule {
            lhs: lhs.to_string(),
            productions: Vec::new(),
        });
        self.rule_index.insert(lhs.to_string(), index);
        index
    }

    fn push(&mut self, lhs: &str, production: Production) {
        let index = self.define(lhs);
        self.rules[index].productions.push(production);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{parse, preprocess};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn compile_str(s: &str) -> Grammar {
        compile(&parse(&preprocess(s)).expect("parse should succeed").root)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::nonterminal(name)
    }

    // --- Basic shapes ---

    #[test]
    fn test_concat() {
        let g = compile_str("ab");
        assert_eq!(g.start, "S");
        assert_eq!(g.productions("S"), &[vec![nt("C1")]]);
        assert_eq!(g.productions("C1"), &[vec![nt("Char1"), nt("Char2")]]);
        assert_eq!(g.productions("Char1"), &[vec![Symbol::Terminal('a')]]);
        assert_eq!(g.productions("Char2"), &[vec![Symbol::Terminal('b')]]);
        assert_eq!(g.rules.len(), 4);
    }

    #[test]
    fn test_alternation() {
        let g = compile_str("a|b");
        assert_eq!(g.productions("A1"), &[vec![nt("Char1")], vec![nt("Char2")]]);
    }

    #[test]
    fn test_single_char() {
        let g = compile_str("x");
        assert_eq!(g.to_string(), "S -> Char1\nChar1 -> 'x'\n");
    }

    #[test]
    fn test_rule_order_is_definition_order() {
        let g = compile_str("(a)|b");
        let order: Vec<&str> = g.rules.iter().map(|r| r.lhs.as_str()).collect();
        assert_eq!(order, vec!["S", "A1", "G1", "Char1", "Char2"]);
    }

    // --- Groups ---

    #[test]
    fn test_capturing_group_named_by_id() {
        let g = compile_str("(a)(b)");
        assert_eq!(g.productions("C1"), &[vec![nt("G1"), nt("G2")]]);
        assert_eq!(g.productions("G1"), &[vec![nt("Char1")]]);
        assert_eq!(g.productions("G2"), &[vec![nt("Char2")]]);
    }

    #[test]
    fn test_non_capturing_groups_get_fresh_names() {
        let g = compile_str("(?:a)(?:b)");
        assert_eq!(g.productions("C1"), &[vec![nt("Ncg1"), nt("Ncg2")]]);
        assert_eq!(g.productions("Ncg1"), &[vec![nt("Char1")]]);
        assert_eq!(g.productions("Ncg2"), &[vec![nt("Char2")]]);
    }

    // --- References ---

    #[test]
    fn test_references_share_group_name() {
        let g = compile_str("(a)(\\1)(?1)");
        assert_eq!(g.productions("C1"), &[vec![nt("G1"), nt("G1"), nt("G1")]]);
        assert_eq!(g.productions("G1").len(), 1);
    }

    #[test]
    fn test_forward_reference() {
        let g = compile_str("(?1)(a)");
        assert_eq!(g.productions("C1"), &[vec![nt("G1"), nt("G1")]]);
        assert_eq!(g.productions("G1"), &[vec![nt("Char1")]]);
        assert!(g.undefined_nonterminals().is_empty());
    }

    #[test]
    fn test_dangling_reference() {
        let g = compile_str("a(\\4)");
        assert_eq!(g.productions("C1"), &[vec![nt("Char1"), nt("G4")]]);
        assert!(g.rule("G4").is_none());
        assert_eq!(g.undefined_nonterminals(), vec!["G4"]);
    }

    // --- Repetition ---

    #[test]
    fn test_star_shape() {
        let g = compile_str("(a)*");
        assert_eq!(g.productions("S"), &[vec![nt("R1")]]);
        assert_eq!(
            g.productions("R1"),
            &[vec![nt("G1"), nt("R1")], vec![Symbol::Epsilon]]
        );
        assert_eq!(g.productions("G1"), &[vec![nt("Char1")]]);
    }

    #[test]
    fn test_alternation_and_repetition_names_do_not_collide() {
        let g = compile_str("<a|b>");
        assert_eq!(
            g.productions("R1"),
            &[vec![nt("A1"), nt("R1")], vec![Symbol::Epsilon]]
        );
        assert_eq!(g.productions("A1").len(), 2);
    }

    #[test]
    fn test_names_allocated_outer_first() {
        let g = compile_str("<<a>b>");
        assert_eq!(
            g.productions("R1"),
            &[vec![nt("C1"), nt("R1")], vec![Symbol::Epsilon]]
        );
        assert_eq!(g.productions("C1"), &[vec![nt("R2"), nt("Char2")]]);
        assert_eq!(
            g.productions("R2"),
            &[vec![nt("Char1"), nt("R2")], vec![Symbol::Epsilon]]
        );
    }

    #[test]
    fn test_full_listing() {
        let g = compile_str("(a|(bb)(\\1))(a|(?2))");
        let expected = "\
S -> C1
C1 -> G1 G3
G1 -> A1
A1 -> Char1
A1 -> C2
Char1 -> 'a'
C2 -> G2 G1
G2 -> C3
C3 -> Char2 Char3
Char2 -> 'b'
Char3 -> 'b'
G3 -> A2
A2 -> Char4
A2 -> G2
Char4 -> 'a'
";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn test_deepest_accepted_nesting() {
        let n = crate::pattern::parser::MAX_NESTING;
        let g = compile_str(&format!("{}a{}", "(".repeat(n), ")".repeat(n)));
        assert_eq!(g.productions("G1"), &[vec![nt("G2")]]);
        assert_eq!(g.productions(&format!("G{n}")), &[vec![nt("Char1")]]);
    }

    // --- Properties ---

    fn reference_names(g: &Grammar) -> Vec<String> {
        g.rules
            .iter()
            .flat_map(|r| r.productions.iter().flatten())
            .filter_map(|s| s.as_nonterminal().map(str::to_string))
            .filter(|n| n.starts_with('G'))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_every_rule_nonempty(s in "[ab]{1,3}(\\|[ab]{1,3}){0,2}") {
            let g = compile_str(&format!("({s})*(?1)"));
            for rule in &g.rules {
                prop_assert!(!rule.productions.is_empty(), "{} has no productions", rule.lhs);
            }
            for rule in g.rules.iter().filter(|r| r.lhs.starts_with('R')) {
                prop_assert_eq!(rule.productions.len(), 2);
                prop_assert_eq!(rule.productions[0].len(), 2);
                prop_assert_eq!(&rule.productions[0][1], &Symbol::nonterminal(&rule.lhs));
                prop_assert_eq!(&rule.productions[1], &vec![Symbol::Epsilon]);
            }
        }

        #[test]
        fn prop_references_resolve_to_group(id in 1u32..=3, expr in proptest::bool::ANY) {
            let reference = if expr { format!("(?{id})") } else { format!("(\\{id})") };
            let g = compile_str(&format!("(a)(b)(c){reference}{reference}"));
            let names = reference_names(&g);
            let expected = format!("G{id}");
            prop_assert_eq!(names.iter().filter(|n| **n == expected).count(), 3);
        }
    }
}
