//! Runs one pattern through every stage.

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use tracing::{info, warn};

use crate::attributes::{Annotated, annotate};
use crate::compiler::compile;
use crate::grammar::Grammar;
use crate::pattern::{ParseResult, parse, preprocess};
use crate::validator::{self, Validation};

/// What to do with a pattern that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// Report the verdict and still build the grammar and attributes.
    #[default]
    Advisory,
    /// Fail before building the grammar.
    Strict,
}

/// The output of every stage for one pattern.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub source: String,
    pub normalized: String,
    pub parse: ParseResult,
    pub validation: Validation,
    pub grammar: Grammar,
    pub attributes: Annotated,
}

/// Preprocess, parse, validate, then compile and annotate `source`.
#[tracing::instrument(level = "debug", skip(policy))]
pub fn run(source: &str, policy: Policy) -> Result<Compilation> {
    let normalized = preprocess(source);
    let parse = parse(&normalized).with_context(|| format!("Failed to parse {source:?}"))?;

    let validation = validator::check(&parse);
    if !validation.is_valid() {
        let failed = failed_checks(&validation).join(", ");
        if policy == Policy::Strict {
            bail!("Invalid pattern {source:?}: failed {failed}.");
        }
        info!(%failed, "pattern failed validation, continuing");
    }

    let grammar = compile(&parse.root);
    for name in grammar.undefined_nonterminals() {
        warn!(%name, "reference to a group that does not exist");
    }
    let attributes = annotate(&parse.root);

    Ok(Compilation {
        source: source.to_string(),
        normalized,
        parse,
        validation,
        grammar,
        attributes,
    })
}

fn failed_checks(validation: &Validation) -> Vec<&'static str> {
    [
        (validation.group_count, "group count"),
        (validation.reference_order, "reference order"),
    ]
    .into_iter()
    .filter(|(ok, _)| !ok)
    .map(|(_, name)| name)
    .collect_vec()
}
