//! Structural checks over a parsed pattern.
//!
//! Both checks only look at the parser's completion-order list and group
//! counter, never at the tree itself.

use std::collections::HashSet;

use tracing::debug;

use crate::pattern::{Completion, ParseResult};

/// References are a single digit, so ids above 9 can never be referenced.
pub const MAX_GROUPS: u32 = 9;

/// Outcome of both checks. Failing a check is an ordinary result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub group_count: bool,
    pub reference_order: bool,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.group_count && self.reference_order
    }
}

/// Run both checks.
pub fn check(parse: &ParseResult) -> Validation {
    let validation = Validation {
        group_count: check_group_count(parse),
        reference_order: check_reference_order(&parse.completions),
    };
    debug!(?validation, "validated pattern");
    validation
}

/// True when the pattern passes both checks.
pub fn validate(parse: &ParseResult) -> bool {
    check(parse).is_valid()
}

/// At most [`MAX_GROUPS`] capturing groups.
pub fn check_group_count(parse: &ParseResult) -> bool {
    parse.next_group_id <= MAX_GROUPS + 1
}

/// Reject a capturing group whose completion is recorded after a `StrRef` to
/// the same id has already completed.
///
/// This compares completion order, not text position: a backreference nested
/// inside its own group completes first and is rejected too.
pub fn check_reference_order(completions: &[Completion]) -> bool {
    let mut referenced = HashSet::new();
    for completion in completions {
        match *completion {
            Completion::StrRef(id) => {
                referenced.insert(id);
            }
            Completion::Group(Some(id)) if referenced.contains(&id) => return false,
            _ => {}
        }
    }
    true
}
