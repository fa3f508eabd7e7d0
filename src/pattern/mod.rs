//! Pattern front end: preprocessing, parsing and the AST.
//!
//! # Pattern syntax
//!
//! | Token         | Meaning                                        |
//! |---------------|------------------------------------------------|
//! | `c`           | Literal character (anything not listed below)  |
//! | `(…)`         | Capturing group, next sequential id            |
//! | `(?:…)`       | Non-capturing group                            |
//! | `(\D)`        | Backreference to the text matched by group D   |
//! | `(?D)`        | Re-expansion of the expression of group D      |
//! | `X\|Y`        | Alternation                                    |
//! | `(…)*`        | Zero or more; rewritten to `<(…)>`             |
//! | `<…>`         | Zero or more (explicit form)                   |
//!
//! `D` is a single digit, so at most nine groups can be referenced.
//! Only the first `*` in a pattern is rewritten.

pub mod ast;
pub mod parser;
pub mod preprocess;
pub mod print;

pub use ast::{Completion, GroupId, Node};
pub use parser::{ParseResult, PatternError, parse};
pub use preprocess::preprocess;
pub use print::render_tree;
