//! Compiles a small back-reference pattern language into a context-free grammar.
//!
//! A pattern goes through four stages:
//!
//! 1. [`pattern::preprocess`] rewrites the postfix `*` into `<…>` notation.
//! 2. [`pattern::parse`] builds the AST and numbers the capturing groups.
//! 3. [`validator::check`] checks the group count and backreference order.
//! 4. [`compiler::compile`] builds the grammar, and [`attributes::annotate`]
//!    the length-annotated tree.
//!
//! # Example
//!
//! ```rust
//! use patgram::{Policy, run};
//!
//! let compilation = run("(a)(\\1)*", Policy::Advisory).unwrap();
//!
//! assert_eq!(compilation.normalized, "(a)<(\\1)>");
//! assert!(compilation.validation.is_valid());
//! assert_eq!(
//!     compilation.grammar.to_string(),
//!     "S -> C1\nC1 -> G1 R1\nG1 -> Char1\nChar1 -> 'a'\nR1 -> G1 R1\nR1 -> ε\n"
//! );
//! ```

pub mod attributes;
pub mod compiler;
pub mod grammar;
pub mod logging;
pub mod pattern;
pub mod pipeline;
pub mod validator;

pub use attributes::{Annotated, annotate};
pub use compiler::compile;
pub use grammar::{Grammar, Rule, Symbol};
pub use pattern::{Node, ParseResult, PatternError, parse, preprocess};
pub use pipeline::{Compilation, Policy, run};
pub use validator::{Validation, validate};
