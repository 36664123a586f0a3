//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis over the syntax tree handed in by
//! the parser. In a single recursive pass it:
//!
//! - Resolves every identifier through lexical scoping
//! - Infers and records a type on every expression
//! - Checks call arity and argument types
//! - Validates `break`, `continue` and `return` against their context
//! - Reports every violation to a diagnostics sink without stopping
//!
//! The checker keeps a stack of scopes and a stack of control contexts, both
//! strictly tied to the recursion over the tree.

pub mod config;
pub mod context;
pub mod expr;
pub mod scope;
pub mod stmt;
pub mod type_checker;

#[cfg(test)]
mod tests;
