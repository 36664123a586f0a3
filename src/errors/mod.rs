//! Error types and error reporting for the analyzer.
//!
//! This module defines the diagnostics produced while checking a program.
//! It includes:
//!
//! - Error structures with source position information
//! - One error variant per semantic violation the checker detects
//! - Helpful suggestions attached to each diagnostic
//! - The `Diagnostics` sink that receives reports in traversal order
//!
//! None of these errors stop a check pass; the checker reports them and
//! continues with the absorbing `Error` type.

pub mod diagnostics;
pub mod errors;
