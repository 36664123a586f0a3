//! Utility macros for the analyzer.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_EXPR!` - Creates an Expr node with an empty type slot
//!
//! The AST builders and the tests construct nodes through it.

/// Creates an Expr node.
///
/// # Arguments
///
/// * `$kind` - The ExprKind
/// * `$span` - The source span (defaults to a null span)
///
/// # Example
///
/// ```ignore
/// let expr = MK_EXPR!(ExprKind::Literal(Literal::Int(42)), span);
/// ```
#[macro_export]
macro_rules! MK_EXPR {
    ($kind:expr) => {
        $crate::ast::ast::Expr::new($kind, $crate::Span::null())
    };
    ($kind:expr, $span:expr) => {
        $crate::ast::ast::Expr::new($kind, $span)
    };
}
