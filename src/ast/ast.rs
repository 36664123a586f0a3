use std::cell::RefCell;

use crate::Span;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, ConditionalExpr, FieldAccessExpr, IdentifierExpr,
        IndexExpr, Literal, PostfixExpr, UnaryExpr,
    },
    statements::{
        BlockStmt, BreakStmt, ContinueStmt, DoWhileStmt, ExpressionStmt, FnDecl, ForStmt, IfStmt,
        ReturnStmt, SwitchStmt, VarDecl, WhileStmt,
    },
    types::Type,
};

/// A whole translation unit: top-level declarations in source order.
#[derive(Debug, Clone)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub span: Span,
}

impl Program {
    pub fn new(decls: Vec<Decl>) -> Self {
        Program {
            decls,
            span: Span::null(),
        }
    }
}

/// Declaration Kinds
#[derive(Debug, Clone)]
pub enum Decl {
    Variable(VarDecl),
    Function(FnDecl),
}

impl Decl {
    pub fn get_identifier(&self) -> &str {
        match self {
            Decl::Variable(var_decl) => &var_decl.identifier,
            Decl::Function(fn_decl) => &fn_decl.identifier,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Decl::Variable(var_decl) => &var_decl.span,
            Decl::Function(fn_decl) => &fn_decl.span,
        }
    }
}

/// Statement Kinds
///
/// Closed set of statement nodes; the checker dispatches on it with one
/// match arm per kind.
#[derive(Debug, Clone)]
pub enum Stmt {
    Block(BlockStmt),
    Decl(VarDecl),
    Expression(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Decl(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::DoWhile(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Switch(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }

    /// Replaces the statement's span. Builders for statements without an
    /// expression to take a span from start with a null span.
    pub fn at(mut self, span: Span) -> Self {
        let slot = match &mut self {
            Stmt::Block(stmt) => &mut stmt.span,
            Stmt::Decl(stmt) => &mut stmt.span,
            Stmt::Expression(stmt) => &mut stmt.span,
            Stmt::If(stmt) => &mut stmt.span,
            Stmt::While(stmt) => &mut stmt.span,
            Stmt::DoWhile(stmt) => &mut stmt.span,
            Stmt::For(stmt) => &mut stmt.span,
            Stmt::Switch(stmt) => &mut stmt.span,
            Stmt::Break(stmt) => &mut stmt.span,
            Stmt::Continue(stmt) => &mut stmt.span,
            Stmt::Return(stmt) => &mut stmt.span,
        };
        *slot = span;
        self
    }
}

/// Expression Kinds
#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(IdentifierExpr),
    Unary(UnaryExpr),
    Postfix(PostfixExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Conditional(ConditionalExpr),
    Index(IndexExpr),
    FieldAccess(FieldAccessExpr),
    Call(CallExpr),
}

/// Expression node.
///
/// Carries a type slot the checker fills in on every pass. The slot is
/// behind a `RefCell` so the tree can be shared immutably with the scope
/// stack while annotations are written.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    ty: RefCell<Option<Type>>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            ty: RefCell::new(None),
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Type recorded by the last check pass, if any.
    pub fn get_type(&self) -> Option<Type> {
        self.ty.borrow().clone()
    }

    pub(crate) fn set_type(&self, ty: Type) {
        *self.ty.borrow_mut() = Some(ty);
    }
}
