use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::Type,
};

/// Variable declaration, either top-level, a parameter, or a local.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub identifier: String,
    pub var_type: Type,
    pub initializer: Option<Expr>,
    pub span: Span,
}

impl VarDecl {
    pub fn new(identifier: &str, var_type: Type, initializer: Option<Expr>) -> Self {
        VarDecl {
            identifier: identifier.to_string(),
            var_type,
            initializer,
            span: Span::null(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FnDecl {
    pub identifier: String,
    pub parameters: Vec<VarDecl>,
    pub return_type: Type,
    pub body: BlockStmt,
    pub span: Span,
}

impl FnDecl {
    pub fn new(identifier: &str, parameters: Vec<VarDecl>, return_type: Type, body: Vec<Stmt>) -> Self {
        FnDecl {
            identifier: identifier.to_string(),
            parameters,
            return_type,
            body: BlockStmt::new(body),
            span: Span::null(),
        }
    }

    /// The `Function` type this declaration introduces.
    pub fn get_type(&self) -> Type {
        Type::function(
            self.parameters
                .iter()
                .map(|param| param.var_type.clone())
                .collect(),
            self.return_type.clone(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn new(body: Vec<Stmt>) -> Self {
        BlockStmt {
            body,
            span: Span::null(),
        }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct DoWhileStmt {
    pub body: Box<Stmt>,
    pub condition: Expr,
    pub span: Span,
}

/// `for (init; condition; step) body`
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Expr,
    pub condition: Expr,
    pub step: Option<Expr>,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// One `case label:` arm of a switch.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub label: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub selector: Expr,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Vec<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

// BUILDERS

impl Stmt {
    pub fn block(body: Vec<Stmt>) -> Self {
        Stmt::Block(BlockStmt::new(body))
    }

    pub fn decl(identifier: &str, var_type: Type, initializer: Option<Expr>) -> Self {
        Stmt::Decl(VarDecl::new(identifier, var_type, initializer))
    }

    pub fn expr(expression: Expr) -> Self {
        let span = expression.span.clone();
        Stmt::Expression(ExpressionStmt { expression, span })
    }

    pub fn if_else(condition: Expr, then_body: Stmt, else_body: Option<Stmt>) -> Self {
        let span = condition.span.clone();
        Stmt::If(IfStmt {
            condition,
            then_body: Box::new(then_body),
            else_body: else_body.map(Box::new),
            span,
        })
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        let span = condition.span.clone();
        Stmt::While(WhileStmt {
            condition,
            body: Box::new(body),
            span,
        })
    }

    pub fn do_while(body: Stmt, condition: Expr) -> Self {
        let span = condition.span.clone();
        Stmt::DoWhile(DoWhileStmt {
            body: Box::new(body),
            condition,
            span,
        })
    }

    pub fn for_loop(init: Expr, condition: Expr, step: Option<Expr>, body: Stmt) -> Self {
        let span = init.span.clone();
        Stmt::For(ForStmt {
            init,
            condition,
            step,
            body: Box::new(body),
            span,
        })
    }

    pub fn switch(selector: Expr, cases: Vec<(Expr, Vec<Stmt>)>, default: Option<Vec<Stmt>>) -> Self {
        let span = selector.span.clone();
        Stmt::Switch(SwitchStmt {
            selector,
            cases: cases
                .into_iter()
                .map(|(label, body)| {
                    let span = label.span.clone();
                    SwitchCase { label, body, span }
                })
                .collect(),
            default,
            span,
        })
    }

    pub fn break_stmt() -> Self {
        Stmt::Break(BreakStmt { span: Span::null() })
    }

    pub fn continue_stmt() -> Self {
        Stmt::Continue(ContinueStmt { span: Span::null() })
    }

    pub fn return_stmt(value: Option<Expr>) -> Self {
        let span = value
            .as_ref()
            .map(|value| value.span.clone())
            .unwrap_or_else(Span::null);
        Stmt::Return(ReturnStmt { value, span })
    }
}
