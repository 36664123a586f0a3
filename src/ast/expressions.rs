use std::fmt::Display;

use crate::{Span, MK_EXPR};

use super::ast::{Expr, ExprKind};

// LITERALS

/// Literal constant. Its type is fixed by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i32),
    Float(f64),
}

/// Identifier Expression
/// A use of a variable or function name.
#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub name: String,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `+`
    Plus,
    /// `!`
    Not,
    /// `++x`
    Increment,
    /// `--x`
    Decrement,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Not => write!(f, "!"),
            UnaryOperator::Increment => write!(f, "++"),
            UnaryOperator::Decrement => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

impl Display for PostfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostfixOperator::Increment => write!(f, "++"),
            PostfixOperator::Decrement => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

/// Operator families that share a typing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Relational,
    Equality,
    Logical,
}

impl BinaryOperator {
    pub fn get_class(&self) -> OperatorClass {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => OperatorClass::Arithmetic,
            BinaryOperator::Less
            | BinaryOperator::LessEquals
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEquals => OperatorClass::Relational,
            BinaryOperator::Equals | BinaryOperator::NotEquals => OperatorClass::Equality,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        };
        write!(f, "{}", symbol)
    }
}

/// `=` or one of the compound arithmetic assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
}

impl AssignmentOperator {
    /// The arithmetic operator a compound assignment applies first.
    pub fn get_arithmetic(&self) -> Option<BinaryOperator> {
        match self {
            AssignmentOperator::Assign => None,
            AssignmentOperator::AddAssign => Some(BinaryOperator::Add),
            AssignmentOperator::SubtractAssign => Some(BinaryOperator::Subtract),
            AssignmentOperator::MultiplyAssign => Some(BinaryOperator::Multiply),
            AssignmentOperator::DivideAssign => Some(BinaryOperator::Divide),
        }
    }
}

impl Display for AssignmentOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get_arithmetic() {
            Some(operator) => write!(f, "{}=", operator),
            None => write!(f, "="),
        }
    }
}

// COMPOUND EXPRESSIONS

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct PostfixExpr {
    pub operator: PostfixOperator,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub operator: AssignmentOperator,
    pub value: Box<Expr>,
}

/// `condition ? then_expr : else_expr`
#[derive(Debug, Clone)]
pub struct ConditionalExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
}

/// `base[subscript]`
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub base: Box<Expr>,
    pub subscript: Box<Expr>,
}

/// `base.field` - on this language's types, always a swizzle.
#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    pub base: Box<Expr>,
    pub field: String,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
}

// BUILDERS

impl Expr {
    /// Replaces the node's span; builders start from a null span.
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn bool(value: bool) -> Self {
        MK_EXPR!(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn int(value: i32) -> Self {
        MK_EXPR!(ExprKind::Literal(Literal::Int(value)))
    }

    pub fn float(value: f64) -> Self {
        MK_EXPR!(ExprKind::Literal(Literal::Float(value)))
    }

    pub fn ident(name: &str) -> Self {
        MK_EXPR!(ExprKind::Identifier(IdentifierExpr {
            name: name.to_string(),
        }))
    }

    pub fn unary(operator: UnaryOperator, operand: Expr) -> Self {
        MK_EXPR!(ExprKind::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        }))
    }

    pub fn postfix(operand: Expr, operator: PostfixOperator) -> Self {
        let span = operand.span.clone();
        MK_EXPR!(
            ExprKind::Postfix(PostfixExpr {
                operator,
                operand: Box::new(operand),
            }),
            span
        )
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        let span = left.span.join(&right.span);
        MK_EXPR!(
            ExprKind::Binary(BinaryExpr {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            }),
            span
        )
    }

    pub fn assign(assignee: Expr, operator: AssignmentOperator, value: Expr) -> Self {
        let span = assignee.span.join(&value.span);
        MK_EXPR!(
            ExprKind::Assignment(AssignmentExpr {
                assignee: Box::new(assignee),
                operator,
                value: Box::new(value),
            }),
            span
        )
    }

    pub fn conditional(condition: Expr, then_expr: Expr, else_expr: Expr) -> Self {
        let span = condition.span.join(&else_expr.span);
        MK_EXPR!(
            ExprKind::Conditional(ConditionalExpr {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            }),
            span
        )
    }

    pub fn index(base: Expr, subscript: Expr) -> Self {
        let span = base.span.join(&subscript.span);
        MK_EXPR!(
            ExprKind::Index(IndexExpr {
                base: Box::new(base),
                subscript: Box::new(subscript),
            }),
            span
        )
    }

    pub fn field(base: Expr, field: &str) -> Self {
        let span = base.span.clone();
        MK_EXPR!(
            ExprKind::FieldAccess(FieldAccessExpr {
                base: Box::new(base),
                field: field.to_string(),
            }),
            span
        )
    }

    pub fn call(callee: &str, arguments: Vec<Expr>) -> Self {
        MK_EXPR!(ExprKind::Call(CallExpr {
            callee: callee.to_string(),
            arguments,
        }))
    }
}
