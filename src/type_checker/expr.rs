//! Expression checking.
//!
//! Every expression node gets a type recorded on it. Violations are reported
//! where they are found and the offending node becomes `Error`, which every
//! rule below absorbs silently.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::{
        ast::{Expr, ExprKind},
        expressions::{
            AssignmentExpr, BinaryOperator, CallExpr, ConditionalExpr, FieldAccessExpr, IndexExpr,
            Literal, OperatorClass, UnaryOperator,
        },
        types::Type,
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl, Reason},
    },
    type_checker::config::AssignmentRule,
    Position,
};

use super::{scope::Symbol, type_checker::TypeChecker};

const SWIZZLE_COMPONENTS: &str = "xyzw";
const MAX_SWIZZLE_LENGTH: usize = 4;

lazy_static! {
    static ref SWIZZLE_PATTERN: Regex = Regex::new("^[xyzw]+$").unwrap();
}

pub fn type_check_expr<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    expr: &'ast Expr,
) -> Type {
    let position = &expr.get_span().start;

    let ty = match &expr.kind {
        ExprKind::Literal(literal) => match literal {
            Literal::Bool(_) => Type::Bool,
            Literal::Int(_) => Type::Int,
            Literal::Float(_) => Type::Float,
        },
        ExprKind::Identifier(identifier) => match type_checker.scopes.resolve(&identifier.name) {
            Some(symbol) => symbol.get_type(),
            None => {
                type_checker.report(Error::new(
                    ErrorImpl::IdentifierNotDeclared {
                        name: identifier.name.clone(),
                        reason: Reason::LookingForVariable,
                    },
                    position.clone(),
                ));
                Type::Error
            }
        },
        ExprKind::Unary(unary) => {
            let operand = type_check_expr(type_checker, &unary.operand);
            match unary.operator {
                UnaryOperator::Not => {
                    if operand.is_compatible_with(&Type::Bool) {
                        Type::Bool
                    } else {
                        report_operand(type_checker, &unary.operator.to_string(), operand, position)
                    }
                }
                UnaryOperator::Negate | UnaryOperator::Plus => {
                    arithmetic_operand(type_checker, &unary.operator.to_string(), operand, position)
                }
                UnaryOperator::Increment | UnaryOperator::Decrement => step_operand(
                    type_checker,
                    &unary.operator.to_string(),
                    &unary.operand,
                    operand,
                    position,
                ),
            }
        }
        ExprKind::Postfix(postfix) => {
            let operand = type_check_expr(type_checker, &postfix.operand);
            step_operand(
                type_checker,
                &postfix.operator.to_string(),
                &postfix.operand,
                operand,
                position,
            )
        }
        ExprKind::Binary(binary) => {
            let left = type_check_expr(type_checker, &binary.left);
            let right = type_check_expr(type_checker, &binary.right);
            binary_result(type_checker, binary.operator, left, right, position)
        }
        ExprKind::Assignment(assignment) => type_check_assignment(type_checker, assignment, position),
        ExprKind::Conditional(conditional) => type_check_conditional(type_checker, conditional),
        ExprKind::Index(index) => type_check_index(type_checker, index, position),
        ExprKind::FieldAccess(field_access) => {
            type_check_field_access(type_checker, field_access, position)
        }
        ExprKind::Call(call) => type_check_call(type_checker, call, position),
    };

    expr.set_type(ty.clone());
    ty
}

fn report_operand<D: Diagnostics>(
    type_checker: &mut TypeChecker<'_, D>,
    operator: &str,
    operand: Type,
    position: &Position,
) -> Type {
    type_checker.report(Error::new(
        ErrorImpl::IncompatibleOperand {
            operator: operator.to_string(),
            operand,
        },
        position.clone(),
    ));
    Type::Error
}

fn report_operands<D: Diagnostics>(
    type_checker: &mut TypeChecker<'_, D>,
    operator: &str,
    left: Type,
    right: Type,
    position: &Position,
) -> Type {
    type_checker.report(Error::new(
        ErrorImpl::IncompatibleOperands {
            operator: operator.to_string(),
            left,
            right,
        },
        position.clone(),
    ));
    Type::Error
}

/// Unary arithmetic accepts numeric scalars, vectors and matrices.
fn arithmetic_operand<D: Diagnostics>(
    type_checker: &mut TypeChecker<'_, D>,
    operator: &str,
    operand: Type,
    position: &Position,
) -> Type {
    if operand.is_numeric() || operand.is_vector() || operand.is_matrix() || operand.is_error() {
        operand
    } else {
        report_operand(type_checker, operator, operand, position)
    }
}

/// `++`/`--`: arithmetic operand that must also be addressable.
fn step_operand<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    operator: &str,
    operand_expr: &'ast Expr,
    operand: Type,
    position: &Position,
) -> Type {
    let operand = arithmetic_operand(type_checker, operator, operand, position);
    if operand.is_error() || is_addressable(type_checker, operand_expr) {
        operand
    } else {
        report_lvalue(type_checker, operator, position)
    }
}

fn report_lvalue<D: Diagnostics>(
    type_checker: &mut TypeChecker<'_, D>,
    operator: &str,
    position: &Position,
) -> Type {
    type_checker.report(Error::new(
        ErrorImpl::InvalidLValue {
            operator: operator.to_string(),
        },
        position.clone(),
    ));
    Type::Error
}

/// Variables, indexed elements, and single-component swizzles of those.
fn is_addressable<D: Diagnostics>(type_checker: &TypeChecker<'_, D>, expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Identifier(identifier) => !matches!(
            type_checker.scopes.resolve(&identifier.name),
            Some(Symbol::Function(_))
        ),
        ExprKind::Index(_) => true,
        ExprKind::FieldAccess(field_access) => {
            field_access.field.chars().count() == 1 && is_addressable(type_checker, &field_access.base)
        }
        _ => false,
    }
}

fn binary_result<D: Diagnostics>(
    type_checker: &mut TypeChecker<'_, D>,
    operator: BinaryOperator,
    left: Type,
    right: Type,
    position: &Position,
) -> Type {
    let symbol = operator.to_string();
    match operator.get_class() {
        OperatorClass::Arithmetic => arithmetic_result(type_checker, &symbol, left, right, position),
        OperatorClass::Relational => {
            if left.is_error() || right.is_error() {
                Type::Bool
            } else if left.is_numeric() && right.is_numeric() && left.is_compatible_with(&right) {
                Type::Bool
            } else {
                report_operands(type_checker, &symbol, left, right, position)
            }
        }
        OperatorClass::Equality => {
            if left.is_compatible_with(&right) {
                Type::Bool
            } else {
                report_operands(type_checker, &symbol, left, right, position)
            }
        }
        OperatorClass::Logical => {
            if left.is_compatible_with(&Type::Bool) && right.is_compatible_with(&Type::Bool) {
                Type::Bool
            } else {
                report_operands(type_checker, &symbol, left, right, position)
            }
        }
    }
}

/// Shape rules for `+ - * /`: scalar with scalar, or a vector/matrix with
/// the same vector/matrix.
fn arithmetic_result<D: Diagnostics>(
    type_checker: &mut TypeChecker<'_, D>,
    operator: &str,
    left: Type,
    right: Type,
    position: &Position,
) -> Type {
    if left.is_error() || right.is_error() {
        Type::Error
    } else if left.is_numeric() && right.is_numeric() {
        if left.is_compatible_with(&right) {
            left
        } else {
            report_operands(type_checker, operator, left, right, position)
        }
    } else if (left.is_vector() || left.is_matrix()) && left == right {
        left
    } else {
        report_operands(type_checker, operator, left, right, position)
    }
}

fn type_check_assignment<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    assignment: &'ast AssignmentExpr,
    position: &Position,
) -> Type {
    let operator = assignment.operator.to_string();
    let left = type_check_expr(type_checker, &assignment.assignee);
    let right = type_check_expr(type_checker, &assignment.value);

    if !left.is_error() && !is_addressable(type_checker, &assignment.assignee) {
        return report_lvalue(type_checker, &operator, position);
    }

    let value = match assignment.operator.get_arithmetic() {
        Some(_) => {
            let value = arithmetic_result(type_checker, &operator, left.clone(), right.clone(), position);
            if value.is_error() {
                return Type::Error;
            }
            value
        }
        None => right.clone(),
    };

    let assignable = match type_checker.config.assignment_rule {
        AssignmentRule::Symmetric => left.is_compatible_with(&value),
        // a compound result takes the left type, so the operand is checked too
        AssignmentRule::Directed => value.is_convertible_to(&left) && right.is_convertible_to(&left),
    };

    if assignable {
        left
    } else {
        report_operands(type_checker, &operator, left, right, position)
    }
}

fn type_check_conditional<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    conditional: &'ast ConditionalExpr,
) -> Type {
    let condition = type_check_expr(type_checker, &conditional.condition);
    let then_type = type_check_expr(type_checker, &conditional.then_expr);
    let else_type = type_check_expr(type_checker, &conditional.else_expr);

    let mut ty = then_type.clone();
    if !condition.is_compatible_with(&Type::Bool) {
        let position = conditional.condition.get_span().start.clone();
        ty = report_operands(type_checker, "?:", condition, Type::Bool, &position);
    }
    if !then_type.is_compatible_with(&else_type) {
        let position = conditional.then_expr.get_span().start.clone();
        ty = report_operands(type_checker, "?:", then_type, else_type, &position);
    }
    ty
}

fn type_check_index<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    index: &'ast IndexExpr,
    position: &Position,
) -> Type {
    let base = type_check_expr(type_checker, &index.base);
    type_check_expr(type_checker, &index.subscript);

    match base.element_type() {
        Some(element) => element,
        None => {
            type_checker.report(Error::new(ErrorImpl::NotAnArray { base }, position.clone()));
            Type::Error
        }
    }
}

fn type_check_field_access<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    field_access: &'ast FieldAccessExpr,
    position: &Position,
) -> Type {
    let base = type_check_expr(type_checker, &field_access.base);

    match base.swizzle_base() {
        Type::Error => Type::Error,
        Type::Vector(arity) => match swizzle_type(&field_access.field, arity) {
            Ok(ty) => ty,
            Err(error_impl) => {
                type_checker.report(Error::new(error_impl, position.clone()));
                Type::Error
            }
        },
        _ => {
            type_checker.report(Error::new(
                ErrorImpl::InaccessibleSwizzle {
                    swizzle: field_access.field.clone(),
                    base,
                },
                position.clone(),
            ));
            Type::Error
        }
    }
}

/// Type selected by `swizzle` on a vector of `arity` components.
pub fn swizzle_type(swizzle: &str, arity: u8) -> Result<Type, ErrorImpl> {
    if !SWIZZLE_PATTERN.is_match(swizzle) {
        return Err(ErrorImpl::InvalidSwizzle {
            swizzle: swizzle.to_string(),
        });
    }

    let out_of_bound = swizzle.chars().any(|component| {
        SWIZZLE_COMPONENTS
            .find(component)
            .is_some_and(|index| index >= arity as usize)
    });
    if out_of_bound {
        return Err(ErrorImpl::SwizzleOutOfBound {
            swizzle: swizzle.to_string(),
            base: Type::Vector(arity),
        });
    }

    match swizzle.len() {
        1 => Ok(Type::Float),
        length if length <= MAX_SWIZZLE_LENGTH => Ok(Type::Vector(length as u8)),
        _ => Err(ErrorImpl::OversizedVector {
            swizzle: swizzle.to_string(),
        }),
    }
}

fn type_check_call<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    call: &'ast CallExpr,
    position: &Position,
) -> Type {
    let callee = type_checker.scopes.resolve(&call.callee);
    match callee {
        None => type_checker.report(Error::new(
            ErrorImpl::IdentifierNotDeclared {
                name: call.callee.clone(),
                reason: Reason::LookingForFunction,
            },
            position.clone(),
        )),
        Some(Symbol::Variable(_)) => type_checker.report(Error::new(
            ErrorImpl::NotAFunction {
                name: call.callee.clone(),
            },
            position.clone(),
        )),
        Some(Symbol::Function(_)) => {}
    }

    let arguments: Vec<Type> = call
        .arguments
        .iter()
        .map(|argument| type_check_expr(type_checker, argument))
        .collect();

    let function = match callee {
        Some(Symbol::Function(function)) => function,
        _ => return Type::Error,
    };

    let expected = function.parameters.len();
    let received = arguments.len();
    if received != expected {
        let error_impl = if received > expected {
            ErrorImpl::ExtraFormals {
                name: call.callee.clone(),
                expected,
                received,
            }
        } else {
            ErrorImpl::LessFormals {
                name: call.callee.clone(),
                expected,
                received,
            }
        };
        type_checker.report(Error::new(error_impl, position.clone()));
        return Type::Error;
    }

    let mut mismatched = false;
    for (index, (argument, parameter)) in arguments.iter().zip(function.parameters.iter()).enumerate() {
        let matches = match (argument, &parameter.var_type) {
            (Type::Array(argument), Type::Array(parameter)) => argument.is_compatible_with(parameter),
            (argument, parameter) => argument.is_compatible_with(parameter),
        };

        if !matches {
            mismatched = true;
            type_checker.report(Error::new(
                ErrorImpl::FormalsTypeMismatch {
                    name: call.callee.clone(),
                    index,
                    expected: parameter.var_type.clone(),
                    received: argument.clone(),
                },
                call.arguments[index].get_span().start.clone(),
            ));
        }
    }

    if mismatched {
        Type::Error
    } else {
        function.return_type.clone()
    }
}
