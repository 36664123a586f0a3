//! Unit tests for the type checker module.
//!
//! This module contains tests for the scope stack, the control context
//! stack, swizzle typing, and expression checking in isolation.

use std::rc::Rc;

use crate::ast::ast::Expr;
use crate::ast::expressions::{AssignmentOperator, BinaryOperator, PostfixOperator, UnaryOperator};
use crate::ast::statements::{FnDecl, VarDecl};
use crate::ast::types::Type;
use crate::errors::errors::{Error, ErrorImpl};
use crate::{Position, Span};

use super::config::{AssignmentRule, CheckerConfig};
use super::context::ControlContextStack;
use super::expr::{swizzle_type, type_check_expr};
use super::scope::{ScopeStack, Symbol};
use super::type_checker::TypeChecker;

fn var_at(name: &str, var_type: Type, offset: u32) -> VarDecl {
    let mut var_decl = VarDecl::new(name, var_type, None);
    var_decl.span = Span::new(offset, offset + 1, &Rc::new("test.frag".to_string()));
    var_decl
}

fn names(errors: &[Error]) -> Vec<&str> {
    errors.iter().map(|error| error.get_error_name()).collect()
}

/// Checks `expr` with `decls` bound in a single open scope.
fn check_with<'ast>(decls: &'ast [VarDecl], expr: &'ast Expr, config: CheckerConfig) -> (Type, Vec<Error>) {
    let mut type_checker = TypeChecker::new(config, Vec::new());
    type_checker.scopes.push();
    for decl in decls {
        type_checker.scopes.declare(Symbol::Variable(decl)).unwrap();
    }
    let ty = type_check_expr(&mut type_checker, expr);
    type_checker.scopes.pop();
    (ty, type_checker.into_diagnostics())
}

fn check(decls: &[VarDecl], expr: &Expr) -> (Type, Vec<Error>) {
    check_with(decls, expr, CheckerConfig::default())
}

// SCOPES

#[test]
fn test_redeclaration_in_same_scope_conflicts() {
    let first = var_at("x", Type::Int, 1);
    let second = var_at("x", Type::Float, 9);
    let mut scopes = ScopeStack::new();
    scopes.push();

    assert!(scopes.declare(Symbol::Variable(&first)).is_ok());
    let error = scopes.declare(Symbol::Variable(&second)).unwrap_err();

    assert_eq!(error.get_error_name(), "DeclConflict");
    assert_eq!(error.get_position().0, 9);
    match scopes.resolve("x") {
        Some(Symbol::Variable(decl)) => assert_eq!(decl.var_type, Type::Int),
        other => panic!("Expected first declaration, found {:?}", other),
    }
}

#[test]
fn test_shadowing_outer_scope_is_allowed() {
    let outer = var_at("x", Type::Int, 1);
    let inner = var_at("x", Type::Bool, 5);
    let mut scopes = ScopeStack::new();
    scopes.push();
    scopes.declare(Symbol::Variable(&outer)).unwrap();
    scopes.push();

    assert!(scopes.declare(Symbol::Variable(&inner)).is_ok());
    assert_eq!(scopes.resolve("x").map(|symbol| symbol.get_type()), Some(Type::Bool));

    scopes.pop();
    assert_eq!(scopes.resolve("x").map(|symbol| symbol.get_type()), Some(Type::Int));
}

#[test]
fn test_outer_declaration_visible_until_popped() {
    let decl = var_at("x", Type::Float, 1);
    let mut scopes = ScopeStack::new();
    scopes.push();
    scopes.push();
    scopes.declare(Symbol::Variable(&decl)).unwrap();
    scopes.push();

    assert!(scopes.resolve("x").is_some());
    assert_eq!(scopes.depth(), 3);

    scopes.pop();
    scopes.pop();
    assert!(scopes.resolve("x").is_none());
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn test_function_symbol_type() {
    let function = FnDecl::new("f", vec![var_at("a", Type::Int, 0)], Type::Float, vec![]);
    let symbol = Symbol::Function(&function);

    assert_eq!(symbol.get_identifier(), "f");
    assert_eq!(symbol.get_type(), Type::function(vec![Type::Int], Type::Float));
}

#[test]
#[should_panic(expected = "empty scope stack")]
fn test_pop_on_empty_stack_panics() {
    let mut scopes = ScopeStack::new();
    scopes.pop();
}

// CONTROL CONTEXTS

#[test]
fn test_break_needs_loop_or_switch() {
    let position = Position::null();
    let mut contexts = ControlContextStack::new();

    assert!(contexts.check_break(&position).is_err());
    contexts.enter_switch();
    assert!(contexts.check_break(&position).is_ok());
    contexts.exit_switch();
    contexts.enter_loop();
    assert!(contexts.check_break(&position).is_ok());
    contexts.exit_loop();
    assert_eq!(contexts.depth(), 0);
}

#[test]
fn test_continue_blocked_by_inner_switch() {
    let position = Position::null();
    let mut contexts = ControlContextStack::new();

    contexts.enter_switch();
    assert_eq!(
        contexts.check_continue(&position).unwrap_err().get_error_name(),
        "ContinueOutsideLoop"
    );

    contexts.enter_loop();
    assert!(contexts.check_continue(&position).is_ok());
    contexts.exit_loop();
    contexts.exit_switch();

    contexts.enter_loop();
    contexts.enter_switch();
    assert!(contexts.check_continue(&position).is_err());
    contexts.exit_switch();
    contexts.exit_loop();
}

#[test]
#[should_panic]
fn test_mismatched_exit_panics() {
    let mut contexts = ControlContextStack::new();
    contexts.enter_loop();
    contexts.exit_switch();
}

#[test]
fn test_return_checks_against_function() {
    let position = Position::null();
    let mut contexts = ControlContextStack::new();
    contexts.enter_function("f", Type::Float);

    assert!(contexts.check_return(&Type::Int, &position).is_ok());
    assert!(contexts.check_return(&Type::Error, &position).is_ok());
    let error = contexts.check_return(&Type::Void, &position).unwrap_err();
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ReturnMismatch {
            received: Type::Void,
            expected: Type::Float
        }
    );

    assert_eq!(contexts.get_function().map(|function| function.name.as_str()), Some("f"));
    assert!(contexts.exit_function(false, &position).is_err());
    assert!(contexts.get_function().is_none());
}

#[test]
fn test_void_function_needs_no_return() {
    let position = Position::null();
    let mut contexts = ControlContextStack::new();
    contexts.enter_function("main", Type::Void);

    assert!(contexts.check_return(&Type::Void, &position).is_ok());
    assert!(contexts.exit_function(false, &position).is_ok());
}

// SWIZZLES

#[test]
fn test_swizzle_types() {
    assert_eq!(swizzle_type("x", 2), Ok(Type::Float));
    assert_eq!(swizzle_type("yx", 2), Ok(Type::Vector(2)));
    assert_eq!(swizzle_type("zzz", 3), Ok(Type::Vector(3)));
    assert_eq!(swizzle_type("xyzw", 4), Ok(Type::Vector(4)));
}

#[test]
fn test_swizzle_errors() {
    assert!(matches!(swizzle_type("xyz", 2), Err(ErrorImpl::SwizzleOutOfBound { .. })));
    assert!(matches!(swizzle_type("rgba", 4), Err(ErrorImpl::InvalidSwizzle { .. })));
    assert!(matches!(swizzle_type("xw", 3), Err(ErrorImpl::SwizzleOutOfBound { .. })));
    assert!(matches!(swizzle_type("xyzwx", 4), Err(ErrorImpl::OversizedVector { .. })));
}

// EXPRESSIONS

#[test]
fn test_literal_types_are_recorded() {
    let expr = Expr::float(1.5);
    let (ty, errors) = check(&[], &expr);

    assert_eq!(ty, Type::Float);
    assert_eq!(expr.get_type(), Some(Type::Float));
    assert!(errors.is_empty());
}

#[test]
fn test_undeclared_identifier_is_error_typed() {
    let expr = Expr::binary(Expr::ident("missing"), BinaryOperator::Add, Expr::int(1));
    let (ty, errors) = check(&[], &expr);

    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IdentifierNotDeclared"]);
}

#[test]
fn test_arithmetic_shapes() {
    let decls = [
        var_at("v", Type::Vector(3), 0),
        var_at("w", Type::Vector(3), 1),
        var_at("m", Type::Matrix(3), 2),
        var_at("f", Type::Float, 3),
    ];

    let vectors = Expr::binary(Expr::ident("v"), BinaryOperator::Multiply, Expr::ident("w"));
    assert_eq!(check(&decls, &vectors), (Type::Vector(3), vec![]));

    let scalars = Expr::binary(Expr::int(2), BinaryOperator::Add, Expr::ident("f"));
    assert_eq!(check(&decls, &scalars).0, Type::Int);

    let mixed = Expr::binary(Expr::ident("v"), BinaryOperator::Multiply, Expr::ident("m"));
    let (ty, errors) = check(&decls, &mixed);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IncompatibleOperands"]);

    let scaled = Expr::binary(Expr::ident("v"), BinaryOperator::Multiply, Expr::ident("f"));
    assert_eq!(names(&check(&decls, &scaled).1), vec!["IncompatibleOperands"]);
}

#[test]
fn test_comparisons_yield_bool() {
    let decls = [var_at("v", Type::Vector(2), 0), var_at("b", Type::Bool, 1)];

    let relational = Expr::binary(Expr::int(1), BinaryOperator::Less, Expr::float(2.0));
    assert_eq!(check(&decls, &relational), (Type::Bool, vec![]));

    let vector_relational = Expr::binary(Expr::ident("v"), BinaryOperator::Less, Expr::ident("v"));
    assert_eq!(names(&check(&decls, &vector_relational).1), vec!["IncompatibleOperands"]);

    let equality = Expr::binary(Expr::ident("v"), BinaryOperator::Equals, Expr::ident("v"));
    assert_eq!(check(&decls, &equality), (Type::Bool, vec![]));

    let logical = Expr::binary(Expr::ident("b"), BinaryOperator::And, Expr::int(1));
    assert_eq!(names(&check(&decls, &logical).1), vec!["IncompatibleOperands"]);
}

#[test]
fn test_error_operands_do_not_cascade() {
    let expr = Expr::binary(
        Expr::binary(Expr::ident("nope"), BinaryOperator::Multiply, Expr::int(2)),
        BinaryOperator::Greater,
        Expr::bool(true),
    );
    let (ty, errors) = check(&[], &expr);

    assert_eq!(ty, Type::Bool);
    assert_eq!(names(&errors), vec!["IdentifierNotDeclared"]);
}

#[test]
fn test_unary_operands() {
    let decls = [var_at("b", Type::Bool, 0), var_at("m", Type::Matrix(2), 1)];

    let negate = Expr::unary(UnaryOperator::Negate, Expr::ident("m"));
    assert_eq!(check(&decls, &negate), (Type::Matrix(2), vec![]));

    let negate_bool = Expr::unary(UnaryOperator::Negate, Expr::ident("b"));
    assert_eq!(names(&check(&decls, &negate_bool).1), vec!["IncompatibleOperand"]);

    let not = Expr::unary(UnaryOperator::Not, Expr::ident("b"));
    assert_eq!(check(&decls, &not), (Type::Bool, vec![]));
}

#[test]
fn test_increment_needs_addressable_operand() {
    let decls = [var_at("i", Type::Int, 0)];

    let postfix = Expr::postfix(Expr::ident("i"), PostfixOperator::Increment);
    assert_eq!(check(&decls, &postfix), (Type::Int, vec![]));

    let literal = Expr::unary(UnaryOperator::Decrement, Expr::int(3));
    let (ty, errors) = check(&decls, &literal);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["InvalidLValue"]);
}

#[test]
fn test_assignment_rules() {
    let decls = [
        var_at("f", Type::Float, 0),
        var_at("i", Type::Int, 1),
        var_at("v", Type::Vector(4), 2),
    ];

    // float receives int either way
    let widen = Expr::assign(Expr::ident("f"), AssignmentOperator::Assign, Expr::ident("i"));
    assert_eq!(check(&decls, &widen), (Type::Float, vec![]));

    // int receives float only under the symmetric rule
    let narrow = Expr::assign(Expr::ident("i"), AssignmentOperator::Assign, Expr::ident("f"));
    assert_eq!(check(&decls, &narrow), (Type::Int, vec![]));
    let directed = CheckerConfig::new().with_assignment_rule(AssignmentRule::Directed);
    let (ty, errors) = check_with(&decls, &narrow, directed);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IncompatibleOperands"]);

    let component = Expr::assign(
        Expr::field(Expr::ident("v"), "y"),
        AssignmentOperator::Assign,
        Expr::float(1.0),
    );
    assert_eq!(check(&decls, &component), (Type::Float, vec![]));

    let multi = Expr::assign(
        Expr::field(Expr::ident("v"), "xy"),
        AssignmentOperator::Assign,
        Expr::ident("v"),
    );
    assert_eq!(names(&check(&decls, &multi).1), vec!["InvalidLValue"]);
}

#[test]
fn test_compound_assignment_uses_arithmetic_rule() {
    let decls = [var_at("v", Type::Vector(3), 0), var_at("b", Type::Bool, 1)];

    let add = Expr::assign(Expr::ident("v"), AssignmentOperator::AddAssign, Expr::ident("v"));
    assert_eq!(check(&decls, &add), (Type::Vector(3), vec![]));

    let bad = Expr::assign(Expr::ident("b"), AssignmentOperator::MultiplyAssign, Expr::int(2));
    let (ty, errors) = check(&decls, &bad);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IncompatibleOperands"]);
}

#[test]
fn test_directed_rule_checks_compound_operand() {
    let decls = [var_at("count", Type::Int, 0), var_at("scale", Type::Float, 1)];
    let directed = CheckerConfig::new().with_assignment_rule(AssignmentRule::Directed);

    let narrowing = Expr::assign(
        Expr::ident("count"),
        AssignmentOperator::AddAssign,
        Expr::float(1.5),
    );
    let (ty, errors) = check_with(&decls, &narrowing, directed.clone());
    assert_eq!(ty, Type::Error);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::IncompatibleOperands {
            operator: "+=".to_string(),
            left: Type::Int,
            right: Type::Float,
        }
    );

    let widening = Expr::assign(
        Expr::ident("scale"),
        AssignmentOperator::MultiplyAssign,
        Expr::ident("count"),
    );
    assert_eq!(check_with(&decls, &widening, directed), (Type::Float, vec![]));

    // the symmetric rule still accepts the narrowing form
    assert_eq!(check(&decls, &narrowing), (Type::Int, vec![]));
}

#[test]
fn test_error_count_tracks_reports() {
    let decls = [var_at("v", Type::Vector(2), 0)];
    let expr = Expr::binary(
        Expr::field(Expr::ident("v"), "xyz"),
        BinaryOperator::Add,
        Expr::ident("missing"),
    );

    let mut type_checker = TypeChecker::new(CheckerConfig::default(), Vec::new());
    type_checker.scopes.push();
    type_checker.scopes.declare(Symbol::Variable(&decls[0])).unwrap();
    type_check_expr(&mut type_checker, &expr);
    type_checker.scopes.pop();

    assert_eq!(type_checker.get_error_count(), 2);
    assert_eq!(type_checker.into_diagnostics().len(), 2);
}

#[test]
fn test_conditional_expression() {
    let decls = [var_at("v", Type::Vector(2), 0)];

    let ok = Expr::conditional(Expr::bool(true), Expr::int(1), Expr::float(2.0));
    assert_eq!(check(&decls, &ok), (Type::Int, vec![]));

    let bad_test = Expr::conditional(Expr::ident("v"), Expr::int(1), Expr::int(2));
    let (ty, errors) = check(&decls, &bad_test);
    assert_eq!(ty, Type::Error);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::IncompatibleOperands {
            operator: "?:".to_string(),
            left: Type::Vector(2),
            right: Type::Bool,
        }
    );
    assert_eq!(errors.len(), 1);

    let both_bad = Expr::conditional(Expr::int(0), Expr::ident("v"), Expr::bool(true));
    let (ty, errors) = check(&decls, &both_bad);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IncompatibleOperands", "IncompatibleOperands"]);

    let bad_branches = Expr::conditional(Expr::bool(false), Expr::ident("v"), Expr::int(2));
    let (ty, errors) = check(&decls, &bad_branches);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IncompatibleOperands"]);
}

#[test]
fn test_indexing() {
    let decls = [
        var_at("values", Type::array(Type::Float), 0),
        var_at("m", Type::Matrix(4), 1),
        var_at("v", Type::Vector(4), 2),
    ];

    let array = Expr::index(Expr::ident("values"), Expr::int(0));
    assert_eq!(check(&decls, &array), (Type::Float, vec![]));

    let column = Expr::index(Expr::ident("m"), Expr::int(1));
    assert_eq!(check(&decls, &column), (Type::Vector(4), vec![]));

    let vector = Expr::index(Expr::ident("v"), Expr::int(1));
    let (ty, errors) = check(&decls, &vector);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["NotAnArray"]);
}

#[test]
fn test_field_access() {
    let decls = [
        var_at("v", Type::Vector(2), 0),
        var_at("m", Type::Matrix(3), 1),
        var_at("f", Type::Float, 2),
    ];

    let matrix = Expr::field(Expr::ident("m"), "zyx");
    assert_eq!(check(&decls, &matrix), (Type::Vector(3), vec![]));

    let scalar = Expr::field(Expr::ident("f"), "x");
    assert_eq!(names(&check(&decls, &scalar).1), vec!["InaccessibleSwizzle"]);

    let out_of_bound = Expr::field(Expr::ident("v"), "xyz");
    assert_eq!(names(&check(&decls, &out_of_bound).1), vec!["SwizzleOutOfBound"]);

    let undeclared = Expr::field(Expr::ident("nope"), "xy");
    let (ty, errors) = check(&decls, &undeclared);
    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["IdentifierNotDeclared"]);
}

#[test]
fn test_call_on_variable_is_not_a_function() {
    let decls = [var_at("f", Type::Float, 0)];
    let call = Expr::call("f", vec![Expr::int(1)]);
    let (ty, errors) = check(&decls, &call);

    assert_eq!(ty, Type::Error);
    assert_eq!(names(&errors), vec!["NotAFunction"]);
    let argument_type = match &call.kind {
        crate::ast::ast::ExprKind::Call(call) => call.arguments[0].get_type(),
        _ => None,
    };
    assert_eq!(argument_type, Some(Type::Int));
}
