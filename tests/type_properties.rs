//! Property-based tests for the type relations and the checker
//!
//! This test file runs proptest-based tests over generated types, swizzles
//! and expression trees.

use proptest::prelude::*;
use glsl_sema::{
    ast::{
        ast::{Decl, Expr, Program, Stmt},
        expressions::BinaryOperator,
        statements::{FnDecl, VarDecl},
        types::Type,
    },
    type_check,
    type_checker::expr::swizzle_type,
    CheckerConfig,
};

// ============================================================================
// Generators
// ============================================================================

/// Maximum nesting for arrays, function types and expressions
const MAX_DEPTH: usize = 3;

/// Names bound by `program_around`, one per shape
const BOUND: [(&str, fn() -> Type); 6] = [
    ("b", || Type::Bool),
    ("i", || Type::Int),
    ("f", || Type::Float),
    ("v3", || Type::Vector(3)),
    ("m3", || Type::Matrix(3)),
    ("fs", || Type::Array(Box::new(Type::Float))),
];

fn arb_scalar_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::Void),
        Just(Type::Bool),
        Just(Type::Int),
        Just(Type::Float),
        Just(Type::Error),
        (2u8..=4).prop_map(Type::Vector),
        (2u8..=4).prop_map(Type::Matrix),
    ]
}

fn arb_type(depth: usize) -> BoxedStrategy<Type> {
    if depth == 0 {
        arb_scalar_type().boxed()
    } else {
        prop_oneof![
            5 => arb_scalar_type(),
            1 => arb_type(depth - 1).prop_map(Type::array),
            1 => (prop::collection::vec(arb_type(depth - 1), 0..3), arb_type(depth - 1))
                .prop_map(|(params, ret)| Type::function(params, ret)),
        ]
        .boxed()
    }
}

fn arb_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Multiply),
        Just(BinaryOperator::Less),
        Just(BinaryOperator::Equals),
        Just(BinaryOperator::And),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        any::<bool>().prop_map(Expr::bool),
        (0i32..100).prop_map(Expr::int),
        (0.0f64..10.0).prop_map(Expr::float),
        prop::sample::select(vec!["b", "i", "f", "v3", "m3", "fs", "unbound"]).prop_map(Expr::ident),
    ]
}

fn arb_expr(depth: usize) -> BoxedStrategy<Expr> {
    if depth == 0 {
        arb_leaf().boxed()
    } else {
        prop_oneof![
            3 => arb_leaf(),
            3 => (arb_expr(depth - 1), arb_operator(), arb_expr(depth - 1))
                .prop_map(|(left, operator, right)| Expr::binary(left, operator, right)),
            1 => (arb_expr(depth - 1), "[xyzwrg]{1,5}")
                .prop_map(|(base, field)| Expr::field(base, &field)),
            1 => (arb_expr(depth - 1), arb_expr(depth - 1))
                .prop_map(|(base, subscript)| Expr::index(base, subscript)),
        ]
        .boxed()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Wraps `expr` in a `main` that first declares every bound name
fn program_around(expr: Expr) -> Program {
    let mut body: Vec<Stmt> = BOUND
        .iter()
        .map(|(name, ty)| Stmt::decl(name, ty(), None))
        .collect();
    body.push(Stmt::expr(expr));
    Program::new(vec![Decl::Function(FnDecl::new("main", vec![], Type::Void, body))])
}

fn root_type(program: &Program) -> Option<Type> {
    match &program.decls[0] {
        Decl::Function(main) => match main.body.iter().last() {
            Some(Stmt::Expression(statement)) => statement.expression.get_type(),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Type Relation Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn convertibility_is_reflexive(ty in arb_type(MAX_DEPTH)) {
        prop_assert!(ty.is_convertible_to(&ty));
    }

    #[test]
    fn error_converts_both_ways(ty in arb_type(MAX_DEPTH)) {
        prop_assert!(Type::Error.is_convertible_to(&ty));
        prop_assert!(ty.is_convertible_to(&Type::Error));
    }

    #[test]
    fn compatibility_is_symmetric(left in arb_type(MAX_DEPTH), right in arb_type(MAX_DEPTH)) {
        prop_assert_eq!(left.is_compatible_with(&right), right.is_compatible_with(&left));
    }

    #[test]
    fn compatibility_follows_convertibility(left in arb_type(MAX_DEPTH), right in arb_type(MAX_DEPTH)) {
        let expected = left.is_convertible_to(&right) || right.is_convertible_to(&left);
        prop_assert_eq!(left.is_compatible_with(&right), expected);
    }
}

// ============================================================================
// Swizzle Tests
// ============================================================================

proptest! {
    #[test]
    fn in_bound_swizzles_have_matching_width(swizzle in "[xyzw]{2,4}") {
        prop_assert_eq!(swizzle_type(&swizzle, 4), Ok(Type::Vector(swizzle.len() as u8)));
    }

    #[test]
    fn single_component_is_scalar(component in "[xy]", arity in 2u8..=4) {
        prop_assert_eq!(swizzle_type(&component, arity), Ok(Type::Float));
    }

    #[test]
    fn foreign_characters_are_rejected(swizzle in "[xyzw]{0,2}[a-v][xyzw]{0,1}") {
        prop_assert!(swizzle_type(&swizzle, 4).is_err());
    }
}

// ============================================================================
// Checker Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn rechecking_reports_the_same(expr in arb_expr(MAX_DEPTH)) {
        let program = program_around(expr);

        let first = type_check(&program, CheckerConfig::default());
        let first_type = root_type(&program);
        let second = type_check(&program, CheckerConfig::default());

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_type, root_type(&program));
    }

    #[test]
    fn every_expression_gets_a_type(expr in arb_expr(MAX_DEPTH)) {
        let program = program_around(expr);
        type_check(&program, CheckerConfig::default());

        prop_assert!(root_type(&program).is_some());
    }

    #[test]
    fn literals_alone_never_report(value in any::<i32>(), flag in any::<bool>()) {
        let program = program_around(Expr::binary(
            Expr::binary(Expr::int(value), BinaryOperator::Less, Expr::float(1.0)),
            BinaryOperator::And,
            Expr::bool(flag),
        ));

        prop_assert!(type_check(&program, CheckerConfig::default()).is_empty());
    }

    #[test]
    fn unused_declarations_never_report(names in prop::collection::hash_set("[a-z]{1,6}", 0..8)) {
        let decls = names
            .iter()
            .map(|name| Decl::Variable(VarDecl::new(&format!("g_{}", name), Type::Float, Some(Expr::int(0)))))
            .collect();

        prop_assert!(type_check(&Program::new(decls), CheckerConfig::default()).is_empty());
    }
}
