//! Statement checking.
//!
//! Drives the walk over statement trees. Each lexical level gets exactly one
//! scope and each loop/switch exactly one control context, both released as
//! the call for the construct returns.
//!
//! Every function here returns whether the statement is guaranteed to end in
//! a `return` on all paths (the must-return property).

use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{BlockStmt, DoWhileStmt, ForStmt, IfStmt, ReturnStmt, SwitchStmt, WhileStmt},
        types::Type,
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
};

use super::{
    expr::type_check_expr,
    type_checker::{type_check_var_decl, TypeChecker},
};

pub fn type_check_stmt<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    stmt: &'ast Stmt,
) -> bool {
    match stmt {
        Stmt::Block(block) => type_check_block(type_checker, block),
        Stmt::Decl(var_decl) => {
            type_check_var_decl(type_checker, var_decl);
            false
        }
        Stmt::Expression(expression_stmt) => {
            type_check_expr(type_checker, &expression_stmt.expression);
            false
        }
        Stmt::If(if_stmt) => type_check_if(type_checker, if_stmt),
        Stmt::While(while_stmt) => type_check_while(type_checker, while_stmt),
        Stmt::DoWhile(do_while_stmt) => type_check_do_while(type_checker, do_while_stmt),
        Stmt::For(for_stmt) => type_check_for(type_checker, for_stmt),
        Stmt::Switch(switch_stmt) => type_check_switch(type_checker, switch_stmt),
        Stmt::Break(break_stmt) => {
            let checked = type_checker.contexts.check_break(&break_stmt.span.start);
            type_checker.report_result(checked);
            false
        }
        Stmt::Continue(continue_stmt) => {
            let checked = type_checker.contexts.check_continue(&continue_stmt.span.start);
            type_checker.report_result(checked);
            false
        }
        Stmt::Return(return_stmt) => type_check_return(type_checker, return_stmt),
    }
}

/// Checks statements in order in the current scope. A sequence returns if
/// any of its statements does.
pub fn type_check_statements<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    statements: impl Iterator<Item = &'ast Stmt>,
) -> bool {
    let mut guaranteed_return = false;
    for stmt in statements {
        guaranteed_return |= type_check_stmt(type_checker, stmt);
    }
    guaranteed_return
}

pub fn type_check_block<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    block: &'ast BlockStmt,
) -> bool {
    type_checker.scopes.push();
    let guaranteed_return = type_check_statements(type_checker, block.iter());
    type_checker.scopes.pop();
    guaranteed_return
}

/// Body of a construct that already opened a scope for it: a block body is
/// flattened into that scope instead of opening its own.
fn type_check_inline<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    body: &'ast Stmt,
) -> bool {
    match body {
        Stmt::Block(block) => type_check_statements(type_checker, block.iter()),
        other => type_check_stmt(type_checker, other),
    }
}

/// A branch body in a scope of its own.
fn type_check_branch<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    body: &'ast Stmt,
) -> bool {
    type_checker.scopes.push();
    let guaranteed_return = type_check_inline(type_checker, body);
    type_checker.scopes.pop();
    guaranteed_return
}

fn type_check_test<'ast, D: Diagnostics>(type_checker: &mut TypeChecker<'ast, D>, test: &'ast Expr) {
    let test_type = type_check_expr(type_checker, test);
    if !test_type.is_compatible_with(&Type::Bool) {
        type_checker.report(Error::new(
            ErrorImpl::TestNotBoolean {
                received: test_type,
            },
            test.get_span().start.clone(),
        ));
    }
}

fn type_check_if<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    if_stmt: &'ast IfStmt,
) -> bool {
    type_check_test(type_checker, &if_stmt.condition);

    let then_returns = type_check_branch(type_checker, &if_stmt.then_body);
    let else_returns = match &if_stmt.else_body {
        Some(else_body) => type_check_branch(type_checker, else_body),
        None => false,
    };

    then_returns && else_returns
}

fn type_check_while<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    while_stmt: &'ast WhileStmt,
) -> bool {
    type_checker.contexts.enter_loop();
    type_checker.scopes.push();

    type_check_test(type_checker, &while_stmt.condition);
    type_check_inline(type_checker, &while_stmt.body);

    type_checker.scopes.pop();
    type_checker.contexts.exit_loop();

    // the body may never run
    false
}

fn type_check_do_while<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    do_while_stmt: &'ast DoWhileStmt,
) -> bool {
    type_checker.contexts.enter_loop();

    type_checker.scopes.push();
    type_check_inline(type_checker, &do_while_stmt.body);
    type_checker.scopes.pop();
    type_check_test(type_checker, &do_while_stmt.condition);

    type_checker.contexts.exit_loop();
    false
}

fn type_check_for<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    for_stmt: &'ast ForStmt,
) -> bool {
    type_checker.contexts.enter_loop();
    type_checker.scopes.push();

    type_check_expr(type_checker, &for_stmt.init);
    type_check_test(type_checker, &for_stmt.condition);
    if let Some(step) = &for_stmt.step {
        type_check_expr(type_checker, step);
    }
    type_check_inline(type_checker, &for_stmt.body);

    type_checker.scopes.pop();
    type_checker.contexts.exit_loop();
    false
}

fn type_check_switch<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    switch_stmt: &'ast SwitchStmt,
) -> bool {
    type_checker.contexts.enter_switch();
    type_checker.scopes.push();

    let selector = type_check_expr(type_checker, &switch_stmt.selector);

    let mut cases_return = true;
    for case in switch_stmt.cases.iter() {
        let label = type_check_expr(type_checker, &case.label);
        if !label.is_compatible_with(&selector) {
            type_checker.report(Error::new(
                ErrorImpl::IncompatibleOperands {
                    operator: String::from("case"),
                    left: selector.clone(),
                    right: label,
                },
                case.label.get_span().start.clone(),
            ));
        }
        cases_return &= type_check_statements(type_checker, case.body.iter());
    }

    let default_returns = match &switch_stmt.default {
        Some(default) => type_check_statements(type_checker, default.iter()),
        None => false,
    };

    type_checker.scopes.pop();
    type_checker.contexts.exit_switch();

    cases_return && default_returns
}

fn type_check_return<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    return_stmt: &'ast ReturnStmt,
) -> bool {
    let actual = match &return_stmt.value {
        Some(value) => type_check_expr(type_checker, value),
        None => Type::Void,
    };

    let checked = type_checker
        .contexts
        .check_return(&actual, &return_stmt.span.start);
    type_checker.report_result(checked);
    true
}
