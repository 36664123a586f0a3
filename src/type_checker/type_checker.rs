use tracing::{debug, instrument};

use crate::{
    ast::{
        ast::{Decl, Program},
        statements::{FnDecl, VarDecl},
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
};

use super::{
    config::CheckerConfig,
    context::ControlContextStack,
    expr::type_check_expr,
    scope::{ScopeStack, Symbol},
    stmt::type_check_statements,
};

/// State of one check pass.
///
/// Owns the scope stack, the control-context stack and the diagnostics sink.
/// Nothing here outlives the pass except what the sink collected and the
/// type annotations written into the tree.
pub struct TypeChecker<'ast, D: Diagnostics> {
    pub config: CheckerConfig,
    pub scopes: ScopeStack<'ast>,
    pub contexts: ControlContextStack,
    diagnostics: D,
    error_count: usize,
}

impl<'ast, D: Diagnostics> TypeChecker<'ast, D> {
    pub fn new(config: CheckerConfig, diagnostics: D) -> Self {
        TypeChecker {
            config,
            scopes: ScopeStack::new(),
            contexts: ControlContextStack::new(),
            diagnostics,
            error_count: 0,
        }
    }

    /// Hands `error` to the sink. Checking always continues afterwards.
    pub fn report(&mut self, error: Error) {
        debug!(
            kind = error.get_error_name(),
            position = %error.get_position(),
            "{}",
            error.get_kind()
        );
        self.error_count += 1;
        self.diagnostics.report(error);
    }

    /// Reports the error of a failed component check, if any.
    pub fn report_result(&mut self, result: Result<(), Error>) {
        if let Err(error) = result {
            self.report(error);
        }
    }

    pub fn get_error_count(&self) -> usize {
        self.error_count
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    /// Checks every top-level declaration inside a single root scope.
    pub fn check_program(&mut self, program: &'ast Program) {
        debug!(declarations = program.decls.len(), "type checking program");

        self.scopes.push();
        for decl in program.decls.iter() {
            match decl {
                Decl::Variable(var_decl) => type_check_var_decl(self, var_decl),
                Decl::Function(fn_decl) => type_check_fn_decl(self, fn_decl),
            }
        }
        self.scopes.pop();

        debug!(errors = self.error_count, "type checked program");
    }
}

/// Validates a variable's initializer, which must convert to the declared
/// type, then declares the variable in the current scope. The initializer
/// does not see the variable it initializes.
pub fn type_check_var_decl<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    var_decl: &'ast VarDecl,
) {
    if let Some(initializer) = &var_decl.initializer {
        let actual_type = type_check_expr(type_checker, initializer);
        if !actual_type.is_convertible_to(&var_decl.var_type) {
            type_checker.report(Error::new(
                ErrorImpl::InvalidInitialization {
                    name: var_decl.identifier.clone(),
                    expected: var_decl.var_type.clone(),
                    received: actual_type,
                },
                initializer.get_span().start.clone(),
            ));
        }
    }

    let declared = type_checker.scopes.declare(Symbol::Variable(var_decl));
    type_checker.report_result(declared);
}

/// Checks a function: the name is bound before the body so recursion
/// resolves; parameters and top-level locals share one scope.
#[instrument(skip_all, fields(function = %fn_decl.identifier))]
pub fn type_check_fn_decl<'ast, D: Diagnostics>(
    type_checker: &mut TypeChecker<'ast, D>,
    fn_decl: &'ast FnDecl,
) {
    let declared = type_checker.scopes.declare(Symbol::Function(fn_decl));
    type_checker.report_result(declared);

    type_checker
        .contexts
        .enter_function(&fn_decl.identifier, fn_decl.return_type.clone());
    type_checker.scopes.push();

    for param in fn_decl.parameters.iter() {
        let declared = type_checker.scopes.declare(Symbol::Variable(param));
        type_checker.report_result(declared);
    }
    let guaranteed_return = type_check_statements(type_checker, fn_decl.body.iter());

    type_checker.scopes.pop();
    let exited = type_checker
        .contexts
        .exit_function(guaranteed_return, &fn_decl.span.start);
    type_checker.report_result(exited);
}

/// Runs one check pass over `program` and returns every diagnostic in
/// traversal order.
pub fn type_check(program: &Program, config: CheckerConfig) -> Vec<Error> {
    let mut type_checker = TypeChecker::new(config, Vec::new());
    type_checker.check_program(program);
    type_checker.into_diagnostics()
}
