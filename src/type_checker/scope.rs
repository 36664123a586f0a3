use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::{
        statements::{FnDecl, VarDecl},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// A name binding: the declaration that introduced it, borrowed from the tree.
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'ast> {
    Variable(&'ast VarDecl),
    Function(&'ast FnDecl),
}

impl<'ast> Symbol<'ast> {
    pub fn get_identifier(&self) -> &'ast str {
        match *self {
            Symbol::Variable(var_decl) => &var_decl.identifier,
            Symbol::Function(fn_decl) => &fn_decl.identifier,
        }
    }

    pub fn get_position(&self) -> &'ast Position {
        match *self {
            Symbol::Variable(var_decl) => &var_decl.span.start,
            Symbol::Function(fn_decl) => &fn_decl.span.start,
        }
    }

    /// Type an identifier referring to this symbol has.
    pub fn get_type(&self) -> Type {
        match *self {
            Symbol::Variable(var_decl) => var_decl.var_type.clone(),
            Symbol::Function(fn_decl) => fn_decl.get_type(),
        }
    }
}

/// One lexical level: each name bound at most once.
#[derive(Debug, Default)]
pub struct Scope<'ast> {
    pub variable_lookup: HashMap<String, Symbol<'ast>>,
}

impl<'ast> Scope<'ast> {
    pub fn get_symbol(&self, name: &str) -> Option<Symbol<'ast>> {
        self.variable_lookup.get(name).copied()
    }
}

/// Stack of open scopes, innermost last.
///
/// Sole owner of every scope in a pass; callers only push, pop, declare and
/// resolve.
#[derive(Debug, Default)]
pub struct ScopeStack<'ast> {
    scopes: Vec<Scope<'ast>>,
}

impl<'ast> ScopeStack<'ast> {
    pub fn new() -> Self {
        ScopeStack { scopes: vec![] }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::default());
        trace!(depth = self.scopes.len(), "pushed scope");
    }

    /// Closes the innermost scope.
    ///
    /// # Panics
    ///
    /// If no scope is open; every pop must pair with a push.
    pub fn pop(&mut self) {
        if self.scopes.pop().is_none() {
            panic!("Attempted to pop a scope from an empty scope stack");
        }
        trace!(depth = self.scopes.len(), "popped scope");
    }

    /// Binds `symbol` in the innermost scope.
    ///
    /// A name already bound in the innermost scope is a conflict: the
    /// existing binding is kept and the error points at the new declaration.
    /// Shadowing a binding from an outer scope is always allowed.
    pub fn declare(&mut self, symbol: Symbol<'ast>) -> Result<(), Error> {
        let scope = match self.scopes.last_mut() {
            Some(scope) => scope,
            None => panic!("Attempted to declare a symbol with no open scope"),
        };

        let name = symbol.get_identifier();
        if let Some(existing) = scope.get_symbol(name) {
            Err(Error::new(
                ErrorImpl::DeclConflict {
                    name: name.to_string(),
                    previous: existing.get_position().clone(),
                },
                symbol.get_position().clone(),
            ))
        } else {
            scope.variable_lookup.insert(name.to_string(), symbol);
            Ok(())
        }
    }

    /// Innermost binding of `name`, if any scope has one.
    pub fn resolve(&self, name: &str) -> Option<Symbol<'ast>> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_symbol(name))
    }
}
