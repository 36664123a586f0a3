use tracing::trace;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Construct a `break`/`continue` may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlContext {
    Loop,
    Switch,
}

/// The function whose body is being checked.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    pub name: String,
    pub return_type: Type,
    /// Set on exit from the structural must-return analysis of the body.
    pub guaranteed_return: bool,
}

/// Active loop/switch contexts plus the enclosing function.
///
/// Legality of `break`, `continue` and `return` is decided from the stack
/// contents alone.
#[derive(Debug, Default)]
pub struct ControlContextStack {
    contexts: Vec<ControlContext>,
    functions: Vec<FunctionContext>,
}

impl ControlContextStack {
    pub fn new() -> Self {
        ControlContextStack::default()
    }

    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    pub fn enter_loop(&mut self) {
        self.enter(ControlContext::Loop);
    }

    pub fn exit_loop(&mut self) {
        self.exit(ControlContext::Loop);
    }

    pub fn enter_switch(&mut self) {
        self.enter(ControlContext::Switch);
    }

    pub fn exit_switch(&mut self) {
        self.exit(ControlContext::Switch);
    }

    fn enter(&mut self, context: ControlContext) {
        self.contexts.push(context);
        trace!(?context, depth = self.contexts.len(), "entered control context");
    }

    fn exit(&mut self, context: ControlContext) {
        match self.contexts.pop() {
            Some(top) if top == context => {}
            top => panic!("Attempted to exit {:?} context, but the innermost is {:?}", context, top),
        }
        trace!(?context, depth = self.contexts.len(), "exited control context");
    }

    /// `break` is legal inside the nearest loop or switch.
    pub fn check_break(&self, position: &Position) -> Result<(), Error> {
        if self.contexts.is_empty() {
            Err(Error::new(ErrorImpl::BreakOutsideLoop, position.clone()))
        } else {
            Ok(())
        }
    }

    /// `continue` needs the nearest enclosing construct to be a loop; a
    /// switch in between does not satisfy it.
    pub fn check_continue(&self, position: &Position) -> Result<(), Error> {
        match self.contexts.last() {
            Some(ControlContext::Loop) => Ok(()),
            _ => Err(Error::new(ErrorImpl::ContinueOutsideLoop, position.clone())),
        }
    }

    pub fn enter_function(&mut self, name: &str, return_type: Type) {
        self.functions.push(FunctionContext {
            name: name.to_string(),
            return_type,
            guaranteed_return: false,
        });
        trace!(function = name, "entered function");
    }

    pub fn get_function(&self) -> Option<&FunctionContext> {
        self.functions.last()
    }

    /// Checks a `return` carrying a value of `actual` type (`Void` when it
    /// carries none) against the enclosing function.
    ///
    /// # Panics
    ///
    /// If no function is being checked.
    pub fn check_return(&self, actual: &Type, position: &Position) -> Result<(), Error> {
        let function = match self.functions.last() {
            Some(function) => function,
            None => panic!("Attempted to check a return outside of any function"),
        };

        if actual.is_compatible_with(&function.return_type) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::ReturnMismatch {
                    received: actual.clone(),
                    expected: function.return_type.clone(),
                },
                position.clone(),
            ))
        }
    }

    /// Pops the function context. A non-void function whose body is not
    /// guaranteed to return is an error reported at `position`.
    pub fn exit_function(&mut self, guaranteed_return: bool, position: &Position) -> Result<(), Error> {
        let mut function = match self.functions.pop() {
            Some(function) => function,
            None => panic!("Attempted to exit a function context that was never entered"),
        };
        function.guaranteed_return = guaranteed_return;
        trace!(function = %function.name, guaranteed_return, "exited function");

        if function.return_type != Type::Void && !function.guaranteed_return {
            Err(Error::new(
                ErrorImpl::ReturnMissing {
                    function: function.name,
                },
                position.clone(),
            ))
        } else {
            Ok(())
        }
    }
}
