use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::DeclConflict { .. } => "DeclConflict",
            ErrorImpl::IdentifierNotDeclared { .. } => "IdentifierNotDeclared",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::ExtraFormals { .. } => "ExtraFormals",
            ErrorImpl::LessFormals { .. } => "LessFormals",
            ErrorImpl::FormalsTypeMismatch { .. } => "FormalsTypeMismatch",
            ErrorImpl::IncompatibleOperand { .. } => "IncompatibleOperand",
            ErrorImpl::IncompatibleOperands { .. } => "IncompatibleOperands",
            ErrorImpl::InvalidInitialization { .. } => "InvalidInitialization",
            ErrorImpl::InvalidLValue { .. } => "InvalidLValue",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::InaccessibleSwizzle { .. } => "InaccessibleSwizzle",
            ErrorImpl::InvalidSwizzle { .. } => "InvalidSwizzle",
            ErrorImpl::SwizzleOutOfBound { .. } => "SwizzleOutOfBound",
            ErrorImpl::OversizedVector { .. } => "OversizedVector",
            ErrorImpl::TestNotBoolean { .. } => "TestNotBoolean",
            ErrorImpl::ReturnMismatch { .. } => "ReturnMismatch",
            ErrorImpl::ReturnMissing { .. } => "ReturnMissing",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::ContinueOutsideLoop => "ContinueOutsideLoop",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::DeclConflict { previous, .. } => {
                ErrorTip::Suggestion(format!("Previous declaration is at {}", previous))
            }
            ErrorImpl::IdentifierNotDeclared { name, reason } => match reason {
                Reason::LookingForVariable => ErrorTip::Suggestion(format!(
                    "Declare `{}` before using it as a variable",
                    name
                )),
                Reason::LookingForFunction => ErrorTip::Suggestion(format!(
                    "Declare function `{}` before calling it",
                    name
                )),
            },
            ErrorImpl::NotAFunction { name } => {
                ErrorTip::Suggestion(format!("`{}` is a variable and cannot be called", name))
            }
            ErrorImpl::ExtraFormals { expected, received, .. }
            | ErrorImpl::LessFormals { expected, received, .. } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::FormalsTypeMismatch {
                index,
                expected,
                received,
                ..
            } => ErrorTip::Suggestion(format!(
                "Argument {} should be `{}`, received `{}`",
                index + 1,
                expected,
                received
            )),
            ErrorImpl::IncompatibleOperand { .. } | ErrorImpl::IncompatibleOperands { .. } => {
                ErrorTip::None
            }
            ErrorImpl::InvalidInitialization { expected, received, .. } => ErrorTip::Suggestion(
                format!("Initializer of type `{}` cannot become `{}`", received, expected),
            ),
            ErrorImpl::InvalidLValue { .. } => ErrorTip::Suggestion(String::from(
                "Only variables, indexed elements and single swizzle components can be assigned",
            )),
            ErrorImpl::NotAnArray { base } => ErrorTip::Suggestion(format!(
                "Only arrays and matrices can be indexed, found `{}`",
                base
            )),
            ErrorImpl::InaccessibleSwizzle { base, .. } => ErrorTip::Suggestion(format!(
                "Swizzles apply to vectors and matrices, found `{}`",
                base
            )),
            ErrorImpl::InvalidSwizzle { .. } => {
                ErrorTip::Suggestion(String::from("Swizzles may only use x, y, z and w"))
            }
            ErrorImpl::SwizzleOutOfBound { base, .. } => {
                ErrorTip::Suggestion(format!("Component is beyond the size of `{}`", base))
            }
            ErrorImpl::OversizedVector { .. } => ErrorTip::Suggestion(String::from(
                "A swizzle selects at most four components",
            )),
            ErrorImpl::TestNotBoolean { .. } => ErrorTip::None,
            ErrorImpl::ReturnMismatch { expected, .. } => {
                ErrorTip::Suggestion(format!("The enclosing function returns `{}`", expected))
            }
            ErrorImpl::ReturnMissing { function } => ErrorTip::Suggestion(format!(
                "Not every path through `{}` ends in a return",
                function
            )),
            ErrorImpl::BreakOutsideLoop => ErrorTip::None,
            ErrorImpl::ContinueOutsideLoop => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// What a failed name lookup was expecting to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    LookingForVariable,
    LookingForFunction,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::LookingForVariable => write!(f, "variable"),
            Reason::LookingForFunction => write!(f, "function"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("declaration of {name:?} conflicts with declaration at {previous}")]
    DeclConflict { name: String, previous: Position },
    #[error("no declaration found for {reason} {name:?}")]
    IdentifierNotDeclared { name: String, reason: Reason },
    #[error("{name:?} is not a function")]
    NotAFunction { name: String },
    #[error("function {name:?} expects {expected} arguments but {received} given")]
    ExtraFormals {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("function {name:?} expects {expected} arguments but {received} given")]
    LessFormals {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("incompatible argument {index}: {received} given, {expected} expected")]
    FormalsTypeMismatch {
        name: String,
        index: usize,
        expected: Type,
        received: Type,
    },
    #[error("incompatible operand: {operator} {operand}")]
    IncompatibleOperand { operator: String, operand: Type },
    #[error("incompatible operands: {left} {operator} {right}")]
    IncompatibleOperands {
        operator: String,
        left: Type,
        right: Type,
    },
    #[error("{name:?} was declared {expected} but initialized with {received}")]
    InvalidInitialization {
        name: String,
        expected: Type,
        received: Type,
    },
    #[error("left operand of {operator} is not an assignable location")]
    InvalidLValue { operator: String },
    #[error("[] can only be applied to arrays and matrices, not {base}")]
    NotAnArray { base: Type },
    #[error("cannot access field {swizzle:?} on {base}")]
    InaccessibleSwizzle { swizzle: String, base: Type },
    #[error("invalid swizzle {swizzle:?}")]
    InvalidSwizzle { swizzle: String },
    #[error("swizzle {swizzle:?} selects beyond the components of {base}")]
    SwizzleOutOfBound { swizzle: String, base: Type },
    #[error("swizzle {swizzle:?} would produce a vector of more than 4 components")]
    OversizedVector { swizzle: String },
    #[error("test expression must have boolean type, found {received}")]
    TestNotBoolean { received: Type },
    #[error("incompatible return: {received} given, {expected} expected")]
    ReturnMismatch { received: Type, expected: Type },
    #[error("function {function:?} must return a value on every path")]
    ReturnMissing { function: String },
    #[error("break is only allowed inside a loop or switch")]
    BreakOutsideLoop,
    #[error("continue is only allowed inside a loop")]
    ContinueOutsideLoop,
}
