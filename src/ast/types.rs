//! Type system definitions for the AST.
//!
//! This module defines the closed set of types the shading language knows
//! about and the relations the checker builds on:
//!
//! - Scalar types (`bool`, `int`, `float`) and `void`
//! - Vectors and square matrices of arity 2, 3 or 4
//! - Arrays and function signatures
//! - The absorbing `Error` type used after a diagnostic has been reported
//!
//! Convertibility is directed (`int` widens to `float`, never the other way);
//! compatibility is its symmetric closure.

use std::fmt::Display;

/// A type value. Compared structurally; arity matters for vectors and matrices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Bool,
    Int,
    Float,
    /// `vecN`, N in 2..=4
    Vector(u8),
    /// `matN`, N in 2..=4
    Matrix(u8),
    Array(Box<Type>),
    Function { params: Vec<Type>, ret: Box<Type> },
    Error,
}

impl Type {
    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Whether a value of `self` may be used where `other` is expected.
    pub fn is_convertible_to(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Error, _) | (_, Type::Error) => true,
            (Type::Int, Type::Float) => true,
            (Type::Array(from), Type::Array(to)) => from == to,
            _ => self == other,
        }
    }

    /// Symmetric closure of [`Type::is_convertible_to`].
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self.is_convertible_to(other) || other.is_convertible_to(self)
    }

    /// Numeric scalar (`int` or `float`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Type::Vector(_))
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, Type::Matrix(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// The type swizzles are resolved against: matrices expose the swizzles
    /// of their equal-arity vector form. Only meaningful for field access.
    pub fn swizzle_base(&self) -> Type {
        match self {
            Type::Matrix(n) => Type::Vector(*n),
            other => other.clone(),
        }
    }

    /// The type produced by indexing into `self`, if it can be indexed.
    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Array(element) => Some((**element).clone()),
            Type::Matrix(n) => Some(Type::Vector(*n)),
            Type::Error => Some(Type::Error),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Vector(n) => write!(f, "vec{}", n),
            Type::Matrix(n) => write!(f, "mat{}", n),
            Type::Array(element) => write!(f, "{}[]", element),
            Type::Function { params, ret } => {
                let params = params
                    .iter()
                    .map(|param| param.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{}({})", ret, params)
            }
            Type::Error => write!(f, "error"),
        }
    }
}
