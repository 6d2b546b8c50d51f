//! Operation dispatch and arithmetic
//!
//! Pure functions: the operation selector parses case-insensitively from
//! the `Operation` header value, and `calculate` applies it with IEEE
//! double semantics (no rounding, no precision normalization). The only
//! guarded case is a zero divisor.

use std::str::FromStr;

use crate::error::ApiError;

/// The four supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            _ => Err(ApiError::UnknownOperation),
        }
    }
}

impl Operation {
    /// Label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

/// Apply `op` to the operands.
pub fn calculate(op: Operation, a: f64, b: f64) -> Result<f64, ApiError> {
    match op {
        Operation::Add => Ok(a + b),
        Operation::Subtract => Ok(a - b),
        Operation::Multiply => Ok(a * b),
        Operation::Divide => {
            if b == 0.0 {
                Err(ApiError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
    }
}
