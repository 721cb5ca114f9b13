use std::fmt;

/// An error raised by a value operation, before the caller (the evaluator)
/// has a chance to attach the source span of the expression that raised it.
///
/// Kept position-free so `timon-value` stays a pure computation library,
/// testable without pulling in `timon-span`/`timon-errors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    TypeMismatch { op: &'static str, operands: String },
    DivisionByZero,
    OutOfRange(String),
    UnknownField { variant: &'static str, field: String },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::TypeMismatch { op, operands } => {
                write!(f, "operator '{op}' is not defined for {operands}")
            }
            ValueError::DivisionByZero => write!(f, "division by zero"),
            ValueError::OutOfRange(reason) => write!(f, "{reason}"),
            ValueError::UnknownField { variant, field } => {
                write!(f, "{variant} has no field '.{field}'")
            }
        }
    }
}

impl std::error::Error for ValueError {}

pub type ValueResult<T> = Result<T, ValueError>;
