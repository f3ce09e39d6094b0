use std::fmt::Display;

use crate::{environment::prelude::MAX_INT, utils::prelude::SrcSpan};

/// Failures that abort the rest of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorType {
    /// An arithmetic result left `-MAX_INT..=MAX_INT`.
    Overflow,
    /// A new name was assigned while the store already held
    /// [`MAX_VARIABLES`](crate::environment::prelude::MAX_VARIABLES) names.
    TooManyVariables { limit: usize },
    /// A `while` loop ran more iterations than the caller allowed.
    LoopLimitExceeded { limit: usize },
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            RuntimeErrorType::Overflow => (
                "Calculation result exceeds the maximum limit",
                vec![format!("Results must stay within -{MAX_INT}..={MAX_INT}")]
            ),
            RuntimeErrorType::TooManyVariables { limit } => (
                "Maximum number of variables reached",
                vec![format!("At most {limit} variables can be defined")]
            ),
            RuntimeErrorType::LoopLimitExceeded { limit } => (
                "Loop iteration limit exceeded",
                vec![format!("The loop did not finish within {limit} iterations")]
            ),
            RuntimeErrorType::Interrupted => ("Interrupted", vec![])
        }
    }

    pub fn is_limit(&self) -> bool {
        matches!(self.error, RuntimeErrorType::TooManyVariables { .. })
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}

/// Problems that only cost the offending sub-expression its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalWarning {
    UndefinedVariable {
        name: String,
        location: SrcSpan,
    },
    DivisionByZero {
        location: SrcSpan,
    },
}

impl EvalWarning {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::UndefinedVariable { location, .. }
            | Self::DivisionByZero { location } => *location
        }
    }
}

impl Display for EvalWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, .. } => write!(f, "undefined variable `{name}`"),
            Self::DivisionByZero { .. } => write!(f, "division by zero")
        }
    }
}
