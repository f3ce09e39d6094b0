use std::fmt::Display;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

/// Largest magnitude an arithmetic result may have.
pub const MAX_INT: i64 = (1 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}")
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl Value {
    /// Booleans take part in arithmetic as 1 and 0.
    pub fn as_integer(&self) -> i64 {
        match self {
            Value::Integer { value } => *value,
            Value::Boolean { value } => i64::from(*value)
        }
    }

    pub fn is_truthy(&self) -> bool {
        self.as_integer() != 0
    }
}
