use std::fmt::Display;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NIL: Value = Value::Nil;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number {
        value: f64,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool
    },
    Nil,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number { value } => write!(f, "{}", format_number(*value)),
            Value::String { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Nil => write!(f, "nil"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number { value }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String { value: value.to_string() }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Number { .. } => ValueType::Number,
            Self::String { .. } => ValueType::String,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Nil => ValueType::Nil,
        }
    }

    /// Only `false` and `nil` are falsy; `0` and `""` are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean { value: false } | Value::Nil)
    }

    /// Values of different kinds are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }
}

/// Integral numbers print without a fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Nil,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Nil => "nil",
        };

        write!(f, "{name}")
    }
}
