//! A single `name=value` callback parameter

use std::fmt;

/// One entry of the signed callback query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// Create a parameter
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter value, exactly as it goes into the signed data
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Renders `name=value` with no percent-encoding.
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl From<(&str, &str)> for Parameter {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}
