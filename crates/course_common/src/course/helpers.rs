//! Input helpers
//!
//! These raise faults but never log them; the controller is their catch site.

use serde::{Deserialize, Serialize};

use crate::fault::{Fault, FaultKind};

/// How a helper treats a missing input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullInputPolicy {
    /// Missing input is a null-reference fault
    #[default]
    Strict,
    /// Missing input becomes the empty string; nothing faults
    SubstituteDefault,
}

impl NullInputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullInputPolicy::Strict => "strict",
            NullInputPolicy::SubstituteDefault => "substitute-default",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "strict" => Some(NullInputPolicy::Strict),
            "substitute-default" | "default" => Some(NullInputPolicy::SubstituteDefault),
            _ => None,
        }
    }
}

/// Upper-case `input` under the given null-input policy
pub fn normalize(input: Option<&str>, policy: NullInputPolicy) -> Result<String, Fault> {
    match (input, policy) {
        (Some(value), _) => Ok(value.to_uppercase()),
        (None, NullInputPolicy::SubstituteDefault) => Ok(String::new()),
        (None, NullInputPolicy::Strict) => Err(Fault::of(FaultKind::NullReference)),
    }
}

/// Reject a missing argument
pub fn validate(input: Option<&str>) -> Result<&str, Fault> {
    input.ok_or_else(|| {
        Fault::new(
            FaultKind::ArgumentNull,
            "Value cannot be null. (Parameter 'input')",
        )
    })
}
