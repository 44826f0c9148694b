use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationReason {
    Missing,
    WrongType,
    NotInEnumeration,
    WrongTagConstant,
    WrongNestingDepth,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::Missing => "missing",
            ValidationReason::WrongType => "wrong-type",
            ValidationReason::NotInEnumeration => "not-in-enumeration",
            ValidationReason::WrongTagConstant => "wrong-tag-constant",
            ValidationReason::WrongNestingDepth => "wrong-nesting-depth",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First structural problem found in a raw record. `path` is rooted at `$`,
/// e.g. `$.features[2].geometry.type`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{path}: {reason} ({detail})")]
pub struct ValidationError {
    pub path: String,
    pub reason: ValidationReason,
    pub detail: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, reason: ValidationReason, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason,
            detail: detail.into(),
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, ValidationReason::Missing, "required key is absent")
    }

    pub fn wrong_type(path: impl Into<String>, expected: &str, found: &serde_json::Value) -> Self {
        Self::new(
            path,
            ValidationReason::WrongType,
            format!("expected {}, found {}", expected, json_type_name(found)),
        )
    }

    pub fn not_in_enumeration(path: impl Into<String>, found: &str, allowed: &[&str]) -> Self {
        let allowed: Vec<String> = allowed.iter().map(|a| format!("{:?}", a)).collect();
        Self::new(
            path,
            ValidationReason::NotInEnumeration,
            format!("{:?} is not one of {}", found, allowed.join(", ")),
        )
    }

    pub fn wrong_tag(path: impl Into<String>, expected: &str, found: &str) -> Self {
        Self::new(
            path,
            ValidationReason::WrongTagConstant,
            format!("expected {:?}, found {:?}", expected, found),
        )
    }

    pub fn wrong_depth(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(path, ValidationReason::WrongNestingDepth, detail)
    }
}

pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_f64() => "number",
        serde_json::Value::Number(_) => "integer",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
