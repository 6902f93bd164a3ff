use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ControllerStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerStyle {
    /// `apis/<service>/<version>` types with a `pkg/controller/direct` controller.
    Direct,
    /// Generated from infrastructure-as-code under `pkg/clients/generated`.
    Legacy,
    Unknown,
}

impl ControllerStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ControllerStyle::Direct => "direct",
            ControllerStyle::Legacy => "legacy",
            ControllerStyle::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ControllerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CompletionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    NotStarted,
    InProgress,
    Completed,
}

impl CompletionState {
    /// `completed` iff every artifact exists, `not_started` iff none do.
    pub fn from_existence(flags: impl IntoIterator<Item = bool>) -> Self {
        let (mut present, mut total) = (0usize, 0usize);
        for exists in flags {
            total += 1;
            if exists {
                present += 1;
            }
        }
        if present == total {
            CompletionState::Completed
        } else if present == 0 {
            CompletionState::NotStarted
        } else {
            CompletionState::InProgress
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompletionState::NotStarted => "not_started",
            CompletionState::InProgress => "in_progress",
            CompletionState::Completed => "completed",
        }
    }
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Int64,
    Bool,
    Object,
    Array,
}

impl FieldType {
    /// Go type for a field of this kind on `resource`.
    pub fn go_type(self, resource: &str, field_name: &str) -> String {
        match self {
            FieldType::String => "*string".to_string(),
            FieldType::Int64 => "*int64".to_string(),
            FieldType::Bool => "*bool".to_string(),
            FieldType::Array => "[]string".to_string(),
            FieldType::Object => format!("*{resource}_{field_name}"),
        }
    }
}

impl std::str::FromStr for FieldType {
    type Err = crate::error::KccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FieldType::String),
            "int64" => Ok(FieldType::Int64),
            "bool" => Ok(FieldType::Bool),
            "object" => Ok(FieldType::Object),
            "array" => Ok(FieldType::Array),
            _ => Err(crate::error::KccError::UnsupportedFieldType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_from_existence() {
        assert_eq!(
            CompletionState::from_existence([true, true]),
            CompletionState::Completed
        );
        assert_eq!(
            CompletionState::from_existence([true, false]),
            CompletionState::InProgress
        );
        assert_eq!(
            CompletionState::from_existence([false, false]),
            CompletionState::NotStarted
        );
    }

    #[test]
    fn field_type_parse() {
        assert_eq!("int64".parse::<FieldType>().unwrap(), FieldType::Int64);
        assert!("float".parse::<FieldType>().is_err());
        assert_eq!(
            FieldType::Object.go_type("ComputeURLMap", "Tls"),
            "*ComputeURLMap_Tls"
        );
    }
}
