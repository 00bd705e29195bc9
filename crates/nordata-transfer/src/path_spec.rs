use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TransferError, TransferResult};

/// A source or destination argument: one path, or an ordered list of paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSpec {
    Single(String),
    Many(Vec<String>),
}

/// The kind of a loosely typed argument, before element checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    Single,
    Many,
}

impl Shape {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Shape::Single => "single path",
            Shape::Many => "list of paths",
        }
    }

    /// Rule 1: only strings and arrays are accepted.
    pub(crate) fn of(value: &Value, role: &str) -> TransferResult<Self> {
        match value {
            Value::String(_) => Ok(Shape::Single),
            Value::Array(_) => Ok(Shape::Many),
            other => Err(TransferError::InvalidArgumentType(format!(
                "{role} must be a string or a list of strings, got {}",
                json_type(other)
            ))),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl PathSpec {
    /// A single path.
    pub fn single(path: impl Into<String>) -> Self {
        Self::Single(path.into())
    }

    /// An ordered list of paths.
    pub fn many<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(paths.into_iter().map(Into::into).collect())
    }

    /// Convert a loosely typed argument.
    ///
    /// Accepts a JSON string or an array of strings; anything else, including
    /// an array holding a non-string, is [`TransferError::InvalidArgumentType`].
    pub fn from_value(value: &Value) -> TransferResult<Self> {
        Self::from_value_as(value, "path")
    }

    pub(crate) fn from_value_as(value: &Value, role: &str) -> TransferResult<Self> {
        match (Shape::of(value, role)?, value) {
            (Shape::Single, Value::String(s)) => Ok(Self::Single(s.clone())),
            (Shape::Many, Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(TransferError::InvalidArgumentType(format!(
                        "if {role} is a list it must contain only strings, found {}",
                        json_type(other)
                    ))),
                })
                .collect::<TransferResult<Vec<_>>>()
                .map(Self::Many),
            _ => Err(TransferError::InvalidArgumentType(format!(
                "{role} must be a string or a list of strings"
            ))),
        }
    }

    pub(crate) fn shape(&self) -> Shape {
        match self {
            Self::Single(_) => Shape::Single,
            Self::Many(_) => Shape::Many,
        }
    }

    /// Human-readable kind, for messages.
    pub fn kind(&self) -> &'static str {
        self.shape().describe()
    }

    /// The paths as a slice (one element for `Single`).
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Single(path) => std::slice::from_ref(path),
            Self::Many(paths) => paths,
        }
    }

    /// Returns `true` for the list form.
    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        Self::Single(path.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        Self::Single(path)
    }
}

impl From<Vec<String>> for PathSpec {
    fn from(paths: Vec<String>) -> Self {
        Self::Many(paths)
    }
}

impl From<Vec<&str>> for PathSpec {
    fn from(paths: Vec<&str>) -> Self {
        Self::many(paths)
    }
}
