//! Primitive kinds and the coercion of raw tokens into them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Semantic type of a handler parameter or record field.
///
/// Kinds are named the way they appear in schema files (`"string"`, `"int"`,
/// `"int64"`, `"float64"`, `"bool"`). Any other name is kept as
/// [`Kind::Other`] and fails coercion with [`Error::UnsupportedType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    String,
    Int,
    Int64,
    Float64,
    Bool,
    Other(String),
}

impl Kind {
    pub fn name(&self) -> &str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Float64 => "float64",
            Kind::Bool => "bool",
            Kind::Other(name) => name,
        }
    }

    /// Label used in help output, e.g. `<int64>`.
    pub fn label(&self) -> String {
        match self {
            Kind::Other(_) => "<value>".to_string(),
            known => format!("<{}>", known.name()),
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Kind::Bool)
    }

    /// Value a non-optional field holds before anything is bound to it.
    pub fn zero(&self) -> Option<Value> {
        match self {
            Kind::String => Some(Value::String(String::new())),
            Kind::Int => Some(Value::Int(0)),
            Kind::Int64 => Some(Value::Int64(0)),
            Kind::Float64 => Some(Value::Float64(0.0)),
            Kind::Bool => Some(Value::Bool(false)),
            Kind::Other(_) => None,
        }
    }
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        match name {
            "string" => Kind::String,
            "int" => Kind::Int,
            "int64" => Kind::Int64,
            "float64" => Kind::Float64,
            "bool" => Kind::Bool,
            other => Kind::Other(other.to_string()),
        }
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::from(name.as_str())
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(isize),
    Int64(i64),
    Float64(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Int64(_) => Kind::Int64,
            Value::Float64(_) => Kind::Float64,
            Value::Bool(_) => Kind::Bool,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Float64(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Rust types a bound [`Value`] can be read back as.
pub trait FromValue: Sized {
    const KIND: Kind;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const KIND: Kind = Kind::String;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for isize {
    const KIND: Kind = Kind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const KIND: Kind = Kind::Int64;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const KIND: Kind = Kind::Float64;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Convert a single token into a value of `kind`.
pub fn coerce(token: &str, kind: &Kind) -> Result<Value> {
    let malformed = |reason: String| Error::MalformedValue {
        token: token.to_string(),
        kind: kind.clone(),
        reason,
    };

    match kind {
        Kind::String => Ok(Value::String(token.to_string())),
        Kind::Int => token
            .parse::<isize>()
            .map(Value::Int)
            .map_err(|e| malformed(e.to_string())),
        Kind::Int64 => token
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| malformed(e.to_string())),
        Kind::Float64 => token
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| malformed(e.to_string())),
        Kind::Bool => parse_bool(token)
            .map(Value::Bool)
            .ok_or_else(|| malformed("expected one of 1, t, true, 0, f, false".to_string())),
        Kind::Other(name) => Err(Error::UnsupportedType(name.clone())),
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    match token {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn string_is_identity() {
        assert_eq!(coerce("hello world", &Kind::String).unwrap(), Value::String("hello world".into()));
    }

    #[test]
    fn bool_accepts_canonical_spellings() {
        for token in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(coerce(token, &Kind::Bool).unwrap(), Value::Bool(true), "{token}");
        }
        for token in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(coerce(token, &Kind::Bool).unwrap(), Value::Bool(false), "{token}");
        }
    }

    #[test]
    fn bool_rejects_yes() {
        let err = coerce("yes", &Kind::Bool).unwrap_err();
        assert!(matches!(err, Error::MalformedValue { ref token, kind: Kind::Bool, .. } if token == "yes"));
    }

    #[test]
    fn malformed_int_carries_token_and_kind() {
        match coerce("12abc", &Kind::Int).unwrap_err() {
            Error::MalformedValue { token, kind, .. } => {
                assert_eq!(token, "12abc");
                assert_eq!(kind, Kind::Int);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn int64_overflow_is_malformed() {
        let err = coerce("9223372036854775808", &Kind::Int64).unwrap_err();
        assert!(matches!(err, Error::MalformedValue { .. }));
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let kind = Kind::from("uint8");
        let err = coerce("3", &kind).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(ref name) if name == "uint8"));
        assert_eq!(kind.label(), "<value>");
    }

    #[test]
    fn kind_names_round_trip_through_serde() {
        let kinds: Vec<Kind> = serde_json::from_str(r#"["string","int","int64","float64","bool","duration"]"#).unwrap();
        assert_eq!(kinds[1], Kind::Int);
        assert_eq!(kinds[5], Kind::Other("duration".into()));
        assert_eq!(serde_json::to_string(&Kind::Float64).unwrap(), r#""float64""#);
    }

    proptest! {
        #[test]
        fn int_round_trips(v in any::<isize>()) {
            prop_assert_eq!(coerce(&v.to_string(), &Kind::Int).unwrap(), Value::Int(v));
        }

        #[test]
        fn int64_round_trips(v in any::<i64>()) {
            prop_assert_eq!(coerce(&v.to_string(), &Kind::Int64).unwrap(), Value::Int64(v));
        }

        #[test]
        fn float64_round_trips(v in -1.0e12f64..1.0e12f64) {
            prop_assert_eq!(coerce(&v.to_string(), &Kind::Float64).unwrap(), Value::Float64(v));
        }

        #[test]
        fn bool_round_trips(v in any::<bool>()) {
            prop_assert_eq!(coerce(&v.to_string(), &Kind::Bool).unwrap(), Value::Bool(v));
        }
    }
}
