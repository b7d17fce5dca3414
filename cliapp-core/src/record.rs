//! Bound record values.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::kind::{FromValue, Value};
use crate::schema::RecordSchema;

/// A record populated by the binder, one slot per declared field.
///
/// Non-optional fields start at their kind's zero value; optional fields
/// start absent and only become present when a token supplies them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    name: String,
    fields: Vec<(String, Option<Value>)>,
}

impl Record {
    pub(crate) fn empty(schema: &RecordSchema) -> Self {
        let fields = schema
            .fields
            .iter()
            .map(|f| {
                let initial = if f.optional { None } else { f.kind.zero() };
                (f.name.clone(), initial)
            })
            .collect();
        Self {
            name: schema.name.clone(),
            fields,
        }
    }

    pub(crate) fn set(&mut self, index: usize, value: Value) {
        self.fields[index].1 = Some(value);
    }

    /// Name of the schema this record was bound from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn is_present(&self, field: &str) -> bool {
        self.value(field).is_some()
    }

    /// Read a field that must hold a value.
    pub fn get<T: FromValue>(&self, field: &str) -> Result<T> {
        self.get_opt(field)?
            .ok_or_else(|| Error::Access(format!("field {} of {} was not provided", field, self.name)))
    }

    /// Read an optional field; `Ok(None)` when it was not provided.
    pub fn get_opt<T: FromValue>(&self, field: &str) -> Result<Option<T>> {
        if !self.fields.iter().any(|(name, _)| name == field) {
            return Err(Error::Access(format!("{} has no field {}", self.name, field)));
        }
        match self.value(field) {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                Error::Access(format!(
                    "field {} of {} holds {}, not {}",
                    field,
                    self.name,
                    value.kind(),
                    T::KIND
                ))
            }),
        }
    }

    /// True when a flag field was set; absent flags read as false.
    pub fn flag(&self, field: &str) -> bool {
        self.value(field).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

/// Typed structs that can be bound from a record parameter.
///
/// ```
/// use cliapp_core::{FieldSpec, FromRecord, Kind, Record, RecordSchema, Result};
///
/// struct CopyArgs {
///     source: String,
///     force: bool,
/// }
///
/// impl FromRecord for CopyArgs {
///     fn schema() -> RecordSchema {
///         RecordSchema::new("CopyArgs")
///             .field(FieldSpec::new("source", Kind::String).position(0))
///             .field(FieldSpec::new("force", Kind::Bool).short("-f"))
///     }
///
///     fn from_record(record: &Record) -> Result<Self> {
///         Ok(Self {
///             source: record.get("source")?,
///             force: record.flag("force"),
///         })
///     }
/// }
/// ```
pub trait FromRecord: Sized {
    fn schema() -> RecordSchema;

    fn from_record(record: &Record) -> Result<Self>;
}
