//! Binding a handler's whole parameter list.
//!
//! When any parameter is a record the list is bound in record mode: values
//! take one token each from a shared cursor and a record takes whatever the
//! binder consumes. Otherwise every token is positional and the counts must
//! match exactly.

use tracing::{debug, trace};

use super::binder::bind;
use crate::command::{Arg, Args, Param};
use crate::error::{Error, Result};
use crate::kind::coerce;

/// Binds post-command tokens onto a declared parameter list.
pub struct ArgsProcessor<'a> {
    /// Command name used in error messages
    command: &'a str,
    params: &'a [Param],
}

impl<'a> ArgsProcessor<'a> {
    pub fn new(command: &'a str, params: &'a [Param]) -> Self {
        Self { command, params }
    }

    /// Bind `tokens`, choosing record or positional mode from the parameters.
    pub fn process_args(&self, tokens: &[String]) -> Result<Args> {
        if self.params.iter().any(Param::is_record) {
            debug!(command = %self.command, "binding in record mode");
            self.process_record_mode(tokens)
        } else {
            debug!(command = %self.command, "binding in positional mode");
            self.process_positional_mode(tokens)
        }
    }

    fn process_record_mode(&self, tokens: &[String]) -> Result<Args> {
        let mut values = Vec::with_capacity(self.params.len());
        let mut cursor = 0;

        for (index, param) in self.params.iter().enumerate() {
            match param {
                Param::Record(schema) => {
                    let (record, used) = bind(&tokens[cursor..], schema)?;
                    trace!(record = %schema.name, used, "record bound");
                    values.push(Arg::Record(record));
                    cursor += used;
                }
                Param::Value(kind) => {
                    let token = tokens.get(cursor).ok_or_else(|| {
                        Error::InsufficientArgs(format!(
                            "{} wants {} arguments, got {}",
                            self.command,
                            self.params.len(),
                            tokens.len()
                        ))
                    })?;
                    trace!(index, token = %token, "argument bound");
                    values.push(Arg::Value(coerce(token, kind)?));
                    cursor += 1;
                }
            }
        }

        if cursor < tokens.len() {
            debug!(command = %self.command, ignored = tokens.len() - cursor, "ignoring trailing tokens");
        }

        Ok(Args::new(values))
    }

    fn process_positional_mode(&self, tokens: &[String]) -> Result<Args> {
        if let Some(option) = tokens.iter().find(|t| t.starts_with("--")) {
            return Err(Error::UnknownOption(option.clone()));
        }

        if tokens.len() != self.params.len() {
            return Err(Error::ArgCountMismatch {
                command: self.command.to_string(),
                expected: self.params.len(),
                actual: tokens.len(),
            });
        }

        let values = self
            .params
            .iter()
            .zip(tokens)
            .map(|(param, token)| match param {
                Param::Value(kind) => coerce(token, kind).map(Arg::Value),
                Param::Record(schema) => Err(Error::InvalidRegistration(format!(
                    "record {} in positional mode",
                    schema.name
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Args::new(values))
    }
}
