//! Binding tokens into a record.
//!
//! Positional fields are filled first, in ascending index order, then the
//! remaining tokens are scanned for long options, short options and flags
//! until the first token that is none of those.

use std::collections::HashMap;

use tracing::trace;

use crate::error::{Error, Result};
use crate::kind::{coerce, Value};
use crate::record::Record;
use crate::schema::RecordSchema;

/// Bind `tokens` into a fresh record of `schema`.
///
/// Returns the record and how many tokens it consumed. Tokens after the
/// first non-option token are left for the caller.
pub fn bind(tokens: &[String], schema: &RecordSchema) -> Result<(Record, usize)> {
    let table = schema.extract();
    let mut record = Record::empty(schema);
    let mut cursor = 0;

    if let Some(max) = schema.max_position() {
        for position in 0..=max {
            let Some(&field) = table.positional.get(&position) else {
                continue;
            };
            let token = tokens.get(cursor).ok_or_else(|| {
                Error::InsufficientArgs(format!(
                    "{} needs a value for position {} ({})",
                    schema.name, position, schema.fields[field].name
                ))
            })?;
            set_field(&mut record, schema, field, token)?;
            cursor += 1;
        }
    }

    while cursor < tokens.len() {
        let token = &tokens[cursor];

        if let Some(stripped) = token.strip_prefix("--") {
            if let Some((name, value)) = stripped.split_once('=') {
                let name = format!("--{}", name);
                let field = *table
                    .long
                    .get(&name)
                    .ok_or_else(|| Error::UnknownOption(name.clone()))?;
                set_field(&mut record, schema, field, value)?;
                cursor += 1;
                continue;
            }
            cursor = bind_option(tokens, cursor, &table.long, schema, &mut record)?;
            continue;
        }

        if token.starts_with('-') && token.len() >= 2 {
            cursor = bind_option(tokens, cursor, &table.short, schema, &mut record)?;
            continue;
        }

        break;
    }

    Ok((record, cursor))
}

/// Handle `--name [value]` or `-n [value]` at `cursor`, returning the next
/// cursor position.
fn bind_option(
    tokens: &[String],
    cursor: usize,
    names: &HashMap<String, usize>,
    schema: &RecordSchema,
    record: &mut Record,
) -> Result<usize> {
    let token = &tokens[cursor];
    let field = *names
        .get(token)
        .ok_or_else(|| Error::UnknownOption(token.clone()))?;

    if schema.fields[field].is_flag() {
        trace!(option = %token, "flag set");
        record.set(field, Value::Bool(true));
        return Ok(cursor + 1);
    }

    let value = tokens
        .get(cursor + 1)
        .ok_or_else(|| Error::MissingOptionValue(token.clone()))?;
    set_field(record, schema, field, value)?;
    Ok(cursor + 2)
}

fn set_field(record: &mut Record, schema: &RecordSchema, field: usize, token: &str) -> Result<()> {
    let spec = &schema.fields[field];
    let value = coerce(token, &spec.kind)?;
    trace!(record = %schema.name, field = %spec.name, value = %value, "bound");
    record.set(field, value);
    Ok(())
}
