//! Commands, handlers and the values handed to them.

use std::fmt;
use std::io::Write;

use crate::error::{Error, Result};
use crate::kind::{FromValue, Kind, Value};
use crate::record::{FromRecord, Record};
use crate::schema::RecordSchema;

/// A declared handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A primitive bound from exactly one token
    Value(Kind),
    /// A record bound from positional tokens and options
    Record(RecordSchema),
}

impl Param {
    pub fn is_record(&self) -> bool {
        matches!(self, Param::Record(_))
    }
}

/// Output streams a handler may write to.
pub struct Io<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Io<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    pub fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }
}

type PlainAction = Box<dyn Fn(&Args, &mut Io<'_>)>;
type FallibleAction = Box<dyn Fn(&Args, &mut Io<'_>) -> anyhow::Result<()>>;

enum Action {
    Plain(PlainAction),
    Fallible(FallibleAction),
}

/// Builder for a command registration.
///
/// ```
/// use std::io::Write;
/// use cliapp_core::{Command, Kind};
///
/// let add = Command::new("add")
///     .help("Add two numbers")
///     .arg(Kind::Int)
///     .arg(Kind::Int)
///     .try_action(|args, io| {
///         let sum = args.get::<isize>(0)? + args.get::<isize>(1)?;
///         write!(io.out(), "{}", sum)?;
///         Ok(())
///     });
/// ```
pub struct Command {
    path: String,
    help: Option<String>,
    params: Vec<Param>,
    action: Option<Action>,
}

impl Command {
    /// Start a command registered under `path`; `""` is the root command.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            help: None,
            params: Vec::new(),
            action: None,
        }
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    pub fn arg(mut self, kind: Kind) -> Self {
        self.params.push(Param::Value(kind));
        self
    }

    pub fn record(mut self, schema: RecordSchema) -> Self {
        self.params.push(Param::Record(schema));
        self
    }

    /// Declare a record parameter shaped like `T`.
    pub fn record_of<T: FromRecord>(self) -> Self {
        self.record(T::schema())
    }

    /// Handler that cannot fail.
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args, &mut Io<'_>) + 'static,
    {
        self.action = Some(Action::Plain(Box::new(f)));
        self
    }

    /// Handler whose error becomes the failure of the run.
    pub fn try_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args, &mut Io<'_>) -> anyhow::Result<()> + 'static,
    {
        self.action = Some(Action::Fallible(Box::new(f)));
        self
    }

    /// Finish the registration, failing when no action was given.
    pub(crate) fn into_handler(self) -> Result<(String, Handler)> {
        let action = self.action.ok_or_else(|| {
            Error::InvalidRegistration(format!("command '{}' has no action", self.path))
        })?;
        Ok((
            self.path,
            Handler {
                params: self.params,
                help: self.help,
                action,
            },
        ))
    }
}

/// A registered, immutable handler.
pub struct Handler {
    params: Vec<Param>,
    help: Option<String>,
    action: Action,
}

impl Handler {
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Whether the handler reports failure through its result.
    pub fn expects_error(&self) -> bool {
        matches!(self.action, Action::Fallible(_))
    }

    pub fn uses_record(&self) -> bool {
        self.params.iter().any(Param::is_record)
    }

    pub(crate) fn invoke(&self, args: &Args, io: &mut Io<'_>) -> Result<()> {
        match &self.action {
            Action::Plain(f) => {
                f(args, io);
                Ok(())
            }
            Action::Fallible(f) => f(args, io).map_err(Error::Handler),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("params", &self.params)
            .field("help", &self.help)
            .field("expects_error", &self.expects_error())
            .finish()
    }
}

/// One bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    Record(Record),
}

/// Bound parameters, aligned with the handler's declared parameter list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    values: Vec<Arg>,
}

impl Args {
    pub(crate) fn new(values: Vec<Arg>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.values.iter()
    }

    /// Read primitive parameter `index`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T> {
        match self.values.get(index) {
            Some(Arg::Value(value)) => T::from_value(value).ok_or_else(|| {
                Error::Access(format!("argument {} is {}, not {}", index, value.kind(), T::KIND))
            }),
            Some(Arg::Record(record)) => Err(Error::Access(format!(
                "argument {} is the record {}",
                index,
                record.name()
            ))),
            None => Err(Error::Access(format!("no argument at index {}", index))),
        }
    }

    /// Borrow record parameter `index`.
    pub fn record(&self, index: usize) -> Result<&Record> {
        match self.values.get(index) {
            Some(Arg::Record(record)) => Ok(record),
            Some(Arg::Value(_)) => Err(Error::Access(format!("argument {} is not a record", index))),
            None => Err(Error::Access(format!("no argument at index {}", index))),
        }
    }

    /// Convert record parameter `index` into `T`.
    pub fn bind<T: FromRecord>(&self, index: usize) -> Result<T> {
        T::from_record(self.record(index)?)
    }
}
