//! Command matching and argument binding for small command-line apps.
//!
//! Commands are registered with a declared parameter list; [`App::run`]
//! resolves the longest matching command path, binds the remaining tokens to
//! the parameters (primitives by position, records by position and named
//! option) and invokes the handler. Help text is derived from the same
//! declarations.

mod app;
pub mod args_processor;
mod command;
mod error;
pub mod help;
mod kind;
mod options;
mod record;
pub mod registry;
pub mod schema;
mod sink;

pub use app::App;
pub use command::{Arg, Args, Command, Handler, Io, Param};
pub use error::{Error, Result};
pub use kind::{coerce, FromValue, Kind, Value};
pub use options::Options;
pub use record::{FromRecord, Record};
pub use schema::{FieldSpec, FieldTable, RecordSchema};
pub use sink::{MemorySink, Sink};

pub use cliapp_render_core::HelpFormat;
