//! The command-line application runtime.

use cliapp_render_cli::{JsonRenderer, TextRenderer};
use cliapp_render_core::{HelpFormat, HelpView, Renderer};
use tracing::{debug, warn};

use crate::args_processor::ArgsProcessor;
use crate::command::{Command, Io, Param};
use crate::error::{Error, Result};
use crate::help::{command_help, global_help};
use crate::options::Options;
use crate::registry::Registry;
use crate::sink::Sink;

const HELP_TRIGGERS: [&str; 2] = ["-h", "--help"];

fn is_help(token: &str) -> bool {
    HELP_TRIGGERS.contains(&token)
}

/// Registers commands and runs them against token sequences.
///
/// ```
/// use std::io::Write;
/// use cliapp_core::{App, Command, Kind, MemorySink, Options};
///
/// let out = MemorySink::new();
/// let mut app = App::with_sinks(Options::default(), out.clone(), MemorySink::new());
/// app.add(Command::new("greet").arg(Kind::String).try_action(|args, io| {
///     write!(io.out(), "hello {}", args.get::<String>(0)?)?;
///     Ok(())
/// }))?;
///
/// app.run(["greet", "ada"])?;
/// assert_eq!(out.contents(), "hello ada");
/// # Ok::<(), cliapp_core::Error>(())
/// ```
pub struct App {
    registry: Registry,
    options: Options,
    out: Sink,
    err: Sink,
    renderer: Box<dyn Renderer>,
    exit: Box<dyn FnMut(i32)>,
}

impl App {
    /// App writing to the process's stdout and stderr.
    pub fn new(options: Options) -> Self {
        Self::with_sinks(options, Sink::stdout(), Sink::stderr())
    }

    pub fn with_sinks(options: Options, out: impl Into<Sink>, err: impl Into<Sink>) -> Self {
        let renderer: Box<dyn Renderer> = match options.help_format {
            HelpFormat::Text => Box::new(TextRenderer::colored(options.color)),
            HelpFormat::Json => Box::new(JsonRenderer),
        };
        Self {
            registry: Registry::new(),
            options,
            out: out.into(),
            err: err.into(),
            renderer,
            exit: Box::new(|code| std::process::exit(code)),
        }
    }

    /// Replace the hook called with status 1 when `exit_on_failure` is set.
    pub fn on_exit(mut self, hook: impl FnMut(i32) + 'static) -> Self {
        self.exit = Box::new(hook);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a command. An empty path registers the root command.
    pub fn add(&mut self, command: Command) -> Result<()> {
        let (path, handler) = command.into_handler()?;

        for param in handler.params() {
            if let Param::Record(schema) = param {
                let gaps = schema.positional_gaps();
                if !gaps.is_empty() {
                    warn!(command = %path, record = %schema.name, ?gaps, "record leaves positional gaps");
                }
            }
        }

        self.registry.insert(&path, handler);
        Ok(())
    }

    /// Resolve, bind and invoke the command named by `tokens`.
    ///
    /// `tokens` excludes the program name. Help requests write to the normal
    /// sink and succeed.
    pub fn run<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        match self.dispatch(&tokens) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.handle_error(err)),
        }
    }

    fn dispatch(&mut self, tokens: &[String]) -> Result<()> {
        let Self {
            registry,
            options,
            out,
            err,
            renderer,
            ..
        } = self;

        let first = tokens.first().map(String::as_str);
        if first.map_or(true, |t| is_help(t) || t == "help") {
            let view = match registry.root() {
                Some(root) => command_help(&options.program_name, root, Some(&*registry)),
                None => global_help(registry),
            };
            return write_help(&**renderer, out, &view);
        }

        let resolved = registry.resolve(tokens)?;
        let rest = &tokens[resolved.consumed..];
        let name = resolved.name.unwrap_or(&options.program_name);

        if rest.first().is_some_and(|t| is_help(t)) {
            let subcommands = resolved.is_root().then_some(&*registry);
            let view = command_help(name, resolved.handler, subcommands);
            return write_help(&**renderer, out, &view);
        }

        let args = ArgsProcessor::new(name, resolved.handler.params()).process_args(rest)?;
        debug!(command = %name, bound = args.len(), "invoking handler");
        let mut io = Io::new(out.writer(), err.writer());
        resolved.handler.invoke(&args, &mut io)
    }

    fn handle_error(&mut self, err: Error) -> Error {
        if self.options.exit_on_failure {
            if let Err(write_err) = self.err.write_line(&err.to_string()) {
                warn!(error = %write_err, "failed to report error");
            }
            (self.exit)(1);
        }
        err
    }
}

/// Stdout/stderr app that reports failures and exits with status 1.
impl Default for App {
    fn default() -> Self {
        Self::new(Options::default().exit_on_failure(true))
    }
}

fn write_help(renderer: &dyn Renderer, out: &mut Sink, view: &HelpView) -> Result<()> {
    let text = renderer.render_help(view).map_err(Error::Render)?;
    out.write(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use crate::sink::MemorySink;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    fn app() -> (App, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        (App::with_sinks(Options::default(), out.clone(), err.clone()), out, err)
    }

    #[test]
    fn command_without_action_is_rejected() {
        let (mut app, _, _) = app();
        let err = app.add(Command::new("noop")).unwrap_err();
        assert!(matches!(err, Error::InvalidRegistration(_)));
    }

    #[test]
    fn exit_hook_receives_status_and_error_is_reported() {
        let code = Rc::new(RefCell::new(None));
        let seen = code.clone();
        let out = MemorySink::new();
        let err = MemorySink::new();
        let mut app = App::with_sinks(Options::default().exit_on_failure(true), out.clone(), err.clone())
            .on_exit(move |c| *seen.borrow_mut() = Some(c));

        let result = app.run(["nope"]);
        assert!(matches!(result, Err(Error::UnknownCommand(_))));
        assert_eq!(*code.borrow(), Some(1));
        assert_eq!(err.contents(), "unknown command: nope\n");
        assert_eq!(out.contents(), "");
    }

    #[test]
    fn errors_are_returned_without_exit_when_disabled() {
        let (mut app, _, err) = app();
        app.add(Command::new("echo").arg(Kind::String).action(|_, _| {})).unwrap();
        assert!(app.run(["echo"]).is_err());
        assert_eq!(err.contents(), "");
    }

    #[test]
    fn handler_writes_through_io() {
        let (mut app, out, err) = app();
        app.add(Command::new("both").action(|_, io| {
            let _ = write!(io.out(), "to out");
            let _ = write!(io.err(), "to err");
        }))
        .unwrap();
        app.run(["both"]).unwrap();
        assert_eq!(out.contents(), "to out");
        assert_eq!(err.contents(), "to err");
    }

    struct NamesOnly;

    impl Renderer for NamesOnly {
        fn render_help(&self, view: &HelpView) -> anyhow::Result<String> {
            Ok(match view {
                HelpView::Global(help) => {
                    help.commands.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(",")
                }
                HelpView::Command(help) => help.name.clone(),
            })
        }
    }

    #[test]
    fn custom_renderer_receives_help_views() {
        let out = MemorySink::new();
        let mut app = App::with_sinks(Options::default().program_name("tool"), out.clone(), MemorySink::new())
            .with_renderer(NamesOnly);
        app.add(Command::new("add").arg(Kind::Int).action(|_, _| {})).unwrap();
        app.add(Command::new("file copy").action(|_, _| {})).unwrap();

        assert_eq!(app.options().program_name, "tool");
        let names: Vec<&str> = app.registry().commands().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["add", "file copy"]);

        app.run(["help"]).unwrap();
        assert_eq!(out.contents(), "add,file copy");
        out.clear();
        app.run(["file", "copy", "-h"]).unwrap();
        assert_eq!(out.contents(), "file copy");
    }

    #[test]
    fn default_app_exits_on_failure() {
        let app = App::default();
        assert!(app.options().exit_on_failure);
        assert!(app.registry().root().is_none());
    }

    #[test]
    fn json_help_format() {
        let out = MemorySink::new();
        let options = Options {
            help_format: HelpFormat::Json,
            ..Options::default()
        };
        let mut app = App::with_sinks(options, out.clone(), MemorySink::new());
        app.add(Command::new("add").arg(Kind::Int).action(|_, _| {})).unwrap();
        app.run(["add", "--help"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(value["name"], "add");
        assert_eq!(value["arguments"][0]["type_label"], "<int>");
    }
}
