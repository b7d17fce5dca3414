use std::io::Write;

use anyhow::bail;
use cliapp_core::{App, Command, FieldSpec, FromRecord, Kind, Record, RecordSchema, Result};

pub struct CreateTextArgs {
    pub input: String,
    pub output: String,
    pub use_markdown: bool,
}

impl FromRecord for CreateTextArgs {
    fn schema() -> RecordSchema {
        RecordSchema::new("CreateTextArgs")
            .field(FieldSpec::new("Input", Kind::String).position(0).help("input file"))
            .field(
                FieldSpec::new("Output", Kind::String)
                    .long("--out")
                    .short("-o")
                    .help("Output path"),
            )
            .field(
                FieldSpec::new("UseMarkdown", Kind::Bool)
                    .long("--usemarkdown")
                    .help("Render as markdown"),
            )
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            input: record.get("Input")?,
            output: record.get("Output")?,
            use_markdown: record.flag("UseMarkdown"),
        })
    }
}

pub struct CopyArgs {
    pub source: String,
    pub dest: String,
    pub force: bool,
    pub mode: Option<i64>,
}

impl FromRecord for CopyArgs {
    fn schema() -> RecordSchema {
        RecordSchema::new("CopyArgs")
            .field(FieldSpec::new("Source", Kind::String).position(0))
            .field(FieldSpec::new("Dest", Kind::String).position(1))
            .field(FieldSpec::new("Force", Kind::Bool).short("-f").help("Overwrite the destination"))
            .field(FieldSpec::new("Mode", Kind::Int64).optional().help("Permission bits"))
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            source: record.get("Source")?,
            dest: record.get("Dest")?,
            force: record.flag("Force"),
            mode: record.get_opt("Mode")?,
        })
    }
}

pub fn register(app: &mut App) -> Result<()> {
    app.add(
        Command::new("add")
            .help("Add two integers")
            .arg(Kind::Int)
            .arg(Kind::Int)
            .try_action(|args, io| {
                writeln!(io.out(), "{}", args.get::<isize>(0)? + args.get::<isize>(1)?)?;
                Ok(())
            }),
    )?;

    app.add(
        Command::new("div")
            .help("Divide two numbers")
            .arg(Kind::Float64)
            .arg(Kind::Float64)
            .try_action(|args, io| {
                let divisor = args.get::<f64>(1)?;
                if divisor == 0.0 {
                    bail!("division by zero");
                }
                writeln!(io.out(), "{}", args.get::<f64>(0)? / divisor)?;
                Ok(())
            }),
    )?;

    app.add(Command::new("echo").help("Print a word").arg(Kind::String).try_action(|args, io| {
        writeln!(io.out(), "{}", args.get::<String>(0)?)?;
        Ok(())
    }))?;

    app.add(
        Command::new("create")
            .help("Describe a text file conversion")
            .record_of::<CreateTextArgs>()
            .try_action(|args, io| {
                let create = args.bind::<CreateTextArgs>(0)?;
                let output = if create.output.is_empty() { "-" } else { create.output.as_str() };
                let format = if create.use_markdown { "markdown" } else { "text" };
                writeln!(io.out(), "{} -> {} ({})", create.input, output, format)?;
                Ok(())
            }),
    )?;

    app.add(
        Command::new("file copy")
            .help("Describe a file copy")
            .record_of::<CopyArgs>()
            .try_action(|args, io| {
                let copy = args.bind::<CopyArgs>(0)?;
                write!(io.out(), "copy {} -> {}", copy.source, copy.dest)?;
                if copy.force {
                    write!(io.out(), " force")?;
                }
                if let Some(mode) = copy.mode {
                    write!(io.out(), " mode={}", mode)?;
                }
                writeln!(io.out())?;
                Ok(())
            }),
    )?;

    Ok(())
}
