mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cliapp_core::{App, Options};
use tracing::debug;

/// Demo front end: global flags first, everything else goes to the engine.
#[derive(Parser, Debug)]
#[command(about = "Small file and arithmetic toolbox", disable_help_flag = true)]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Disable colored help output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Options file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command path and its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default()
            .exit_on_failure(true)
            .program_name("cliapp"),
    };
    if cli.no_color {
        options.color = false;
    }
    debug!(?options, "starting");

    let mut app = App::new(options);
    commands::register(&mut app)?;
    app.run(cli.args)?;

    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        "cliapp=debug,cliapp_core=debug"
    } else {
        "cliapp=info,cliapp_core=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
