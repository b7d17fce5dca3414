use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Fixed line advertising the help triggers, shared by every help shape.
pub const HELP_OPTION: &str = "-h|--help";
pub const HELP_OPTION_DESCRIPTION: &str = "Show this help";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum HelpFormat {
    #[serde(rename = "text")]
    #[default]
    Text,
    #[serde(rename = "json")]
    Json,
}

/// Everything a renderer needs to lay out one help screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HelpView {
    #[serde(rename = "global")]
    Global(GlobalHelp),
    #[serde(rename = "command")]
    Command(CommandHelp),
}

/// Help shown when no command (and no root handler) applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalHelp {
    pub commands: Vec<CommandSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSummary {
    pub name: String,
    #[serde(default)]
    pub help: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandHelp {
    /// Name printed on the usage line
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub body: CommandBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum CommandBody {
    /// Handler taking only primitive parameters, each bound by position
    #[serde(rename = "positional")]
    Positional { arguments: Vec<ArgumentHelp> },
    /// Handler taking a record (or nothing at all)
    #[serde(rename = "record")]
    Record {
        arguments: Vec<ArgumentHelp>,
        options: Vec<OptionHelp>,
        #[serde(default)]
        subcommands: Option<Vec<SubcommandHelp>>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentHelp {
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub type_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionHelp {
    pub long: String,
    #[serde(default)]
    pub short: Option<String>,
    /// Absent for flags, which take no value
    #[serde(default)]
    pub type_label: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcommandHelp {
    pub name: String,
    pub arity: usize,
}

impl CommandBody {
    pub fn has_arguments(&self) -> bool {
        match self {
            CommandBody::Positional { arguments } => !arguments.is_empty(),
            CommandBody::Record { arguments, .. } => !arguments.is_empty(),
        }
    }
}

pub trait Renderer {
    fn render_help(&self, view: &HelpView) -> Result<String>;
}
