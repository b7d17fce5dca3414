use ansi_term::Colour::{Cyan, Yellow};
use ansi_term::Style;
use anyhow::Result;
use cliapp_render_core::{
    CommandBody, CommandHelp, GlobalHelp, HelpView, OptionHelp, Renderer, HELP_OPTION,
    HELP_OPTION_DESCRIPTION,
};

/// Lays help out as terminal text, optionally with ANSI styling.
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self { color: false }
    }

    pub fn colored(color: bool) -> Self {
        Self { color }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(Yellow.bold(), text)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn render_common_options(&self, output: &mut String) {
        output.push_str(&format!("{}\n", self.heading("Options:")));
        output.push_str(&format!("  {:<24}{}\n", HELP_OPTION, HELP_OPTION_DESCRIPTION));
    }

    fn render_global(&self, help: &GlobalHelp) -> String {
        let mut output = format!("{} [options...]\n\n", self.heading("Usage:"));

        output.push_str(&format!("{}\n", self.heading("Commands:")));
        let width = help.commands.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
        for command in &help.commands {
            match &command.help {
                Some(text) if !text.is_empty() => {
                    let padded = format!("{:<width$}", command.name, width = width);
                    output.push_str(&format!("  {}  {}\n", self.paint(Cyan.normal(), &padded), text));
                }
                _ => output.push_str(&format!("  {}\n", self.paint(Cyan.normal(), &command.name))),
            }
        }
        output.push('\n');

        self.render_common_options(&mut output);
        output
    }

    fn render_command(&self, help: &CommandHelp) -> String {
        let mut output = String::new();
        if let Some(desc) = help.description.as_deref().filter(|d| !d.is_empty()) {
            output.push_str(&format!("{}\n\n", desc));
        }

        let name = self.paint(Cyan.normal(), &help.name);
        match &help.body {
            CommandBody::Positional { arguments } => {
                output.push_str(&format!("{} {} <args...>\n\n", self.heading("Usage:"), name));
                output.push_str(&format!("{}\n", self.heading("Arguments:")));
                for arg in arguments {
                    let label = arg.type_label.as_deref().unwrap_or("<value>");
                    output.push_str(&format!("  [{}] {} {}\n", arg.index, arg.name, label));
                }
                output.push('\n');
                self.render_common_options(&mut output);
            }
            CommandBody::Record { arguments, options, subcommands } => {
                if arguments.is_empty() {
                    output.push_str(&format!("{} {} [options...]\n\n", self.heading("Usage:"), name));
                } else {
                    output.push_str(&format!(
                        "{} {} <args...> [options...]\n\n",
                        self.heading("Usage:"),
                        name
                    ));
                    output.push_str(&format!("{}\n", self.heading("Arguments:")));
                    for arg in arguments {
                        output.push_str(&format!("  [{}] {}\n", arg.index, arg.name));
                    }
                    output.push('\n');
                }

                if let Some(subcommands) = subcommands {
                    output.push_str(&format!("{}\n", self.heading("Commands:")));
                    for sub in subcommands {
                        output.push_str(&format!(
                            "  {} (args: {})\n",
                            self.paint(Cyan.normal(), &sub.name),
                            sub.arity
                        ));
                    }
                    output.push('\n');
                }

                self.render_common_options(&mut output);
                for option in options {
                    output.push_str(&self.render_option(option));
                }
            }
        }
        output
    }

    fn render_option(&self, option: &OptionHelp) -> String {
        let mut names = match &option.short {
            Some(short) => format!("{}|{}", short, option.long),
            None => option.long.clone(),
        };
        if let Some(label) = &option.type_label {
            names.push(' ');
            names.push_str(label);
        }
        if option.description.is_empty() {
            format!("  {}\n", names)
        } else {
            format!("  {}    {}\n", names, self.paint(Style::new().dimmed(), &option.description))
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn render_help(&self, view: &HelpView) -> Result<String> {
        Ok(match view {
            HelpView::Global(help) => self.render_global(help),
            HelpView::Command(help) => self.render_command(help),
        })
    }
}

/// Emits the help view as pretty-printed JSON for tooling.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_help(&self, view: &HelpView) -> Result<String> {
        let mut json = serde_json::to_string_pretty(view)?;
        json.push('\n');
        Ok(json)
    }
}
