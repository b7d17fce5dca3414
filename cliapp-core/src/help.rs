//! Help views derived from registered handlers.
//!
//! The views are built from the same schemas the binder uses, so the
//! positions and option names shown always match what binding accepts.

use cliapp_render_core::{
    ArgumentHelp, CommandBody, CommandHelp, CommandSummary, GlobalHelp, HelpView, OptionHelp,
    SubcommandHelp,
};

use crate::command::{Handler, Param};
use crate::registry::Registry;

/// Help listing every registered command.
pub fn global_help(registry: &Registry) -> HelpView {
    HelpView::Global(GlobalHelp {
        commands: registry
            .commands()
            .map(|(name, handler)| CommandSummary {
                name: name.to_string(),
                help: handler.help().map(str::to_string),
            })
            .collect(),
    })
}

/// Help for one handler. `subcommands` is supplied when describing the root
/// handler.
pub fn command_help(name: &str, handler: &Handler, subcommands: Option<&Registry>) -> HelpView {
    let body = if !handler.params().is_empty() && !handler.uses_record() {
        CommandBody::Positional {
            arguments: handler
                .params()
                .iter()
                .enumerate()
                .map(|(index, param)| ArgumentHelp {
                    index,
                    name: format!("arg{}", index),
                    type_label: match param {
                        Param::Value(kind) => Some(kind.label()),
                        Param::Record(_) => None,
                    },
                })
                .collect(),
        }
    } else {
        record_body(handler, subcommands)
    };

    HelpView::Command(CommandHelp {
        name: name.to_string(),
        description: handler.help().map(str::to_string),
        body,
    })
}

fn record_body(handler: &Handler, subcommands: Option<&Registry>) -> CommandBody {
    let schemas: Vec<_> = handler
        .params()
        .iter()
        .filter_map(|p| match p {
            Param::Record(schema) => Some(schema),
            Param::Value(_) => None,
        })
        .collect();

    // Later records overwrite earlier ones at the same position
    let mut names = std::collections::BTreeMap::new();
    for schema in &schemas {
        for field in &schema.fields {
            if let Some(pos) = field.position {
                names.insert(pos, field.display_name());
            }
        }
    }
    let arguments = match names.keys().next_back() {
        Some(&max) => (0..=max)
            .map(|index| ArgumentHelp {
                index,
                name: names
                    .get(&index)
                    .cloned()
                    .unwrap_or_else(|| format!("arg{}", index)),
                type_label: None,
            })
            .collect(),
        None => Vec::new(),
    };

    let options = schemas
        .iter()
        .flat_map(|schema| schema.options())
        .map(|field| OptionHelp {
            long: field.long_name(),
            short: field.short.clone(),
            type_label: (!field.is_flag()).then(|| field.kind.label()),
            description: field.help.clone().unwrap_or_default(),
        })
        .collect();

    CommandBody::Record {
        arguments,
        options,
        subcommands: subcommands.map(|registry| {
            registry
                .commands()
                .map(|(name, h)| SubcommandHelp {
                    name: name.to_string(),
                    arity: h.params().len(),
                })
                .collect()
        }),
    }
}
