use cashbook_domain::Snapshot;

use super::{reject_extra, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandDefinition::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, "help [command]")?;
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(command) => {
                output::section(command.name);
                output::info(format!("  {}", command.description));
                output::info(format!("  Usage: {}", command.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Commands");
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Usage"),
        TableColumn::left("Description"),
    ]);
    for command in context.registry.iter() {
        table.push_row(vec![
            command.name.to_string(),
            command.usage.to_string(),
            command.description.to_string(),
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("cashbook {}", meta.summary()));
    output::field("Snapshot schema", format!("v{}", Snapshot::schema_version_default()), 15);
    output::field("Built at", meta.timestamp, 15);
    output::field("Target", meta.target, 15);
    output::field("Profile", meta.profile, 15);
    output::field("Rustc", meta.rustc, 15);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
