use std::collections::HashMap;

pub mod config;
pub mod ledgers;
pub mod snapshot;
pub mod statements;
pub mod system;
pub mod units;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(snapshot::definitions());
    commands.extend(ledgers::definitions());
    commands.extend(units::definitions());
    commands.extend(statements::definitions());
    commands.extend(config::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Positional argument `idx`, or an error naming what is missing.
pub(crate) fn required<'a>(args: &[&'a str], idx: usize, what: &str) -> Result<&'a str, CommandError> {
    args.get(idx)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing {what}")))
}

/// Parses positional argument `idx` with `FromStr`, falling back to the
/// type's default when absent.
pub(crate) fn parse_or_default<T>(args: &[&str], idx: usize) -> Result<T, CommandError>
where
    T: std::str::FromStr + Default,
    CommandError: From<T::Err>,
{
    match args.get(idx) {
        Some(raw) => Ok(raw.parse::<T>()?),
        None => Ok(T::default()),
    }
}

pub(crate) fn reject_extra(args: &[&str], max: usize, usage: &str) -> CommandResult {
    if args.len() > max {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    Ok(())
}
