//! Shell context, command dispatch and error reporting.

use std::{
    io,
    path::{Path, PathBuf},
};

use cashbook_config::{resolve_home, Config, ConfigError, ConfigManager};
use cashbook_core::{snapshot_warnings, Clock, CoreError, SnapshotSource, StatisticsService};
use cashbook_domain::{same_book, LiveStatistics, ParseError, Snapshot, CASH_BOOK};
use cashbook_storage_json::JsonSnapshotStorage;
use strsim::levenshtein;
use tracing::{debug, info};

use super::{
    commands::{self, CommandDefinition, CommandRegistry},
    format::MoneyFormat,
    output,
};
use crate::{errors::CliError, utils::SystemClock};

/// Environment variable that switches the shell into script mode.
pub const SCRIPT_ENV: &str = "CASHBOOK_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No snapshot open. Use `open <path>` first.")]
    SnapshotNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// A snapshot held in memory together with the file it came from.
#[derive(Debug)]
pub struct OpenSnapshot {
    pub path: PathBuf,
    pub snapshot: Snapshot,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub(crate) registry: CommandRegistry,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) storage: JsonSnapshotStorage,
    pub(crate) open: Option<OpenSnapshot>,
    clock: Box<dyn Clock>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, resolve_home(), Box::new(SystemClock))
    }

    /// Builds a context whose config and snapshot store live under `home`.
    pub fn with_home(
        mode: CliMode,
        home: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        output::set_color_enabled(config.ui_color_enabled);
        let storage = JsonSnapshotStorage::new(home.join("snapshots"))?;
        debug!(home = %home.display(), ?mode, "shell context created");

        let mut context = Self {
            mode,
            running: true,
            registry: CommandRegistry::new(commands::all_definitions()),
            config,
            config_manager,
            storage,
            open: None,
            clock,
        };
        context.auto_open();
        Ok(context)
    }

    /// Opens the configured default snapshot, or in interactive mode the last
    /// one opened. Failures are reported and the shell starts empty.
    fn auto_open(&mut self) {
        let candidate = match self.mode {
            CliMode::Interactive => self.config.startup_snapshot().cloned(),
            CliMode::Script => self.config.default_snapshot.clone(),
        };
        let Some(path) = candidate else {
            return;
        };
        match self.open_path(&path) {
            Ok(()) => output::info(format!("Opened `{}` on startup.", path.display())),
            Err(err) => output::warning(format!(
                "Could not open `{}` on startup: {err}",
                path.display()
            )),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.open {
            Some(open) => {
                let name = open
                    .path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("snapshot");
                format!("cashbook({name})> ")
            }
            None => "cashbook> ".to_string(),
        }
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn money(&self) -> MoneyFormat {
        MoneyFormat::from_config(&self.config)
    }

    pub(crate) fn snapshot(&self) -> Result<&Snapshot, CommandError> {
        self.open
            .as_ref()
            .map(|open| &open.snapshot)
            .ok_or(CommandError::SnapshotNotLoaded)
    }

    /// Statistics carried by the snapshot, or derived from the configured books.
    pub(crate) fn statistics(&self) -> Result<LiveStatistics, CommandError> {
        let snapshot = self.snapshot()?;
        Ok(StatisticsService::resolve(snapshot, &self.config.bank_books))
    }

    /// True for CASH and the configured bank books.
    pub(crate) fn is_known_book(&self, book: &str) -> bool {
        std::iter::once(CASH_BOOK)
            .chain(self.config.bank_books.iter().map(String::as_str))
            .any(|known| same_book(known, book))
    }

    /// Loads `path` and makes it the open snapshot.
    pub(crate) fn open_path(&mut self, path: &Path) -> CommandResult {
        let snapshot = self.storage.load_snapshot_from_path(path)?;
        let warnings = snapshot_warnings(&snapshot, &self.config.bank_books);
        info!(
            path = %path.display(),
            payments = snapshot.payment_count(),
            warnings = warnings.len(),
            "snapshot opened"
        );
        self.open = Some(OpenSnapshot {
            path: path.to_path_buf(),
            snapshot,
        });
        if !warnings.is_empty() {
            output::warning(format!(
                "{} data warning(s) found. Run `warnings` to review them.",
                warnings.len()
            ));
        }
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|definition| definition.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Tokenizes and dispatches one input line.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Parse(err) => {
                output::error(err);
                output::hint("Use `help <command>` for accepted values.");
            }
            CommandError::SnapshotNotLoaded => {
                output::error(CommandError::SnapshotNotLoaded);
                output::hint("Try `open books.json` or `snapshots` to list stored snapshots.");
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    home: &Path,
    clock: Box<dyn Clock>,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::with_home(CliMode::Script, home.to_path_buf(), clock)?;
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(context)
}
