use super::{reject_extra, required, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

const USAGE: &str =
    "config [show | set <key> <value> | backup [note] | backups | restore <backup>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change preferences, and manage config backups",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = match args.split_first() {
        Some((action, rest)) => (action.to_ascii_lowercase(), rest),
        None => ("show".to_string(), &[][..]),
    };
    match action.as_str() {
        "show" => {
            reject_extra(rest, 0, USAGE)?;
            show(context);
            Ok(())
        }
        "set" => set(context, rest),
        "backup" => backup(context, rest),
        "backups" => {
            reject_extra(rest, 0, USAGE)?;
            list_backups(context)
        }
        "restore" => restore(context, rest),
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn show(context: &ShellContext) {
    let config = &context.config;
    let path_or_none = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    let list_or_all = |items: &[String], empty: &str| {
        if items.is_empty() {
            empty.to_string()
        } else {
            items.join(", ")
        }
    };

    output::section("Configuration");
    output::field("locale", &config.locale, 24);
    output::field("currency", &config.currency, 24);
    output::field("currency_precision", config.currency_precision, 24);
    output::field("bank_books", list_or_all(&config.bank_books, "(none)"), 24);
    output::field(
        "business_units",
        list_or_all(&config.business_units, "(every tagged unit)"),
        24,
    );
    output::field("reconciliation_tolerance", config.reconciliation_tolerance, 24);
    output::field(
        "ui_color_enabled",
        if config.ui_color_enabled { "on" } else { "off" },
        24,
    );
    output::field("default_snapshot", path_or_none(&config.default_snapshot), 24);
    output::field("last_opened_snapshot", path_or_none(&config.last_opened_snapshot), 24);
    output::hint(format!(
        "Stored at `{}`.",
        context.config_manager.config_path().display()
    ));
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = required(args, 0, "setting name")?;
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(format!("missing value for `{key}`")));
    }
    // Remaining tokens form the value so lists may be written with spaces.
    let value = args[1..].join(" ");

    context.config.set(key, &value)?;
    context.persist_config()?;
    output::set_color_enabled(context.config.ui_color_enabled);
    output::success(format!("Set `{key}`."));
    Ok(())
}

fn backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let name = context
        .config_manager
        .backup(&context.config, note.as_deref())?;
    output::success(format!("Config backed up as `{name}`."));
    Ok(())
}

fn list_backups(context: &ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        output::info("No config backups yet. Use `config backup [note]`.");
        return Ok(());
    }
    output::section("Config backups (newest first)");
    for (idx, name) in backups.iter().enumerate() {
        output::info(format!("  {:>2}. {name}", idx + 1));
    }
    Ok(())
}

fn restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, USAGE)?;
    let name = required(args, 0, "backup name")?;
    context.config = context.config_manager.restore(name)?;
    output::set_color_enabled(context.config.ui_color_enabled);
    output::success(format!("Config restored from `{name}`."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use cashbook_core::FixedClock;
    use chrono::{TimeZone, Utc};

    use crate::cli::core::process_script;

    fn clock() -> Box<FixedClock> {
        Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap()))
    }

    #[test]
    fn backup_then_restore_brings_back_old_values() {
        let home = tempfile::tempdir().unwrap();
        let context = process_script(
            home.path(),
            clock(),
            &["config set currency usd", "config backup before units", "config set currency eur"],
        )
        .unwrap();
        let backups = context.config_manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert!(backups[0].ends_with("_before-units.json"));

        let restore_line = format!("config restore {}", backups[0]);
        let restored = process_script(home.path(), clock(), &[restore_line.as_str()]).unwrap();
        assert_eq!(restored.config.currency, "USD");
        assert_eq!(restored.config_manager.load().unwrap().currency, "USD");
    }

    #[test]
    fn invalid_values_leave_config_untouched() {
        let home = tempfile::tempdir().unwrap();
        let context = process_script(
            home.path(),
            clock(),
            &["config set currency_precision 9", "config frobnicate"],
        )
        .unwrap();
        assert_eq!(context.config.currency_precision, 2);
    }
}
