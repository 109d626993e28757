use std::path::PathBuf;

use cashbook_core::{snapshot_warnings, CoreError, SnapshotSource};

use super::{reject_extra, required, CommandDefinition};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "open",
            "Open a snapshot file, or a stored snapshot by name",
            "open <path|name>",
            cmd_open,
        ),
        CommandDefinition::new(
            "snapshots",
            "List snapshots kept in the cashbook home",
            "snapshots",
            cmd_snapshots,
        ),
        CommandDefinition::new(
            "save",
            "Store the open snapshot in the cashbook home",
            "save <name>",
            cmd_save,
        ),
        CommandDefinition::new(
            "warnings",
            "Audit the open snapshot for data anomalies",
            "warnings",
            cmd_warnings,
        ),
    ]
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, "open <path|name>")?;
    let target = required(args, 0, "snapshot path or name")?;

    let direct = PathBuf::from(target);
    let path = if direct.is_file() {
        direct
    } else {
        let stored = context.storage.snapshot_path(target);
        if !stored.is_file() {
            return Err(CoreError::SnapshotNotFound(target.to_string()).into());
        }
        stored
    };

    context.open_path(&path)?;
    context.config.last_opened_snapshot = Some(path.clone());
    context.persist_config()?;

    let snapshot = context.snapshot()?;
    output::success(format!(
        "Opened `{}`: {} payments, {} invoices, {} customers.",
        path.display(),
        snapshot.payments.len(),
        snapshot.invoices.len(),
        snapshot.customers.len()
    ));
    Ok(())
}

fn cmd_snapshots(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 0, "snapshots")?;
    let snapshots = context.storage.list_snapshots()?;
    if snapshots.is_empty() {
        output::info("No stored snapshots. Use `save <name>` after opening a file.");
        return Ok(());
    }
    output::section("Stored snapshots");
    let mut table = Table::new(vec![
        TableColumn::left("Name"),
        TableColumn::right("Payments"),
        TableColumn::left("Path"),
    ]);
    for info in snapshots {
        table.push_row(vec![
            info.name,
            info.payments.to_string(),
            info.path.display().to_string(),
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, "save <name>")?;
    let name = required(args, 0, "snapshot name")?;
    let snapshot = context.snapshot()?;
    let path = context.storage.save_snapshot(name, snapshot)?;
    output::success(format!("Snapshot stored at `{}`.", path.display()));
    Ok(())
}

fn cmd_warnings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 0, "warnings")?;
    let snapshot = context.snapshot()?;
    let warnings = snapshot_warnings(snapshot, &context.config.bank_books);
    if warnings.is_empty() {
        output::success("No data warnings.");
        return Ok(());
    }
    output::section(format!("{} data warning(s)", warnings.len()));
    for warning in warnings {
        output::warning(warning);
    }
    Ok(())
}
