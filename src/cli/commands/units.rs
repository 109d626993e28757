use cashbook_core::{BusinessUnitService, CoreError};
use cashbook_domain::DirectionFilter;

use super::{ledgers::print_book, parse_or_default, reject_extra, required, CommandDefinition};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::format::format_percent;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "units",
            "Summarize income, expense, net and margin per business unit",
            "units",
            cmd_units,
        ),
        CommandDefinition::new(
            "unit",
            "Show the ledger of one business unit",
            "unit <NAME> [all|in|out]",
            cmd_unit,
        ),
    ]
}

/// Configured units, or every unit tagged on a payment when none are set.
fn unit_names(context: &ShellContext) -> Result<Vec<String>, crate::cli::CommandError> {
    if !context.config.business_units.is_empty() {
        return Ok(context.config.business_units.clone());
    }
    let snapshot = context.snapshot()?;
    Ok(BusinessUnitService::distinct_units(&snapshot.payments))
}

fn cmd_units(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 0, "units")?;
    let units = unit_names(context)?;
    let snapshot = context.snapshot()?;
    let money = context.money();

    output::section("Business units");
    if units.is_empty() {
        output::info("No business units configured or tagged on payments.");
        return Ok(());
    }

    let report = BusinessUnitService::summarize(&units, &snapshot.payments);
    let mut table = Table::new(vec![
        TableColumn::left("Unit"),
        TableColumn::right("Payments"),
        TableColumn::right("Income"),
        TableColumn::right("Expense"),
        TableColumn::right("Net"),
        TableColumn::right("Margin"),
    ]);
    for unit in &report.units {
        table.push_row(vec![
            unit.name.clone(),
            unit.payment_count.to_string(),
            money.amount(unit.totals.income),
            money.amount(unit.totals.expense),
            money.amount(unit.totals.net),
            format_percent(unit.totals.margin),
        ]);
    }
    let total = &report.grand_total;
    table.push_footer(vec![
        "Total".to_string(),
        report
            .units
            .iter()
            .map(|unit| unit.payment_count)
            .sum::<usize>()
            .to_string(),
        money.amount(total.income),
        money.amount(total.expense),
        money.amount(total.net),
        format_percent(total.margin),
    ]);
    output::info(table.render());
    Ok(())
}

fn cmd_unit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 2, "unit <NAME> [all|in|out]")?;
    let name = required(args, 0, "business unit name")?;
    let filter: DirectionFilter = parse_or_default(args, 1)?;
    let snapshot = context.snapshot()?;

    let configured = context.config.business_units.iter().any(|unit| unit == name);
    let tagged = BusinessUnitService::distinct_units(&snapshot.payments);
    if !configured && !tagged.iter().any(|unit| unit == name) {
        return Err(CoreError::UnknownBusinessUnit(name.to_string()).into());
    }

    let ledger = BusinessUnitService::ledger(name, &snapshot.payments, filter);
    print_book(&ledger, &context.money());
    Ok(())
}
