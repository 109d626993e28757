use std::{fs, path::PathBuf};

use cashbook_core::{BusinessUnitService, FinancialStatementService};
use cashbook_domain::{BusinessUnitReport, PeriodFinancials, Reconciliation, ReportPeriod};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::{parse_or_default, reject_extra, required, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::format::MoneyFormat;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

const PERIODS: &str = "this-month|last-month|all";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "pnl",
            "Show the profit and loss statement for a period",
            "pnl [this-month|last-month|all]",
            cmd_pnl,
        ),
        CommandDefinition::new(
            "balance-sheet",
            "Show assets, liabilities, equity and the reconciliation check",
            "balance-sheet [this-month|last-month|all]",
            cmd_balance_sheet,
        ),
        CommandDefinition::new(
            "export",
            "Write statements and business-unit totals to a JSON file",
            "export <path> [this-month|last-month|all]",
            cmd_export,
        ),
    ]
}

fn financials(context: &ShellContext, period: ReportPeriod) -> Result<PeriodFinancials, CommandError> {
    let snapshot = context.snapshot()?;
    let statistics = context.statistics()?;
    Ok(FinancialStatementService::period_financials(
        snapshot,
        &statistics,
        period,
        context.clock(),
        context.config.reconciliation_tolerance,
    ))
}

fn statement_table() -> Table {
    Table::new(vec![
        TableColumn::left("Line"),
        TableColumn::right("Amount"),
    ])
}

fn line(table: &mut Table, money: &MoneyFormat, label: impl Into<String>, value: Decimal) {
    table.push_row(vec![label.into(), money.amount(value)]);
}

fn cmd_pnl(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, &format!("pnl [{PERIODS}]"))?;
    let period: ReportPeriod = parse_or_default(args, 0)?;
    let financials = financials(context, period)?;
    let money = context.money();

    output::section(format!("Profit and loss ({period})"));
    let revenue = &financials.revenue;
    let mut table = statement_table();
    line(&mut table, &money, "Royalty income", revenue.royalty);
    line(&mut table, &money, "Interest income", revenue.interest);
    line(&mut table, &money, "Chit commission", revenue.chit_commission);
    line(&mut table, &money, "Business income", revenue.business_income);
    table.push_footer(vec!["Total revenue".to_string(), money.amount(financials.total_revenue)]);
    output::info(table.render());

    let expenses = &financials.expenses;
    let mut table = statement_table();
    line(&mut table, &money, "Operational expenses", expenses.operational);
    line(&mut table, &money, "Loan interest", expenses.loan_interest);
    line(&mut table, &money, "Business expenses", expenses.business_expense);
    table.push_footer(vec!["Total expenses".to_string(), money.amount(financials.total_expenses)]);
    output::info(table.render());

    let net = money.money(financials.net_profit);
    if financials.net_profit.is_sign_negative() {
        output::warning(format!("Net loss: {net}"));
    } else {
        output::success(format!("Net profit: {net}"));
    }
    Ok(())
}

fn cmd_balance_sheet(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, &format!("balance-sheet [{PERIODS}]"))?;
    let period: ReportPeriod = parse_or_default(args, 0)?;
    let financials = financials(context, period)?;
    let money = context.money();

    output::section(format!("Balance sheet (profit for {period})"));

    let assets = &financials.assets;
    let mut table = statement_table();
    line(&mut table, &money, "Cash in hand", assets.cash_in_hand);
    for (book, balance) in &assets.bank_balances {
        line(&mut table, &money, format!("Bank {book}"), *balance);
    }
    line(&mut table, &money, "Receivables", assets.receivables);
    line(&mut table, &money, "Lending principal", assets.lending_principal);
    for holding in &assets.investments {
        line(&mut table, &money, format!("Investment: {}", holding.kind), holding.value);
    }
    table.push_footer(vec!["Total assets".to_string(), money.amount(financials.total_assets)]);
    output::info(table.render());

    let liabilities = &financials.liabilities;
    let mut table = statement_table();
    line(&mut table, &money, "Bank loans", liabilities.bank_loans);
    line(&mut table, &money, "Private debt", liabilities.private_debt);
    line(&mut table, &money, "Accounts payable", liabilities.accounts_payable);
    line(&mut table, &money, "Advances owed", liabilities.advances_owed);
    table.push_footer(vec![
        "Total liabilities".to_string(),
        money.amount(financials.total_liabilities),
    ]);
    output::info(table.render());

    let equity = &financials.equity;
    let mut table = statement_table();
    line(&mut table, &money, "Opening capital", equity.opening_capital);
    line(&mut table, &money, "Historical reserves", equity.historical_reserves);
    line(&mut table, &money, "Current net profit", equity.current_net_profit);
    table.push_footer(vec!["True equity".to_string(), money.amount(financials.total_equity)]);
    output::info(table.render());

    match financials.reconciliation {
        Reconciliation::Balanced { .. } => output::success("Balanced: assets = liabilities + equity."),
        Reconciliation::NotBalanced { difference } => {
            output::error(format!("Not balanced: difference {}", money.money(difference)));
            output::hint("Run `warnings` to look for data anomalies.");
        }
    }
    Ok(())
}

/// Serialized shape written by `export`.
#[derive(Debug, Serialize)]
struct StatementExport {
    generated_at: DateTime<Utc>,
    source: PathBuf,
    financials: PeriodFinancials,
    business_units: BusinessUnitReport,
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 2, &format!("export <path> [{PERIODS}]"))?;
    let target = PathBuf::from(required(args, 0, "export path")?);
    let period: ReportPeriod = parse_or_default(args, 1)?;
    let financials = financials(context, period)?;

    let snapshot = context.snapshot()?;
    let units = if context.config.business_units.is_empty() {
        BusinessUnitService::distinct_units(&snapshot.payments)
    } else {
        context.config.business_units.clone()
    };
    let source = context
        .open
        .as_ref()
        .map(|open| open.path.clone())
        .unwrap_or_default();

    let export = StatementExport {
        generated_at: context.now(),
        source,
        financials,
        business_units: BusinessUnitService::summarize(&units, &snapshot.payments),
    };
    let json = serde_json::to_string_pretty(&export)?;
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, json)?;
    info!(path = %target.display(), period = %period, "statements exported");
    output::success(format!("Statements for {period} written to `{}`.", target.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use cashbook_core::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::cli::core::process_script;

    const SNAPSHOT: &str = r#"{
        "payments": [
            {"id": "00000000-0000-4000-8000-000000000001", "direction": "IN",
             "amount": "300", "date": "2024-06-02T10:00:00Z", "mode": "CASH",
             "category": "OTHER_BUSINESS", "business_unit": "Farm"},
            {"id": "00000000-0000-4000-8000-000000000002", "direction": "OUT",
             "amount": "120", "date": "2024-06-03T10:00:00Z", "mode": "CASH",
             "category": "RENT", "voucher_type": "PAYMENT"}
        ],
        "opening_balances": {"CASH": "1000", "CAPITAL": "1000"}
    }"#;

    #[test]
    fn export_writes_reconciled_statements() {
        let home = tempdir().unwrap();
        let input = home.path().join("june.json");
        fs::write(&input, SNAPSHOT).unwrap();
        let output = home.path().join("reports/june-report.json");

        let open_line = format!("open {}", input.display());
        let export_line = format!("export {} all", output.display());
        let clock = Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap()));
        process_script(home.path(), clock, &[open_line.as_str(), export_line.as_str()]).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["financials"]["period"], "ALL_TIME");
        assert_eq!(written["financials"]["reconciliation"]["state"], "BALANCED");
        assert_eq!(written["business_units"]["units"][0]["name"], "Farm");
        assert!(written["generated_at"].as_str().unwrap().starts_with("2024-06-20"));
    }
}
