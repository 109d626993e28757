use cashbook_core::{AccountLedgerService, CategoryLedgerService, CoreError};
use cashbook_domain::{
    AccountLedger, CategoryFilter, CategoryLedger, CategoryView, Direction, DirectionFilter,
};

use super::{parse_or_default, reject_extra, required, CommandDefinition};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::format::{format_date, short_id, MoneyFormat};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "book",
            "Show the running-balance ledger of a cash or bank book",
            "book <BOOK> [all|in|out]",
            cmd_book,
        ),
        CommandDefinition::new(
            "income",
            "Show income by category, newest first",
            "income [CATEGORY|all] [SEARCH]",
            cmd_income,
        ),
        CommandDefinition::new(
            "expense",
            "Show expenses by category, newest first",
            "expense [CATEGORY|all] [SEARCH]",
            cmd_expense,
        ),
        CommandDefinition::new(
            "categories",
            "List the categories of the income or expense view",
            "categories <income|expense>",
            cmd_categories,
        ),
    ]
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 2, "book <BOOK> [all|in|out]")?;
    let book = required(args, 0, "book name")?;
    let filter: DirectionFilter = parse_or_default(args, 1)?;
    let snapshot = context.snapshot()?;

    let recorded = snapshot.payments.iter().any(|payment| payment.is_in_book(book));
    if !recorded && !context.is_known_book(book) {
        return Err(CoreError::UnknownBook(book.to_string()).into());
    }

    let ledger = AccountLedgerService::for_snapshot(snapshot, book, filter);
    print_book(&ledger, &context.money());
    Ok(())
}

/// Renders a book or business-unit ledger with its opening and closing lines.
pub(crate) fn print_book(ledger: &AccountLedger<'_>, money: &MoneyFormat) {
    output::section(format!("{} ledger ({})", ledger.book, ledger.filter));
    output::field("Opening", money.money(ledger.opening_balance), 8);
    if ledger.is_empty() {
        output::info("No payments to show.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Date"),
            TableColumn::left("Ref"),
            TableColumn::left("Details").max_width(32),
            TableColumn::left("Party").max_width(24),
            TableColumn::right("In"),
            TableColumn::right("Out"),
            TableColumn::right("Balance"),
        ]);
        for row in &ledger.rows {
            let payment = row.payment;
            let (inflow, outflow) = match payment.direction {
                Direction::In => (Some(payment.amount), None),
                Direction::Out => (None, Some(payment.amount)),
            };
            table.push_row(vec![
                format_date(payment.date),
                short_id(payment.id),
                payment.label().to_string(),
                payment.source_name.clone().unwrap_or_default(),
                money.optional(inflow),
                money.optional(outflow),
                money.amount(row.running_balance),
            ]);
        }
        table.push_footer(vec![
            String::new(),
            String::new(),
            "Totals".to_string(),
            String::new(),
            money.amount(ledger.total_in),
            money.amount(ledger.total_out),
            String::new(),
        ]);
        output::info(table.render());
    }
    output::field("Closing", money.money(ledger.closing_balance), 8);
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    show_category_ledger(context, CategoryView::Income, args)
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    show_category_ledger(context, CategoryView::Expense, args)
}

fn show_category_ledger(
    context: &ShellContext,
    view: CategoryView,
    args: &[&str],
) -> CommandResult {
    let filter = CategoryFilter::parse(args.first().copied().unwrap_or("all"));
    let search = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();
    let snapshot = context.snapshot()?;

    let ledger = CategoryLedgerService::build(view, &filter, &search, &snapshot.payments);
    print_category_ledger(&ledger, &context.money());
    Ok(())
}

fn print_category_ledger(ledger: &CategoryLedger<'_>, money: &MoneyFormat) {
    let mut title = format!("{} ledger", ledger.view);
    if let CategoryFilter::Only(category) = &ledger.filter {
        title.push_str(&format!(" [{category}]"));
    }
    if !ledger.search.is_empty() {
        title.push_str(&format!(" matching \"{}\"", ledger.search));
    }
    output::section(title);

    if ledger.is_empty() {
        output::info("No payments to show.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Date"),
            TableColumn::left("Category"),
            TableColumn::left("Details").max_width(32),
            TableColumn::left("Party").max_width(24),
            TableColumn::left("Book"),
            TableColumn::right("Amount"),
            TableColumn::right("Running"),
        ]);
        for row in &ledger.rows {
            let payment = row.payment;
            table.push_row(vec![
                format_date(payment.date),
                payment.category_or_default().to_string(),
                payment.label().to_string(),
                payment.source_name.clone().unwrap_or_default(),
                payment.mode.clone(),
                money.amount(payment.amount),
                money.amount(row.running_total),
            ]);
        }
        output::info(table.render());
    }
    output::field("Grand total", money.money(ledger.grand_total), 11);
    if !ledger.categories.is_empty() {
        output::hint(format!("Categories: {}", ledger.categories.join(", ")));
    }
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_extra(args, 1, "categories <income|expense>")?;
    let view: CategoryView = required(args, 0, "view (income or expense)")?.parse()?;
    let snapshot = context.snapshot()?;
    let categories = CategoryLedgerService::categories(view, &snapshot.payments);

    output::section(format!("{view} categories"));
    if categories.is_empty() {
        output::info("No categories recorded.");
    }
    for category in categories {
        output::info(format!("  {category}"));
    }
    Ok(())
}
