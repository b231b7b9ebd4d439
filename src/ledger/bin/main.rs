use std::path::PathBuf;
use chrono::{Local, NaiveDate};
use clap::Parser;
use circulation::borrowers::domain::Borrower;
use circulation::catalog::domain::CatalogItem;
use circulation::core::domain::Configuration;
use circulation::core::library::LibraryResult;
use circulation::gateway::GatewayPublisherVia;
use circulation::ledger::factory::create_ledger;
use circulation::ledger::Ledger;
use circulation::statistics::report::{format_fee, outcome_message, overdue_notification};
use circulation::statistics::LibraryStatistics;
use circulation::utils::date::{add_days, parse_date};
use circulation::utils::logging::setup_tracing;

/// Runs the circulation demo against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "circulation")]
struct Cli {
    /// Reference date (YYYY-MM-DD) used as "today"; defaults to the local date
    #[arg(long)]
    as_of: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log as JSON and dump loan records as JSON at the end
    #[arg(long)]
    json: bool,
}

fn seed(ledger: &mut Ledger) -> LibraryResult<()> {
    ledger.add_item(CatalogItem::book("B1", "Effective Java", 2018, "Joshua Bloch", "9780134685991", 416)?)?;
    ledger.add_item(CatalogItem::book("B2", "Clean Code", 2008, "Robert C. Martin", "9780132350884", 464)?)?;
    ledger.add_item(CatalogItem::magazine("M1", "Nature", 2025, 780, "Nature Publishing Group")?)?;
    ledger.add_item(CatalogItem::magazine("M2", "Time", 2024, 52, "Time Inc.")?)?;
    ledger.add_borrower(Borrower::student("U1", "Alice", "alice@example.com", "S1001")?)?;
    ledger.add_borrower(Borrower::student("U2", "Bob", "bob@example.com", "S1002")?)?;
    ledger.add_borrower(Borrower::professor("U3", "Dr. Smith", "smith@example.com", "Computer Science")?)?;
    Ok(())
}

fn run(ledger: &mut Ledger, today: NaiveDate, json: bool) -> LibraryResult<()> {
    let loan_days = ledger.config().default_loan_days;
    ledger.borrow("U1", "B1", "R1", today, add_days(today, loan_days)?)?;
    ledger.borrow("U1", "M1", "R2", today, add_days(today, 7)?)?;
    let past = add_days(today, -30)?;
    ledger.borrow("U3", "B2", "R3", past, add_days(past, 14)?)?;

    println!("Library after initial borrows:\n{}", ledger);

    println!("\nAvailable items:");
    for item in ledger.available_items() {
        println!(" - {}", item.summary());
    }

    println!("\nOverdue records:");
    for record in ledger.overdue_records(today) {
        println!(" - {}, overdue by {} days, fee={}", record.record_id,
                 record.days_overdue(today), format_fee(record.late_fee(today)));
    }

    println!("\nAttempting to borrow multiple items for Bob:");
    let outcomes = ledger.borrow_many("U2", &["B2", "M2"], loan_days, today)?;
    for (item_id, outcome) in ["B2", "M2"].iter().zip(outcomes) {
        println!(" - {}", outcome_message(outcome, ledger.item(item_id)?.title.as_str()));
    }

    println!("\nAggregated overdue fees:");
    let fees = ledger.aggregate_overdue_fees(today);
    if fees.is_empty() {
        println!(" - No overdue fees found");
    }
    for borrower in ledger.borrowers() {
        if let Some(fee) = fees.get(&borrower.borrower_id) {
            println!(" - {} owes {}", borrower.name, format_fee(*fee));
        }
    }

    println!("\nSearching for items with term 'clean':");
    for item in ledger.find_by_title("clean") {
        println!(" - Found: {}", item.summary());
    }

    {
        let stats = LibraryStatistics::new(ledger);
        for borrower in ledger.borrowers() {
            println!("\n{}", stats.borrower_report(borrower.borrower_id.as_str())?);
        }
    }

    println!("Overdue notifications for records:");
    for record in ledger.records() {
        let title = ledger.item(record.item_id.as_str())?.title.as_str();
        println!(" - {}: {}", record.record_id,
                 overdue_notification(record, title, today, ledger.config().urgent_after_days));
    }

    println!("\nAlice returned magazine M1: {}", ledger.return_item("U1", "M1", today)?);
    println!("Alice renewed book B1 for 7 days: {}", ledger.renew("U1", "B1", 7, today)?);

    println!("\nMarking R3 as returned (overdue item): {}", ledger.mark_record_returned("R3", today)?);
    println!(" - Late fee was: {}", format_fee(ledger.record("R3")?.late_fee(today)));

    println!("\nFinal library state:\n{}", ledger);
    let stats = LibraryStatistics::new(ledger);
    println!("\nStatistics:");
    println!(" - Total books: {}", stats.total_books());
    println!(" - Total magazines: {}", stats.total_magazines());
    if let Some(borrower) = stats.most_active_borrower() {
        println!(" - Most active borrower: {}", borrower.name);
    }
    println!(" - Average loans per borrower: {:.2}", stats.average_loans_per_borrower());

    println!("\n{}", stats.detailed_report(today));

    if json {
        println!("{}", serde_json::to_string_pretty(ledger.records())?);
    }
    Ok(())
}

fn main() -> LibraryResult<()> {
    let cli = Cli::parse();
    setup_tracing(cli.json);

    let config = match cli.config {
        Some(path) => Configuration::load(&path)?,
        None => Configuration::new("City Library"),
    };
    let today = match cli.as_of {
        Some(value) => parse_date(value.as_str())?,
        None => Local::now().date_naive(),
    };

    let mut ledger = create_ledger(&config, GatewayPublisherVia::Log);
    seed(&mut ledger)?;
    run(&mut ledger, today, cli.json)
}
