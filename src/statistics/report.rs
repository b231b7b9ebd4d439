use chrono::NaiveDate;
use crate::borrowers::domain::{Borrower, BorrowerProfile};
use crate::catalog::domain::{CatalogItem, ItemDetails};
use crate::core::library::BorrowOutcome;
use crate::ledger::Ledger;
use crate::loans::domain::LoanRecord;

pub fn format_fee(fee: f64) -> String {
    format!("€{:.2}", fee)
}

pub fn outcome_message(outcome: BorrowOutcome, title: &str) -> String {
    match outcome {
        BorrowOutcome::Success => format!("{}: Borrowed {}", outcome, title),
        BorrowOutcome::Unavailable => format!("{}: {} is not available", outcome, title),
        BorrowOutcome::LimitReached => format!("{}: Cannot borrow {} - limit reached", outcome, title),
        BorrowOutcome::Failed => format!("{}: Could not borrow {}", outcome, title),
    }
}

/// Reminder text for an open overdue loan, escalated to URGENT once it is more than
/// `urgent_after_days` late.
pub fn overdue_notification(record: &LoanRecord, title: &str, as_of: NaiveDate, urgent_after_days: i64) -> String {
    if !record.is_open() || !record.is_overdue(as_of) {
        return "No notification needed - item not overdue".to_string();
    }
    let days = record.days_overdue(as_of);
    let fee = format_fee(record.late_fee(as_of));
    if days > urgent_after_days {
        format!("URGENT: Item '{}' is {} days overdue! Fee: {}. Please return immediately.", title, days, fee)
    } else {
        format!("REMINDER: Item '{}' is {} days overdue. Fee: {}", title, days, fee)
    }
}

pub fn borrower_report(ledger: &Ledger, borrower: &Borrower) -> String {
    let mut report = format!("=== Borrower Report for {} ===\n", borrower.name);
    report.push_str(format!("Currently borrowed: {}/{}\n",
                            borrower.borrowed_count(), borrower.max_borrow_limit()).as_str());
    report.push_str(format!("Remaining capacity: {}\n", borrower.remaining_capacity()).as_str());
    if borrower.borrowed_count() > 0 {
        report.push_str("Borrowed items:\n");
        for item in borrower.held_items().iter().filter_map(|id| ledger.item(id).ok()) {
            report.push_str(format!("  - {} ({})\n", item.title, item.kind()).as_str());
        }
    } else {
        report.push_str("No items currently borrowed\n");
    }
    match &borrower.profile {
        BorrowerProfile::Student { student_id } => {
            report.push_str(format!("Student ID: {}\n", student_id).as_str());
        }
        BorrowerProfile::Professor { department } => {
            report.push_str(format!("Department: {}\n", department).as_str());
        }
    }
    report
}

fn item_details(item: &CatalogItem) -> String {
    match &item.details {
        ItemDetails::Book { author, isbn, .. } => {
            format!("  Author: {}\n  ISBN: {}\n", author, isbn)
        }
        ItemDetails::Magazine { issue_number, publisher } => {
            format!("  Publisher: {}\n  Issue: {}\n", publisher, issue_number)
        }
    }
}

pub(crate) fn overdue_detail(ledger: &Ledger, record: &LoanRecord, as_of: NaiveDate) -> String {
    let mut detail = String::from("\nFirst Overdue Item Details:\n");
    if let Ok(borrower) = ledger.borrower(record.borrower_id.as_str()) {
        detail.push_str(format!("  Borrower: {}\n", borrower.name).as_str());
    }
    let title = match ledger.item(record.item_id.as_str()) {
        Ok(item) => {
            detail.push_str(format!("  Item: {}\n  Type: {}\n", item.title, item.kind()).as_str());
            detail.push_str(item_details(item).as_str());
            item.title.to_string()
        }
        Err(_) => record.item_id.to_string(),
    };
    detail.push_str(format!("  Due Date: {}\n", record.due_date()).as_str());
    detail.push_str(format!("  Days Overdue: {}\n", record.days_overdue(as_of)).as_str());
    detail.push_str(format!("  Late Fee: {}\n", format_fee(record.late_fee(as_of))).as_str());
    detail.push_str(format!("  Notification: {}\n",
                            overdue_notification(record, title.as_str(), as_of,
                                                 ledger.config().urgent_after_days)).as_str());
    detail
}
