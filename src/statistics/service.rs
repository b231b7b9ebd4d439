use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDate;
use crate::borrowers::domain::Borrower;
use crate::core::library::{ItemKind, LibraryResult};
use crate::ledger::Ledger;
use crate::statistics::report;

// LibraryStatistics provides read-only analytics over a ledger.
pub struct LibraryStatistics<'a> {
    ledger: &'a Ledger,
}

impl<'a> LibraryStatistics<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn total_by_kind(&self, kind: ItemKind) -> usize {
        self.ledger.items().iter().filter(|item| item.kind() == kind).count()
    }

    pub fn total_books(&self) -> usize {
        self.total_by_kind(ItemKind::Book)
    }

    pub fn total_magazines(&self) -> usize {
        self.total_by_kind(ItemKind::Magazine)
    }

    /// The borrower holding the most items; on a tie the earliest registered wins.
    pub fn most_active_borrower(&self) -> Option<&'a Borrower> {
        self.ledger.borrowers().iter().fold(None, |best: Option<&'a Borrower>, borrower| match best {
            Some(top) if top.borrowed_count() >= borrower.borrowed_count() => Some(top),
            _ => Some(borrower),
        })
    }

    pub fn average_loans_per_borrower(&self) -> f64 {
        let borrowers = self.ledger.borrowers().len();
        if borrowers == 0 {
            return 0.0;
        }
        self.ledger.records().len() as f64 / borrowers as f64
    }

    pub fn borrower_report(&self, borrower_id: &str) -> LibraryResult<String> {
        let borrower = self.ledger.borrower(borrower_id)?;
        Ok(report::borrower_report(self.ledger, borrower))
    }

    pub fn detailed_report(&self, as_of: NaiveDate) -> String {
        let mut out = String::from("=== DETAILED LIBRARY REPORT ===\n\n");
        out.push_str(format!("Library: {}\n\n", self.ledger.name()).as_str());
        out.push_str(format!("Total Items: {}\n", self.ledger.items().len()).as_str());
        out.push_str(format!("Total Books: {}\n", self.total_books()).as_str());
        out.push_str(format!("Total Magazines: {}\n\n", self.total_magazines()).as_str());

        if let Some(borrower) = self.most_active_borrower() {
            out.push_str(format!("Most Active Borrower: {}\n", borrower.name).as_str());
            out.push_str(report::borrower_report(self.ledger, borrower).as_str());
            out.push('\n');
        }

        let overdue = self.ledger.overdue_records(as_of);
        out.push_str(format!("Overdue Items: {}\n", overdue.len()).as_str());
        if let Some(first) = overdue.first() {
            out.push_str(report::overdue_detail(self.ledger, first, as_of).as_str());
        }
        out
    }
}

impl Display for LibraryStatistics<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "LibraryStatistics{{totalBooks={}, totalMagazines={}, avgLoansPerBorrower={:.2}}}",
               self.total_books(), self.total_magazines(), self.average_loans_per_borrower())
    }
}
