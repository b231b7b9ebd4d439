use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::borrowers::domain::Borrower;
use crate::catalog::domain::CatalogItem;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::utils::date::{add_days, days_between, serializer};

pub const LATE_FEE_PER_DAY: f64 = 0.5;

// LoanRecord abstracts one borrow-to-return cycle of an item by a borrower.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub record_id: String,
    pub borrower_id: String,
    pub item_id: String,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDate,
    #[serde(with = "serializer")]
    due_date: NaiveDate,
    returned_on: Option<NaiveDate>,
}

impl LoanRecord {
    pub fn new(record_id: &str, borrower_id: &str, item_id: &str,
               borrow_date: NaiveDate, due_date: NaiveDate) -> LibraryResult<Self> {
        LibraryError::require("record_id", record_id)?;
        LibraryError::require("borrower_id", borrower_id)?;
        LibraryError::require("item_id", item_id)?;
        Ok(Self {
            record_id: record_id.to_string(),
            borrower_id: borrower_id.to_string(),
            item_id: item_id.to_string(),
            borrow_date,
            due_date,
            returned_on: None,
        })
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn returned_on(&self) -> Option<NaiveDate> {
        self.returned_on
    }

    pub fn is_open(&self) -> bool {
        self.returned_on.is_none()
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_open() { LoanStatus::Open } else { LoanStatus::Closed }
    }

    pub fn is_for(&self, borrower_id: &str, item_id: &str) -> bool {
        self.borrower_id == borrower_id && self.item_id == item_id
    }

    // The return date once closed, otherwise the reference date.
    fn effective_date(&self, as_of: NaiveDate) -> NaiveDate {
        self.returned_on.unwrap_or(as_of)
    }

    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.effective_date(as_of) > self.due_date
    }

    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        days_between(self.due_date, self.effective_date(as_of)).max(0)
    }

    pub fn late_fee(&self, as_of: NaiveDate) -> f64 {
        self.days_overdue(as_of) as f64 * LATE_FEE_PER_DAY
    }

    /// Closes the record and hands the item back through the borrower, which makes it
    /// available again. Returns `Ok(false)`, changing nothing, when the record is already
    /// closed. The borrower and item must be the ones the record was opened for, and the
    /// borrower must still hold the item; otherwise the record stays open.
    pub fn mark_returned(&mut self, as_of: NaiveDate, borrower: &mut Borrower,
                         item: &mut CatalogItem) -> LibraryResult<bool> {
        if !self.is_for(borrower.borrower_id.as_str(), item.item_id.as_str()) {
            return Err(LibraryError::invalid_argument(
                format!("record {} is for borrower {} and item {}, not {} and {}", self.record_id,
                        self.borrower_id, self.item_id, borrower.borrower_id, item.item_id).as_str()));
        }
        if !self.is_open() {
            return Ok(false);
        }
        if !borrower.attempt_return(item) {
            return Err(LibraryError::invalid_state(
                format!("borrower {} does not hold item {}", self.borrower_id, self.item_id).as_str(),
                Some("409".to_string())));
        }
        self.returned_on = Some(as_of);
        Ok(true)
    }

    pub fn extend_due_date(&mut self, days: i64) -> LibraryResult<()> {
        if !self.is_open() {
            return Err(LibraryError::invalid_state(
                format!("record {} is already closed", self.record_id).as_str(), Some("409".to_string())));
        }
        self.due_date = add_days(self.due_date, days)?;
        Ok(())
    }
}

impl Identifiable for LoanRecord {
    fn id(&self) -> String {
        self.record_id.to_string()
    }
}
