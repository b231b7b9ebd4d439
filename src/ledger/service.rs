use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDate;
use tracing::{debug, info, warn};
use crate::borrowers::domain::Borrower;
use crate::catalog::domain::CatalogItem;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::events::DomainEvent;
use crate::core::library::{BorrowOutcome, LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::loans::domain::LoanRecord;
use crate::utils::date::add_days;

/// Ledger is the aggregate root of the circulation system: it owns every catalog item,
/// borrower and loan record, in registration order, and resolves all cross references
/// by id.
///
/// Every closure of a loan record goes through [`LoanRecord::mark_returned`], so a
/// closed record always means the item is back on the shelf and off the borrower's
/// list.
pub struct Ledger {
    config: Configuration,
    items: Vec<CatalogItem>,
    borrowers: Vec<Borrower>,
    records: Vec<LoanRecord>,
    item_index: HashMap<String, usize>,
    borrower_index: HashMap<String, usize>,
    record_index: HashMap<String, usize>,
    events_publisher: Box<dyn EventPublisher>,
}

fn register<T: Identifiable>(group: &str, index: &mut HashMap<String, usize>,
                             entities: &mut Vec<T>, entity: T) -> LibraryResult<()> {
    let id = entity.id();
    if index.contains_key(&id) {
        return Err(LibraryError::duplicate_key(format!("{} with id {} already exists", group, id).as_str()));
    }
    index.insert(id, entities.len());
    entities.push(entity);
    Ok(())
}

fn lookup(group: &str, index: &HashMap<String, usize>, id: &str) -> LibraryResult<usize> {
    index.get(id).copied()
        .ok_or_else(|| LibraryError::not_found(format!("{} with id {} not found", group, id).as_str()))
}

fn loan_metadata(record: &LoanRecord) -> HashMap<String, String> {
    HashMap::from([("borrower_id".to_string(), record.borrower_id.to_string()),
        ("item_id".to_string(), record.item_id.to_string())])
}

impl Ledger {
    pub fn new(config: &Configuration, events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            items: vec![],
            borrowers: vec![],
            records: vec![],
            item_index: HashMap::new(),
            borrower_index: HashMap::new(),
            record_index: HashMap::new(),
            events_publisher,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.config.library_name.as_str()
    }

    pub fn add_item(&mut self, item: CatalogItem) -> LibraryResult<()> {
        register("item", &mut self.item_index, &mut self.items, item)
    }

    pub fn add_borrower(&mut self, borrower: Borrower) -> LibraryResult<()> {
        register("borrower", &mut self.borrower_index, &mut self.borrowers, borrower)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn borrowers(&self) -> &[Borrower] {
        &self.borrowers
    }

    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn item(&self, item_id: &str) -> LibraryResult<&CatalogItem> {
        lookup("item", &self.item_index, item_id).map(|i| &self.items[i])
    }

    pub fn borrower(&self, borrower_id: &str) -> LibraryResult<&Borrower> {
        lookup("borrower", &self.borrower_index, borrower_id).map(|b| &self.borrowers[b])
    }

    pub fn record(&self, record_id: &str) -> LibraryResult<&LoanRecord> {
        lookup("record", &self.record_index, record_id).map(|r| &self.records[r])
    }

    /// Lends an item and appends its loan record.
    ///
    /// Unknown ids and a blank or reused record id are errors, checked before anything
    /// changes. A borrower at their limit or an item already out is an ordinary refusal:
    /// `Ok(false)` and no state change.
    pub fn borrow(&mut self, borrower_id: &str, item_id: &str, record_id: &str,
                  borrow_date: NaiveDate, due_date: NaiveDate) -> LibraryResult<bool> {
        let b = lookup("borrower", &self.borrower_index, borrower_id)?;
        let i = lookup("item", &self.item_index, item_id)?;
        if self.record_index.contains_key(record_id) {
            return Err(LibraryError::duplicate_key(format!("record with id {} already exists", record_id).as_str()));
        }
        let record = LoanRecord::new(record_id, borrower_id, item_id, borrow_date, due_date)?;
        if !self.borrowers[b].attempt_borrow(&mut self.items[i]) {
            debug!(borrower_id, item_id, "borrow refused");
            return Ok(false);
        }
        let event = DomainEvent::added("item_borrowed", "loans", record_id,
                                       &loan_metadata(&record), &record, borrow_date);
        self.record_index.insert(record.id(), self.records.len());
        self.records.push(record);
        info!(borrower_id, item_id, record_id, due_date = %due_date, "item borrowed");
        self.publish(event);
        Ok(true)
    }

    /// Takes an item back from a borrower and closes the first open record for the pair.
    /// Returns `Ok(false)` without side effects when the borrower does not hold the item.
    pub fn return_item(&mut self, borrower_id: &str, item_id: &str, as_of: NaiveDate) -> LibraryResult<bool> {
        let b = lookup("borrower", &self.borrower_index, borrower_id)?;
        let i = lookup("item", &self.item_index, item_id)?;
        if !self.borrowers[b].holds(item_id) {
            debug!(borrower_id, item_id, "return refused, item not held");
            return Ok(false);
        }
        match self.first_open(borrower_id, item_id) {
            Some(r) => {
                self.records[r].mark_returned(as_of, &mut self.borrowers[b], &mut self.items[i])?;
                info!(borrower_id, item_id, record_id = %self.records[r].record_id, "item returned");
                self.publish_closed(r, as_of);
            }
            None => {
                warn!(borrower_id, item_id, "held item has no open record");
                self.borrowers[b].attempt_return(&mut self.items[i]);
            }
        }
        Ok(true)
    }

    /// Closes a loan record directly, releasing its item. `Ok(false)` if it was already closed.
    pub fn mark_record_returned(&mut self, record_id: &str, as_of: NaiveDate) -> LibraryResult<bool> {
        let r = lookup("record", &self.record_index, record_id)?;
        let (borrower_id, item_id) = {
            let record = &self.records[r];
            (record.borrower_id.to_string(), record.item_id.to_string())
        };
        let b = lookup("borrower", &self.borrower_index, borrower_id.as_str())?;
        let i = lookup("item", &self.item_index, item_id.as_str())?;
        let closed = self.records[r].mark_returned(as_of, &mut self.borrowers[b], &mut self.items[i])?;
        if closed {
            info!(record_id, borrower_id = %borrower_id, item_id = %item_id, "record closed");
            self.publish_closed(r, as_of);
        }
        Ok(closed)
    }

    /// Pushes back the due date of a held item's open loan.
    pub fn renew(&mut self, borrower_id: &str, item_id: &str, additional_days: i64,
                 as_of: NaiveDate) -> LibraryResult<bool> {
        if additional_days < 0 {
            return Err(LibraryError::invalid_argument(
                format!("additional_days must not be negative: {}", additional_days).as_str()));
        }
        let b = lookup("borrower", &self.borrower_index, borrower_id)?;
        lookup("item", &self.item_index, item_id)?;
        if !self.borrowers[b].holds(item_id) {
            debug!(borrower_id, item_id, "renew refused, item not held");
            return Ok(false);
        }
        let Some(r) = self.first_open(borrower_id, item_id) else {
            return Ok(false);
        };
        self.records[r].extend_due_date(additional_days)?;
        let record = &self.records[r];
        info!(borrower_id, item_id, additional_days, due_date = %record.due_date(), "loan renewed");
        self.publish(DomainEvent::updated("loan_renewed", "loans", record.record_id.as_str(),
                                          &loan_metadata(record), record, as_of));
        Ok(true)
    }

    /// Borrows each item in order and reports one outcome per item. Availability is
    /// checked before the limit; every success gets a generated record id and is due
    /// `borrow_days` after `as_of`. Unknown ids and an unrepresentable due date fail the
    /// whole call before any borrow.
    pub fn borrow_many(&mut self, borrower_id: &str, item_ids: &[&str], borrow_days: i64,
                       as_of: NaiveDate) -> LibraryResult<Vec<BorrowOutcome>> {
        let b = lookup("borrower", &self.borrower_index, borrower_id)?;
        let positions = item_ids.iter()
            .map(|id| lookup("item", &self.item_index, id))
            .collect::<LibraryResult<Vec<usize>>>()?;
        let due_date = add_days(as_of, borrow_days)?;
        let mut outcomes = Vec::with_capacity(item_ids.len());
        for (item_id, i) in item_ids.iter().zip(positions) {
            let borrower = &self.borrowers[b];
            let outcome = if !self.items[i].is_available() {
                BorrowOutcome::Unavailable
            } else if borrower.borrowed_count() >= borrower.max_borrow_limit() {
                BorrowOutcome::LimitReached
            } else {
                let record_id = format!("R-{}-{}-{}", borrower_id, item_id, self.records.len() + 1);
                match self.borrow(borrower_id, item_id, record_id.as_str(), as_of, due_date) {
                    Ok(true) => BorrowOutcome::Success,
                    Ok(false) => BorrowOutcome::Failed,
                    Err(err) => {
                        warn!(borrower_id, item_id, error = %err, "batch borrow failed");
                        BorrowOutcome::Failed
                    }
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    pub fn available_items(&self) -> Vec<&CatalogItem> {
        self.items.iter().filter(|item| item.is_available()).collect()
    }

    pub fn overdue_records(&self, as_of: NaiveDate) -> Vec<&LoanRecord> {
        self.records.iter().filter(|record| record.is_open() && record.is_overdue(as_of)).collect()
    }

    /// Sums the late fees of open overdue records per borrower id. Borrowers with
    /// nothing overdue are left out rather than mapped to zero.
    pub fn aggregate_overdue_fees(&self, as_of: NaiveDate) -> HashMap<String, f64> {
        let mut fees: HashMap<String, f64> = HashMap::new();
        for record in self.overdue_records(as_of) {
            *fees.entry(record.borrower_id.to_string()).or_insert(0.0) += record.late_fee(as_of);
        }
        fees
    }

    pub fn find_by_title(&self, term: &str) -> Vec<&CatalogItem> {
        let needle = term.to_lowercase();
        let found: Vec<&CatalogItem> = self.items.iter()
            .filter(|item| item.title.to_lowercase().contains(needle.as_str()))
            .collect();
        if found.is_empty() {
            debug!(term, "no items found");
        }
        found
    }

    fn first_open(&self, borrower_id: &str, item_id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.is_open() && record.is_for(borrower_id, item_id))
    }

    fn publish_closed(&self, r: usize, as_of: NaiveDate) {
        let record = &self.records[r];
        self.publish(DomainEvent::closed("item_returned", "loans", record.record_id.as_str(),
                                         &loan_metadata(record), record, as_of));
    }

    // A failed publish is logged; the ledger transition it describes stays committed.
    fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let res = event.map_err(LibraryError::from)
            .and_then(|event| self.events_publisher.publish(&event));
        if let Err(err) = res {
            warn!(error = %err, "failed to publish domain event");
        }
    }
}

impl Display for Ledger {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Library{{name='{}', items={}, borrowers={}, records={}}}",
               self.name(), self.items.len(), self.borrowers.len(), self.records.len())
    }
}
