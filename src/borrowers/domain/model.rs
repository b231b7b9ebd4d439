use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogItem;
use crate::core::domain::Identifiable;
use crate::core::library::{BorrowerCategory, LibraryError, LibraryResult};

// BorrowerProfile holds the category-specific attributes of a borrower.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum BorrowerProfile {
    Student {
        student_id: String,
    },
    Professor {
        department: String,
    },
}

impl BorrowerProfile {
    pub fn category(&self) -> BorrowerCategory {
        match self {
            BorrowerProfile::Student { .. } => BorrowerCategory::Student,
            BorrowerProfile::Professor { .. } => BorrowerCategory::Professor,
        }
    }
}

// Borrower abstracts a library member. Held items are kept as catalog ids; the
// ledger owns the items themselves.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Borrower {
    pub borrower_id: String,
    pub name: String,
    pub email: String,
    pub profile: BorrowerProfile,
    held_items: Vec<String>,
}

impl Borrower {
    pub fn new(borrower_id: &str, name: &str, email: &str, profile: BorrowerProfile) -> LibraryResult<Self> {
        LibraryError::require("borrower_id", borrower_id)?;
        LibraryError::require("name", name)?;
        Ok(Self {
            borrower_id: borrower_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            profile,
            held_items: vec![],
        })
    }

    pub fn student(borrower_id: &str, name: &str, email: &str, student_id: &str) -> LibraryResult<Self> {
        Self::new(borrower_id, name, email, BorrowerProfile::Student { student_id: student_id.to_string() })
    }

    pub fn professor(borrower_id: &str, name: &str, email: &str, department: &str) -> LibraryResult<Self> {
        Self::new(borrower_id, name, email, BorrowerProfile::Professor { department: department.to_string() })
    }

    pub fn category(&self) -> BorrowerCategory {
        self.profile.category()
    }

    pub fn max_borrow_limit(&self) -> usize {
        self.category().max_borrow_limit()
    }

    pub fn borrowed_count(&self) -> usize {
        self.held_items.len()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_borrow_limit().saturating_sub(self.borrowed_count())
    }

    pub fn held_items(&self) -> &[String] {
        &self.held_items
    }

    pub fn holds(&self, item_id: &str) -> bool {
        self.held_items.iter().any(|held| held == item_id)
    }

    /// The single gate for lending: refuses when the borrower is at their limit or the
    /// item is out, and leaves both sides untouched in that case.
    pub fn attempt_borrow(&mut self, item: &mut CatalogItem) -> bool {
        if self.borrowed_count() >= self.max_borrow_limit() || !item.is_available() {
            return false;
        }
        if item.mark_borrowed().is_err() {
            return false;
        }
        self.held_items.push(item.item_id.to_string());
        true
    }

    pub fn attempt_return(&mut self, item: &mut CatalogItem) -> bool {
        match self.held_items.iter().position(|held| *held == item.item_id) {
            Some(pos) => {
                item.mark_returned();
                self.held_items.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl Identifiable for Borrower {
    fn id(&self) -> String {
        self.borrower_id.to_string()
    }
}
