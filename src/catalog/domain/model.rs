use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{ItemKind, LibraryError, LibraryResult};

// ItemDetails carries the attributes that only one kind of item has.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ItemDetails {
    Book {
        author: String,
        isbn: String,
        pages: u32,
    },
    Magazine {
        issue_number: u32,
        publisher: String,
    },
}

// CatalogItem abstracts a lendable unit in the library, either a book or a magazine.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub item_id: String,
    pub title: String,
    pub publication_year: i32,
    available: bool,
    pub details: ItemDetails,
}

impl CatalogItem {
    pub fn new(item_id: &str, title: &str, publication_year: i32, details: ItemDetails) -> LibraryResult<Self> {
        LibraryError::require("item_id", item_id)?;
        LibraryError::require("title", title)?;
        Ok(Self {
            item_id: item_id.to_string(),
            title: title.to_string(),
            publication_year,
            available: true,
            details,
        })
    }

    pub fn book(item_id: &str, title: &str, publication_year: i32,
                author: &str, isbn: &str, pages: u32) -> LibraryResult<Self> {
        Self::new(item_id, title, publication_year, ItemDetails::Book {
            author: author.to_string(),
            isbn: isbn.to_string(),
            pages,
        })
    }

    pub fn magazine(item_id: &str, title: &str, publication_year: i32,
                    issue_number: u32, publisher: &str) -> LibraryResult<Self> {
        Self::new(item_id, title, publication_year, ItemDetails::Magazine {
            issue_number,
            publisher: publisher.to_string(),
        })
    }

    pub fn kind(&self) -> ItemKind {
        match self.details {
            ItemDetails::Book { .. } => ItemKind::Book,
            ItemDetails::Magazine { .. } => ItemKind::Magazine,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Takes the item off the shelf.
    ///
    /// Callers are expected to check [`CatalogItem::is_available`] first; borrowing an
    /// item that is already out is an internal consistency fault.
    pub fn mark_borrowed(&mut self) -> LibraryResult<()> {
        if !self.available {
            return Err(LibraryError::invalid_state(
                format!("item {} is already borrowed", self.item_id).as_str(), Some("409".to_string())));
        }
        self.available = false;
        Ok(())
    }

    pub fn mark_returned(&mut self) {
        self.available = true;
    }

    pub fn summary(&self) -> String {
        match &self.details {
            ItemDetails::Book { author, isbn, pages } => {
                format!("Book[id={}, title={}, author={}, isbn={}, pages={}]",
                        self.item_id, self.title, author, isbn, pages)
            }
            ItemDetails::Magazine { issue_number, publisher } => {
                format!("Magazine[id={}, title={}, issue={}, publisher={}]",
                        self.item_id, self.title, issue_number, publisher)
            }
        }
    }
}

impl Identifiable for CatalogItem {
    fn id(&self) -> String {
        self.item_id.to_string()
    }
}
