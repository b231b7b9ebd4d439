use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    // A required id or field was missing or empty at construction.
    InvalidArgument {
        message: String,
    },
    // An entity was asked to make a transition its current state forbids.
    InvalidState {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn invalid_argument(message: &str) -> LibraryError {
        LibraryError::InvalidArgument { message: message.to_string() }
    }

    pub fn invalid_state(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::InvalidState { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    // Fails with InvalidArgument when a required value is blank.
    pub(crate) fn require(field: &str, value: &str) -> LibraryResult<()> {
        if value.trim().is_empty() {
            Err(LibraryError::invalid_argument(format!("{} must not be empty", field).as_str()))
        } else {
            Ok(())
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<chrono::ParseError> for LibraryError {
    fn from(err: chrono::ParseError) -> Self {
        LibraryError::invalid_argument(
            format!("date parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::InvalidArgument { message } => {
                write!(f, "{}", message)
            }
            LibraryError::InvalidState { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for ledger operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum ItemKind {
    Book,
    Magazine,
}

impl TryFrom<String> for ItemKind {
    type Error = LibraryError;

    fn try_from(s: String) -> LibraryResult<Self> {
        match s.as_str() {
            "Book" => Ok(ItemKind::Book),
            "Magazine" => Ok(ItemKind::Magazine),
            _ => Err(LibraryError::invalid_argument(format!("unknown item kind: {}", s).as_str())),
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ItemKind::Book => write!(f, "Book"),
            ItemKind::Magazine => write!(f, "Magazine"),
        }
    }
}

pub const STUDENT_BORROW_LIMIT: usize = 3;
pub const PROFESSOR_BORROW_LIMIT: usize = 10;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum BorrowerCategory {
    Student,
    Professor,
}

impl BorrowerCategory {
    pub fn max_borrow_limit(&self) -> usize {
        match self {
            BorrowerCategory::Student => STUDENT_BORROW_LIMIT,
            BorrowerCategory::Professor => PROFESSOR_BORROW_LIMIT,
        }
    }
}

impl TryFrom<String> for BorrowerCategory {
    type Error = LibraryError;

    fn try_from(s: String) -> LibraryResult<Self> {
        match s.as_str() {
            "Student" => Ok(BorrowerCategory::Student),
            "Professor" => Ok(BorrowerCategory::Professor),
            _ => Err(LibraryError::invalid_argument(format!("unknown borrower category: {}", s).as_str())),
        }
    }
}

impl Display for BorrowerCategory {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BorrowerCategory::Student => write!(f, "Student"),
            BorrowerCategory::Professor => write!(f, "Professor"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Open,
    Closed,
}

impl TryFrom<String> for LoanStatus {
    type Error = LibraryError;

    fn try_from(s: String) -> LibraryResult<Self> {
        match s.as_str() {
            "Open" => Ok(LoanStatus::Open),
            "Closed" => Ok(LoanStatus::Closed),
            _ => Err(LibraryError::invalid_argument(format!("unknown loan status: {}", s).as_str())),
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Open => write!(f, "Open"),
            LoanStatus::Closed => write!(f, "Closed"),
        }
    }
}

// BorrowOutcome classifies one entry of a batch borrow.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BorrowOutcome {
    Success,
    Unavailable,
    LimitReached,
    // Both pre-checks passed but the borrow itself was refused.
    Failed,
}

impl TryFrom<String> for BorrowOutcome {
    type Error = LibraryError;

    fn try_from(s: String) -> LibraryResult<Self> {
        match s.as_str() {
            "SUCCESS" => Ok(BorrowOutcome::Success),
            "UNAVAILABLE" => Ok(BorrowOutcome::Unavailable),
            "LIMIT_REACHED" => Ok(BorrowOutcome::LimitReached),
            "FAILED" => Ok(BorrowOutcome::Failed),
            _ => Err(LibraryError::invalid_argument(format!("unknown borrow outcome: {}", s).as_str())),
        }
    }
}

impl Display for BorrowOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BorrowOutcome::Success => write!(f, "SUCCESS"),
            BorrowOutcome::Unavailable => write!(f, "UNAVAILABLE"),
            BorrowOutcome::LimitReached => write!(f, "LIMIT_REACHED"),
            BorrowOutcome::Failed => write!(f, "FAILED"),
        }
    }
}
