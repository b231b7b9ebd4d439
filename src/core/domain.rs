use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

// Identifiable defines common traits that can be shared by ledger entities
pub trait Identifiable {
    fn id(&self) -> String;
}

pub const MAX_LOAN_DAYS: i64 = 3650;

// Configuration abstracts config options for the circulation ledger
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub library_name: String,
    #[serde(default = "default_loan_days")]
    pub default_loan_days: i64,
    #[serde(default = "default_urgent_after_days")]
    pub urgent_after_days: i64,
}

fn default_loan_days() -> i64 {
    14
}

fn default_urgent_after_days() -> i64 {
    7
}

impl Configuration {
    pub fn new(library_name: &str) -> Self {
        Configuration {
            library_name: library_name.to_string(),
            default_loan_days: default_loan_days(),
            urgent_after_days: default_urgent_after_days(),
        }
    }

    pub fn load(path: &Path) -> LibraryResult<Self> {
        let data = fs::read_to_string(path)?;
        let config: Configuration = serde_json::from_str(data.as_str())?;
        LibraryError::require("library_name", config.library_name.as_str())?;
        if !(0..=MAX_LOAN_DAYS).contains(&config.default_loan_days) {
            return Err(LibraryError::invalid_argument(
                format!("default_loan_days must be between 0 and {}: {}", MAX_LOAN_DAYS,
                        config.default_loan_days).as_str()));
        }
        if config.urgent_after_days < 0 {
            return Err(LibraryError::invalid_argument(
                format!("urgent_after_days must not be negative: {}", config.urgent_after_days).as_str()));
        }
        Ok(config)
    }
}
