//! Circulation ledger for a single library: lending and returning catalog items,
//! overdue detection, late fees and statistics.
//!
//! All time-dependent operations take an explicit reference date, so the ledger never
//! reads the clock itself.

pub mod borrowers;
pub mod catalog;
pub mod core;
pub mod gateway;
pub mod ledger;
pub mod loans;
pub mod statistics;
pub mod utils;
