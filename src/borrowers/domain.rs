pub mod model;

pub use model::{Borrower, BorrowerProfile};
