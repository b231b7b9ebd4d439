pub mod model;

pub use model::{LoanRecord, LATE_FEE_PER_DAY};
