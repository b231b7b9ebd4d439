pub mod report;
pub mod service;

pub use service::LibraryStatistics;
