pub mod model;

pub use model::{CatalogItem, ItemDetails};
