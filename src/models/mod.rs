mod sale;
mod summary;
pub mod timestamp;

pub use sale::SaleRecord;
pub use summary::{CategorySales, HourlySummary};
