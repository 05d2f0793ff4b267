pub mod page;
pub mod table;

pub use page::DebtSummaryPage;
pub use table::DebtSummaryTable;
