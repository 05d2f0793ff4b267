pub mod dto;
pub mod sheet;

pub use dto::{default_sort, DebtSummary};
pub use sheet::{debt_summary_file_name, debt_summary_sheet, receipt_file_name, receipt_sheet};
