pub mod dto;
pub mod sheet;

pub use dto::{default_sales_sort, AgentSales, RatioTier, SalesSummary, SalesTotals};
pub use sheet::{sales_report_file_name, sales_report_sheet};
