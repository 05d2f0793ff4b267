pub mod d400_debt_summary;
pub mod d401_sales_report;

pub use d400_debt_summary::ui::DebtSummaryPage;
pub use d401_sales_report::ui::SalesReportPage;
