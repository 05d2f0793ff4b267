pub mod d400_debt_summary;
pub mod d401_sales_report;
