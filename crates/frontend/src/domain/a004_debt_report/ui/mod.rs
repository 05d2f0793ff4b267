pub mod detail;
pub mod form;

pub use detail::DebtReportDetail;
pub use form::DebtReportForm;
