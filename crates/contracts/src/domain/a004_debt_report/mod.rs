pub mod aggregate;
pub mod form;

pub use aggregate::{DebtRecord, DebtReportDto, DebtReportKey, DebtTotals};
pub use form::{parse_amount, AmountField, DebtFormError, DebtReportDraft};
