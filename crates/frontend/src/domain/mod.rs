pub mod a001_agent;
pub mod a003_product;
pub mod a004_debt_report;
pub mod a005_receipt;
pub mod a006_parameter;
