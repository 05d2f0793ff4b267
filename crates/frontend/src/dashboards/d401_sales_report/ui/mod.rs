pub mod page;

pub use page::SalesReportPage;
