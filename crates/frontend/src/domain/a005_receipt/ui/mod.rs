pub mod detail;
pub mod history;

pub use detail::ReceiptDetail;
pub use history::ReceiptHistoryPage;
