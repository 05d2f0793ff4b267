pub mod aggregate;
pub mod history;

pub use aggregate::{
    CreateExportReceiptRequest, CreateImportReceiptRequest, CreatedReceipt, ExportDetailRequest,
    ImportDetailRequest, ReceiptKind, ReceiptLineItem, ReceiptTotals,
};
pub use history::{
    default_history_sort, HistoryTotals, PaymentStatus, ReceiptFilter, StoredLine, StoredReceipt,
    StoredReceiptDto,
};
