pub mod draft;
pub mod shortfall;

pub use draft::{
    LineItemError, ReceiptDraft, ReceiptHeader, ReceiptHeaderError, ShortfallAdjustment,
};
pub use shortfall::InventoryShortfall;
