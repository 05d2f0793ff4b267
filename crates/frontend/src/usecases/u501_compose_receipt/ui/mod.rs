pub mod composer;
pub mod lines;

pub use composer::ReceiptComposer;
