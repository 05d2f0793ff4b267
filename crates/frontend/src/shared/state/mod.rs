pub mod catalog_store;
pub mod request_seq;

pub use catalog_store::CatalogStore;
pub use request_seq::{RequestSeq, Ticket};
