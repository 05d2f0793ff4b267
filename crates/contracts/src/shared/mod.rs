pub mod aggregate;
pub mod api;
pub mod collation;
pub mod debt_band;
pub mod paging;
pub mod serde_utils;
pub mod sheet;
pub mod sort;
pub mod summary_view;
