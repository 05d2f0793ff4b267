pub mod month_selector;
pub mod pagination_controls;
pub mod stat_card;
pub mod table;
pub mod table_totals_row;
