pub mod u501_compose_receipt;
