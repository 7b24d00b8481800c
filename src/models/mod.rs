pub mod category;
pub mod filter;
pub mod form;
pub mod transaction;
