pub mod command;
pub mod filter;
pub mod memory;
pub mod query;
