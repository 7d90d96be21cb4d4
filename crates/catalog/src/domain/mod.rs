pub mod filter;
pub mod requests;
pub mod response;
pub mod source;
pub mod sync;
