pub mod product;
pub mod report;
pub mod source;
pub mod sync;
