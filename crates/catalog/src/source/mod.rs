pub mod contentful;
