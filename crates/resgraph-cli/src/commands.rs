pub mod build;
pub mod table;
