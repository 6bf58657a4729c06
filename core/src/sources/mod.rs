pub mod byte_tables;
pub mod status_codes;

pub use byte_tables::{ByteClassTables, ByteTablesGenerator};
pub use status_codes::{StatusCodeGenerator, StatusCodeRecord};
