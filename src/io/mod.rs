pub mod discovery;
pub mod parser;
pub mod reader;
pub mod summary;
pub mod writer;
