//! Message handling - Parsing of incoming text

pub mod parser;

pub use parser::MessageParser;
