//! Folder naming scheme

mod parser;

pub use parser::DefaultNameParser;
