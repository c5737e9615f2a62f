//! Library index: file format and directory layout

mod parser;
mod tree;

pub use parser::parse_library;
pub use tree::{LibraryFile, LibraryTree};
