//! HTML parser module for tree construction.

/// HTML parser implementation.
pub mod core;

pub use self::core::{HTMLParser, InsertionMode, print_tree};
