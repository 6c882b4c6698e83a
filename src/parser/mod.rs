//! Script parsing: tokenization, statement classification, and
//! shell-flavored document parsing.

pub mod document;
pub mod statement;
pub mod tokenizer;

pub use document::{parse_document, parse_value};
pub use statement::{AdminStatement, Statement};
pub use tokenizer::{argument_text, split_arguments, split_statements};
