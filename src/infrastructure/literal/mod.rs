//! Object-literal document format
//!
//! MARLEY configuration files are JSON with JavaScript conveniences:
//! - `//` and `/* */` comments
//! - bare identifier keys and single-quoted strings
//! - trailing commas
//!
//! `parse` turns such a document into a `serde_json::Value`; `write` renders a
//! value back in the same format.

mod error;
mod lexer;
mod parser;
mod writer;

pub use error::SyntaxError;
pub use lexer::Token;
pub use parser::parse;
pub use writer::write;
