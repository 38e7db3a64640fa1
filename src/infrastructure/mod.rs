//! Infrastructure layer module
//!
//! This module contains the adapters between documents on disk and the domain:
//! - Object-literal document format (lexer, parser, writer)
//! - Configuration management (document loader, schema, tool settings)
//! - Logging infrastructure

pub mod config;
pub mod literal;
pub mod logging;
