//! Tokenizer for the object-literal configuration format.
//!
//! Comments and whitespace are skipped by the lexer. Literal tokens borrow
//! their text from the source; unescaping and number conversion happen in
//! the parser, which knows where to report failures.

use logos::{FilterResult, Lexer, Logos};

/// Object-literal token
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip line comments
pub enum Token<'src> {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    /// Never emitted, block comments are skipped by the callback
    #[token("/*", skip_block_comment)]
    BlockComment,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    /// Bare object key
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),

    /// Numeric literal, sign included
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    /// Double-quoted string, quotes included
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice())]
    DoubleQuoted(&'src str),

    /// Single-quoted string, quotes included
    #[regex(r"'([^'\\\n]|\\.)*'", |lex| lex.slice())]
    SingleQuoted(&'src str),
}

/// Consume everything up to and including the closing `*/`
fn skip_block_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(()),
    }
}

impl Token<'_> {
    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Comma => "','".to_string(),
            Self::True => "'true'".to_string(),
            Self::False => "'false'".to_string(),
            Self::Null => "'null'".to_string(),
            Self::BlockComment => "block comment".to_string(),
            Self::Ident(name) => format!("identifier `{name}`"),
            Self::Number(text) => format!("number {text}"),
            Self::DoubleQuoted(text) | Self::SingleQuoted(text) => format!("string {text}"),
        }
    }
}
