//! Recursive-descent parser producing a `serde_json::Value` tree.

use logos::Logos;
use serde_json::{Map, Number, Value};
use std::ops::Range;

use super::error::SyntaxError;
use super::lexer::Token;

/// Nesting limit for objects and arrays
const MAX_DEPTH: usize = 64;

/// Parse an object-literal document into a JSON value
///
/// The document root must be an object. Key order is preserved and duplicate
/// keys within one object are rejected.
pub fn parse(source: &str) -> Result<Value, SyntaxError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut parser = Parser::new(source)?;
    parser.parse_document()
}

/// Byte offsets of line starts, for turning spans into line/column pairs
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line and column (in characters) of a byte offset
    fn locate(&self, source: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(source.len());
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = source
            .get(line_start..offset)
            .map_or(1, |prefix| prefix.chars().count() + 1);
        (line, column)
    }
}

struct Parser<'src> {
    source: &'src str,
    lines: LineIndex,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Result<Self, SyntaxError> {
        let lines = LineIndex::new(source);
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(source);
        while let Some(token) = lexer.next() {
            let span = lexer.span();
            match token {
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    let message = describe_lex_error(&source[span.start..]);
                    let (line, column) = lines.locate(source, span.start);
                    return Err(SyntaxError::new(line, column, message));
                }
            }
        }
        Ok(Self {
            source,
            lines,
            tokens,
            pos: 0,
        })
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> SyntaxError {
        let (line, column) = self.lines.locate(self.source, offset);
        SyntaxError::new(line, column, message)
    }

    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self, context: &str) -> Result<(Token<'src>, Range<usize>), SyntaxError> {
        match self.tokens.get(self.pos) {
            Some(entry) => {
                self.pos += 1;
                Ok(entry.clone())
            }
            None => Err(self.error_at(
                self.source.len(),
                format!("unexpected end of input {context}"),
            )),
        }
    }

    fn parse_document(&mut self) -> Result<Value, SyntaxError> {
        match self.peek() {
            Some((Token::LBrace, _)) => {}
            Some((token, span)) => {
                return Err(self.error_at(
                    span.start,
                    format!("document root must be an object, found {}", token.describe()),
                ));
            }
            None => return Err(self.error_at(0, "empty document")),
        }

        let root = self.parse_value(0)?;

        if let Some((token, span)) = self.peek() {
            return Err(self.error_at(
                span.start,
                format!("unexpected {} after the document root", token.describe()),
            ));
        }
        Ok(root)
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, SyntaxError> {
        let (token, span) = self.next_token("while reading a value")?;
        if depth > MAX_DEPTH {
            return Err(self.error_at(span.start, "document is nested too deeply"));
        }

        match token {
            Token::LBrace => self.parse_object(depth),
            Token::LBracket => self.parse_array(depth),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Null => Ok(Value::Null),
            Token::Number(text) => parse_number(text)
                .map(Value::Number)
                .ok_or_else(|| self.error_at(span.start, format!("number {text} is out of range"))),
            Token::DoubleQuoted(text) | Token::SingleQuoted(text) => {
                unescape(text).map(Value::String).map_err(|(offset, message)| {
                    self.error_at(span.start + offset, message)
                })
            }
            Token::Ident(name) => Err(self.error_at(
                span.start,
                format!("unexpected identifier `{name}`, string values must be quoted"),
            )),
            other => Err(self.error_at(
                span.start,
                format!("expected a value, found {}", other.describe()),
            )),
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, SyntaxError> {
        let mut map = Map::new();
        loop {
            let (token, span) = self.next_token("inside an object")?;
            let key = match token {
                Token::RBrace => break,
                Token::Ident(name) => name.to_string(),
                Token::True => "true".to_string(),
                Token::False => "false".to_string(),
                Token::Null => "null".to_string(),
                Token::DoubleQuoted(text) | Token::SingleQuoted(text) => unescape(text)
                    .map_err(|(offset, message)| self.error_at(span.start + offset, message))?,
                other => {
                    return Err(self.error_at(
                        span.start,
                        format!("expected an object key or '}}', found {}", other.describe()),
                    ));
                }
            };

            let (token, colon_span) = self.next_token("after an object key")?;
            if token != Token::Colon {
                return Err(self.error_at(
                    colon_span.start,
                    format!("expected ':' after key `{key}`, found {}", token.describe()),
                ));
            }

            let value = self.parse_value(depth + 1)?;
            if map.contains_key(&key) {
                return Err(self.error_at(span.start, format!("duplicate key `{key}`")));
            }
            map.insert(key, value);

            let (token, span) = self.next_token("inside an object")?;
            match token {
                Token::Comma => {}
                Token::RBrace => break,
                other => {
                    return Err(self.error_at(
                        span.start,
                        format!("expected ',' or '}}', found {}", other.describe()),
                    ));
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, SyntaxError> {
        let mut items = Vec::new();
        loop {
            if matches!(self.peek(), Some((Token::RBracket, _))) {
                self.pos += 1;
                break;
            }
            items.push(self.parse_value(depth + 1)?);

            let (token, span) = self.next_token("inside an array")?;
            match token {
                Token::Comma => {}
                Token::RBracket => break,
                other => {
                    return Err(self.error_at(
                        span.start,
                        format!("expected ',' or ']', found {}", other.describe()),
                    ));
                }
            }
        }
        Ok(Value::Array(items))
    }
}

fn describe_lex_error(rest: &str) -> String {
    if rest.starts_with('"') || rest.starts_with('\'') {
        "unterminated string literal".to_string()
    } else if rest.starts_with("/*") {
        "unterminated block comment".to_string()
    } else {
        match rest.chars().next() {
            Some(c) => format!("unexpected character {c:?}"),
            None => "unexpected end of input".to_string(),
        }
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.strip_prefix('+').unwrap_or(text);
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(int) = text.parse::<i64>() {
            return Some(Number::from(int));
        }
        if let Ok(uint) = text.parse::<u64>() {
            return Some(Number::from(uint));
        }
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Decode a quoted literal, returning the byte offset of any bad escape
fn unescape(quoted: &str) -> Result<String, (usize, String)> {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let offset = i + 1;
        let Some((_, escaped)) = chars.next() else {
            return Err((offset, "dangling escape".to_string()));
        };
        match escaped {
            '"' | '\'' | '\\' | '/' => out.push(escaped),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            'u' => {
                let high = read_hex4(&mut chars).ok_or((offset, "invalid \\u escape".to_string()))?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    let low = match (chars.next(), chars.next()) {
                        (Some((_, '\\')), Some((_, 'u'))) => read_hex4(&mut chars),
                        _ => None,
                    }
                    .filter(|low| (0xDC00..0xE000).contains(low))
                    .ok_or((offset, "unpaired surrogate in \\u escape".to_string()))?;
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                let decoded =
                    char::from_u32(code).ok_or((offset, "invalid \\u escape".to_string()))?;
                out.push(decoded);
            }
            other => return Err((offset, format!("invalid escape sequence \\{other}"))),
        }
    }
    Ok(out)
}

fn read_hex4(chars: &mut impl Iterator<Item = (usize, char)>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}
