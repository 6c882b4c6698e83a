//! Shell-flavored document parsing.
//!
//! Statement arguments are written in Mongo shell syntax, which is looser
//! than JSON: keys may be unquoted, strings may use single quotes, and
//! constructor helpers like `ObjectId(...)` and `ISODate(...)` appear as
//! values. This parser produces BSON directly, character by character,
//! without an intermediate AST.

use bson::{Bson, Document};

use crate::error::{ParseError, Result};

/// Parse shell-flavored text into a BSON document.
///
/// The input must be a single object literal. An empty input yields an
/// empty document, matching the shell's treatment of omitted filters.
pub fn parse_document(input: &str) -> Result<Document> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Document::new());
    }

    match parse_value(trimmed)? {
        Bson::Document(doc) => Ok(doc),
        other => Err(ParseError::InvalidDocument(format!(
            "expected a document, found {}",
            bson_kind(&other)
        ))
        .into()),
    }
}

/// Parse shell-flavored text into a single BSON value.
pub fn parse_value(input: &str) -> Result<Bson> {
    let mut parser = ValueParser::new(input);
    let value = parser.parse()?;
    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(parser.error("trailing characters after value"));
    }
    Ok(value)
}

struct ValueParser {
    input: Vec<char>,
    pos: usize,
}

impl ValueParser {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn parse(&mut self) -> Result<Bson> {
        self.skip_whitespace();

        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') | Some('\'') => self.parse_string().map(Bson::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '$' || c == '_' => self.parse_word(),
            Some(c) => Err(self.error(&format!("unexpected character '{c}'"))),
        }
    }

    fn parse_object(&mut self) -> Result<Bson> {
        self.advance(); // consume '{'
        let mut doc = Document::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.advance();
                    return Ok(Bson::Document(doc));
                }
                None => return Err(self.error("unterminated object")),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            if self.peek() != Some(':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.advance();

            let value = self.parse()?;
            doc.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {}
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Bson> {
        self.advance(); // consume '['
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.advance();
                    return Ok(Bson::Array(items));
                }
                None => return Err(self.error("unterminated array")),
                _ => {}
            }

            items.push(self.parse()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {}
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }
    }

    /// Object keys may be quoted strings or bare identifiers (including
    /// `$` operators and dotted paths).
    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string(),
            Some(c) if c.is_alphanumeric() || c == '$' || c == '_' => {
                let mut key = String::new();
                while let Some(c) = self.peek() {
                    if c.is_alphanumeric() || c == '$' || c == '_' || c == '.' {
                        key.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Ok(key)
            }
            _ => Err(self.error("expected object key")),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self.peek().unwrap_or('"');
        self.advance();

        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c) => c,
                        None => return Err(self.error("unterminated escape")),
                    };
                    value.push(escaped);
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(value);
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    fn parse_number(&mut self) -> Result<Bson> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.advance();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Ok(i) = text.parse::<i64>() {
            if let Ok(i32_val) = i32::try_from(i) {
                return Ok(Bson::Int32(i32_val));
            }
            return Ok(Bson::Int64(i));
        }
        text.parse::<f64>()
            .map(Bson::Double)
            .map_err(|_| self.error(&format!("invalid number '{text}'")))
    }

    /// Bare words: literals (`true`, `false`, `null`) and constructor
    /// helpers (`ObjectId`, `ISODate`, `Date`, `NumberInt`, `NumberLong`).
    fn parse_word(&mut self) -> Result<Bson> {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match word.as_str() {
            "true" => return Ok(Bson::Boolean(true)),
            "false" => return Ok(Bson::Boolean(false)),
            "null" | "undefined" => return Ok(Bson::Null),
            "new" => {
                // `new Date(...)` etc. - parse the constructor that follows.
                self.skip_whitespace();
                return self.parse_word();
            }
            _ => {}
        }

        self.skip_whitespace();
        if self.peek() != Some('(') {
            return Err(self.error(&format!("unexpected identifier '{word}'")));
        }
        self.advance();
        self.skip_whitespace();

        let arg = if self.peek() == Some(')') {
            None
        } else {
            Some(self.parse()?)
        };
        self.skip_whitespace();
        if self.peek() != Some(')') {
            return Err(self.error(&format!("unterminated call to '{word}'")));
        }
        self.advance();

        self.constructor_to_bson(&word, arg)
    }

    fn constructor_to_bson(&self, name: &str, arg: Option<Bson>) -> Result<Bson> {
        match name {
            "ObjectId" => {
                let Some(Bson::String(hex)) = arg else {
                    return Err(self.error("ObjectId requires a hex string argument"));
                };
                bson::oid::ObjectId::parse_str(&hex)
                    .map(Bson::ObjectId)
                    .map_err(|e| self.error(&format!("invalid ObjectId: {e}")))
            }
            "ISODate" | "Date" => match arg {
                None => Ok(Bson::DateTime(bson::DateTime::now())),
                Some(Bson::String(s)) => bson::DateTime::parse_rfc3339_str(&s)
                    .map(Bson::DateTime)
                    .map_err(|e| self.error(&format!("invalid date: {e}"))),
                Some(_) => Err(self.error(&format!("{name} requires a string argument"))),
            },
            "NumberInt" => match arg {
                Some(Bson::Int32(i)) => Ok(Bson::Int32(i)),
                Some(Bson::Int64(i)) => i32::try_from(i)
                    .map(Bson::Int32)
                    .map_err(|_| self.error("NumberInt value out of range")),
                Some(Bson::String(s)) => s
                    .parse::<i32>()
                    .map(Bson::Int32)
                    .map_err(|_| self.error("NumberInt requires an integer")),
                _ => Err(self.error("NumberInt requires an integer argument")),
            },
            "NumberLong" => match arg {
                Some(Bson::Int32(i)) => Ok(Bson::Int64(i64::from(i))),
                Some(Bson::Int64(i)) => Ok(Bson::Int64(i)),
                Some(Bson::String(s)) => s
                    .parse::<i64>()
                    .map(Bson::Int64)
                    .map_err(|_| self.error("NumberLong requires an integer")),
                _ => Err(self.error("NumberLong requires an integer argument")),
            },
            other => Err(self.error(&format!("unknown constructor '{other}'"))),
        }
    }

    fn error(&self, message: &str) -> crate::error::MongoscriptError {
        ParseError::SyntaxError(format!("{message} at position {}", self.pos)).into()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}

fn bson_kind(value: &Bson) -> &'static str {
    match value {
        Bson::Array(_) => "an array",
        Bson::String(_) => "a string",
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => "a number",
        Bson::Boolean(_) => "a boolean",
        Bson::Null => "null",
        _ => "a non-document value",
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn test_empty_input_is_empty_document() {
        assert_eq!(parse_document("").unwrap(), Document::new());
        assert_eq!(parse_document("   ").unwrap(), Document::new());
    }

    #[test]
    fn test_quoted_keys() {
        let doc = parse_document(r#"{ "name": "alice", "age": 30 }"#).unwrap();
        assert_eq!(doc, doc! { "name": "alice", "age": 30 });
    }

    #[test]
    fn test_unquoted_keys_and_single_quotes() {
        let doc = parse_document("{ ping: 1, msg: 'hi' }").unwrap();
        assert_eq!(doc, doc! { "ping": 1, "msg": "hi" });
    }

    #[test]
    fn test_nested_documents_and_arrays() {
        let doc = parse_document(r#"{ "$set": { "tags": ["a", "b"], "n": -2.5 } }"#).unwrap();
        assert_eq!(
            doc,
            doc! { "$set": { "tags": ["a", "b"], "n": -2.5 } }
        );
    }

    #[test]
    fn test_literals() {
        let doc = parse_document("{ a: true, b: false, c: null }").unwrap();
        assert_eq!(doc, doc! { "a": true, "b": false, "c": Bson::Null });
    }

    #[test]
    fn test_object_id_constructor() {
        let doc = parse_document(r#"{ _id: ObjectId("507f1f77bcf86cd799439011") }"#).unwrap();
        let Bson::ObjectId(oid) = doc.get("_id").unwrap() else {
            panic!("expected ObjectId");
        };
        assert_eq!(oid.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_iso_date_constructor() {
        let doc = parse_document(r#"{ at: ISODate("2024-01-15T00:00:00Z") }"#).unwrap();
        assert!(matches!(doc.get("at"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn test_number_helpers() {
        let doc = parse_document("{ a: NumberInt(7), b: NumberLong(9000000000) }").unwrap();
        assert_eq!(doc.get("a"), Some(&Bson::Int32(7)));
        assert_eq!(doc.get("b"), Some(&Bson::Int64(9_000_000_000)));
    }

    #[test]
    fn test_large_integer_widens() {
        let doc = parse_document("{ n: 9000000000 }").unwrap();
        assert_eq!(doc.get("n"), Some(&Bson::Int64(9_000_000_000)));
    }

    #[test]
    fn test_malformed_document_fails() {
        assert!(parse_document("{").is_err());
        assert!(parse_document("{ a: }").is_err());
        assert!(parse_document(r#"{ "a" 1 }"#).is_err());
    }

    #[test]
    fn test_array_value_rejected_as_document() {
        let err = parse_document("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("expected a document"));
    }

    #[test]
    fn test_parse_value_array() {
        let value = parse_value(r#"[{ "a": 1 }, { "a": 2 }]"#).unwrap();
        let Bson::Array(items) = value else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_unknown_constructor_fails() {
        assert!(parse_document(r#"{ a: UUID("x") }"#).is_err());
    }
}
