//! Recursive descent json parser driven by exactly one token of lookahead.

use crate::arena::{Arena, ArenaVec};
use crate::json::token::{Token, TokenKind, Tokenizer};
use crate::json::{JsonError, JsonObject, Value};

/// Maximum nesting of arrays and objects; deeper input is rejected instead of
/// exhausting the stack.
pub const MAX_DEPTH: usize = 128;

/// Parses a single json value; only whitespace may follow it.
///
/// Array elements and object slot tables are allocated in `arena`, strings stay views
/// into `input`.
///
/// # Errors
///
/// Any malformed structure is reported as a [`JsonError`], and a tree that does not fit
/// in the arena as [`JsonError::Arena`].
///
/// # Panics
///
/// Panics when an object contains the same key twice, see [`JsonObject::insert`].
pub fn parse<'a>(arena: &'a Arena, input: &'a str) -> Result<Value<'a>, JsonError> {
    let mut parser = Parser { arena, tokens: Tokenizer::new(input), depth: 0 };
    let value = parser.parse_value()?;

    match parser.tokens.next_token() {
        Some(token) => Err(JsonError::TrailingCharacters { offset: token.offset }),
        None => Ok(value),
    }
}

/// Like [`parse`], for raw bytes such as a request body.
pub fn parse_bytes<'a>(arena: &'a Arena, input: &'a [u8]) -> Result<Value<'a>, JsonError> {
    let input = std::str::from_utf8(input).map_err(|_e| JsonError::InvalidUtf8)?;
    parse(arena, input)
}

struct Parser<'a> {
    arena: &'a Arena,
    tokens: Tokenizer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn next(&mut self, expected: &'static str) -> Result<Token<'a>, JsonError> {
        self.tokens.next_token().ok_or(JsonError::UnexpectedEnd { expected })
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.peek_token().map(|token| token.kind)
    }

    fn parse_value(&mut self) -> Result<Value<'a>, JsonError> {
        let token = self.next("a value")?;

        match token.kind {
            TokenKind::Number => parse_number(token.text).map(Value::Number),
            TokenKind::String => Ok(Value::String(token.text)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::LBracket => self.nested(Self::parse_array),
            TokenKind::LBrace => self.nested(Self::parse_object),
            TokenKind::UnclosedString => Err(JsonError::UnclosedString { offset: token.offset }),
            TokenKind::Illegal => Err(JsonError::illegal_token(token.text, token.offset)),
            TokenKind::RBracket | TokenKind::RBrace | TokenKind::Comma | TokenKind::Colon => {
                Err(JsonError::unexpected_token(token.text, token.offset, "a value"))
            }
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value<'a>, JsonError>) -> Result<Value<'a>, JsonError> {
        if self.depth >= MAX_DEPTH {
            return Err(JsonError::TooDeep { max_depth: MAX_DEPTH });
        }

        self.depth += 1;
        let value = parse(self)?;
        self.depth -= 1;
        Ok(value)
    }

    /// Called right after the opening `[`.
    fn parse_array(&mut self) -> Result<Value<'a>, JsonError> {
        if self.peek_kind() == Some(TokenKind::RBracket) {
            self.next("`]`")?;
            return Ok(Value::Array(&[]));
        }

        let mut elements = ArenaVec::new_in(self.arena);
        loop {
            elements.push(self.parse_value()?)?;

            let token = self.next("`,` or `]`")?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RBracket => return Ok(Value::Array(elements.into_slice())),
                _ => return Err(JsonError::unexpected_token(token.text, token.offset, "`,` or `]`")),
            }
        }
    }

    /// Called right after the opening `{`.
    fn parse_object(&mut self) -> Result<Value<'a>, JsonError> {
        let mut object = JsonObject::new_in(self.arena);

        if self.peek_kind() == Some(TokenKind::RBrace) {
            self.next("`}`")?;
            return Ok(Value::Object(object));
        }

        loop {
            let token = self.next("an object key")?;
            let key = match token.kind {
                TokenKind::String => token.text,
                TokenKind::UnclosedString => return Err(JsonError::UnclosedString { offset: token.offset }),
                _ => return Err(JsonError::unexpected_token(token.text, token.offset, "an object key")),
            };

            let token = self.next("`:`")?;
            if token.kind != TokenKind::Colon {
                return Err(JsonError::unexpected_token(token.text, token.offset, "`:`"));
            }

            let value = self.parse_value()?;
            object.insert(key, value)?;

            let token = self.next("`,` or `}`")?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RBrace => return Ok(Value::Object(object)),
                _ => return Err(JsonError::unexpected_token(token.text, token.offset, "`,` or `}`")),
            }
        }
    }
}

fn parse_number(text: &str) -> Result<f64, JsonError> {
    text.parse::<f64>().map_err(|_e| JsonError::InvalidNumber { text: text.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaError;

    fn arena() -> Arena {
        Arena::new(64 * 1024)
    }

    #[test]
    fn scalars() {
        let arena = arena();
        assert_eq!(parse(&arena, "12").unwrap(), Value::Number(12.0));
        assert_eq!(parse(&arena, " -7 ").unwrap(), Value::Number(-7.0));
        assert_eq!(parse(&arena, "\"hi\"").unwrap(), Value::String("hi"));
        assert_eq!(parse(&arena, "true").unwrap(), Value::Bool(true));
        assert_eq!(parse(&arena, "false").unwrap(), Value::Bool(false));
        assert_eq!(parse(&arena, "null").unwrap(), Value::Null);
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn fractional_and_exponent_numbers() {
        let arena = arena();
        assert_eq!(parse(&arena, "3.14").unwrap(), Value::Number(3.14));
        assert_eq!(parse(&arena, "-0.5").unwrap(), Value::Number(-0.5));
        assert_eq!(parse(&arena, "1e3").unwrap(), Value::Number(1000.0));
        let quarter = [Value::Number(0.25)];
        assert_eq!(parse(&arena, "[2.5E-1]").unwrap(), Value::Array(&quarter));
        assert!(matches!(parse(&arena, "3."), Err(JsonError::IllegalToken { .. })));
    }

    #[test]
    fn arrays() {
        let arena = arena();
        assert_eq!(parse(&arena, "[]").unwrap(), Value::Array(&[]));
        assert_eq!(parse(&arena, "[ ]").unwrap(), Value::Array(&[]));

        let inner = [Value::Null];
        let expected = [
            Value::Number(1.0),
            Value::String("two"),
            Value::Array(&inner),
            Value::Object(JsonObject::new_in(&arena)),
        ];
        assert_eq!(parse(&arena, r#"[1, "two", [null], {}]"#).unwrap(), Value::Array(&expected));
    }

    #[test]
    fn objects() {
        let arena = arena();
        let value =
            parse(&arena, r#"{"Id": "p-1", "Name":"Tracker", "Tags": ["a", "b"], "Meta": {"Stars": 5}}"#).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object.get_str("Id"), Some("p-1"));
        assert_eq!(object.get_str("Name"), Some("Tracker"));
        assert_eq!(object.get("Tags").and_then(Value::as_array).map(<[_]>::len), Some(2));
        assert_eq!(object.get("Meta").and_then(Value::as_object).and_then(|meta| meta.get_u64("Stars")), Some(5));
        assert_eq!(parse(&arena, "{}").unwrap(), Value::Object(JsonObject::new_in(&arena)));
    }

    #[test]
    fn strings_are_not_unescaped() {
        let arena = arena();
        let value = parse(&arena, r#"{"quote": "say \"hi\"\n"}"#).unwrap();
        assert_eq!(value.as_object().unwrap().get_str("quote"), Some(r#"say \"hi\"\n"#));
    }

    #[test]
    fn malformed_structures_fail() {
        let arena = arena();
        assert!(matches!(parse(&arena, ""), Err(JsonError::UnexpectedEnd { .. })));
        assert!(matches!(parse(&arena, "["), Err(JsonError::UnexpectedEnd { .. })));
        assert!(matches!(parse(&arena, "[1"), Err(JsonError::UnexpectedEnd { .. })));
        assert!(matches!(parse(&arena, "[1,]"), Err(JsonError::UnexpectedToken { .. })));
        assert!(matches!(parse(&arena, "[1 2]"), Err(JsonError::UnexpectedToken { .. })));
        assert!(matches!(parse(&arena, r#"{"a" 1}"#), Err(JsonError::UnexpectedToken { expected: "`:`", .. })));
        assert!(matches!(parse(&arena, r#"{"a": 1,}"#), Err(JsonError::UnexpectedToken { .. })));
        assert!(matches!(parse(&arena, r#"{1: 1}"#), Err(JsonError::UnexpectedToken { .. })));
        assert!(matches!(parse(&arena, r#"{"a": 1"#), Err(JsonError::UnexpectedEnd { .. })));
        assert!(matches!(parse(&arena, r#"{"a": }"#), Err(JsonError::UnexpectedToken { .. })));
        assert!(matches!(parse(&arena, r#"{"a: 1}"#), Err(JsonError::UnclosedString { offset: 1 })));
        assert!(matches!(parse(&arena, "nope"), Err(JsonError::IllegalToken { offset: 0, .. })));
        assert!(matches!(parse(&arena, "]"), Err(JsonError::UnexpectedToken { .. })));
    }

    #[test]
    fn trailing_characters_are_rejected() {
        let arena = arena();
        assert_eq!(parse(&arena, "1 2"), Err(JsonError::TrailingCharacters { offset: 2 }));
        assert_eq!(parse(&arena, "{} \n"), Ok(Value::Object(JsonObject::new_in(&arena))));
    }

    #[test]
    fn nesting_is_bounded() {
        let arena = arena();
        let deep = "[".repeat(MAX_DEPTH + 1) + &"]".repeat(MAX_DEPTH + 1);
        assert_eq!(parse(&arena, &deep), Err(JsonError::TooDeep { max_depth: MAX_DEPTH }));

        let fine = "[".repeat(MAX_DEPTH) + &"]".repeat(MAX_DEPTH);
        assert!(parse(&arena, &fine).is_ok());
    }

    #[test]
    fn invalid_utf8_body() {
        let arena = arena();
        assert_eq!(parse_bytes(&arena, b"\"\xff\""), Err(JsonError::InvalidUtf8));
        let expected = [Value::Bool(true)];
        assert_eq!(parse_bytes(&arena, b"[true]"), Ok(Value::Array(&expected)));
    }

    #[test]
    fn large_arrays_run_out_of_arena() {
        let body = "[".to_owned() + &"{},".repeat(100_000) + "{}]";

        let arena = arena();
        let err = parse(&arena, &body).unwrap_err();
        assert!(matches!(err, JsonError::Arena { source: ArenaError::OutOfMemory { .. } }));
        assert!(arena.offset() <= arena.capacity());

        let roomy = Arena::new(16 * 1024 * 1024);
        let value = parse(&roomy, &body).unwrap();
        assert_eq!(value.as_array().map(<[_]>::len), Some(100_001));
    }

    #[test]
    fn object_tables_run_out_of_arena() {
        let arena = Arena::new(512);
        let err = parse(&arena, r#"{"Id": "p-1"}"#).unwrap_err();
        assert!(matches!(err, JsonError::Arena { .. }));
    }

    #[test]
    #[should_panic(expected = "duplicate key `a`")]
    fn duplicate_keys_are_fatal() {
        let arena = arena();
        let _ = parse(&arena, r#"{"a":1,"a":2}"#);
    }
}
