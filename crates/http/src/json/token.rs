//! Json tokenizer.
//!
//! Produces borrowed tokens out of the input string. String tokens are passed through
//! raw: the text between the quotes is returned as is, and a backslash only prevents the
//! following byte from terminating the string.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    String,
    Number,
    True,
    False,
    Null,

    Illegal,
    UnclosedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind,
    /// For strings, the bytes between the quotes; for unclosed strings, everything from the
    /// opening quote to the end of input.
    pub(crate) text: &'a str,
    pub(crate) offset: usize,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
}

#[inline]
fn is_delimiter(byte: u8) -> bool {
    is_whitespace(byte) || matches!(byte, b'[' | b']' | b'{' | b'}' | b',' | b':' | b'"')
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns `None` once only whitespace is left.
    pub(crate) fn next_token(&mut self) -> Option<Token<'a>> {
        let bytes = self.input.as_bytes();

        let start = self.position + bytes[self.position..].iter().take_while(|b| is_whitespace(**b)).count();
        if start >= bytes.len() {
            self.position = bytes.len();
            return None;
        }

        let kind = match bytes[start] {
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'"' => return Some(self.string_token(start)),
            _ => return Some(self.bare_token(start)),
        };

        self.position = start + 1;
        Some(Token { kind, text: &self.input[start..=start], offset: start })
    }

    pub(crate) fn peek_token(&self) -> Option<Token<'a>> {
        let mut lookahead = *self;
        lookahead.next_token()
    }

    /// A run of bytes up to the next whitespace or structural byte.
    fn bare_token(&mut self, start: usize) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let end = start + bytes[start..].iter().take_while(|b| !is_delimiter(**b)).count();
        let text = &self.input[start..end];
        self.position = end;
        Token { kind: classify(text), text, offset: start }
    }

    fn string_token(&mut self, quote: usize) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let mut index = quote + 1;

        while index < bytes.len() {
            match bytes[index] {
                b'"' => {
                    self.position = index + 1;
                    return Token { kind: TokenKind::String, text: &self.input[quote + 1..index], offset: quote };
                }
                b'\\' => index += 2,
                _ => index += 1,
            }
        }

        self.position = bytes.len();
        Token { kind: TokenKind::UnclosedString, text: &self.input[quote..], offset: quote }
    }
}

fn classify(text: &str) -> TokenKind {
    match text {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        _ if is_number(text.as_bytes()) => TokenKind::Number,
        _ => TokenKind::Illegal,
    }
}

/// `-?digits(.digits)?([eE][+-]?digits)?`
fn is_number(text: &[u8]) -> bool {
    fn digits(text: &[u8], from: usize) -> usize {
        text[from..].iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let mut index = usize::from(text.first() == Some(&b'-'));

    let integral = digits(text, index);
    if integral == 0 {
        return false;
    }
    index += integral;

    if text.get(index) == Some(&b'.') {
        let fraction = digits(text, index + 1);
        if fraction == 0 {
            return false;
        }
        index += 1 + fraction;
    }

    if matches!(text.get(index), Some(b'e' | b'E')) {
        index += 1;
        if matches!(text.get(index), Some(b'+' | b'-')) {
            index += 1;
        }
        let exponent = digits(text, index);
        if exponent == 0 {
            return false;
        }
        index += exponent;
    }

    index == text.len()
}
