use crate::expression::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),
    Str(String),

    LParen,
    RParen,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    And,
    Or,
    Xor,
    Not,

    Eof,
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lx = Lexer { src: input, pos: 0 };
    let mut out = Vec::new();
    loop {
        lx.skip_whitespace();
        let start = lx.pos;
        let Some(c) = lx.peek() else {
            break;
        };
        let leading_dot = c == b'.' && lx.peek_at(1).is_some_and(|d| d.is_ascii_digit());
        let kind = if c.is_ascii_digit() || leading_dot {
            lx.number()?
        } else if c == b'"' || c == b'\'' {
            let (value, end) = lex_string(input, start, c as char)?;
            lx.pos = end;
            TokenKind::Str(value)
        } else if c.is_ascii_alphabetic() || c == b'_' {
            lx.word()
        } else {
            lx.punct()?
        };
        out.push(Token {
            kind,
            span: Span { start, end: lx.pos },
        });
    }
    let end = input.len();
    out.push(Token {
        kind: TokenKind::Eof,
        span: Span { start: end, end },
    });
    Ok(out)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + ahead).copied()
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let from = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - from
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// `digits [. digits] [e [+-] digits]`, or `. digits [...]`.
    fn number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.eat_while(|b| b.is_ascii_digit());
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.eat_while(|b| b.is_ascii_digit());
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let e_pos = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_while(|b| b.is_ascii_digit()) == 0 {
                return Err(ParseError::new(e_pos, "exponent needs digits"));
            }
        }
        self.src[start..self.pos]
            .parse()
            .map(TokenKind::Number)
            .map_err(|_| ParseError::new(start, "invalid number"))
    }

    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        match &self.src[start..self.pos] {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "xor" => TokenKind::Xor,
            "not" => TokenKind::Not,
            w => TokenKind::Ident(w.to_owned()),
        }
    }

    fn punct(&mut self) -> Result<TokenKind, ParseError> {
        let pair = match (self.peek(), self.peek_at(1)) {
            (Some(b'='), Some(b'=')) => Some(TokenKind::EqEq),
            (Some(b'!'), Some(b'=')) => Some(TokenKind::Ne),
            (Some(b'<'), Some(b'=')) => Some(TokenKind::Le),
            (Some(b'>'), Some(b'=')) => Some(TokenKind::Ge),
            _ => None,
        };
        if let Some(kind) = pair {
            self.pos += 2;
            return Ok(kind);
        }
        let kind = match self.peek() {
            Some(b'(') => TokenKind::LParen,
            Some(b')') => TokenKind::RParen,
            Some(b',') => TokenKind::Comma,
            Some(b'+') => TokenKind::Plus,
            Some(b'-') => TokenKind::Minus,
            Some(b'*') => TokenKind::Star,
            Some(b'/') => TokenKind::Slash,
            Some(b'%') => TokenKind::Percent,
            Some(b'^') => TokenKind::Caret,
            Some(b'<') => TokenKind::Lt,
            Some(b'>') => TokenKind::Gt,
            _ => {
                let ch = self.src[self.pos..].chars().next().unwrap_or('?');
                return Err(ParseError::new(
                    self.pos,
                    format!("unexpected character '{ch}'"),
                ));
            }
        };
        self.pos += 1;
        Ok(kind)
    }
}

/// Lex a quoted string starting at `start` (the opening quote). Returns the unescaped value and
/// the byte offset just past the closing quote.
fn lex_string(input: &str, start: usize, quote: char) -> Result<(String, usize), ParseError> {
    let mut value = String::new();
    let mut chars = input[start + 1..].char_indices();
    while let Some((off, ch)) = chars.next() {
        let pos = start + 1 + off;
        match ch {
            c if c == quote => return Ok((value, pos + 1)),
            '\\' => {
                let Some((_, esc)) = chars.next() else {
                    break;
                };
                match esc {
                    '"' => value.push('"'),
                    '\'' => value.push('\''),
                    '\\' => value.push('\\'),
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    other => {
                        return Err(ParseError::new(
                            pos,
                            format!("unknown escape sequence '\\{other}'"),
                        ));
                    }
                }
            }
            c => value.push(c),
        }
    }
    Err(ParseError::new(start, "unterminated string literal"))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
