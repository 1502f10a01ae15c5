use crate::expression::ast::{Node, Op, Value};
use crate::expression::error::ParseError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Parse expression text into a fresh tree.
///
/// Precedence, loosest first: `or`, `xor`, `and`, comparison, `+ -`, `* / %`, unary `- + not`,
/// `^` (right associative), calls and atoms.
pub fn parse(src: &str) -> Result<Node, ParseError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(ParseError::new(0, "empty expression"));
    }
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let node = p.parse_or()?;
    p.expect(TokenKind::Eof)?;
    Ok(node)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ParseError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Left-associative binary level: `next (op next)*`.
    fn binary_level(
        &mut self,
        ops: &[(TokenKind, Op)],
        next: fn(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        let mut e = next(self)?;
        'outer: loop {
            for (kind, op) in ops {
                if self.consume(kind.clone()) {
                    let r = next(self)?;
                    e = Node::Operator {
                        op: *op,
                        operands: vec![e, r],
                    };
                    continue 'outer;
                }
            }
            return Ok(e);
        }
    }

    fn parse_or(&mut self) -> Result<Node, ParseError> {
        self.binary_level(&[(TokenKind::Or, Op::Or)], Self::parse_xor)
    }

    fn parse_xor(&mut self) -> Result<Node, ParseError> {
        self.binary_level(&[(TokenKind::Xor, Op::Xor)], Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Node, ParseError> {
        self.binary_level(&[(TokenKind::And, Op::And)], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> Result<Node, ParseError> {
        self.binary_level(
            &[
                (TokenKind::EqEq, Op::Eq),
                (TokenKind::Ne, Op::Ne),
                (TokenKind::Le, Op::Le),
                (TokenKind::Ge, Op::Ge),
                (TokenKind::Lt, Op::Lt),
                (TokenKind::Gt, Op::Gt),
            ],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        self.binary_level(
            &[(TokenKind::Plus, Op::Add), (TokenKind::Minus, Op::Sub)],
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        self.binary_level(
            &[
                (TokenKind::Star, Op::Mul),
                (TokenKind::Slash, Op::Div),
                (TokenKind::Percent, Op::Mod),
            ],
            Self::parse_unary,
        )
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Node::Operator {
                op: Op::Neg,
                operands: vec![e],
            });
        }
        if self.consume(TokenKind::Plus) {
            return self.parse_unary();
        }
        if self.consume(TokenKind::Not) {
            let e = self.parse_unary()?;
            return Ok(Node::Operator {
                op: Op::Not,
                operands: vec![e],
            });
        }
        self.parse_pow()
    }

    fn parse_pow(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_primary()?;
        if self.consume(TokenKind::Caret) {
            // right associative, and binds tighter than a unary sign on its right
            let exp = self.parse_unary()?;
            return Ok(Node::Operator {
                op: Op::Pow,
                operands: vec![base, exp],
            });
        }
        Ok(base)
    }

    fn parse_args(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_or()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Node::Constant(Value::Number(v))),
            TokenKind::Str(s) => Ok(Node::Constant(Value::Str(s))),
            TokenKind::Ident(name) => {
                if self.consume(TokenKind::LParen) {
                    let operands = self.parse_args()?;
                    return Ok(Node::Function { name, operands });
                }
                Ok(match name.as_str() {
                    "true" => Node::Constant(Value::Bool(true)),
                    "false" => Node::Constant(Value::Bool(false)),
                    "NaN" => Node::Constant(Value::Number(f64::NAN)),
                    "Infinity" => Node::Constant(Value::Number(f64::INFINITY)),
                    "null" => Node::Constant(Value::Null),
                    _ => Node::Symbol(name),
                })
            }
            TokenKind::LParen => {
                let e = self.parse_or()?;
                self.expect(TokenKind::RParen)?;
                Ok(Node::Parenthesis(Box::new(e)))
            }
            other => Err(ParseError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
