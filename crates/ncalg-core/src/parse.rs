//! Expression parser.
//!
//! Grammar (whitespace is insignificant):
//!
//! ```text
//! expr   := ['+' | '-'] term (('+' | '-') term)*
//! term   := factor (['*'] factor)*
//! factor := ['+' | '-'] atom ['^' uint]
//! atom   := integer ['/' integer] | ident | '(' expr ')'
//! ```
//!
//! Juxtaposition is multiplication, so `2x y` reads as `2*x*y`. The same
//! grammar is used for user input and for the text the external solver
//! writes back, so parentheses nest at most [`MAX_NESTING`] deep and
//! exponents are at most [`MAX_EXPONENT`].

use dashu::integer::IBig;
use ncalg_rings::Coefficient;

use crate::algebra::FreeAlgebra;
use crate::error::CoreError;
use crate::poly::NcPoly;
use crate::word::Word;

/// Deepest parenthesis nesting the parser accepts.
pub const MAX_NESTING: usize = 64;

/// Largest exponent accepted after `^`.
pub const MAX_EXPONENT: u32 = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Int(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, CoreError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() {
            let mut s = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                s.push(d);
                chars.next();
            }
            tokens.push((pos, Token::Int(s)));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let mut s = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if !(d.is_ascii_alphanumeric() || d == '_') {
                    break;
                }
                s.push(d);
                chars.next();
            }
            tokens.push((pos, Token::Ident(s)));
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(CoreError::Parse {
                    position: pos,
                    message: format!("unexpected character `{other}`"),
                })
            }
        };
        tokens.push((pos, token));
        chars.next();
    }

    Ok(tokens)
}

struct Parser<'a, R> {
    algebra: &'a FreeAlgebra<R>,
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl<R: Coefficient> Parser<'_, R> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(p, _)| *p)
    }

    fn error(&self, message: impl Into<String>) -> CoreError {
        CoreError::Parse {
            position: self.offset(),
            message: message.into(),
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<NcPoly<R>, CoreError> {
        let negate = match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                false
            }
            Some(Token::Minus) => {
                self.pos += 1;
                true
            }
            _ => false,
        };

        let first = self.term()?;
        let mut acc = if negate { first.neg() } else { first };

        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc = acc.add(&self.term()?);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc = acc.sub(&self.term()?);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<NcPoly<R>, CoreError> {
        let mut acc = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc = acc.mul(&self.factor()?);
                }
                Some(Token::Int(_) | Token::Ident(_) | Token::LParen) => {
                    acc = acc.mul(&self.factor()?);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<NcPoly<R>, CoreError> {
        let negate = match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                false
            }
            Some(Token::Minus) => {
                self.pos += 1;
                true
            }
            _ => false,
        };

        let base = self.atom()?;
        let value = if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = match self.next() {
                Some(Token::Int(digits)) => digits
                    .parse::<u32>()
                    .ok()
                    .filter(|&e| e <= MAX_EXPONENT)
                    .ok_or_else(|| self.error(format!("exponent exceeds {MAX_EXPONENT}")))?,
                _ => return Err(self.error("expected exponent")),
            };
            base.pow(exponent)
        } else {
            base
        };

        Ok(if negate { value.neg() } else { value })
    }

    fn integer(&self, digits: &str) -> Result<R, CoreError> {
        digits
            .parse::<IBig>()
            .map(|n| R::from_integer(&n))
            .map_err(|_| self.error(format!("invalid integer `{digits}`")))
    }

    fn atom(&mut self) -> Result<NcPoly<R>, CoreError> {
        let start = self.offset();
        match self.next() {
            Some(Token::Int(digits)) => {
                let mut value = self.integer(&digits)?;
                if self.peek() == Some(&Token::Slash) {
                    self.pos += 1;
                    let divisor = match self.next() {
                        Some(Token::Int(d)) => self.integer(&d)?,
                        _ => return Err(self.error("expected integer denominator")),
                    };
                    value = value.divide_exact(&divisor).ok_or(CoreError::Parse {
                        position: start,
                        message: "denominator is not invertible".to_string(),
                    })?;
                }
                Ok(self.algebra.constant(value))
            }
            Some(Token::Ident(name)) => {
                let letter = self
                    .algebra
                    .index_of(&name)
                    .ok_or(CoreError::UnknownGenerator(name))?;
                Ok(self.algebra.monomial(Word::letter(letter), R::one()))
            }
            Some(Token::LParen) => {
                if self.depth == MAX_NESTING {
                    return Err(CoreError::Parse {
                        position: start,
                        message: format!("parentheses nested deeper than {MAX_NESTING}"),
                    });
                }
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("expected `)`")),
                }
            }
            Some(_) => Err(CoreError::Parse {
                position: start,
                message: "unexpected token".to_string(),
            }),
            None => Err(self.error("unexpected end of input")),
        }
    }
}

/// Parses `input` as a polynomial of `algebra`.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] for malformed input and
/// [`CoreError::UnknownGenerator`] for names the algebra does not declare.
pub fn parse_poly<R: Coefficient>(
    algebra: &FreeAlgebra<R>,
    input: &str,
) -> Result<NcPoly<R>, CoreError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CoreError::Parse {
            position: 0,
            message: "empty expression".to_string(),
        });
    }

    let mut parser = Parser {
        algebra,
        tokens,
        pos: 0,
        end: input.len(),
        depth: 0,
    };
    let poly = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("trailing input"));
    }
    Ok(poly)
}
