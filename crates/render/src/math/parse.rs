//! Recursive-descent parser for plain-text math expressions.
//!
//! Grammar:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('-' | '+') unary | power
//! power := atom (('^' | '**') unary)?
//! atom  := number | ident ('(' expr (',' expr)* ')')? | '(' expr ')'
//! ```
//!
//! Juxtaposition (`2x`) and relations (`=`, `<`) are rejected, as are inputs
//! longer than [`MAX_TOKENS`] tokens or nested deeper than [`MAX_DEPTH`].

use std::{iter::Peekable, str::CharIndices};

/// Deepest allowed nesting of parentheses, calls, signs and exponents.
pub const MAX_DEPTH: usize = 64;

/// Longest accepted expression, in tokens. Also bounds left-leaning chains
/// such as `1 + 1 + ...`, which nest without recursion in the parser.
pub const MAX_TOKENS: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(String),
    Symbol(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
}

impl Expr {
    /// Binding strength, used to decide where parentheses are needed.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Neg(_) => 3,
            Self::Pow(..) => 4,
            Self::Number(_) | Self::Symbol(_) | Self::Call(..) => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected {found} at {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expression nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("expression longer than {max} tokens")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Ident(name) => write!(f, "identifier {name}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Caret => f.write_str("'^'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices<'_>> = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.peek().is_some_and(|(_, c)| *c == '*') => {
                chars.next();
                Token::Caret
            },
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            c if c.is_ascii_digit() || c == '.' => {
                let mut number = String::from(c);
                while let Some((_, next)) = chars.peek() {
                    if next.is_ascii_digit() || *next == '.' {
                        number.push(*next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if number == "." || number.matches('.').count() > 1 {
                    return Err(ParseError::UnexpectedToken {
                        found: format!("number {number}"),
                        pos,
                    });
                }
                Token::Number(number)
            },
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some((_, next)) = chars.peek() {
                    if next.is_alphanumeric() || *next == '_' {
                        ident.push(*next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            },
            c => return Err(ParseError::UnexpectedChar { ch: c, pos }),
        };
        if tokens.len() == MAX_TOKENS {
            return Err(ParseError::TooLong { max: MAX_TOKENS });
        }
        tokens.push((token, pos));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    index: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(t, _)| t)
    }

    fn bump(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        item
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ParseError> {
        match self.bump() {
            Some((t, _)) if &t == token => Ok(()),
            Some((t, pos)) => Err(ParseError::UnexpectedToken {
                found: t.to_string(),
                pos,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
            } else if self.eat(&Token::Minus) {
                lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(&Token::Star) {
                lhs = Expr::Mul(Box::new(lhs), Box::new(self.unary()?));
            } else if self.eat(&Token::Slash) {
                lhs = Expr::Div(Box::new(lhs), Box::new(self.unary()?));
            } else {
                return Ok(lhs);
            }
        }
    }

    // Every recursive path passes through here, so the depth is counted once.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::TooDeep { max: MAX_DEPTH });
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&Token::Minus) {
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.atom()?;
        if self.eat(&Token::Caret) {
            return Ok(Expr::Pow(Box::new(base), Box::new(self.unary()?)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        match self.bump() {
            Some((Token::Number(n), _)) => Ok(Expr::Number(n)),
            Some((Token::Ident(name), _)) => {
                if !self.eat(&Token::LParen) {
                    return Ok(Expr::Symbol(name));
                }
                let mut args = vec![self.expr()?];
                while self.eat(&Token::Comma) {
                    args.push(self.expr()?);
                }
                self.expect(&Token::RParen)?;
                Ok(Expr::Call(name, args))
            },
            Some((Token::LParen, _)) => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            },
            Some((t, pos)) => Err(ParseError::UnexpectedToken {
                found: t.to_string(),
                pos,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// Parse `input` into an expression tree.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.bump() {
        None => Ok(expr),
        Some((t, pos)) => Err(ParseError::UnexpectedToken {
            found: t.to_string(),
            pos,
        }),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    fn num(n: &str) -> Box<Expr> {
        Box::new(Expr::Number(n.into()))
    }

    fn sym(s: &str) -> Box<Expr> {
        Box::new(Expr::Symbol(s.into()))
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(
            parse("1 + 2 * x - 3").unwrap(),
            Expr::Sub(
                Box::new(Expr::Add(num("1"), Box::new(Expr::Mul(num("2"), sym("x"))))),
                num("3"),
            )
        );
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_neg() {
        assert_eq!(
            parse("-x^2^3").unwrap(),
            Expr::Neg(Box::new(Expr::Pow(
                sym("x"),
                Box::new(Expr::Pow(num("2"), num("3")))
            )))
        );
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(parse("x**2").unwrap(), parse("x^2").unwrap());
    }

    #[test]
    fn function_calls_with_arguments() {
        assert_eq!(
            parse("log(x, 2)").unwrap(),
            Expr::Call("log".into(), vec![Expr::Symbol("x".into()), Expr::Number("2".into())])
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            parse("(a + b) / c").unwrap(),
            Expr::Div(Box::new(Expr::Add(sym("a"), sym("b"))), sym("c"))
        );
    }

    #[rstest]
    #[case("", ParseError::Empty)]
    #[case("   ", ParseError::Empty)]
    #[case("x +", ParseError::UnexpectedEnd)]
    #[case("(x", ParseError::UnexpectedEnd)]
    #[case("x = 2", ParseError::UnexpectedChar { ch: '=', pos: 2 })]
    #[case("2 x", ParseError::UnexpectedToken { found: "identifier x".into(), pos: 2 })]
    #[case("1..2", ParseError::UnexpectedToken { found: "number 1..2".into(), pos: 0 })]
    #[case(")", ParseError::UnexpectedToken { found: "')'".into(), pos: 0 })]
    fn rejects_malformed(#[case] input: &str, #[case] expected: ParseError) {
        assert_eq!(parse(input).unwrap_err(), expected);
    }

    #[test]
    fn deep_nesting_is_rejected_without_recursing() {
        let parens = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(parse(&parens).is_err());

        let open = "(".repeat(100_000);
        assert!(parse(&open).is_err());

        let signs = format!("{}x", "-".repeat(100_000));
        assert!(parse(&signs).is_err());

        let exponents = format!("x{}", "^-x".repeat(10_000));
        assert!(parse(&exponents).is_err());
    }

    #[test]
    fn nesting_limit_is_exact() {
        let within = format!("{}x{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert!(parse(&within).is_ok());

        let beyond = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(
            parse(&beyond).unwrap_err(),
            ParseError::TooDeep { max: MAX_DEPTH }
        );
        assert_eq!(
            parse(&format!("{}x", "-".repeat(MAX_DEPTH))).unwrap_err(),
            ParseError::TooDeep { max: MAX_DEPTH }
        );
    }

    #[test]
    fn long_chains_are_rejected() {
        let chain = vec!["1"; 600].join(" + ");
        assert_eq!(parse(&chain).unwrap_err(), ParseError::TooLong { max: MAX_TOKENS });

        let fits = vec!["1"; 400].join(" + ");
        assert!(parse(&fits).is_ok());
    }
}
