//! Parser cursor: holds the fully tokenized input plus the current/previous
//! token, modeled on `leo_parser::ParserContext`'s `token`/`prev_token`/
//! `bump`/`check`/`eat` idiom. The grammar here only ever needs single-token
//! lookahead, so unlike leo's `ParserContext` this drops the arbitrary-depth
//! `look_ahead`.

use timon_errors::Error;
use timon_span::Span;

use crate::tokenizer::{describe, Token};

pub struct ParserContext {
    /// Remaining tokens, reversed so the next token is a cheap `.pop()`.
    tokens: Vec<(Token, Span)>,
    pub(crate) token: Token,
    pub(crate) span: Span,
    pub(crate) prev_span: Span,
}

impl ParserContext {
    pub fn new(mut tokens: Vec<(Token, Span)>) -> Self {
        tokens.reverse();
        let mut ctx = ParserContext { tokens, token: Token::Eof, span: Span::default(), prev_span: Span::default() };
        ctx.bump();
        ctx
    }

    /// Advances the cursor by one token.
    pub fn bump(&mut self) {
        self.prev_span = self.span;
        let (token, span) = self.tokens.pop().unwrap_or((Token::Eof, self.span));
        self.token = token;
        self.span = span;
    }

    pub fn check(&self, token: &Token) -> bool {
        &self.token == token
    }

    /// Removes the next token if it equals `token`, returning whether it did.
    pub fn eat(&mut self, token: &Token) -> bool {
        let matched = self.check(token);
        if matched {
            self.bump();
        }
        matched
    }

    pub fn expect(&mut self, token: Token) -> timon_errors::Result<Span> {
        if self.token == token {
            let span = self.span;
            self.bump();
            Ok(span)
        } else {
            Err(Error::parse(self.span, format!("expected '{token}', found {}", describe(&self.token))))
        }
    }

    /// Consumes an identifier token, or errors.
    pub fn expect_ident(&mut self) -> timon_errors::Result<(String, Span)> {
        match self.token.clone() {
            Token::Ident(name) => {
                let span = self.span;
                self.bump();
                Ok((name, span))
            }
            _ => Err(Error::parse(self.span, format!("expected an identifier, found {}", describe(&self.token)))),
        }
    }

    pub fn unexpected<T>(&self, expected: &str) -> timon_errors::Result<T> {
        Err(Error::parse(self.span, format!("expected {expected}, found {}", describe(&self.token))))
    }
}
