use std::mem;

use super::{Pratt, SymbolId};
use crate::error::Result;

/// A matched span of the input together with the binding power of the
/// symbol it was matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'i> {
    pub value: &'i str,
    pub from: usize,
    pub to: usize,
    pub binding_power: i32,
    pub(crate) symbol: Option<SymbolId>,
}

impl<'i> Token<'i> {
    // binds weaker than anything, so no expression ever continues past it
    pub(crate) fn end(at: usize) -> Token<'i> {
        Token {
            value: "",
            from: at,
            to: at,
            binding_power: i32::MIN,
            symbol: None,
        }
    }

    pub fn is_end(&self) -> bool {
        self.symbol.is_none()
    }
}

/// State of one parse: the input and one token of lookahead.
pub(crate) struct Cursor<'p, 'i, O> {
    pratt: &'p Pratt<O>,
    src: &'i str,
    pub current: Token<'i>,
    pub depth: usize,
    pub statements: bool,
}

impl<'p, 'i, O> Cursor<'p, 'i, O> {
    pub fn new(pratt: &'p Pratt<O>, src: &'i str) -> Result<Self> {
        let current = pratt.next_token(src, 0)?;
        let cursor = Cursor {
            pratt,
            src,
            current,
            depth: 0,
            statements: false,
        };
        cursor.trace("token", &current);
        Ok(cursor)
    }

    /// Moves past the current token and returns it.
    pub fn advance(&mut self) -> Result<Token<'i>> {
        let next = self.pratt.next_token(self.src, self.current.to)?;
        self.trace("token", &next);

        Ok(mem::replace(&mut self.current, next))
    }

    pub fn rest(&self) -> &'i str {
        &self.src[self.current.from..]
    }

    pub fn trace(&self, what: &str, token: &Token) {
        if self.pratt.trace {
            let indent = "  ".repeat(self.depth);
            if token.is_end() {
                eprintln!("{}{} <end> @{}", indent, what, token.from);
            } else {
                eprintln!(
                    "{}{} {:?} @{}..{} bp={}",
                    indent, what, token.value, token.from, token.to, token.binding_power
                );
            }
        }
    }
}
