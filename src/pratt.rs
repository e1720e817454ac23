use std::collections::HashMap;

use self::token::Cursor;
use crate::error::{Error, Result};
use crate::trie::Trie;

mod token;

pub use self::token::Token;


pub(crate) type SymbolId = usize;

type LiteralFn<O> = Box<dyn Fn(&str) -> O + Send + Sync>;
type UnaryFn<O> = Box<dyn Fn(O) -> O + Send + Sync>;
type BinaryFn<O> = Box<dyn Fn(O, O) -> O + Send + Sync>;

/// What a token does when it starts an expression.
enum Nud<O> {
    Literal(LiteralFn<O>),
    Prefix { bp: i32, on_match: UnaryFn<O> },
    Circumfix { close: SymbolId, on_match: UnaryFn<O> },
}

/// What a token does when it follows a complete expression.
enum Led<O> {
    LeftAssociative { bp: i32, on_match: BinaryFn<O> },
    RightAssociative { bp: i32, on_match: BinaryFn<O> },
    Postfix { bp: i32, on_match: UnaryFn<O> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Expression,
    Separator,
    Ignored,
}

struct Symbol<O> {
    pattern: String,
    role: Role,
    nud: Option<Nud<O>>,
    led: Option<Led<O>>,
}

impl<O> Symbol<O> {
    /// Binding power of the infix or postfix role. A symbol without one
    /// binds like its prefix role, so it is reported as a missing led when
    /// it follows an expression.
    fn binding_power(&self) -> i32 {
        match (&self.led, &self.nud) {
            (Some(Led::LeftAssociative { bp, .. }), _)
            | (Some(Led::RightAssociative { bp, .. }), _)
            | (Some(Led::Postfix { bp, .. }), _)
            | (None, Some(Nud::Prefix { bp, .. })) => *bp,
            _ => 0,
        }
    }
}

/// Top-down operator precedence parser whose tokens are recognized by a
/// [`Trie`].
///
/// Every registration takes a pattern in the trie's dialect. Registering the
/// same pattern text twice refers to the same symbol, which may then carry
/// both a prefix role and an infix role, as `-` usually does. Between the
/// two, the infix binding power decides how tightly the token binds to its
/// left.
///
/// ```
/// use mathconv_rs::Pratt;
///
/// let mut calc = Pratt::new();
/// calc.literal("[0-9]+", |s| s.parse::<i64>().unwrap()).unwrap();
/// calc.binary_left_associative("+", 10, |a, b| a + b).unwrap();
/// calc.binary_left_associative("*", 20, |a, b| a * b).unwrap();
///
/// assert_eq!(calc.parse("1 + 2 * 3").unwrap(), 7);
/// ```
pub struct Pratt<O> {
    symbols: Vec<Symbol<O>>,
    by_pattern: HashMap<String, SymbolId>,
    table: Trie<SymbolId>,
    trace: bool,
}

impl<O> Pratt<O> {
    pub fn new() -> Pratt<O> {
        Pratt {
            symbols: vec![],
            by_pattern: HashMap::new(),
            table: Trie::new(),
            trace: false,
        }
    }

    /// Prints every token and dispatch to stderr while parsing.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Makes `{identifier}` usable in patterns registered afterwards.
    pub fn learn(&mut self, identifier: &str, pattern: &str) -> Result<&mut Self> {
        self.table.learn(identifier, pattern)?;
        Ok(self)
    }

    /// A token that is an operand on its own, built from its text.
    pub fn literal<F>(&mut self, pattern: &str, on_match: F) -> Result<&mut Self>
    where
        F: Fn(&str) -> O + Send + Sync + 'static,
    {
        let nud = Nud::Literal(Box::new(on_match));
        self.register(pattern, Some(nud), None)?;
        Ok(self)
    }

    pub fn binary_left_associative<F>(
        &mut self,
        pattern: &str,
        bp: i32,
        on_match: F,
    ) -> Result<&mut Self>
    where
        F: Fn(O, O) -> O + Send + Sync + 'static,
    {
        let led = Led::LeftAssociative {
            bp,
            on_match: Box::new(on_match),
        };
        self.register(pattern, None, Some(led))?;
        Ok(self)
    }

    pub fn binary_right_associative<F>(
        &mut self,
        pattern: &str,
        bp: i32,
        on_match: F,
    ) -> Result<&mut Self>
    where
        F: Fn(O, O) -> O + Send + Sync + 'static,
    {
        let led = Led::RightAssociative {
            bp,
            on_match: Box::new(on_match),
        };
        self.register(pattern, None, Some(led))?;
        Ok(self)
    }

    /// The operand is parsed with `bp` as its right binding power, so it
    /// takes in every operator binding tighter than `bp`.
    pub fn unary_prefix<F>(&mut self, pattern: &str, bp: i32, on_match: F) -> Result<&mut Self>
    where
        F: Fn(O) -> O + Send + Sync + 'static,
    {
        let nud = Nud::Prefix {
            bp,
            on_match: Box::new(on_match),
        };
        self.register(pattern, Some(nud), None)?;
        Ok(self)
    }

    /// Applies `on_match` to the expression on its left. Nothing is parsed
    /// after the token.
    pub fn unary_postfix<F>(&mut self, pattern: &str, bp: i32, on_match: F) -> Result<&mut Self>
    where
        F: Fn(O) -> O + Send + Sync + 'static,
    {
        let led = Led::Postfix {
            bp,
            on_match: Box::new(on_match),
        };
        self.register(pattern, None, Some(led))?;
        Ok(self)
    }

    /// Brackets: `open` starts an expression that has to be followed by
    /// `close`. The bracketed expression is passed to `on_match`.
    pub fn circumfix<F>(&mut self, open: &str, close: &str, on_match: F) -> Result<&mut Self>
    where
        F: Fn(O) -> O + Send + Sync + 'static,
    {
        self.check_handlers(open, true, false)?;

        let close = self.register(close, None, None)?;
        let nud = Nud::Circumfix {
            close,
            on_match: Box::new(on_match),
        };
        self.register(open, Some(nud), None)?;
        Ok(self)
    }

    /// Tokens that end one statement of [`Pratt::parse_statements`].
    pub fn separator(&mut self, pattern: &str) -> Result<&mut Self> {
        self.assign_role(pattern, Role::Separator)?;
        Ok(self)
    }

    /// Tokens skipped like whitespace.
    pub fn ignore(&mut self, pattern: &str) -> Result<&mut Self> {
        self.assign_role(pattern, Role::Ignored)?;
        Ok(self)
    }

    fn find(&self, pattern: &str) -> Option<SymbolId> {
        self.by_pattern.get(pattern).copied()
    }

    // a separator or ignored symbol never carries handlers
    fn assign_role(&mut self, pattern: &str, role: Role) -> Result<()> {
        if let Some(id) = self.find(pattern) {
            let symbol = &self.symbols[id];
            if symbol.nud.is_some() {
                return Err(Error::AlreadyDefinedNud(pattern.to_owned()));
            }
            if symbol.led.is_some() {
                return Err(Error::AlreadyDefinedLed(pattern.to_owned()));
            }
            if symbol.role != Role::Expression && symbol.role != role {
                return Err(Error::AlreadyDefinedRole(pattern.to_owned()));
            }
        }

        let id = self.register(pattern, None, None)?;
        self.symbols[id].role = role;
        Ok(())
    }

    /// Fails if `pattern` already has the handlers about to be attached, or
    /// is a separator or ignored.
    fn check_handlers(&self, pattern: &str, nud: bool, led: bool) -> Result<()> {
        let symbol = match self.find(pattern) {
            Some(id) => &self.symbols[id],
            None => return Ok(()),
        };

        if (nud || led) && symbol.role != Role::Expression {
            return Err(Error::AlreadyDefinedRole(pattern.to_owned()));
        }
        if nud && symbol.nud.is_some() {
            return Err(Error::AlreadyDefinedNud(pattern.to_owned()));
        }
        if led && symbol.led.is_some() {
            return Err(Error::AlreadyDefinedLed(pattern.to_owned()));
        }
        Ok(())
    }

    fn register(
        &mut self,
        pattern: &str,
        nud: Option<Nud<O>>,
        led: Option<Led<O>>,
    ) -> Result<SymbolId> {
        self.check_handlers(pattern, nud.is_some(), led.is_some())?;

        if let Some(id) = self.find(pattern) {
            let symbol = &mut self.symbols[id];
            if nud.is_some() {
                symbol.nud = nud;
            }
            if led.is_some() {
                symbol.led = led;
            }
            return Ok(id);
        }

        let id = self.symbols.len();
        self.table.insert(pattern, id)?;
        self.symbols.push(Symbol {
            pattern: pattern.to_owned(),
            role: Role::Expression,
            nud,
            led,
        });
        self.by_pattern.insert(pattern.to_owned(), id);
        Ok(id)
    }

    /// Parses `input` as a single expression.
    pub fn parse(&self, input: &str) -> Result<O> {
        let mut cursor = Cursor::new(self, input)?;
        let result = self.parse_expression(&mut cursor, 0)?;

        if !cursor.current.is_end() {
            return Err(Error::TrailingInput {
                at: cursor.current.from,
                rest: cursor.rest().to_owned(),
            });
        }
        Ok(result)
    }

    /// Parses `input` as a sequence of expressions.
    ///
    /// A statement ends at a separator, or at any token that cannot continue
    /// the expression before it. Empty statements are skipped.
    pub fn parse_statements(&self, input: &str) -> Result<Vec<O>> {
        let mut cursor = Cursor::new(self, input)?;
        cursor.statements = true;
        let mut statements = vec![];

        loop {
            while self.is_separator(&cursor.current) {
                cursor.advance()?;
            }
            if cursor.current.is_end() {
                return Ok(statements);
            }
            statements.push(self.parse_expression(&mut cursor, 0)?);
        }
    }

    /// Splits `input` into tokens without parsing it.
    pub fn tokenize<'i>(&self, input: &'i str) -> Result<Vec<Token<'i>>> {
        let mut tokens = vec![];
        let mut token = self.next_token(input, 0)?;
        while !token.is_end() {
            tokens.push(token);
            token = self.next_token(input, token.to)?;
        }
        Ok(tokens)
    }

    fn is_separator(&self, token: &Token) -> bool {
        token
            .symbol
            .is_some_and(|id| self.symbols[id].role == Role::Separator)
    }

    /// Whether the current token extends the expression on its left. Between
    /// statements, a token without a led starts the next one instead.
    fn continues(&self, cursor: &Cursor<'_, '_, O>, rbp: i32) -> bool {
        if rbp >= cursor.current.binding_power {
            return false;
        }
        !cursor.statements
            || cursor
                .current
                .symbol
                .is_some_and(|id| self.symbols[id].led.is_some())
    }

    pub(crate) fn next_token<'i>(&self, src: &'i str, from: usize) -> Result<Token<'i>> {
        let mut sp = from;
        loop {
            let rest = &src[sp..];
            sp += rest.len() - rest.trim_start().len();

            let rest = &src[sp..];
            if rest.is_empty() {
                return Ok(Token::end(sp));
            }

            let m = self
                .table
                .longest_match(rest)
                .ok_or_else(|| Error::UnknownExpression {
                    at: sp,
                    rest: rest.to_owned(),
                })?;
            let id = *m.value;
            let to = sp + m.text.len();

            let symbol = &self.symbols[id];
            if symbol.role == Role::Ignored {
                sp = to;
                continue;
            }

            return Ok(Token {
                value: m.text,
                from: sp,
                to,
                binding_power: symbol.binding_power(),
                symbol: Some(id),
            });
        }
    }

    fn parse_expression<'i>(&self, cursor: &mut Cursor<'_, 'i, O>, rbp: i32) -> Result<O> {
        cursor.depth += 1;

        let token = cursor.advance()?;
        cursor.trace("nud", &token);
        let mut left = self.nud(cursor, token)?;

        while self.continues(cursor, rbp) {
            let token = cursor.advance()?;
            cursor.trace("led", &token);
            left = self.led(cursor, token, left)?;
        }

        cursor.depth -= 1;
        Ok(left)
    }

    fn nud<'i>(&self, cursor: &mut Cursor<'_, 'i, O>, token: Token<'i>) -> Result<O> {
        let id = token
            .symbol
            .ok_or(Error::UnexpectedEndOfInput { at: token.from })?;

        match &self.symbols[id].nud {
            Some(Nud::Literal(on_match)) => Ok(on_match(token.value)),
            Some(Nud::Prefix { bp, on_match }) => {
                let operand = self.parse_expression(cursor, *bp)?;
                Ok(on_match(operand))
            }
            Some(Nud::Circumfix { close, on_match }) => {
                let inner = self.parse_expression(cursor, 0)?;
                let found = cursor.advance()?;
                if found.symbol != Some(*close) {
                    return Err(Error::ExpectedToken {
                        expected: self.symbols[*close].pattern.clone(),
                        found: found.value.to_owned(),
                        at: found.from,
                    });
                }
                Ok(on_match(inner))
            }
            None => Err(Error::MissingNud {
                token: token.value.to_owned(),
                at: token.from,
            }),
        }
    }

    fn led<'i>(&self, cursor: &mut Cursor<'_, 'i, O>, token: Token<'i>, left: O) -> Result<O> {
        let led = token.symbol.and_then(|id| self.symbols[id].led.as_ref());

        match led {
            Some(Led::LeftAssociative { bp, on_match }) => {
                let right = self.parse_expression(cursor, *bp)?;
                Ok(on_match(left, right))
            }
            Some(Led::RightAssociative { bp, on_match }) => {
                let right = self.parse_expression(cursor, bp - 1)?;
                Ok(on_match(left, right))
            }
            Some(Led::Postfix { on_match, .. }) => Ok(on_match(left)),
            None => Err(Error::MissingLed {
                token: token.value.to_owned(),
                at: token.from,
            }),
        }
    }
}

impl<O> Default for Pratt<O> {
    fn default() -> Self {
        Pratt::new()
    }
}
