use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::*;
use crate::error::{Error, Result};

const META_CHARS: [char; 11] = [
    '|', // union
    '*', // star
    '+', // plus
    '?', // option
    '\\', // escape
    '{', '}', // named group brackets
    '(', ')', // group brackets
    '[', ']', // class brackets
];

const CLASS_META_CHARS: [char; 4] = ['-', '[', ']', '\\'];

/// Names usable in `{identifier}` and `{label:identifier}`.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

pub struct Parser<'a> {
    src: &'a str,
    stream: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    pub fn parse(pattern: &'a str) -> Result<Pattern> {
        let mut parser = Parser {
            src: pattern,
            stream: pattern.char_indices().peekable(),
        };

        // a closing parenthesis is a plain character at the top level, so
        // the root pattern always runs to the end of the stream
        parser.parse_pattern(false)
    }

    fn rest(&self, from: usize) -> String {
        self.src[from..].to_owned()
    }

    fn offset(&mut self) -> usize {
        match self.stream.peek() {
            Some((i, _)) => *i,
            None => self.src.len(),
        }
    }

    fn parse_pattern(&mut self, nested: bool) -> Result<Pattern> {
        let mut branches = vec![self.parse_branch(nested)?];
        while self.stream.next_if(|(_, c)| *c == '|').is_some() {
            branches.push(self.parse_branch(nested)?);
        }
        Ok(Pattern { branches })
    }

    fn parse_branch(&mut self, nested: bool) -> Result<Branch> {
        let mut pieces = Vec::new();
        loop {
            match self.stream.peek() {
                None | Some((_, '|')) => break,
                Some((_, ')')) if nested => break,
                Some(&(_, c)) => pieces.push(self.parse_piece(c)?),
            }
        }
        Ok(pieces)
    }

    fn parse_piece(&mut self, first: char) -> Result<Piece> {
        let atom = self.parse_atom(first)?;

        let quantifier = match self.stream.peek() {
            Some((_, '?')) => Quantifier::Optional,
            Some((_, '+')) => Quantifier::Plus,
            Some((_, '*')) => Quantifier::Star,
            _ => Quantifier::One,
        };
        if quantifier != Quantifier::One {
            self.stream.next();
        }

        Ok(Piece { atom, quantifier })
    }

    // `first` is the peeked character the atom starts with
    fn parse_atom(&mut self, first: char) -> Result<Atom> {
        match first {
            '(' => self.parse_group(),
            '[' => self.parse_class(),
            '{' => self.parse_named(),
            '\\' => self.parse_metachar(),
            c => {
                // quantifiers without a preceding unit and stray closing
                // brackets are plain characters
                self.stream.next();
                Ok(Atom::Char(c))
            }
        }
    }

    fn parse_group(&mut self) -> Result<Atom> {
        let open = self.offset();
        self.stream.next(); // consume '('
        let start = open + 1;

        let pattern = self.parse_pattern(true)?;

        match self.stream.next() {
            Some((close, ')')) => Ok(Atom::Group(self.src[start..close].to_owned(), pattern)),
            _ => Err(Error::UnclosedBracketInRegularExpression(self.rest(open))),
        }
    }

    fn parse_class(&mut self) -> Result<Atom> {
        let open = self.offset();
        self.stream.next(); // consume '['

        // (char, escaped)
        let mut raw = Vec::new();
        loop {
            match self.stream.next() {
                Some((_, ']')) => break,
                Some((i, '\\')) => match self.stream.next() {
                    Some((_, c)) if CLASS_META_CHARS.contains(&c) => raw.push((c, true)),
                    Some(_) => {
                        return Err(Error::UnnecessaryEscapeInRegularExpression(self.rest(i)))
                    }
                    None => return Err(Error::UnclosedBracketInRegularExpression(self.rest(open))),
                },
                Some((_, c)) => raw.push((c, false)),
                None => return Err(Error::UnclosedBracketInRegularExpression(self.rest(open))),
            }
        }

        let (src, end) = (self.src, self.offset());
        let source = &src[open..end];
        let items = Self::parse_class_items(&raw).map_err(|e| match e {
            Error::InvalidRangeSyntax(_) => Error::InvalidRangeSyntax(source.to_owned()),
            e => e,
        })?;

        Ok(Atom::Class(items))
    }

    fn parse_class_items(raw: &[(char, bool)]) -> Result<Vec<ClassItem>> {
        let is_dash = |i: usize| raw.get(i) == Some(&('-', false));

        if raw.is_empty() {
            return Err(Error::InvalidRangeSyntax(String::new()));
        }

        let mut items = Vec::new();
        let mut i = 0;
        while i < raw.len() {
            // leading, doubled or chained '-'
            if is_dash(i) {
                return Err(Error::InvalidRangeSyntax(String::new()));
            }

            let (from, _) = raw[i];
            if !is_dash(i + 1) {
                items.push(ClassItem::Char(from));
                i += 1;
                continue;
            }

            let to = match raw.get(i + 2) {
                Some(&(c, escaped)) if escaped || c != '-' => c,
                _ => return Err(Error::InvalidRangeSyntax(String::new())),
            };
            if from > to {
                return Err(Error::InvalidRange { from, to });
            }
            items.push(ClassItem::Range(from, to));
            i += 3;
        }

        Ok(items)
    }

    fn parse_named(&mut self) -> Result<Atom> {
        let open = self.offset();
        self.stream.next(); // consume '{'
        let start = open + 1;

        let close = loop {
            match self.stream.next() {
                Some((i, '}')) => break i,
                Some(_) => {}
                None => return Err(Error::UnclosedBracketInRegularExpression(self.rest(open))),
            }
        };

        let reference = &self.src[start..close];

        match reference.split(':').collect::<Vec<_>>()[..] {
            [name] if is_identifier(name) => Ok(Atom::Named(None, name.to_owned())),
            [label, name] if is_identifier(label) && is_identifier(name) => {
                Ok(Atom::Named(Some(label.to_owned()), name.to_owned()))
            }
            _ => Err(Error::UnresolvableGroup(reference.to_owned())),
        }
    }

    fn parse_metachar(&mut self) -> Result<Atom> {
        let i = self.offset();
        self.stream.next(); // consume '\\'

        match self.stream.next() {
            Some((_, c)) if META_CHARS.contains(&c) => Ok(Atom::Char(c)),
            _ => Err(Error::UnnecessaryEscapeInRegularExpression(self.rest(i))),
        }
    }
}
