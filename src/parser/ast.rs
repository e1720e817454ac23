#[derive(Debug, PartialEq)]
pub struct Pattern {
    pub branches: Vec<Branch>,
}

pub type Branch = Vec<Piece>;

#[derive(Debug, PartialEq)]
pub struct Piece {
    pub atom: Atom,
    pub quantifier: Quantifier,
}

#[derive(Debug, PartialEq)]
pub enum Atom {
    Char(char),                         // a
    Class(Vec<ClassItem>),              // [a-z0-9]
    Group(String, Pattern),             // (source)
    Named(Option<String>, String),      // {label:identifier}
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ClassItem {
    Char(char),        // a
    Range(char, char), // a - z
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Quantifier {
    One,      // ''
    Optional, // '?'
    Plus,     // '+'
    Star,     // '*'
}

impl Quantifier {
    pub fn is_optional(self) -> bool {
        matches!(self, Quantifier::Optional | Quantifier::Star)
    }

    pub fn is_repeatable(self) -> bool {
        matches!(self, Quantifier::Plus | Quantifier::Star)
    }
}

impl ClassItem {
    pub fn chars(self) -> impl Iterator<Item = char> {
        let (a, b) = match self {
            ClassItem::Char(c) => (c, c),
            ClassItem::Range(a, b) => (a, b),
        };
        a..=b
    }
}
