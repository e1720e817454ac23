// syntax (like BNF)
//
// root      = union
// union     = branch ( '|' branch ) *
// branch    = piece *
// piece     = atom ( '*' | '+' | '?' ) ?
// atom      = '(' group ')' | '[' class ']' | '{' reference '}' | '\' meta | char
// group     = union
// class     = class-item +
// class-item = char ( '-' char ) ?
// reference = ( identifier ':' ) ? identifier
//
// A quantifier character with no unit before it is a plain character, and
// so is a closing bracket outside of its group.

pub mod ast;
mod parser;

pub use parser::{is_identifier, Parser};
