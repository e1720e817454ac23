mod error;
mod parser;
mod pratt;
mod trie;

pub mod asciimath;

pub use error::{Error, Result};
pub use pratt::{Pratt, Token};
pub use trie::{Capture, Match, Trie};
