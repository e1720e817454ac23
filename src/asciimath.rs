//! ASCII math notation to Unicode text.
//!
//! ```
//! use mathconv_rs::asciimath::AsciiMath;
//!
//! let converter = AsciiMath::new().unwrap();
//! assert_eq!(converter.convert("alpha^2 != -1").unwrap(), "α² ≠ −1");
//! ```

use crate::error::Result;
use crate::pratt::Pratt;

const GREEK_LETTERS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("chi", "χ"),
    ("delta", "δ"),
    ("Delta", "Δ"),
    ("eps(ilon)?", "ε"),
    ("eta", "η"),
    ("gamma", "γ"),
    ("Gamma", "Γ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("Lambda", "Λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("omega", "ω"),
    ("Omega", "Ω"),
    ("phi", "φ"),
    ("Phi", "Φ"),
    ("pi", "π"),
    ("Pi", "Π"),
    ("psi", "ψ"),
    ("Psi", "Ψ"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("Sigma", "Σ"),
    ("tau", "τ"),
    ("theta", "ϑ"),
    ("Theta", "Θ"),
    ("upsilon", "υ"),
    ("xi", "ξ"),
    ("Xi", "Ξ"),
    ("zeta", "ζ"),
];

const RELATIONS: &[(&str, &str)] = &[
    ("=", "="),
    ("!=", "≠"),
    ("<", "<"),
    (">", ">"),
    ("<=", "≤"),
    (">=", "≥"),
    ("->", "→"),
    ("=>", "⇒"),
];

const RELATION: i32 = 5;
const SUM: i32 = 10;
const PRODUCT: i32 = 20;
const POWER: i32 = 30;
const NEGATION: i32 = 40;
const FACTORIAL: i32 = 50;

fn spaced(symbol: &'static str) -> impl Fn(String, String) -> String + Send + Sync {
    move |left, right| format!("{} {} {}", left, symbol, right)
}

fn tight(symbol: &'static str) -> impl Fn(String, String) -> String + Send + Sync {
    move |left, right| format!("{}{}{}", left, symbol, right)
}

fn superscript(c: char) -> Option<char> {
    let raised = match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '−' => '⁻',
        '=' => '⁼',
        'i' => 'ⁱ',
        'n' => 'ⁿ',
        _ => return None,
    };
    Some(raised)
}

fn power(base: String, exponent: String) -> String {
    match exponent.chars().map(superscript).collect::<Option<String>>() {
        Some(raised) => base + &raised,
        None => format!("{}^{}", base, exponent),
    }
}

/// Converter from ASCII math (`alpha^2 <= 2pi`) to Unicode text.
pub struct AsciiMath {
    parser: Pratt<String>,
}

impl AsciiMath {
    pub fn new() -> Result<AsciiMath> {
        let mut parser = Pratt::new();

        for &(pattern, letter) in GREEK_LETTERS {
            parser.literal(pattern, move |_| letter.to_owned())?;
        }
        parser
            .learn("DIGIT", "[0-9]")?
            .literal("{DIGIT}+(.{DIGIT}+)?", |s| s.to_owned())?
            .literal("[a-zA-Z]", |s| s.to_owned())?
            .literal("oo|inf(inity)?", |_| "∞".to_owned())?;

        for &(pattern, symbol) in RELATIONS {
            parser.binary_left_associative(pattern, RELATION, spaced(symbol))?;
        }

        parser
            .binary_left_associative("+", SUM, spaced("+"))?
            .binary_left_associative("-", SUM, spaced("−"))?
            .binary_left_associative(r"\*", PRODUCT, spaced("⋅"))?
            .binary_left_associative(r"\*\*", PRODUCT, spaced("∗"))?
            .binary_left_associative("/", PRODUCT, spaced("/"))?
            .binary_left_associative("//", PRODUCT, tight("/"))?
            .binary_right_associative("^", POWER, power)?
            .unary_prefix("-", NEGATION, |operand| format!("−{}", operand))?
            .unary_postfix("!", FACTORIAL, |operand| format!("{}!", operand))?
            .circumfix(r"\(", r"\)", |inner| format!("({})", inner))?;

        Ok(AsciiMath { parser })
    }

    /// Converts every statement of `input`, joining them with a space.
    pub fn convert(&self, input: &str) -> Result<String> {
        Ok(self.parser.parse_statements(input)?.join(" "))
    }

    pub fn parser(&self) -> &Pratt<String> {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut Pratt<String> {
        &mut self.parser
    }
}
