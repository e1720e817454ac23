#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // pattern syntax
    #[error("UnclosedBracketInRegularExpression: {0}")]
    UnclosedBracketInRegularExpression(String),

    #[error("InvalidRangeSyntax: {0}")]
    InvalidRangeSyntax(String),

    #[error("InvalidRange: {from} > {to}")]
    InvalidRange { from: char, to: char },

    #[error("UnnecessaryEscapeInRegularExpression: {0}")]
    UnnecessaryEscapeInRegularExpression(String),

    #[error("TautologyInRegularExpression: {0}")]
    TautologyInRegularExpression(String),

    // group references
    #[error("UnknownNamedGroupInRegularExpression: {0}")]
    UnknownNamedGroupInRegularExpression(String),

    #[error("UnresolvableGroup: {0}")]
    UnresolvableGroup(String),

    // parser wiring
    #[error("AlreadyDefinedNud: {0}")]
    AlreadyDefinedNud(String),

    #[error("AlreadyDefinedLed: {0}")]
    AlreadyDefinedLed(String),

    #[error("AlreadyDefinedRole: {0} is already a separator or ignored")]
    AlreadyDefinedRole(String),

    // tokenizing and parsing
    #[error("UnknownExpression at {at}: {rest}")]
    UnknownExpression { at: usize, rest: String },

    #[error("MissingNud: '{token}' at {at} cannot start an expression")]
    MissingNud { token: String, at: usize },

    #[error("MissingLed: '{token}' at {at} cannot follow an expression")]
    MissingLed { token: String, at: usize },

    #[error("UnexpectedEndOfInput at {at}")]
    UnexpectedEndOfInput { at: usize },

    #[error("TrailingInput at {at}: {rest}")]
    TrailingInput { at: usize, rest: String },

    #[error("ExpectedToken '{expected}' at {at}, found '{found}'")]
    ExpectedToken {
        expected: String,
        found: String,
        at: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
