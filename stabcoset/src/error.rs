use thiserror::Error;

/// Errors raised while parsing, multiplying or validating Pauli operators and codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    #[error("Pauli operators must have the same length (got {left} and {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("list of Pauli operators cannot be empty")]
    EmptyInput,

    #[error("invalid Pauli symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("invalid code definition: {0}")]
    Validation(String),

    #[error("no logical qubit with index {0}")]
    UnknownLogical(usize),

    #[error("no code named {0:?}")]
    UnknownCode(String),

    #[error("{left} does not commute with {right}")]
    Anticommuting { left: String, right: String },

    #[error("could not read code table: {0}")]
    Config(String),
}

impl From<toml::de::Error> for EccError {
    fn from(err: toml::de::Error) -> Self {
        EccError::Config(err.to_string())
    }
}
