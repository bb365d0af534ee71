//! Error types for arithmetic coding.

use thiserror::Error;

/// Error variants for model construction, coding, and container handling.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol has no entry in the model alphabet.
    #[error("symbol {symbol:?} is not in the model alphabet{}", at(.position))]
    UnknownSymbol {
        /// The offending symbol.
        symbol: char,
        /// Index of the symbol in the input, when known.
        position: Option<usize>,
    },

    /// The bit stream is inconsistent with the supplied model.
    #[error("malformed stream after {position} bits: {reason}")]
    MalformedStream {
        /// Number of real bits consumed when the inconsistency was found.
        position: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// A model cannot be built from zero symbols.
    #[error("empty input")]
    EmptyInput,

    /// The terminator symbol appeared inside ordinary input.
    #[error("reserved terminator {symbol:?} found in input at position {position}")]
    ReservedSymbol {
        /// The terminator symbol.
        symbol: char,
        /// Index of the symbol in the input.
        position: usize,
    },

    /// The symbol is in the alphabet but has no probability mass.
    #[error("symbol {symbol:?} has zero frequency")]
    ZeroFrequency {
        /// The offending symbol.
        symbol: char,
    },

    /// The total frequency is too large for the 16-bit interval.
    #[error("total frequency {total} exceeds limit {limit}")]
    PrecisionExceeded {
        /// Total symbol count of the rejected model.
        total: u64,
        /// Largest accepted total plus one.
        limit: u32,
    },

    /// Counts supplied to the model are inconsistent.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The container header line could not be parsed.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A textual bit string contained something other than `0` or `1`.
    #[error("invalid bit character {0:?}")]
    InvalidBitString(char),

    /// An I/O error occurred while reading or writing a container.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn at(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" (input position {p})"),
        None => String::new(),
    }
}

/// A specialized Result type for arithmetic coding operations.
pub type Result<T> = std::result::Result<T, Error>;
