//! # Arithmetic Coding
//!
//! *Near-entropy compression from a single shrinking interval.*
//!
//! ## Intuition First
//!
//! Picture the number line between 0 and 1. Give every symbol a slice of it
//! proportional to how often it occurs. To encode a message, zoom into the
//! slice of the first symbol, then into the slice of the second symbol
//! *inside* that, and so on. The whole message ends up as one tiny interval,
//! and any number inside it identifies the message. Likely symbols shrink the
//! interval a little, rare ones a lot, so the number of bits needed to name a
//! point inside it tracks the information content of the message.
//!
//! ## The Problem
//!
//! Exact real arithmetic is not available, and the interval shrinks
//! geometrically. A practical coder must:
//! - work in fixed-width integer registers,
//! - round identically on both sides, or the decoder drifts from the encoder,
//! - emit bits as soon as they are settled, so the registers never run out of
//!   precision, including when the interval straddles the midpoint,
//! - know when to stop decoding.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1963  Abramson    Elias' unpublished infinite-precision coding described
//! 1976  Rissanen    Finite-precision arithmetic coding
//! 1976  Pasco       FIFO arithmetic codes
//! 1979  Martin      Range coding
//! 1987  Witten, Neal & Cleary  Practical integer coder with underflow bits
//! ```
//!
//! ## Mathematical Formulation
//!
//! With cumulative counts $C_s$ (so symbol $s$ owns $[C_{s-1}, C_s)$) and total
//! $T$, each symbol maps the integer interval $[l, h]$ to
//!
//! ```text
//! r  = h - l + 1
//! h' = l + ⌊r · C_s / T⌋ - 1
//! l' = l + ⌊r · C_{s-1} / T⌋
//! ```
//!
//! An ideal coder spends $-\log_2(p_s)$ bits per symbol; the 16-bit version
//! here loses a small amount to rounding.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(1)$ amortized per symbol for encoding, $O(\log |A|)$ for
//!   decoding (binary search of the cumulative table).
//! - **Space**: $O(|A|)$ for the model.
//!
//! ## Failure Modes
//!
//! 1. **Precision**: the total count must stay below `QUARTER` (16384) or some
//!    symbols would get empty sub-intervals. Models that large are rejected.
//! 2. **Reserved terminator**: the end-of-stream symbol cannot appear in the
//!    input. Such input is rejected; choose another terminator through
//!    [`ModelConfig`] if needed.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`FrequencyModel`]: static order-0 model with a first-seen alphabet.
//! - [`ArithmeticEncoder`] / [`ArithmeticDecoder`]: the 16-bit state machines.
//! - [`Container`]: text header plus packed payload.
//!
//! ```
//! let bytes = arithcode::compress("abracadabra").unwrap();
//! assert_eq!(arithcode::decompress(&bytes).unwrap(), "abracadabra");
//! ```
//!
//! ## References
//!
//! - Witten, I. H., Neal, R. M., Cleary, J. G. (1987). "Arithmetic coding for data compression." CACM 30(6).
//! - Moffat, A., Neal, R. M., Witten, I. H. (1998). "Arithmetic coding revisited." ACM TOIS 16(3).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arithmetic;
pub mod bits;
pub mod container;
pub mod error;
pub mod model;

pub use arithmetic::{decode, encode, ArithmeticDecoder, ArithmeticEncoder};
pub use bits::{BitSequence, BitSource};
pub use container::{CompressionStats, Container};
pub use error::{Error, Result};
pub use model::{Alphabet, FrequencyModel, ModelConfig, DEFAULT_TERMINATOR};

/// Build a model for `text`, encode it, and serialize the container.
///
/// # Errors
/// Fails if `text` is empty, contains the terminator, or is too long for the
/// 16-bit interval.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    Ok(Container::encode(text)?.to_bytes())
}

/// Parse a serialized container and decode it.
///
/// # Errors
/// Fails on a malformed header or a stream that does not match it.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    Container::from_bytes(bytes)?.decode()
}
