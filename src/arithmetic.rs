//! Finite-precision binary arithmetic coding.
//!
//! Both directions share one numeric contract over the 16-bit interval
//! `[0, 65536)`. Each symbol narrows `[low, high]` to its cumulative-frequency
//! share using floor division:
//!
//! ```text
//! range = high - low + 1
//! high' = low + range * high_count / T - 1
//! low'  = low + range * low_count  / T
//! ```
//!
//! followed by renormalization, whose three cases are checked in order:
//!
//! - **lower half** (`high < HALF`): bit `0`, scale by 2;
//! - **upper half** (`low >= HALF`): bit `1`, subtract `HALF`, scale by 2;
//! - **middle straddle** (`QUARTER <= low`, `high < THIRD_QUARTER`): subtract
//!   `QUARTER`, scale by 2, and defer the bit. The encoder counts deferred
//!   bits and flushes them with opposite polarity after the next committed bit.
//!
//! Encoding ends with the model's terminator symbol and a two-case flush, so
//! no length needs to be stored: the decoder stops when it decodes the
//! terminator.

use log::{debug, trace};

use crate::bits::{BitSequence, BitSource};
use crate::error::{Error, Result};
use crate::model::FrequencyModel;

/// Register width in bits.
pub const PRECISION: u32 = 16;
/// Register ceiling.
pub const HIGH_BOUND: u32 = (1 << PRECISION) - 1;
/// Midpoint of the interval.
pub const HALF: u32 = 1 << (PRECISION - 1);
/// First quarter point. Totals must stay below this.
pub const QUARTER: u32 = 1 << (PRECISION - 2);
/// Third quarter point.
pub const THIRD_QUARTER: u32 = HALF + QUARTER;

/// Which renormalization case applies to an interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scale {
    Lower,
    Upper,
    Middle,
}

impl Scale {
    fn offset(self) -> u32 {
        match self {
            Scale::Lower => 0,
            Scale::Upper => HALF,
            Scale::Middle => QUARTER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Interval {
    low: u32,
    high: u32,
}

impl Interval {
    const FULL: Self = Self {
        low: 0,
        high: HIGH_BOUND,
    };

    /// Narrow to the `[low_count, high_count)` share of `total`.
    #[inline]
    fn narrow(&mut self, (low_count, high_count): (u32, u32), total: u32) {
        let range = self.high - self.low + 1;
        self.high = self.low + range * high_count / total - 1;
        self.low += range * low_count / total;
    }

    #[inline]
    fn classify(&self) -> Option<Scale> {
        if self.high < HALF {
            Some(Scale::Lower)
        } else if self.low >= HALF {
            Some(Scale::Upper)
        } else if self.low >= QUARTER && self.high < THIRD_QUARTER {
            Some(Scale::Middle)
        } else {
            None
        }
    }

    #[inline]
    fn rescale(&mut self, scale: Scale) {
        let offset = scale.offset();
        self.low = 2 * (self.low - offset);
        self.high = 2 * (self.high - offset) + 1;
    }
}

/// Arithmetic encoder over a static model.
///
/// Symbols are pushed one at a time with [`encode`](Self::encode);
/// [`finish`](Self::finish) appends the terminator and flushes.
pub struct ArithmeticEncoder<'m> {
    model: &'m FrequencyModel,
    interval: Interval,
    pending: u32,
    output: BitSequence,
    symbols: usize,
}

impl<'m> ArithmeticEncoder<'m> {
    /// Create an encoder for `model`.
    pub fn new(model: &'m FrequencyModel) -> Self {
        Self {
            model,
            interval: Interval::FULL,
            pending: 0,
            output: BitSequence::new(),
            symbols: 0,
        }
    }

    /// Encode one ordinary symbol.
    ///
    /// # Errors
    /// - [`Error::ReservedSymbol`] if `symbol` is the terminator.
    /// - [`Error::UnknownSymbol`] if `symbol` is not in the alphabet.
    /// - [`Error::ZeroFrequency`] if `symbol` has no probability mass.
    pub fn encode(&mut self, symbol: char) -> Result<()> {
        let position = self.symbols;
        if symbol == self.model.terminator() {
            return Err(Error::ReservedSymbol { symbol, position });
        }
        let index = self
            .model
            .alphabet()
            .index_of(symbol)
            .ok_or(Error::UnknownSymbol {
                symbol,
                position: Some(position),
            })?;
        let (low_count, high_count) = self.model.range_of(index);
        if low_count == high_count {
            return Err(Error::ZeroFrequency { symbol });
        }

        self.encode_index(index);
        self.symbols += 1;
        Ok(())
    }

    fn encode_index(&mut self, index: usize) {
        self.interval.narrow(self.model.range_of(index), self.model.total());
        trace!(
            "symbol index {index}: [{}, {}]",
            self.interval.low,
            self.interval.high
        );

        while let Some(scale) = self.interval.classify() {
            match scale {
                Scale::Lower => self.emit(false),
                Scale::Upper => self.emit(true),
                Scale::Middle => self.pending += 1,
            }
            self.interval.rescale(scale);
        }
    }

    /// Write `bit`, then every deferred bit with the opposite polarity.
    #[inline]
    fn emit(&mut self, bit: bool) {
        self.output.push(bit);
        self.output.push_repeated(!bit, self.pending);
        self.pending = 0;
    }

    /// Number of symbols encoded so far, terminator excluded.
    pub fn symbols_encoded(&self) -> usize {
        self.symbols
    }

    /// Number of straddle bits waiting for a committed bit.
    pub fn pending_bits(&self) -> u32 {
        self.pending
    }

    /// Encode the terminator, flush, and return the bit stream.
    ///
    /// The flush picks the quarter that lies inside the final interval: `01`
    /// when `low < QUARTER`, `10` otherwise, with deferred bits expanded after
    /// the first bit. Any continuation of the stream then decodes to the same
    /// symbols.
    pub fn finish(mut self) -> BitSequence {
        self.encode_index(0);

        self.pending += 1;
        let flushed = self.pending;
        let bit = self.interval.low >= QUARTER;
        self.emit(bit);

        debug!(
            "encoded {} symbols into {} bits ({} flushed)",
            self.symbols,
            self.output.len(),
            flushed + 1
        );
        self.output
    }
}

/// Arithmetic decoder over a static model.
///
/// Yields symbols until the terminator is decoded. The terminator itself is
/// consumed but never returned.
pub struct ArithmeticDecoder<'m, 'b> {
    model: &'m FrequencyModel,
    interval: Interval,
    value: u32,
    source: BitSource<'b>,
    decoded: usize,
    limit: usize,
    finished: bool,
}

impl<'m, 'b> ArithmeticDecoder<'m, 'b> {
    /// Create a decoder reading `bits` with `model`.
    ///
    /// The first [`PRECISION`] bits fill the code register; a shorter stream
    /// is zero-filled on the right.
    pub fn new(model: &'m FrequencyModel, bits: &'b BitSequence) -> Self {
        let mut source = BitSource::new(bits);
        let value = source.register(PRECISION);
        let (_, terminator_count) = model.range_of(0);
        Self {
            model,
            interval: Interval::FULL,
            value,
            source,
            decoded: 0,
            limit: (model.total() - terminator_count) as usize,
            finished: false,
        }
    }

    fn malformed(&self, reason: &'static str) -> Error {
        Error::MalformedStream {
            position: self.source.position(),
            reason,
        }
    }

    /// Decode the next symbol.
    ///
    /// Returns `Ok(None)` once the terminator has been decoded.
    ///
    /// # Errors
    /// Returns [`Error::MalformedStream`] if the stream cannot have been
    /// produced by this model.
    pub fn decode_symbol(&mut self) -> Result<Option<char>> {
        if self.finished {
            return Ok(None);
        }

        let Interval { low, high } = self.interval;
        if self.value < low || self.value > high {
            return Err(self.malformed("code value outside the interval"));
        }
        let total = self.model.total();
        let range = high - low + 1;
        let target = ((self.value - low + 1) * total - 1) / range;
        let index = self
            .model
            .find(target)
            .ok_or_else(|| self.malformed("target beyond the frequency table"))?;

        self.interval.narrow(self.model.range_of(index), total);
        trace!(
            "symbol index {index}: [{}, {}] value {}",
            self.interval.low,
            self.interval.high,
            self.value
        );

        if index == 0 {
            self.finished = true;
            debug!(
                "decoded {} symbols from {} bits",
                self.decoded,
                self.source.position()
            );
            return Ok(None);
        }
        if self.decoded == self.limit {
            return Err(self.malformed("terminator missing after all counted symbols"));
        }
        self.decoded += 1;

        while let Some(scale) = self.interval.classify() {
            self.interval.rescale(scale);
            self.value = 2 * (self.value - scale.offset()) + u32::from(self.source.next_bit());
        }

        Ok(Some(self.model.alphabet().symbols()[index]))
    }

    /// Number of symbols decoded so far, terminator excluded.
    pub fn symbols_decoded(&self) -> usize {
        self.decoded
    }

    /// Number of real bits consumed so far.
    pub fn bits_consumed(&self) -> usize {
        self.source.position()
    }
}

impl Iterator for ArithmeticDecoder<'_, '_> {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.decode_symbol() {
            Ok(Some(symbol)) => Some(Ok(symbol)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Encode `text` followed by the terminator.
///
/// # Errors
/// Fails on the first symbol the encoder rejects; no partial output is kept.
pub fn encode(model: &FrequencyModel, text: &str) -> Result<BitSequence> {
    let mut encoder = ArithmeticEncoder::new(model);
    for symbol in text.chars() {
        encoder.encode(symbol)?;
    }
    Ok(encoder.finish())
}

/// Decode `bits` up to the terminator.
///
/// # Errors
/// Returns [`Error::MalformedStream`] if `bits` does not match `model`.
pub fn decode(model: &FrequencyModel, bits: &BitSequence) -> Result<String> {
    ArithmeticDecoder::new(model, bits).collect()
}
