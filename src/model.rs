//! Static order-0 frequency model.
//!
//! The model is an ordered [`Alphabet`] (first-seen order, terminator at
//! index 0) and a cumulative frequency table over that alphabet. Entry `i`
//! of the table is the number of occurrences of symbols at positions `<= i`,
//! so symbol `i` owns the sub-interval `[table[i-1], table[i])` of `[0, T)`,
//! with `table[-1] = 0` and `T` the last entry.
//!
//! The model is built once (from the input on the encode side, from the
//! container header on the decode side) and is read-only afterwards.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::arithmetic::QUARTER;
use crate::error::{Error, Result};

/// Terminator used when no [`ModelConfig`] is given.
pub const DEFAULT_TERMINATOR: char = '\0';

/// Model construction options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelConfig {
    /// Out-of-band symbol marking the end of the encoded sequence.
    pub terminator: char,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR,
        }
    }
}

/// Ordered set of distinct symbols; index 0 is always the terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    fn with_terminator(terminator: char) -> Self {
        let mut alphabet = Self {
            symbols: Vec::new(),
            index: HashMap::new(),
        };
        alphabet.insert(terminator);
        alphabet
    }

    /// Append `symbol` if unseen; returns its index either way.
    fn insert(&mut self, symbol: char) -> usize {
        if let Some(&i) = self.index.get(&symbol) {
            return i;
        }
        let i = self.symbols.len();
        self.symbols.push(symbol);
        self.index.insert(symbol, i);
        i
    }

    /// The reserved end-of-stream symbol.
    pub fn terminator(&self) -> char {
        self.symbols[0]
    }

    /// Index of `symbol`, if present.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Symbol at `index`, if in range.
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Number of symbols, terminator included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: the terminator is always present.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in alphabet order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

/// Alphabet plus cumulative frequency table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyModel {
    alphabet: Alphabet,
    cumulative: Vec<u32>,
}

impl FrequencyModel {
    /// Build a model from `text` with the default terminator.
    ///
    /// The terminator is counted once on top of the symbols of `text`, since
    /// the encoder always finishes with it.
    ///
    /// # Errors
    /// - [`Error::EmptyInput`] if `text` is empty.
    /// - [`Error::ReservedSymbol`] if `text` contains the terminator.
    /// - [`Error::PrecisionExceeded`] if the total count reaches `QUARTER`.
    pub fn build(text: &str) -> Result<Self> {
        Self::build_with(text, &ModelConfig::default())
    }

    /// Build a model from `text` with explicit options.
    pub fn build_with(text: &str, config: &ModelConfig) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let terminator = config.terminator;
        let mut alphabet = Alphabet::with_terminator(terminator);
        for (position, symbol) in text.chars().enumerate() {
            if symbol == terminator {
                return Err(Error::ReservedSymbol { symbol, position });
            }
            alphabet.insert(symbol);
        }

        // Second pass: raw counts, then running prefix sum.
        let mut cumulative = vec![0u32; alphabet.len()];
        cumulative[0] = 1;
        for symbol in text.chars() {
            if let Some(i) = alphabet.index_of(symbol) {
                cumulative[i] = cumulative[i].saturating_add(1);
            }
        }
        prefix_sum(&mut cumulative)?;

        let model = Self {
            alphabet,
            cumulative,
        };
        debug!(
            "built model: {} symbols, total frequency {}",
            model.alphabet.len(),
            model.total()
        );
        Ok(model)
    }

    /// Rebuild a model from `(symbol, raw count)` pairs in alphabet order.
    ///
    /// The first pair is the terminator and must have a non-zero count.
    ///
    /// # Errors
    /// - [`Error::EmptyInput`] if `entries` is empty.
    /// - [`Error::InvalidModel`] on duplicate symbols or a zero terminator count.
    /// - [`Error::PrecisionExceeded`] if the total count reaches `QUARTER`.
    pub fn from_counts<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        let mut entries = entries.into_iter();
        let (terminator, terminator_count) = entries.next().ok_or(Error::EmptyInput)?;
        if terminator_count == 0 {
            return Err(Error::InvalidModel(format!(
                "terminator {terminator:?} has zero count"
            )));
        }

        let mut alphabet = Alphabet::with_terminator(terminator);
        let mut cumulative = vec![terminator_count];
        for (symbol, count) in entries {
            if alphabet.index_of(symbol).is_some() {
                return Err(Error::InvalidModel(format!(
                    "duplicate symbol {symbol:?}"
                )));
            }
            alphabet.insert(symbol);
            cumulative.push(count);
        }
        prefix_sum(&mut cumulative)?;

        Ok(Self {
            alphabet,
            cumulative,
        })
    }

    /// The model alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The reserved end-of-stream symbol.
    pub fn terminator(&self) -> char {
        self.alphabet.terminator()
    }

    /// Cumulative frequency table, one entry per alphabet symbol.
    pub fn cumulative(&self) -> &[u32] {
        &self.cumulative
    }

    /// Total frequency `T` (last cumulative entry).
    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Raw (non-cumulative) counts in alphabet order.
    pub fn counts(&self) -> Vec<u32> {
        let mut previous = 0;
        self.cumulative
            .iter()
            .map(|&c| {
                let count = c - previous;
                previous = c;
                count
            })
            .collect()
    }

    /// Exact-match lookup of `symbol`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownSymbol`] if `symbol` is not in the alphabet.
    pub fn symbol_index(&self, symbol: char) -> Result<usize> {
        self.alphabet.index_of(symbol).ok_or(Error::UnknownSymbol {
            symbol,
            position: None,
        })
    }

    /// `(low_count, high_count)` of the symbol at `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the alphabet.
    pub fn range_of(&self, index: usize) -> (u32, u32) {
        let low = if index == 0 {
            0
        } else {
            self.cumulative[index - 1]
        };
        (low, self.cumulative[index])
    }

    /// Smallest index whose cumulative entry exceeds `target`.
    ///
    /// Returns `None` when `target >= T`. Zero-count symbols are never
    /// returned, since their entry equals their predecessor's.
    pub fn find(&self, target: u32) -> Option<usize> {
        let index = self.cumulative.partition_point(|&c| c <= target);
        (index < self.cumulative.len()).then_some(index)
    }
}

/// Convert raw counts to a running sum in place and check the precision bound.
fn prefix_sum(table: &mut [u32]) -> Result<()> {
    let total: u64 = table.iter().map(|&c| u64::from(c)).sum();
    if total >= u64::from(QUARTER) {
        return Err(Error::PrecisionExceeded {
            total,
            limit: QUARTER,
        });
    }

    let mut running = 0;
    for entry in table.iter_mut() {
        running += *entry;
        *entry = running;
    }
    Ok(())
}

impl fmt::Display for FrequencyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.alphabet.symbols().iter().zip(self.counts()) {
            if symbol.is_control() {
                writeln!(f, "{} - {count}", symbol.escape_default())?;
            } else {
                writeln!(f, "{symbol} - {count}")?;
            }
        }
        Ok(())
    }
}
