//! Container record: frequency header plus packed payload.
//!
//! ```text
//! 0:1 97:3 98:2\n<packed payload bytes>
//! ```
//!
//! The header is a single UTF-8 line of `<codepoint>:<count>` tokens joined
//! by one space, one per alphabet symbol in alphabet order (terminator
//! first), holding raw occurrence counts. The payload is the encoded bit
//! stream packed MSB-first with the last byte zero-padded.

use std::io::{Read, Write};

use log::debug;

use crate::arithmetic;
use crate::bits::BitSequence;
use crate::error::{Error, Result};
use crate::model::{FrequencyModel, ModelConfig};

/// A model and the bits it encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    model: FrequencyModel,
    payload: BitSequence,
}

impl Container {
    /// Build a model for `text` and encode it.
    pub fn encode(text: &str) -> Result<Self> {
        Self::encode_with(text, &ModelConfig::default())
    }

    /// Like [`encode`](Self::encode) with explicit model options.
    pub fn encode_with(text: &str, config: &ModelConfig) -> Result<Self> {
        let model = FrequencyModel::build_with(text, config)?;
        let payload = arithmetic::encode(&model, text)?;
        Ok(Self { model, payload })
    }

    /// Pair an existing model with a payload.
    pub fn new(model: FrequencyModel, payload: BitSequence) -> Self {
        Self { model, payload }
    }

    /// Decode the payload with the stored model.
    pub fn decode(&self) -> Result<String> {
        arithmetic::decode(&self.model, &self.payload)
    }

    /// The stored model.
    pub fn model(&self) -> &FrequencyModel {
        &self.model
    }

    /// The stored bit stream.
    pub fn payload(&self) -> &BitSequence {
        &self.payload
    }

    /// Size figures for the stored stream.
    pub fn stats(&self) -> CompressionStats {
        let (_, terminator_count) = self.model.range_of(0);
        CompressionStats {
            symbols: (self.model.total() - terminator_count) as usize,
            input_bits: 8 * self.model.total() as usize,
            payload_bits: self.payload.len(),
        }
    }

    /// The header line, newline included.
    pub fn header(&self) -> String {
        let tokens: Vec<String> = self
            .model
            .alphabet()
            .symbols()
            .iter()
            .zip(self.model.counts())
            .map(|(&symbol, count)| format!("{}:{count}", u32::from(symbol)))
            .collect();
        let mut line = tokens.join(" ");
        line.push('\n');
        line
    }

    /// Serialize header and payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header().into_bytes();
        bytes.extend(self.payload.to_bytes());
        bytes
    }

    /// Parse a serialized container.
    ///
    /// The payload is unpacked whole, padding bits included.
    ///
    /// # Errors
    /// - [`Error::InvalidHeader`] if the header line is missing or malformed.
    /// - Any model validation error from [`FrequencyModel::from_counts`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let newline = bytes
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| Error::InvalidHeader("missing newline".into()))?;
        let line = std::str::from_utf8(&bytes[..newline])
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;

        let entries = parse_header(line)?;
        let model = FrequencyModel::from_counts(entries)?;
        let payload = BitSequence::from_bytes(&bytes[newline + 1..]);
        Ok(Self { model, payload })
    }

    /// Write the serialized container to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.to_bytes();
        writer.write_all(&bytes)?;
        writer.flush()?;
        debug!(
            "wrote container: {} header symbols, {} bytes",
            self.model.alphabet().len(),
            bytes.len()
        );
        Ok(())
    }

    /// Read a whole container from `reader`.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        debug!("read container: {} bytes", bytes.len());
        Self::from_bytes(&bytes)
    }
}

fn parse_header(line: &str) -> Result<Vec<(char, u32)>> {
    if line.is_empty() {
        return Err(Error::InvalidHeader("empty header".into()));
    }
    line.split(' ').map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<(char, u32)> {
    let (code, count) = token
        .split_once(':')
        .ok_or_else(|| Error::InvalidHeader(format!("token {token:?} has no ':'")))?;
    let code: u32 = code
        .parse()
        .map_err(|_| Error::InvalidHeader(format!("bad codepoint in {token:?}")))?;
    let symbol = char::from_u32(code)
        .ok_or_else(|| Error::InvalidHeader(format!("{code} is not a scalar value")))?;
    let count: u32 = count
        .parse()
        .map_err(|_| Error::InvalidHeader(format!("bad count in {token:?}")))?;
    Ok((symbol, count))
}

/// Size of an encoded stream relative to its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionStats {
    /// Ordinary symbols encoded (terminator excluded).
    pub symbols: usize,
    /// Input size at 8 bits per symbol, terminator included.
    pub input_bits: usize,
    /// Encoded bits before byte padding.
    pub payload_bits: usize,
}

impl CompressionStats {
    /// `input_bits / payload_bits`; infinite for an empty payload.
    pub fn ratio(&self) -> f64 {
        if self.payload_bits == 0 {
            f64::INFINITY
        } else {
            self.input_bits as f64 / self.payload_bits as f64
        }
    }
}
