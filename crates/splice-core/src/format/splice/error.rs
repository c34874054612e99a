use thiserror::Error;

/// Errors returned by SPLICE decoding.
///
/// Every variant is terminal for the decode call: the whole file is treated
/// as unparsable and nothing is rendered.
///
/// # Examples
/// ```
/// use splice_core::SpliceError;
///
/// let err = SpliceError::TruncatedInput { needed: 64, available: 10 };
/// assert!(err.to_string().contains("truncated input"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    #[error("invalid magic: expected \"SPLICE\", found {found:02x?}")]
    InvalidMagic { found: Vec<u8> },
    #[error("truncated input: need {needed} bytes, got {available}")]
    TruncatedInput { needed: u64, available: usize },
    #[error("payload too short: need {needed} bytes, got {actual}")]
    PayloadTooShort { needed: usize, actual: usize },
    #[error(
        "truncated instrument at payload offset {offset}: need {needed} bytes, got {actual}"
    )]
    TruncatedInstrument {
        offset: usize,
        needed: usize,
        actual: usize,
    },
    #[error("invalid step value {value:#04x} at step {position} of instrument {instrument}")]
    InvalidStepValue {
        instrument: u8,
        position: usize,
        value: u8,
    },
}
