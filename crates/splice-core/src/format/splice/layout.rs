pub const MAGIC: &[u8; 6] = b"SPLICE";

pub const MAGIC_RANGE: std::ops::Range<usize> = 0..6;
pub const PAYLOAD_LEN_RANGE: std::ops::Range<usize> = 6..14;
pub const HEADER_LEN: usize = 14;

// Offsets below are relative to the start of the payload.
pub const HW_VERSION_RANGE: std::ops::Range<usize> = 0..32;
pub const TEMPO_RANGE: std::ops::Range<usize> = 32..36;
pub const INSTRUMENTS_OFFSET: usize = 36;

// Offsets below are relative to the start of an instrument record.
pub const INSTRUMENT_ID_OFFSET: usize = 0;
pub const NAME_LEN_RANGE: std::ops::Range<usize> = 1..5;
pub const NAME_OFFSET: usize = 5;

pub const MEASURES: usize = 4;
pub const STEPS_PER_MEASURE: usize = 4;
pub const PATTERN_LEN: usize = MEASURES * STEPS_PER_MEASURE;

pub const STEP_OFF: u8 = 0x00;
pub const STEP_ON: u8 = 0x01;

/// Smallest possible instrument record: empty name plus the pattern.
pub const MIN_INSTRUMENT_LEN: usize = NAME_OFFSET + PATTERN_LEN;
