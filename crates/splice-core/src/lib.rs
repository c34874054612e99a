//! Decoder and text renderer for SPLICE drum-machine pattern files.
//!
//! A `.splice` file stores the hardware version a pattern was saved with,
//! its tempo and an ordered list of instruments, each carrying a 4x4 step
//! grid. Decoding is byte-oriented and side-effect free; file access is
//! isolated in `source`. Wire conventions live in the format reader so the
//! parser stays minimal.
//!
//! Invariants:
//! - Instruments keep the order in which they appear in the file.
//! - Trailer bytes after the declared payload are never inspected.
//! - Every decoded step is either off or on; rendering cannot fail.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use splice_core::{decode_file, render};
//!
//! let file = decode_file(Path::new("pattern_1.splice"))?;
//! print!("{}", render(&file));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod format;
mod render;
mod source;

pub use format::splice::decode;
pub use format::splice::error::SpliceError;
pub use render::{Header, format_pattern, format_tempo, render};
pub use source::{SourceError, decode_file};

/// Number of measures in a pattern.
pub const MEASURES: usize = format::splice::layout::MEASURES;
/// Number of steps in each measure.
pub const STEPS_PER_MEASURE: usize = format::splice::layout::STEPS_PER_MEASURE;
/// Raw size of a pattern on the wire.
pub const PATTERN_LEN: usize = format::splice::layout::PATTERN_LEN;

/// A decoded SPLICE file.
///
/// # Examples
/// ```
/// use splice_core::SpliceFile;
///
/// let file = SpliceFile {
///     hardware_string: "0.808-alpha".to_string(),
///     tempo: 120.0,
///     instruments: Vec::new(),
/// };
/// assert!(file.instruments.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpliceFile {
    /// Hardware version the pattern was saved with, NUL padding removed.
    pub hardware_string: String,
    /// Tempo in beats per minute.
    pub tempo: f32,
    /// Instruments in file order (not sorted by id).
    pub instruments: Vec<Instrument>,
}

/// One instrument track of a pattern.
///
/// # Examples
/// ```
/// use splice_core::{Instrument, Pattern};
///
/// let kick = Instrument {
///     id: 0,
///     name: "kick".to_string(),
///     pattern: Pattern::default(),
/// };
/// assert_eq!(kick.pattern.steps().count(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument id; neither unique nor ordered within a file.
    pub id: u8,
    /// Instrument name as stored in the file.
    pub name: String,
    /// Step grid for this instrument.
    pub pattern: Pattern,
}

/// 4 measures of 4 steps each.
///
/// # Examples
/// ```
/// use splice_core::{Pattern, Step};
///
/// let mut pattern = Pattern::default();
/// pattern.measures[2][0] = Step::On;
/// let first_on = pattern.steps().position(|step| step.is_on());
/// assert_eq!(first_on, Some(8));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Measures in play order, each holding its steps in play order.
    pub measures: [[Step; STEPS_PER_MEASURE]; MEASURES],
}

impl Pattern {
    /// Build a pattern from its 16 raw step bytes, measure by measure.
    ///
    /// `instrument` only labels the error when a byte is neither 0 nor 1.
    ///
    /// # Examples
    /// ```
    /// use splice_core::{Pattern, SpliceError, Step};
    ///
    /// let mut raw = [0u8; 16];
    /// raw[4] = 1;
    /// let pattern = Pattern::from_raw(&raw, 0)?;
    /// assert_eq!(pattern.measures[1][0], Step::On);
    /// # Ok::<(), SpliceError>(())
    /// ```
    pub fn from_raw(raw: &[u8; PATTERN_LEN], instrument: u8) -> Result<Self, SpliceError> {
        let mut pattern = Pattern::default();
        for (position, &value) in raw.iter().enumerate() {
            let step = Step::from_byte(value).ok_or(SpliceError::InvalidStepValue {
                instrument,
                position,
                value,
            })?;
            pattern.measures[position / STEPS_PER_MEASURE][position % STEPS_PER_MEASURE] = step;
        }
        Ok(pattern)
    }

    /// Iterate over all 16 steps in play order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.measures.iter().flatten().copied()
    }
}

/// A single sequencer step.
///
/// # Examples
/// ```
/// use splice_core::Step;
///
/// assert_eq!(Step::from_byte(1), Some(Step::On));
/// assert_eq!(Step::from_byte(2), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Off,
    On,
}

impl Step {
    /// Map a raw step byte; only 0 and 1 are defined.
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            format::splice::layout::STEP_OFF => Some(Step::Off),
            format::splice::layout::STEP_ON => Some(Step::On),
            _ => None,
        }
    }

    pub fn is_on(self) -> bool {
        self == Step::On
    }
}
