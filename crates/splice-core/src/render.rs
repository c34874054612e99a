//! Text rendering of decoded files.
//!
//! Each piece of the report is a `Display` impl so that the document, an
//! instrument line and a single step all render the same way whether they
//! are printed alone or as part of the whole file.

use std::fmt;

use crate::{Instrument, Pattern, SpliceFile, Step};

/// Fractional parts below this are treated as a whole-number tempo.
const WHOLE_TEMPO_EPSILON: f64 = 0.0001;

/// Render the full text report for a decoded file.
///
/// # Examples
/// ```
/// use splice_core::{Instrument, Pattern, SpliceFile, Step, render};
///
/// let mut pattern = Pattern::default();
/// for measure in pattern.measures.iter_mut() {
///     measure[0] = Step::On;
/// }
/// let file = SpliceFile {
///     hardware_string: "0.808-alpha".to_string(),
///     tempo: 120.0,
///     instruments: vec![Instrument { id: 0, name: "kick".to_string(), pattern }],
/// };
/// assert_eq!(
///     render(&file),
///     "Saved with HW Version: 0.808-alpha\nTempo: 120\n(0) kick\t|x---|x---|x---|x---|\n"
/// );
/// ```
pub fn render(file: &SpliceFile) -> String {
    file.to_string()
}

/// Format a tempo, dropping the decimal point for whole numbers.
///
/// # Examples
/// ```
/// use splice_core::format_tempo;
///
/// assert_eq!(format_tempo(120.0), "120");
/// assert_eq!(format_tempo(98.4), "98.4");
/// ```
pub fn format_tempo(value: f32) -> String {
    let value = f64::from(value);
    let whole = value.trunc();
    if (value - whole).abs() < WHOLE_TEMPO_EPSILON {
        // `+ 0.0` folds -0 into 0.
        format!("{:.0}", whole + 0.0)
    } else {
        format!("{:.1}", value)
    }
}

/// Format a step grid as `|xxxx|xxxx|xxxx|xxxx|`.
pub fn format_pattern(pattern: &Pattern) -> String {
    pattern.to_string()
}

/// The two header lines of a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header<'a> {
    pub hardware_string: &'a str,
    pub tempo: f32,
}

impl<'a> From<&'a SpliceFile> for Header<'a> {
    fn from(file: &'a SpliceFile) -> Self {
        Self {
            hardware_string: &file.hardware_string,
            tempo: file.tempo,
        }
    }
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved with HW Version: {}", self.hardware_string)?;
        writeln!(f, "Tempo: {}", format_tempo(self.tempo))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Step::Off => '-',
            Step::On => 'x',
        };
        write!(f, "{symbol}")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for measure in &self.measures {
            for step in measure {
                write!(f, "{step}")?;
            }
            f.write_str("|")?;
        }
        Ok(())
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "({}) {}\t{}", self.id, self.name, self.pattern)
    }
}

impl fmt::Display for SpliceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Header::from(self))?;
        for instrument in &self.instruments {
            write!(f, "{instrument}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{format_pattern, format_tempo, render};
    use crate::{Instrument, Pattern, SpliceFile};

    fn pattern(raw: [u8; 16]) -> Pattern {
        Pattern::from_raw(&raw, 0).expect("test pattern")
    }

    #[test]
    fn tempo_whole_number_has_no_decimal_point() {
        assert_eq!(format_tempo(120.0), "120");
        assert_eq!(format_tempo(999.0), "999");
        assert_eq!(format_tempo(0.0), "0");
        assert_eq!(format_tempo(-0.0), "0");
    }

    #[test]
    fn tempo_fraction_keeps_one_decimal() {
        assert_eq!(format_tempo(98.4), "98.4");
        assert_eq!(format_tempo(118.5), "118.5");
    }

    #[test]
    fn tempo_threshold_boundary() {
        assert_eq!(format_tempo(999.00005), "999");
        assert_eq!(format_tempo(999.0006), "999.0");
        assert_eq!(format_tempo(120.00009), "120");
        assert_eq!(format_tempo(120.0002), "120.0");
    }

    #[test]
    fn tempo_non_finite_values() {
        assert_eq!(format_tempo(f32::NAN), "NaN");
        assert_eq!(format_tempo(f32::INFINITY), "inf");
    }

    #[test]
    fn pattern_maps_steps_to_symbols() {
        let raw = [0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0];
        assert_eq!(format_pattern(&pattern(raw)), "|--x-|--x-|x-x-|--x-|");
        assert_eq!(format_pattern(&Pattern::default()), "|----|----|----|----|");
    }

    #[test]
    fn render_header_only() {
        let file = SpliceFile {
            hardware_string: "0.808-alpha".to_string(),
            tempo: 120.0,
            instruments: Vec::new(),
        };
        assert_eq!(render(&file), "Saved with HW Version: 0.808-alpha\nTempo: 120\n");
    }

    #[test]
    fn render_keeps_instrument_order() {
        let file = SpliceFile {
            hardware_string: "0.909".to_string(),
            tempo: 118.0,
            instruments: [(40, "kick"), (1, "clap"), (3, "hh-open")]
                .into_iter()
                .map(|(id, name)| Instrument {
                    id,
                    name: name.to_string(),
                    pattern: Pattern::default(),
                })
                .collect(),
        };

        let text = render(&file);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("(40) kick\t"));
        assert!(lines[3].starts_with("(1) clap\t"));
        assert!(lines[4].starts_with("(3) hh-open\t"));
    }

    #[test]
    fn render_name_with_space() {
        let instrument = Instrument {
            id: 255,
            name: "Low Conga".to_string(),
            pattern: pattern([0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0]),
        };
        assert_eq!(instrument.to_string(), "(255) Low Conga\t|----|x---|----|x---|\n");
    }
}
