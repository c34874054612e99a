use crate::Pattern;

use super::error::SpliceError;
use super::layout;

pub struct SpliceReader<'a> {
    bytes: &'a [u8],
}

impl<'a> SpliceReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), SpliceError> {
        if self.bytes.len() < needed {
            return Err(SpliceError::PayloadTooShort {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, SpliceError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(SpliceError::PayloadTooShort {
                needed: offset + 1,
                actual: self.bytes.len(),
            })
    }

    pub fn read_u32_be(&self, range: std::ops::Range<usize>) -> Result<u32, SpliceError> {
        let bytes = self.read_array::<4>(range)?;
        Ok(u32::from_be_bytes(bytes))
    }

    pub fn read_u64_be(&self, range: std::ops::Range<usize>) -> Result<u64, SpliceError> {
        let bytes = self.read_array::<8>(range)?;
        Ok(u64::from_be_bytes(bytes))
    }

    /// Tempo is the only little-endian field of the format.
    pub fn read_f32_le(&self, range: std::ops::Range<usize>) -> Result<f32, SpliceError> {
        let bytes = self.read_array::<4>(range)?;
        Ok(f32::from_le_bytes(bytes))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], SpliceError> {
        self.bytes.get(range.clone()).ok_or(SpliceError::PayloadTooShort {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }

    /// Read a fixed-width text field, dropping trailing NUL padding only.
    pub fn read_null_padded_string(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<String, SpliceError> {
        let bytes = self.read_slice(range)?;
        let end = bytes
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    pub fn read_string(&self, range: std::ops::Range<usize>) -> Result<String, SpliceError> {
        let bytes = self.read_slice(range)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read the 4x4 step grid, rejecting any byte other than off/on.
    pub fn read_pattern(
        &self,
        range: std::ops::Range<usize>,
        instrument: u8,
    ) -> Result<Pattern, SpliceError> {
        let raw = self.read_array::<{ layout::PATTERN_LEN }>(range)?;
        Pattern::from_raw(&raw, instrument)
    }

    fn read_array<const N: usize>(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<[u8; N], SpliceError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| SpliceError::PayloadTooShort {
            needed: N,
            actual: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SpliceReader;
    use crate::Step;
    use crate::format::splice::error::SpliceError;
    use crate::format::splice::layout;

    #[test]
    fn read_f32_le_decodes_tempo() {
        let bytes = 98.4f32.to_le_bytes();
        let reader = SpliceReader::new(&bytes);
        assert_eq!(reader.read_f32_le(0..4).unwrap(), 98.4);
    }

    #[test]
    fn read_u64_be_decodes_length() {
        let bytes = [0, 0, 0, 0, 0, 0, 0x01, 0x02];
        let reader = SpliceReader::new(&bytes);
        assert_eq!(reader.read_u64_be(0..8).unwrap(), 0x0102);
    }

    #[test]
    fn read_u32_be_out_of_range() {
        let bytes = [0u8; 3];
        let reader = SpliceReader::new(&bytes);
        let err = reader.read_u32_be(0..4).unwrap_err();
        assert!(matches!(
            err,
            SpliceError::PayloadTooShort {
                needed: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn null_padded_string_trims_trailing_nuls_only() {
        let mut field = [0u8; 32];
        field[..11].copy_from_slice(b"0.808-alpha");
        let reader = SpliceReader::new(&field);
        let value = reader.read_null_padded_string(0..32).unwrap();
        assert_eq!(value, "0.808-alpha");
    }

    #[test]
    fn null_padded_string_keeps_inner_bytes() {
        let field = *b"a\0b \0\0\0\0";
        let reader = SpliceReader::new(&field);
        let value = reader.read_null_padded_string(0..8).unwrap();
        assert_eq!(value, "a\0b ");
    }

    #[test]
    fn null_padded_string_all_padding() {
        let field = [0u8; 32];
        let reader = SpliceReader::new(&field);
        assert_eq!(reader.read_null_padded_string(0..32).unwrap(), "");
    }

    #[test]
    fn read_pattern_groups_measures_in_order() {
        let mut raw = [0u8; layout::PATTERN_LEN];
        raw[0] = 1;
        raw[5] = 1;
        raw[15] = 1;
        let reader = SpliceReader::new(&raw);
        let pattern = reader.read_pattern(0..layout::PATTERN_LEN, 7).unwrap();
        assert_eq!(pattern.measures[0][0], Step::On);
        assert_eq!(pattern.measures[1][1], Step::On);
        assert_eq!(pattern.measures[3][3], Step::On);
        assert_eq!(pattern.steps().filter(|step| step.is_on()).count(), 3);
    }

    #[test]
    fn read_pattern_rejects_unknown_step() {
        let mut raw = [0u8; layout::PATTERN_LEN];
        raw[6] = 2;
        let reader = SpliceReader::new(&raw);
        let err = reader.read_pattern(0..layout::PATTERN_LEN, 9).unwrap_err();
        assert_eq!(
            err,
            SpliceError::InvalidStepValue {
                instrument: 9,
                position: 6,
                value: 2
            }
        );
    }
}
