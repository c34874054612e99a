use tracing::{debug, trace};

use crate::{Instrument, SpliceFile};

use super::error::SpliceError;
use super::layout;
use super::reader::SpliceReader;

/// Decode a complete SPLICE buffer.
///
/// Bytes past the declared payload length are ignored.
pub fn decode(bytes: &[u8]) -> Result<SpliceFile, SpliceError> {
    let payload = read_payload(bytes)?;
    let reader = SpliceReader::new(payload);
    reader.require_len(layout::INSTRUMENTS_OFFSET)?;

    let hardware_string = reader.read_null_padded_string(layout::HW_VERSION_RANGE)?;
    let tempo = reader.read_f32_le(layout::TEMPO_RANGE)?;
    let stream = reader.read_slice(layout::INSTRUMENTS_OFFSET..payload.len())?;
    let instruments = parse_instruments(stream)?;

    debug!(
        payload_len = payload.len(),
        trailer_len = bytes.len() - layout::HEADER_LEN - payload.len(),
        instruments = instruments.len(),
        "decoded splice file"
    );

    Ok(SpliceFile {
        hardware_string,
        tempo,
        instruments,
    })
}

fn read_payload(bytes: &[u8]) -> Result<&[u8], SpliceError> {
    let reader = SpliceReader::new(bytes);
    let magic = reader
        .read_slice(layout::MAGIC_RANGE)
        .map_err(|_| SpliceError::InvalidMagic {
            found: bytes.to_vec(),
        })?;
    if magic != layout::MAGIC {
        return Err(SpliceError::InvalidMagic {
            found: magic.to_vec(),
        });
    }

    let declared = reader
        .read_u64_be(layout::PAYLOAD_LEN_RANGE)
        .map_err(|_| SpliceError::TruncatedInput {
            needed: layout::HEADER_LEN as u64,
            available: bytes.len(),
        })?;
    let truncated = SpliceError::TruncatedInput {
        needed: declared.saturating_add(layout::HEADER_LEN as u64),
        available: bytes.len(),
    };
    let end = usize::try_from(declared)
        .ok()
        .and_then(|len| len.checked_add(layout::HEADER_LEN))
        .ok_or_else(|| truncated.clone())?;
    reader.read_slice(layout::HEADER_LEN..end).map_err(|_| truncated)
}

fn parse_instruments(stream: &[u8]) -> Result<Vec<Instrument>, SpliceError> {
    let mut instruments = Vec::new();
    let mut offset = 0;
    while let Some(record) = stream.get(offset..).filter(|rest| !rest.is_empty()) {
        let (instrument, consumed) =
            parse_instrument(record, offset + layout::INSTRUMENTS_OFFSET)?;
        trace!(
            id = instrument.id,
            instrument_name = %instrument.name,
            offset,
            "decoded instrument"
        );
        instruments.push(instrument);
        offset += consumed;
    }
    Ok(instruments)
}

/// Decode one record from the head of `record`, returning it with its size.
///
/// `offset` is the record position within the payload, used for errors only.
fn parse_instrument(record: &[u8], offset: usize) -> Result<(Instrument, usize), SpliceError> {
    let truncated = |needed: usize| SpliceError::TruncatedInstrument {
        offset,
        needed,
        actual: record.len(),
    };
    let reader = SpliceReader::new(record);
    if record.len() < layout::MIN_INSTRUMENT_LEN {
        return Err(truncated(layout::MIN_INSTRUMENT_LEN));
    }

    let id = reader.read_u8(layout::INSTRUMENT_ID_OFFSET)?;
    let name_len = reader.read_u32_be(layout::NAME_LEN_RANGE)?;
    let name_end = usize::try_from(name_len)
        .ok()
        .and_then(|len| layout::NAME_OFFSET.checked_add(len))
        .ok_or_else(|| truncated(usize::MAX))?;
    let record_len = name_end
        .checked_add(layout::PATTERN_LEN)
        .ok_or_else(|| truncated(usize::MAX))?;
    if record.len() < record_len {
        return Err(truncated(record_len));
    }

    let name = reader.read_string(layout::NAME_OFFSET..name_end)?;
    let pattern = reader.read_pattern(name_end..record_len, id)?;

    Ok((Instrument { id, name, pattern }, record_len))
}
