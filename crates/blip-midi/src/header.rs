//! SMF header chunk parsing and validation.

use crate::cursor::ByteCursor;
use crate::FormatError;

/// Division bit selecting SMPTE timecode, which is unsupported.
const SMPTE_FLAG: u16 = 0x8000;

/// A validated SMF header chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiHeader {
    /// SMF format: 0 (single track), 1 (parallel tracks), 2 (independent tracks).
    pub format: u16,
    /// Number of track chunks that follow.
    pub track_count: u16,
    /// Ticks per quarter note.
    pub division: u16,
}

impl MidiHeader {
    /// Parse and validate the header chunk, failing on the first bad field
    /// in byte order.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self, FormatError> {
        if cursor.read_bytes(4)? != b"MThd" {
            return Err(FormatError::InvalidChunkType);
        }
        if cursor.read_u32_be()? != 6 {
            return Err(FormatError::InvalidChunkLength);
        }

        let format = cursor.read_u16_be()?;
        if format > 2 {
            return Err(FormatError::InvalidFormat);
        }

        let track_count = cursor.read_u16_be()?;
        if track_count == 0 || (format == 0 && track_count != 1) {
            return Err(FormatError::InvalidNumberOfTracks);
        }

        let division = cursor.read_u16_be()?;
        if division == 0 || division & SMPTE_FLAG != 0 {
            return Err(FormatError::InvalidTimeDiv);
        }

        Ok(Self { format, track_count, division })
    }
}
