//! Streaming WAV container sink.
//!
//! The RIFF header goes out up front with zeroed size fields; samples are
//! streamed behind it, and `finish` seeks back to patch the sizes once the
//! total byte count is known.

use std::io::{self, Seek, SeekFrom, Write};

use blip_engine::{AudioSpec, PcmSink};

/// Offset of the RIFF chunk size field.
const RIFF_SIZE_OFFSET: u64 = 4;

/// Offset of the data chunk size field.
const DATA_SIZE_OFFSET: u64 = 40;

/// Header bytes preceding the sample data.
const HEADER_LEN: u32 = 44;

/// PCM WAV sink over any `Write + Seek` target.
pub struct WavSink<W: Write + Seek> {
    writer: W,
    spec: AudioSpec,
    data_bytes: u32,
    finished: bool,
}

impl<W: Write + Seek> WavSink<W> {
    /// Write the provisional header and return the sink.
    pub fn new(mut writer: W, spec: AudioSpec) -> io::Result<Self> {
        write_header(&mut writer, &spec, 0)?;
        Ok(Self { writer, spec, data_bytes: 0, finished: false })
    }

    /// Sample data bytes written so far.
    pub fn data_bytes(&self) -> u32 {
        self.data_bytes
    }

    /// Give back the writer. Only meaningful after `finish`.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Seek> PcmSink for WavSink<W> {
    type Error = io::Error;

    fn write_sample(&mut self, value: i32) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::new(io::ErrorKind::Other, "write after finish"));
        }
        let mut buf = [0u8; 4];
        let n = self.spec.sample_format.encode(value, self.spec.byte_order, &mut buf);
        self.writer.write_all(&buf[..n])?;
        self.data_bytes += n as u32;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::new(io::ErrorKind::Other, "finish called twice"));
        }
        self.finished = true;
        self.writer.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
        self.writer.write_all(&(HEADER_LEN - 8 + self.data_bytes).to_le_bytes())?;
        self.writer.seek(SeekFrom::Start(DATA_SIZE_OFFSET))?;
        self.writer.write_all(&self.data_bytes.to_le_bytes())?;
        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()
    }
}

fn write_header(w: &mut impl Write, spec: &AudioSpec, data_size: u32) -> io::Result<()> {
    let bits_per_sample = spec.sample_format.bits_per_sample();
    let block_align = spec.channels * spec.sample_format.bytes_per_sample();
    let byte_rate = spec.sample_rate * block_align as u32;

    w.write_all(b"RIFF")?;
    w.write_all(&(HEADER_LEN - 8 + data_size).to_le_bytes())?;
    w.write_all(b"WAVE")?;

    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?;
    w.write_all(&spec.channels.to_le_bytes())?;
    w.write_all(&spec.sample_rate.to_le_bytes())?;
    w.write_all(&byte_rate.to_le_bytes())?;
    w.write_all(&block_align.to_le_bytes())?;
    w.write_all(&bits_per_sample.to_le_bytes())?;

    w.write_all(b"data")?;
    w.write_all(&data_size.to_le_bytes())
}
