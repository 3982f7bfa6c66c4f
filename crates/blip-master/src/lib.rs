//! Headless render driver for midiblip.
//!
//! Pumps the synthesis engine into a PCM sink until the sequence ends,
//! producing a finished WAV stream in one call.

mod wav;

use std::io::{Seek, Write};

use blip_engine::{MidiSequencer, PcmSink, RenderStatus, SynthEngine};
use blip_midi::load_smf;
use thiserror::Error;

// Re-export the types callers need so they don't depend on the inner
// crates directly.
pub use blip_engine::{AudioSpec, ByteOrder, SampleFormat};
pub use blip_midi::{FormatError, MidiHeader};
pub use wav::WavSink;

/// Samples requested per render block.
const BLOCK_SAMPLES: u32 = 4096;

/// Top-level render failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed MIDI file: {0}")]
    Format(#[from] FormatError),
    #[error("audio sink: {0}")]
    Io(#[from] std::io::Error),
}

impl From<blip_engine::RenderError<std::io::Error>> for RenderError {
    fn from(err: blip_engine::RenderError<std::io::Error>) -> Self {
        match err {
            blip_engine::RenderError::Format(e) => RenderError::Format(e),
            blip_engine::RenderError::Sink(e) => RenderError::Io(e),
        }
    }
}

/// Summary of a completed render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStats {
    pub header: MidiHeader,
    pub samples_per_tick: u32,
    /// Samples generated, per channel.
    pub samples: u64,
}

impl RenderStats {
    /// Rendered duration in seconds.
    pub fn seconds(&self, spec: &AudioSpec) -> f64 {
        self.samples as f64 / spec.sample_rate as f64
    }
}

/// Decode an SMF buffer and render it into a finished WAV stream.
pub fn render_smf<W: Write + Seek>(
    data: &[u8],
    writer: W,
    spec: AudioSpec,
) -> Result<RenderStats, RenderError> {
    let file = load_smf(data)?;
    let header = file.header;

    let sequencer = MidiSequencer::new(file, spec.sample_rate);
    let samples_per_tick = sequencer.samples_per_tick();
    let mut engine = SynthEngine::new(sequencer, spec);

    let mut sink = WavSink::new(writer, spec)?;
    loop {
        match engine.render(&mut sink, BLOCK_SAMPLES).map_err(RenderError::from)? {
            RenderStatus::Running => {}
            RenderStatus::Finished => break,
        }
    }
    sink.finish()?;

    Ok(RenderStats {
        header,
        samples_per_tick,
        samples: engine.samples_generated(),
    })
}
