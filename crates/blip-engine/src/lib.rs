//! Sequencer and square-wave synthesis engine for midiblip.
//!
//! Merges decoded SMF tracks onto a sample clock and renders them through
//! a fixed bank of square-wave voices into a PCM sink.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod frequency;
mod sequencer;
mod sink;
mod spec;
mod synth;
mod voice;

pub use frequency::NoteTable;
pub use sequencer::{MidiSequencer, DEFAULT_TEMPO_US};
pub use sink::PcmSink;
pub use spec::{AudioSpec, ByteOrder, SampleFormat};
pub use synth::{RenderError, RenderStatus, SynthEngine, MASTER_GAIN};
pub use voice::{Voice, VOICE_COUNT};
