//! Block renderer with sample-accurate event dispatch.

use blip_midi::{status, Event, FormatError};
use libm::roundf;

use crate::frequency::NoteTable;
use crate::sequencer::MidiSequencer;
use crate::sink::PcmSink;
use crate::spec::AudioSpec;
use crate::voice::{Voice, VOICE_COUNT};

/// Master gain applied to the summed voice mix.
pub const MASTER_GAIN: f32 = 0.25;

/// Outcome of a render call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    /// More of the sequence remains; call `render` again.
    Running,
    /// Every track has ended; no further samples will be produced.
    Finished,
}

/// Render failure: either the decoder hit a malformed stream or the sink
/// rejected a sample.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderError<E> {
    Format(FormatError),
    Sink(E),
}

impl<E> From<FormatError> for RenderError<E> {
    fn from(err: FormatError) -> Self {
        RenderError::Format(err)
    }
}

/// Drives the sequencer and voice bank to produce PCM samples.
///
/// Generation never runs past an undispatched due event: samples are
/// produced at most up to the next tick boundary before the sequencer is
/// polled again.
pub struct SynthEngine<'a> {
    sequencer: MidiSequencer<'a>,
    voices: [Voice; VOICE_COUNT],
    notes: NoteTable,
    spec: AudioSpec,
    /// Samples requested but not yet generated, carried across calls.
    carry: u32,
    /// Total samples generated, per channel.
    samples_generated: u64,
    finished: bool,
}

impl<'a> SynthEngine<'a> {
    pub fn new(sequencer: MidiSequencer<'a>, spec: AudioSpec) -> Self {
        Self {
            sequencer,
            voices: [Voice::silent(); VOICE_COUNT],
            notes: NoteTable::equal_tempered(),
            spec,
            carry: 0,
            samples_generated: 0,
            finished: false,
        }
    }

    pub fn spec(&self) -> &AudioSpec {
        &self.spec
    }

    pub fn sequencer(&self) -> &MidiSequencer<'a> {
        &self.sequencer
    }

    /// Samples generated so far, per channel.
    pub fn samples_generated(&self) -> u64 {
        self.samples_generated
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Render up to `requested` samples into the sink.
    ///
    /// Whatever part of the request is smaller than one tick's worth of
    /// samples is carried into the next call, so any sequence of calls is
    /// sample-identical to a single call for the summed count.
    pub fn render<S: PcmSink>(
        &mut self,
        sink: &mut S,
        requested: u32,
    ) -> Result<RenderStatus, RenderError<S::Error>> {
        if self.finished {
            return Ok(RenderStatus::Finished);
        }
        self.carry += requested;

        loop {
            // Dispatch everything due before generating further samples.
            while let Some(event) = self.sequencer.poll_event()? {
                if event.is_end_of_track() {
                    self.finished = true;
                    return Ok(RenderStatus::Finished);
                }
                self.dispatch(&event);
            }

            if self.carry < self.sequencer.samples_per_tick() {
                return Ok(RenderStatus::Running);
            }

            // New events can only become due on a tick boundary.
            let advance = self.carry.min(self.sequencer.samples_to_next_tick());
            for _ in 0..advance {
                let value = self.mix_sample();
                for _ in 0..self.spec.channels {
                    sink.write_sample(value).map_err(RenderError::Sink)?;
                }
                self.sequencer.advance();
            }
            self.carry -= advance;
            self.samples_generated += advance as u64;
        }
    }

    /// Apply a channel voice event to the voice bank. Meta events and
    /// unhandled channel messages leave synthesis state untouched.
    fn dispatch(&mut self, event: &Event) {
        if !event.is_channel() {
            return;
        }
        let voice = &mut self.voices[event.channel() as usize];
        match event.kind() {
            status::NOTE_ON => voice.note_on(self.notes.frequency(event.data1), event.data2),
            status::NOTE_OFF => voice.note_off(),
            _ => {}
        }
    }

    /// Sum the voices, apply master gain, clamp, and convert to the output
    /// integer range.
    fn mix_sample(&mut self) -> i32 {
        let sample_rate = self.spec.sample_rate as f32;
        let mut mix = 0.0f32;
        for voice in &mut self.voices {
            mix += voice.step(sample_rate);
        }
        let scaled = (mix * MASTER_GAIN).clamp(-1.0, 1.0);
        roundf(self.spec.sample_format.full_scale() as f32 * scaled) as i32
    }
}
