//! Tick clock and multi-track event merging.

use alloc::vec::Vec;
use blip_midi::{Event, FormatError, MidiFile, MidiHeader, MidiTrack};

/// Default tempo in microseconds per quarter note (120 BPM).
///
/// SET_TEMPO meta events are decoded but never re-applied; the tick rate
/// is derived once from this default.
pub const DEFAULT_TEMPO_US: u32 = 500_000;

/// Merges per-track event streams onto a single tick/sample clock.
///
/// `advance()` is called once per output sample; every `samples_per_tick`
/// calls, each track's tick clock steps by one. `poll_event()` yields due
/// events in track declaration order.
#[derive(Debug)]
pub struct MidiSequencer<'a> {
    header: MidiHeader,
    tracks: Vec<MidiTrack<'a>>,
    /// Output samples per MIDI tick, fixed at construction.
    samples_per_tick: u32,
    /// Sample counter within the current tick.
    sample_counter: u32,
    /// Tracks that have consumed their END_OF_TRACK.
    finished_tracks: usize,
    /// The terminal event has been handed to the caller.
    end_reported: bool,
}

impl<'a> MidiSequencer<'a> {
    /// Build a sequencer over a decoded file for the given sample rate.
    pub fn new(file: MidiFile<'a>, sample_rate: u32) -> Self {
        let samples_per_tick =
            samples_per_tick(DEFAULT_TEMPO_US, file.header.division, sample_rate);
        Self {
            header: file.header,
            tracks: file.tracks,
            samples_per_tick,
            sample_counter: 0,
            finished_tracks: 0,
            end_reported: false,
        }
    }

    pub fn header(&self) -> &MidiHeader {
        &self.header
    }

    pub fn samples_per_tick(&self) -> u32 {
        self.samples_per_tick
    }

    /// Samples left before the next tick boundary (always at least 1).
    pub fn samples_to_next_tick(&self) -> u32 {
        self.samples_per_tick - self.sample_counter
    }

    /// All tracks finished and the terminal event delivered.
    pub fn is_finished(&self) -> bool {
        self.end_reported
    }

    /// Advance the sample clock by one sample, stepping every track clock
    /// by one tick when the counter wraps.
    pub fn advance(&mut self) {
        self.sample_counter += 1;
        if self.sample_counter >= self.samples_per_tick {
            self.sample_counter = 0;
            for track in &mut self.tracks {
                track.advance();
            }
        }
    }

    /// Yield the next due event, scanning tracks in declaration order
    /// (ties broken by ascending track index).
    ///
    /// Per-track END_OF_TRACK markers are tallied, not surfaced; once every
    /// track has finished, a single terminal END_OF_TRACK is yielded and
    /// the sequencer goes quiet.
    pub fn poll_event(&mut self) -> Result<Option<Event>, FormatError> {
        if self.end_reported {
            return Ok(None);
        }
        for track in &mut self.tracks {
            match track.consume()? {
                Some(event) if event.is_end_of_track() => self.finished_tracks += 1,
                Some(event) => return Ok(Some(event)),
                None => {}
            }
        }
        if self.finished_tracks == self.tracks.len() {
            self.end_reported = true;
            return Ok(Some(Event::end_of_track()));
        }
        Ok(None)
    }
}

/// Output samples per tick: microseconds per tick (`tempo_us / division`)
/// divided by microseconds per sample, in integer arithmetic.
fn samples_per_tick(tempo_us: u32, division: u16, sample_rate: u32) -> u32 {
    let samples = (tempo_us as u64 * sample_rate as u64) / (division as u64 * 1_000_000);
    samples.max(1) as u32
}
