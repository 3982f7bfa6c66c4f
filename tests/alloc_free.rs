//! Allocation-free render path tests.
//!
//! Verify that `SynthEngine::render` does not allocate: once the file is
//! loaded, event decoding, dispatch, and mixing all run on preallocated
//! state.
//!
//! Just run `cargo test` — no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use blip_engine::{AudioSpec, MidiSequencer, PcmSink, RenderStatus, SynthEngine};
use blip_midi::load_smf;

/// Discards samples without touching the heap.
struct NullSink;

impl PcmSink for NullSink {
    type Error = core::convert::Infallible;

    fn write_sample(&mut self, _value: i32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Two tracks with notes, metas, running status, and a sysex to exercise
/// every decode path during rendering.
fn demo_smf() -> Vec<u8> {
    let lead: &[u8] = &[
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20,
        0x00, 0x90, 0x45, 0x7F,
        0x30, 0x80, 0x45, 0x40,
        0x00, 0x90, 0x47, 0x60, // running-status-free retrigger
        0x30, 0x4C, 0x50, //       running status note on
        0x30, 0x80, 0x47, 0x40,
        0x00, 0x4C, 0x40,
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let pad: &[u8] = &[
        0x00, 0xF0, 0x03, 0x01, 0x02, 0x03, // sysex, absorbed
        0x00, 0x91, 0x30, 0x50,
        0x81, 0x40, 0x81, 0x30, 0x40, //      delta 192
        0x00, 0xFF, 0x2F, 0x00,
    ];

    let mut data = Vec::new();
    data.extend_from_slice(b"MThd");
    data.extend_from_slice(&6u32.to_be_bytes());
    data.extend_from_slice(&1u16.to_be_bytes());
    data.extend_from_slice(&2u16.to_be_bytes());
    data.extend_from_slice(&96u16.to_be_bytes());
    for body in [lead, pad] {
        data.extend_from_slice(b"MTrk");
        data.extend_from_slice(&(body.len() as u32).to_be_bytes());
        data.extend_from_slice(body);
    }
    data
}

#[test]
fn render_loop_is_alloc_free() {
    let data = demo_smf();
    let file = load_smf(&data).unwrap();
    let sequencer = MidiSequencer::new(file, 44_100);
    let mut engine = SynthEngine::new(sequencer, AudioSpec::cd_mono());
    let mut sink = NullSink;

    assert_no_alloc(|| {
        let mut status = RenderStatus::Running;
        while status == RenderStatus::Running {
            status = engine.render(&mut sink, 4096).unwrap();
        }
    });

    assert!(engine.samples_generated() > 0);
}

#[test]
fn single_sample_blocks_are_alloc_free() {
    let data = demo_smf();
    let file = load_smf(&data).unwrap();
    let sequencer = MidiSequencer::new(file, 44_100);
    let mut engine = SynthEngine::new(sequencer, AudioSpec::cd_mono());
    let mut sink = NullSink;

    assert_no_alloc(|| {
        for _ in 0..44_100 {
            if engine.render(&mut sink, 1).unwrap() == RenderStatus::Finished {
                break;
            }
        }
    });
}
