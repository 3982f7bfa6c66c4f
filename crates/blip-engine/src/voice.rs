//! Square-wave voice bank.

/// Number of voice slots. MIDI channel numbers index directly into the
/// bank, so it covers the full 16-channel space.
pub const VOICE_COUNT: usize = 16;

/// One square-wave oscillator slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Voice {
    /// Oscillator frequency in Hz.
    pub frequency: f32,
    /// Normalized velocity in [0, 1]; 0 means silent.
    pub velocity: f32,
    /// Phase accumulator in [0, 1).
    pub phase: f32,
}

impl Voice {
    pub const fn silent() -> Self {
        Self { frequency: 0.0, velocity: 0.0, phase: 0.0 }
    }

    /// Start a note. Phase is not reset, avoiding a retrigger discontinuity.
    pub fn note_on(&mut self, frequency: f32, velocity: u8) {
        self.frequency = frequency;
        self.velocity = velocity as f32 / 127.0;
    }

    /// Release the note. Frequency and phase are kept; the oscillator keeps
    /// running silently.
    pub fn note_off(&mut self) {
        self.velocity = 0.0;
    }

    /// Is the voice contributing to the mix?
    pub fn is_active(&self) -> bool {
        self.velocity > 0.0 && self.frequency > 0.0
    }

    /// Advance the phase by one sample and return the velocity-scaled
    /// square output.
    pub fn step(&mut self, sample_rate: f32) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        self.phase += self.frequency / sample_rate;
        while self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        let square = if self.phase < 0.5 { 1.0 } else { -1.0 };
        square * self.velocity
    }
}
