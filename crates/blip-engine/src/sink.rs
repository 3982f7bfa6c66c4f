//! PCM sink contract.

use alloc::vec::Vec;

/// Consumer of rendered PCM samples.
///
/// `write_sample` is called once per output sample per channel, in emission
/// order. `finish` is called exactly once after the last sample, so
/// container formats can patch size fields that depend on the total byte
/// count. The engine never assumes a specific container.
pub trait PcmSink {
    type Error;

    fn write_sample(&mut self, value: i32) -> Result<(), Self::Error>;

    fn finish(&mut self) -> Result<(), Self::Error>;
}

/// In-memory sink for tests and benchmarks.
impl PcmSink for Vec<i32> {
    type Error = core::convert::Infallible;

    fn write_sample(&mut self, value: i32) -> Result<(), Self::Error> {
        self.push(value);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
