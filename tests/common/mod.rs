//! Shared test infrastructure for strip-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::ops::Range;
use embedded_hal::delay::DelayNs;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::rngs::mock::StepRng;
use strip_sequencer::{
    Activation, Behavior, Emission, FrameSink, Pixel, Step, StepContext, StepError,
};

// ============================================================================
// Recording Frame Sink
// ============================================================================

/// A call the scheduler made on the sink
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Set(usize, Pixel),
    Fill(Range<usize>, Pixel),
    Transmit,
}

/// Error reported by a sink configured to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportError;

/// Mock sink that records every call and keeps a pixel buffer
pub struct RecordingSink {
    pixels: Vec<Pixel>,
    calls: Vec<SinkCall>,
    fail_transmits: bool,
}

impl RecordingSink {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Pixel::new(0, 0, 0); len],
            calls: Vec::new(),
            fail_transmits: false,
        }
    }

    /// A sink whose every transmit fails
    pub fn failing(len: usize) -> Self {
        let mut sink = Self::new(len);
        sink.fail_transmits = true;
        sink
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl FrameSink for RecordingSink {
    type Error = TransportError;

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Pixel) {
        assert!(index < self.pixels.len(), "pixel {} out of range", index);
        self.pixels[index] = color;
        self.calls.push(SinkCall::Set(index, color));
    }

    fn fill(&mut self, range: Range<usize>, color: Pixel) {
        assert!(range.end <= self.pixels.len(), "fill {:?} out of range", range);
        self.pixels[range.clone()].fill(color);
        self.calls.push(SinkCall::Fill(range, color));
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        self.calls.push(SinkCall::Transmit);
        if self.fail_transmits {
            Err(TransportError)
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Delay
// ============================================================================

/// Records requested delays and panics after `limit` of them.
///
/// Lets tests break out of the scheduler's endless `run` loop.
pub struct StoppingDelay {
    delays: Vec<u32>,
    limit: usize,
}

impl StoppingDelay {
    pub fn new(limit: usize) -> Self {
        Self {
            delays: Vec::new(),
            limit,
        }
    }

    pub fn delays(&self) -> &[u32] {
        &self.delays
    }
}

impl DelayNs for StoppingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        if self.delays.len() >= self.limit {
            panic!("stop after {} delays", self.limit);
        }
    }
}

// ============================================================================
// Entropy
// ============================================================================

/// Deterministic entropy for tests that do not care about randomness
pub fn fixed_entropy() -> StepRng {
    StepRng::new(0, 1)
}

/// Seeded entropy for statistical tests
pub fn seeded_entropy(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Steps `behavior` from a fresh activation `count` times, collecting each step
pub fn run_steps<const N: usize>(
    behavior: &Behavior,
    strip_len: usize,
    count: usize,
) -> Result<Vec<Step<Activation, N>>, StepError> {
    let mut rng = fixed_entropy();
    let mut ctx = StepContext::new(strip_len, &mut rng);
    let mut active = behavior.activate();
    let mut steps = Vec::with_capacity(count);

    for _ in 0..count {
        let step = behavior.step::<N>(active, &mut ctx)?;
        active = step.state;
        steps.push(step);
    }

    Ok(steps)
}

/// Renders an emission onto a black strip
pub fn render<const N: usize>(emission: &Emission<N>) -> Vec<Pixel> {
    let mut pixels = vec![Pixel::new(0, 0, 0); emission.strip_len()];
    emission.render_into(&mut pixels);
    pixels
}
