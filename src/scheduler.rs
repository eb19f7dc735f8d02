//! The animation scheduler.
//!
//! Provides [`Scheduler`], which owns the active slot, steps the active
//! animation, forwards each emission to a [`FrameSink`], and applies switch
//! requests between steps. Also defines the [`FrameSink`] trait for strip
//! hardware abstraction.

use crate::animation::{Activation, StepContext};
use crate::colors::Pixel;
use crate::command::{Selector, SwitchSignal};
use crate::emission::{Emission, EmissionOp, MAX_STRIP_LENGTH, PixelWrite};
use crate::registry::AnimationRegistry;
use crate::types::{AnimationId, Cadence};
use core::ops::Range;
use embedded_hal::delay::DelayNs;
use rand::RngCore;

/// Trait for abstracting addressable LED strip hardware.
///
/// Writes land in the sink's own pixel buffer; nothing reaches the LEDs
/// until [`transmit`](FrameSink::transmit).
pub trait FrameSink {
    /// Transport error reported by `transmit`.
    type Error;

    /// Number of pixels on the strip.
    fn len(&self) -> usize;

    /// Returns true for a strip without pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets one pixel. `index` is always below `len()`.
    fn set_pixel(&mut self, index: usize, color: Pixel);

    /// Sets every pixel in `range`. The range never extends past `len()`.
    fn fill(&mut self, range: Range<usize>, color: Pixel);

    /// Sends the pixel buffer to the strip.
    fn transmit(&mut self) -> Result<(), Self::Error>;
}

/// The current state of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Not started. Selections are accepted but nothing is stepped.
    Idle,
    /// Stepping the active animation.
    Running,
}

/// Errors that can occur during scheduler operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of the expected state
        expected: &'static str,
        /// The actual current state
        actual: SchedulerState,
    },

    /// A registered animation can emit more ops than one emission holds.
    CapacityTooSmall {
        /// The first animation that does not fit
        id: AnimationId,
        /// Ops that animation may emit on this strip
        required: usize,
        /// The scheduler's emission capacity
        capacity: usize,
    },

    /// The strip has more pixels than an emission can address.
    StripTooLong {
        /// Pixels on the strip
        len: usize,
        /// Longest supported strip
        max: usize,
    },
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but scheduler is in {:?}",
                    expected, actual
                )
            }
            SchedulerError::CapacityTooSmall {
                id,
                required,
                capacity,
            } => {
                write!(
                    f,
                    "animation {} needs {} emission ops, capacity is {}",
                    id, required, capacity
                )
            }
            SchedulerError::StripTooLong { len, max } => {
                write!(f, "strip of {} pixels exceeds the maximum of {}", len, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

/// Running totals kept by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStats {
    /// Successful transmits.
    pub frames: u32,
    /// Steps that failed and produced no frame.
    pub skipped: u32,
    /// Transmits the sink reported as failed.
    pub transmit_failures: u32,
}

/// The part of an emission still to be forwarded after a hold.
#[derive(Debug, Clone)]
struct PendingTail<const N: usize> {
    emission: Emission<N>,
    cursor: usize,
    delay: Cadence,
}

/// Runs exactly one animation at a time on an LED strip.
///
/// Each call to [`service`](Scheduler::service) is one loop iteration: apply
/// a pending switch, step the active animation, forward the emission to the
/// sink, and return how long to wait before the next call. The scheduler
/// never sleeps on its own; [`run`](Scheduler::run) is a blocking loop built
/// on top of `service` for targets without an async executor.
///
/// # Type Parameters
/// * `'a` - Lifetime of the registry and switch signal references
/// * `S` - Frame sink implementation type
/// * `E` - Entropy source type
/// * `N` - Maximum number of ops in one emission
pub struct Scheduler<'a, S: FrameSink, E: RngCore, const N: usize> {
    registry: &'a AnimationRegistry,
    signal: &'a SwitchSignal,
    sink: S,
    entropy: E,
    state: SchedulerState,
    active: Activation,
    pending: Option<PendingTail<N>>,
    stats: FrameStats,
}

impl<'a, S: FrameSink, E: RngCore, const N: usize> Scheduler<'a, S, E, N> {
    /// Creates an idle scheduler with `Off` as the active animation,
    /// checking that every registered animation fits the strip.
    ///
    /// # Errors
    /// * `StripTooLong` - the sink is longer than [`MAX_STRIP_LENGTH`]
    /// * `CapacityTooSmall` - some animation can emit more than `N` ops on
    ///   this strip and would never produce a frame
    pub fn try_new(
        registry: &'a AnimationRegistry,
        signal: &'a SwitchSignal,
        sink: S,
        entropy: E,
    ) -> Result<Self, SchedulerError> {
        let len = sink.len();
        if len > MAX_STRIP_LENGTH {
            return Err(SchedulerError::StripTooLong {
                len,
                max: MAX_STRIP_LENGTH,
            });
        }

        for behavior in registry.iter() {
            let required = behavior.worst_case_ops(len);
            if required > N {
                return Err(SchedulerError::CapacityTooSmall {
                    id: behavior.id(),
                    required,
                    capacity: N,
                });
            }
        }

        Ok(Self::new(registry, signal, sink, entropy))
    }

    /// Creates an idle scheduler with `Off` as the active animation.
    ///
    /// Unchecked: an animation that does not fit `N` skips every frame.
    /// Prefer [`try_new`](Scheduler::try_new).
    pub fn new(
        registry: &'a AnimationRegistry,
        signal: &'a SwitchSignal,
        sink: S,
        entropy: E,
    ) -> Self {
        Self {
            registry,
            signal,
            sink,
            entropy,
            state: SchedulerState::Idle,
            active: registry.activate(AnimationId::Off),
            pending: None,
            stats: FrameStats::default(),
        }
    }

    /// Enters the `Running` state.
    ///
    /// Must be called from `Idle`.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Idle {
            return Err(SchedulerError::InvalidState {
                expected: "Idle",
                actual: self.state,
            });
        }

        self.state = SchedulerState::Running;
        Ok(())
    }

    /// Switches to `id` immediately, with a fresh state.
    ///
    /// Discards any older request waiting in the switch signal, so this
    /// selection is the one that sticks. Can be called from any state.
    pub fn select(&mut self, id: AnimationId) {
        let _ = self.signal.take();
        self.active = self.registry.activate(id);
        debug!("animation {} selected", id);
    }

    /// A handle other contexts can use to request switches.
    pub fn selector(&self) -> Selector<'a> {
        Selector::new(self.registry, self.signal)
    }

    /// Runs one loop iteration.
    ///
    /// Must be called from `Running` state.
    ///
    /// # Returns
    /// * `Ok(delay)` - Wait at least this long before calling again
    /// * `Err` - Invalid state
    pub fn service(&mut self) -> Result<Cadence, SchedulerError> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        // The step in flight finishes before any switch applies
        if let Some(tail) = self.pending.take() {
            return Ok(self.forward(tail.emission, tail.cursor, tail.delay));
        }

        if let Some(activation) = self.signal.take() {
            self.active = activation;
            debug!("switched to animation {}", activation.id());
        }

        let registry = self.registry;
        let behavior = registry.get(self.active.id());
        let mut ctx = StepContext::new(self.sink.len(), &mut self.entropy);

        match behavior.step::<N>(self.active, &mut ctx) {
            Ok(step) => {
                self.active = step.state;
                Ok(self.forward(step.emission, 0, step.delay))
            }
            Err(_err) => {
                self.stats.skipped = self.stats.skipped.wrapping_add(1);
                warn!("animation {} skipped a frame: {}", behavior.id(), _err);
                Ok(behavior.cadence())
            }
        }
    }

    /// Starts if needed, then services forever, sleeping between iterations.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Running;
        }

        loop {
            let cadence = self.service().unwrap_or(Cadence::ZERO);
            delay.delay_ms(cadence.as_millis());
        }
    }

    /// Forwards `emission` from `cursor` until it ends or hits a hold.
    ///
    /// Returns the delay before the next call: the hold duration if one was
    /// hit, otherwise `delay`.
    fn forward(&mut self, emission: Emission<N>, mut cursor: usize, delay: Cadence) -> Cadence {
        loop {
            let op = match emission.ops().get(cursor) {
                Some(op) => *op,
                None => return delay,
            };
            cursor += 1;

            match op {
                EmissionOp::Write(PixelWrite::Set { index, color }) => {
                    self.sink.set_pixel(index as usize, color);
                }
                EmissionOp::Write(PixelWrite::Fill { start, end, color }) => {
                    self.sink.fill(start as usize..end as usize, color);
                }
                EmissionOp::Transmit => match self.sink.transmit() {
                    Ok(()) => self.stats.frames = self.stats.frames.wrapping_add(1),
                    Err(_) => {
                        self.stats.transmit_failures =
                            self.stats.transmit_failures.wrapping_add(1);
                        warn!("transmit failed for animation {}", self.active.id());
                    }
                },
                EmissionOp::Hold(hold) => {
                    self.pending = Some(PendingTail {
                        emission,
                        cursor,
                        delay,
                    });
                    return hold;
                }
            }
        }
    }

    /// Returns the current state of the scheduler.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Returns true if the scheduler is running.
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// The active slot.
    pub fn active(&self) -> &Activation {
        &self.active
    }

    /// Id of the active animation.
    pub fn active_id(&self) -> AnimationId {
        self.active.id()
    }

    /// Returns true while the tail of a held emission is waiting.
    pub fn is_mid_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame counters.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The registry this scheduler looks animations up in.
    pub fn registry(&self) -> &'a AnimationRegistry {
        self.registry
    }

    /// The frame sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the frame sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Releases the sink and the entropy source.
    pub fn into_parts(self) -> (S, E) {
        (self.sink, self.entropy)
    }
}
