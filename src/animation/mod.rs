//! Animations and their private state.
//!
//! Every built-in animation is a small configuration struct implementing
//! [`Animation`]. Its state type is private to its module: the only thing
//! the rest of the crate can do with a state is hand it back to the same
//! animation's `step`.
//!
//! [`Behavior`] and [`Activation`] are the closed sum types the registry and
//! the scheduler store. A [`Behavior`] is a configured animation; an
//! [`Activation`] is the live (id, state) pair of the active slot. Because
//! the id is the enum tag, an activation can never pair one animation's
//! state with another animation's step function.

mod fill;
mod glitter;
mod pattern;
mod sweep;

pub use fill::{
    Blink, BlinkState, Breathe, BreatheState, Fade, FadeState, Off, OffState, Rainbow,
    RainbowState,
};
pub use glitter::{Glitter, GlitterState, MAX_SPARKS};
pub use pattern::{Police, PoliceState, Railway, RailwayState};
pub use sweep::{Chase, ChaseState, Pong, PongState};

use crate::emission::{Emission, MAX_STRIP_LENGTH};
use crate::types::{AnimationId, Cadence, StepError};
use rand::{Rng, RngCore};

/// A self-timed animation with private per-activation state.
pub trait Animation {
    /// The id this animation is registered under.
    const ID: AnimationId;

    /// Private state carried from one step to the next.
    type State: Copy + PartialEq + core::fmt::Debug;

    /// State for the first step of a fresh activation.
    fn initial_state(&self) -> Self::State;

    /// The delay this animation declares between steps.
    ///
    /// Used by the scheduler when a step fails and no delay was returned.
    fn cadence(&self) -> Cadence;

    /// Upper bound on the ops one step emits on a strip of `strip_len`
    /// pixels, including transmits and holds.
    fn worst_case_ops(&self, strip_len: usize) -> usize;

    /// Computes one frame.
    ///
    /// Returns the next state, the complete emission for this frame, and the
    /// delay to wait before the next step.
    fn step<const N: usize>(
        &self,
        state: Self::State,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<Self::State, N>, StepError>;
}

/// The result of one successful step.
#[derive(Debug, Clone)]
pub struct Step<S, const N: usize> {
    /// State for the next step.
    pub state: S,

    /// Everything to send to the strip for this frame.
    pub emission: Emission<N>,

    /// Minimum delay before the next step.
    pub delay: Cadence,
}

impl<S, const N: usize> Step<S, N> {
    /// Converts the state, keeping emission and delay.
    pub fn map_state<T>(self, f: impl FnOnce(S) -> T) -> Step<T, N> {
        Step {
            state: f(self.state),
            emission: self.emission,
            delay: self.delay,
        }
    }
}

/// Per-step inputs shared by all animations.
pub struct StepContext<'a> {
    strip_len: usize,
    entropy: &'a mut dyn RngCore,
}

impl<'a> StepContext<'a> {
    /// Creates a context for a strip of `strip_len` pixels.
    ///
    /// Lengths above [`MAX_STRIP_LENGTH`] are truncated, matching the
    /// emissions this context hands out.
    pub fn new(strip_len: usize, entropy: &'a mut dyn RngCore) -> Self {
        Self {
            strip_len: strip_len.min(MAX_STRIP_LENGTH),
            entropy,
        }
    }

    /// Number of pixels on the strip.
    #[inline]
    pub fn strip_len(&self) -> usize {
        self.strip_len
    }

    /// An empty emission sized for this strip.
    #[inline]
    pub fn emission<const N: usize>(&self) -> Emission<N> {
        Emission::new(self.strip_len)
    }

    /// A uniformly distributed pixel index, or `None` on an empty strip.
    pub fn random_index(&mut self) -> Option<usize> {
        if self.strip_len == 0 {
            return None;
        }
        Some(self.entropy.gen_range(0..self.strip_len))
    }
}

/// A counter that wraps from a declared maximum back to zero.
///
/// The domain is `0..=max`: the frame at `max` is emitted, and the step after
/// it starts again at zero, so one period is `max + 1` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter(u32);

impl Counter {
    /// The first value of every domain.
    pub const ZERO: Self = Counter(0);

    /// Current value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The next value in `0..=max`.
    #[inline]
    pub(crate) const fn advance(self, max: u32) -> Self {
        Counter(((self.0 as u64 + 1) % (max as u64 + 1)) as u32)
    }
}

/// A configured built-in animation, as stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Off(Off),
    Blink(Blink),
    Breathe(Breathe),
    Chase(Chase),
    Fade(Fade),
    Glitter(Glitter),
    Police(Police),
    Pong(Pong),
    Railway(Railway),
    Rainbow(Rainbow),
}

impl Behavior {
    /// The default configuration of the animation with the given id.
    pub fn builtin(id: AnimationId) -> Self {
        match id {
            AnimationId::Off => Behavior::Off(Off),
            AnimationId::Blink => Behavior::Blink(Blink::default()),
            AnimationId::Breathe => Behavior::Breathe(Breathe::default()),
            AnimationId::Chase => Behavior::Chase(Chase::default()),
            AnimationId::Fade => Behavior::Fade(Fade::default()),
            AnimationId::Glitter => Behavior::Glitter(Glitter::default()),
            AnimationId::Police => Behavior::Police(Police::default()),
            AnimationId::Pong => Behavior::Pong(Pong::default()),
            AnimationId::Railway => Behavior::Railway(Railway::default()),
            AnimationId::Rainbow => Behavior::Rainbow(Rainbow::default()),
        }
    }

    /// The id this behavior answers to.
    pub fn id(&self) -> AnimationId {
        match self {
            Behavior::Off(_) => Off::ID,
            Behavior::Blink(_) => Blink::ID,
            Behavior::Breathe(_) => Breathe::ID,
            Behavior::Chase(_) => Chase::ID,
            Behavior::Fade(_) => Fade::ID,
            Behavior::Glitter(_) => Glitter::ID,
            Behavior::Police(_) => Police::ID,
            Behavior::Pong(_) => Pong::ID,
            Behavior::Railway(_) => Railway::ID,
            Behavior::Rainbow(_) => Rainbow::ID,
        }
    }

    /// The declared delay between steps.
    pub fn cadence(&self) -> Cadence {
        match self {
            Behavior::Off(a) => a.cadence(),
            Behavior::Blink(a) => a.cadence(),
            Behavior::Breathe(a) => a.cadence(),
            Behavior::Chase(a) => a.cadence(),
            Behavior::Fade(a) => a.cadence(),
            Behavior::Glitter(a) => a.cadence(),
            Behavior::Police(a) => a.cadence(),
            Behavior::Pong(a) => a.cadence(),
            Behavior::Railway(a) => a.cadence(),
            Behavior::Rainbow(a) => a.cadence(),
        }
    }

    /// Upper bound on the ops one step of this behavior emits.
    pub fn worst_case_ops(&self, strip_len: usize) -> usize {
        match self {
            Behavior::Off(a) => a.worst_case_ops(strip_len),
            Behavior::Blink(a) => a.worst_case_ops(strip_len),
            Behavior::Breathe(a) => a.worst_case_ops(strip_len),
            Behavior::Chase(a) => a.worst_case_ops(strip_len),
            Behavior::Fade(a) => a.worst_case_ops(strip_len),
            Behavior::Glitter(a) => a.worst_case_ops(strip_len),
            Behavior::Police(a) => a.worst_case_ops(strip_len),
            Behavior::Pong(a) => a.worst_case_ops(strip_len),
            Behavior::Railway(a) => a.worst_case_ops(strip_len),
            Behavior::Rainbow(a) => a.worst_case_ops(strip_len),
        }
    }

    /// A fresh activation of this behavior.
    pub fn activate(&self) -> Activation {
        match self {
            Behavior::Off(a) => Activation::Off(a.initial_state()),
            Behavior::Blink(a) => Activation::Blink(a.initial_state()),
            Behavior::Breathe(a) => Activation::Breathe(a.initial_state()),
            Behavior::Chase(a) => Activation::Chase(a.initial_state()),
            Behavior::Fade(a) => Activation::Fade(a.initial_state()),
            Behavior::Glitter(a) => Activation::Glitter(a.initial_state()),
            Behavior::Police(a) => Activation::Police(a.initial_state()),
            Behavior::Pong(a) => Activation::Pong(a.initial_state()),
            Behavior::Railway(a) => Activation::Railway(a.initial_state()),
            Behavior::Rainbow(a) => Activation::Rainbow(a.initial_state()),
        }
    }

    /// Steps `active` with this behavior.
    ///
    /// # Errors
    /// * `StateMismatch` - `active` belongs to another animation
    /// * any error the animation's own step reports
    pub fn step<const N: usize>(
        &self,
        active: Activation,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<Activation, N>, StepError> {
        match (self, active) {
            (Behavior::Off(a), Activation::Off(s)) => step_as(a, s, ctx, Activation::Off),
            (Behavior::Blink(a), Activation::Blink(s)) => step_as(a, s, ctx, Activation::Blink),
            (Behavior::Breathe(a), Activation::Breathe(s)) => {
                step_as(a, s, ctx, Activation::Breathe)
            }
            (Behavior::Chase(a), Activation::Chase(s)) => step_as(a, s, ctx, Activation::Chase),
            (Behavior::Fade(a), Activation::Fade(s)) => step_as(a, s, ctx, Activation::Fade),
            (Behavior::Glitter(a), Activation::Glitter(s)) => {
                step_as(a, s, ctx, Activation::Glitter)
            }
            (Behavior::Police(a), Activation::Police(s)) => step_as(a, s, ctx, Activation::Police),
            (Behavior::Pong(a), Activation::Pong(s)) => step_as(a, s, ctx, Activation::Pong),
            (Behavior::Railway(a), Activation::Railway(s)) => {
                step_as(a, s, ctx, Activation::Railway)
            }
            (Behavior::Rainbow(a), Activation::Rainbow(s)) => {
                step_as(a, s, ctx, Activation::Rainbow)
            }
            (behavior, active) => Err(StepError::StateMismatch {
                expected: behavior.id(),
                actual: active.id(),
            }),
        }
    }
}

fn step_as<A: Animation, const N: usize>(
    animation: &A,
    state: A::State,
    ctx: &mut StepContext<'_>,
    wrap: impl FnOnce(A::State) -> Activation,
) -> Result<Step<Activation, N>, StepError> {
    animation.step::<N>(state, ctx).map(|step| step.map_state(wrap))
}

/// The live contents of the active slot: which animation runs, and its state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Off(OffState),
    Blink(BlinkState),
    Breathe(BreatheState),
    Chase(ChaseState),
    Fade(FadeState),
    Glitter(GlitterState),
    Police(PoliceState),
    Pong(PongState),
    Railway(RailwayState),
    Rainbow(RainbowState),
}

impl Activation {
    /// The animation this activation belongs to.
    pub fn id(&self) -> AnimationId {
        match self {
            Activation::Off(_) => AnimationId::Off,
            Activation::Blink(_) => AnimationId::Blink,
            Activation::Breathe(_) => AnimationId::Breathe,
            Activation::Chase(_) => AnimationId::Chase,
            Activation::Fade(_) => AnimationId::Fade,
            Activation::Glitter(_) => AnimationId::Glitter,
            Activation::Police(_) => AnimationId::Police,
            Activation::Pong(_) => AnimationId::Pong,
            Activation::Railway(_) => AnimationId::Railway,
            Activation::Rainbow(_) => AnimationId::Rainbow,
        }
    }
}
