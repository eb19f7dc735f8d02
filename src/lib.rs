#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AnimationId`**: Names one of the ten built-in animations; also the raw selection key
//! - **`Animation`**: A self-timed animation with private state, a step function and a cadence
//! - **`Behavior`**: A configured built-in animation, as stored in the registry
//! - **`Activation`**: The active slot's value: which animation runs, together with its state
//! - **`AnimationRegistry`**: Complete, read-only mapping from id to behavior
//! - **`Emission`**: The fully built pixel writes and transmits of one step
//! - **`Scheduler`**: Steps the active animation and forwards emissions to the strip
//! - **`Selector`** / **`SwitchSignal`**: Hot-switching from other execution contexts
//! - **`FrameSink`**: Trait to implement for your strip hardware
//!
//! Pixels are `Srgb<u8>`. Hue-based animations go through [`colors::hsv_to_rgb`].

// Must come first: the logging macros are textually scoped
#[macro_use]
mod fmt;

pub mod animation;
pub mod colors;
pub mod command;
pub mod emission;
pub mod registry;
pub mod scheduler;
pub mod strip;
pub mod types;

pub use animation::{Activation, Animation, Behavior, Step, StepContext};
pub use colors::{BLACK, BLUE, GREEN, HsvColor, HsvPolicy, Pixel, RED, WHITE, hsv_to_rgb};
pub use command::{Selector, SwitchSignal};
pub use emission::{Emission, EmissionOp, MAX_STRIP_LENGTH, PixelWrite};
pub use registry::{AnimationRegistry, RegistryBuilder, RegistryError};
pub use scheduler::{FrameSink, FrameStats, Scheduler, SchedulerError, SchedulerState};
pub use strip::{PixelBuffer, SmartLedsStrip, StripConfig};
pub use types::{AnimationId, Cadence, SelectError, StepError};

/// Emission capacity that fits every built-in on a strip of up to 316 pixels.
///
/// `Railway` is the largest emission: one fill, one write per lit pixel and a
/// transmit.
pub const DEFAULT_EMISSION_CAPACITY: usize = 160;

/// Scheduler with [`DEFAULT_EMISSION_CAPACITY`].
pub type StripScheduler<'a, S, E> = Scheduler<'a, S, E, DEFAULT_EMISSION_CAPACITY>;
