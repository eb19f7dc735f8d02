//! Core identifiers, timing and error types.

/// Identifies one of the built-in animations.
///
/// Discriminants are stable and double as the raw selection key received
/// from external controllers (see [`AnimationId::try_from`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AnimationId {
    /// All pixels black.
    Off = 0,

    /// Whole strip cycles red, off, green, off, blue, off.
    Blink = 1,

    /// White brightness following a shallow sine wave.
    Breathe = 2,

    /// A red pixel sweeping along the strip, then a black one.
    Chase = 3,

    /// White brightness following a full-depth sine wave.
    Fade = 4,

    /// Random pixels flashing white.
    Glitter = 5,

    /// Red and blue bands swapping places.
    Police = 6,

    /// A red pixel bouncing between the strip ends.
    Pong = 7,

    /// Alternating red pixels flipping parity.
    Railway = 8,

    /// Whole strip rotating through the hue wheel.
    Rainbow = 9,
}

impl AnimationId {
    /// Number of built-in animations.
    pub const COUNT: usize = 10;

    /// Every id, in discriminant order.
    pub const ALL: [AnimationId; Self::COUNT] = [
        AnimationId::Off,
        AnimationId::Blink,
        AnimationId::Breathe,
        AnimationId::Chase,
        AnimationId::Fade,
        AnimationId::Glitter,
        AnimationId::Police,
        AnimationId::Pong,
        AnimationId::Railway,
        AnimationId::Rainbow,
    ];

    /// Position of this id in [`AnimationId::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            AnimationId::Off => "off",
            AnimationId::Blink => "blink",
            AnimationId::Breathe => "breathe",
            AnimationId::Chase => "chase",
            AnimationId::Fade => "fade",
            AnimationId::Glitter => "glitter",
            AnimationId::Police => "police",
            AnimationId::Pong => "pong",
            AnimationId::Railway => "railway",
            AnimationId::Rainbow => "rainbow",
        }
    }

    /// The following id, wrapping from the last back to `Off`.
    ///
    /// Handy for a single button that cycles through modes.
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }
}

impl TryFrom<u8> for AnimationId {
    type Error = SelectError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(SelectError::InvalidArgument(raw))
    }
}

impl From<AnimationId> for u8 {
    fn from(id: AnimationId) -> Self {
        id as u8
    }
}

impl core::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum delay between two steps of an animation, in milliseconds.
///
/// Advisory lower bound: the scheduler never steps sooner, but may step
/// later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence(u32);

impl Cadence {
    /// Zero delay.
    pub const ZERO: Self = Cadence(0);

    /// Creates a cadence from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u32) -> Self {
        Cadence(millis)
    }

    /// Returns the cadence in milliseconds.
    #[inline]
    pub const fn as_millis(self) -> u32 {
        self.0
    }
}

/// Selection errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectError {
    /// The raw id does not name a built-in animation.
    InvalidArgument(u8),
}

impl core::fmt::Display for SelectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectError::InvalidArgument(raw) => {
                write!(f, "unknown animation id {}", raw)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SelectError {}

/// Errors from a single animation step.
///
/// A failed step produces no frame; the scheduler keeps the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepError {
    /// The emission buffer cannot hold every op of the frame.
    EmissionFull,

    /// A pixel write targeted an index outside the strip.
    PixelOutOfRange { index: usize, len: usize },

    /// The slot's state belongs to a different animation than the behavior
    /// asked to step it.
    StateMismatch {
        expected: AnimationId,
        actual: AnimationId,
    },
}

impl core::fmt::Display for StepError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StepError::EmissionFull => {
                write!(f, "emission capacity exceeded")
            }
            StepError::PixelOutOfRange { index, len } => {
                write!(f, "pixel {} outside strip of length {}", index, len)
            }
            StepError::StateMismatch { expected, actual } => {
                write!(
                    f,
                    "state mismatch: behavior is {}, but slot holds {}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StepError {}
