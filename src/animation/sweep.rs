//! Single-pixel animations that move a lit pixel along the strip.
//!
//! Neither clears the strip: they rely on whatever was shown before (usually
//! `Off`) and only touch the pixels they move over.

use super::{Animation, Counter, Step, StepContext};
use crate::colors::{BLACK, Pixel, RED};
use crate::types::{AnimationId, Cadence, StepError};

/// Last counter value of [`Pong`]; `c / 100` runs over one full cosine period.
const PONG_MAX: u32 = 628;
const PONG_DIVISOR: f32 = 100.0;

/// Lights pixels one by one along the strip, then blacks them out again.
///
/// For a strip of `L` pixels the counter runs `0..=2L`: while it is below
/// `L` pixel `c % L` is set to `color`, afterwards it is set to black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chase {
    /// Color of the lit pixel.
    pub color: Pixel,
}

impl Default for Chase {
    fn default() -> Self {
        Self { color: RED }
    }
}

/// State of [`Chase`]: the sweep position in `0..=2L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseState(Counter);

impl ChaseState {
    /// Position in the light-then-clear sweep.
    pub fn position(&self) -> u32 {
        self.0.value()
    }
}

impl Animation for Chase {
    const ID: AnimationId = AnimationId::Chase;
    type State = ChaseState;

    fn initial_state(&self) -> ChaseState {
        ChaseState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(20)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        2
    }

    fn step<const N: usize>(
        &self,
        state: ChaseState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<ChaseState, N>, StepError> {
        let len = ctx.strip_len();
        let mut emission = ctx.emission::<N>();

        if len > 0 {
            let position = state.position() as usize;
            let color = if position < len { self.color } else { BLACK };
            emission.set(position % len, color)?;
        }

        let max = u32::try_from(len.saturating_mul(2)).unwrap_or(u32::MAX);
        Ok(Step {
            state: ChaseState(state.0.advance(max)),
            emission: emission.finish()?,
            delay: self.cadence(),
        })
    }
}

/// A pixel bouncing between the strip ends on a cosine curve.
///
/// `blanking` pixels on each side of the lit pixel are set to black so the
/// previous positions do not linger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pong {
    /// Color of the lit pixel.
    pub color: Pixel,
    /// Pixels blacked out on each side of the lit one.
    pub blanking: u8,
}

impl Default for Pong {
    fn default() -> Self {
        Self {
            color: RED,
            blanking: 2,
        }
    }
}

/// State of [`Pong`]: the wave position in `0..=628`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PongState(Counter);

impl PongState {
    /// Position on the cosine wave.
    pub fn position(&self) -> u32 {
        self.0.value()
    }
}

impl Pong {
    /// Pixel lit at wave position `counter`, clamped into `0..len`.
    pub fn pixel_at(counter: u32, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let half = len as f32 / 2.0;
        let wave = half * libm::cosf(counter as f32 / PONG_DIVISOR) + half;
        (wave.max(0.0) as usize).min(len - 1)
    }
}

impl Animation for Pong {
    const ID: AnimationId = AnimationId::Pong;
    type State = PongState;

    fn initial_state(&self) -> PongState {
        PongState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(10)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        // Blanking on both sides, the lit pixel and the transmit
        2 * usize::from(self.blanking) + 2
    }

    fn step<const N: usize>(
        &self,
        state: PongState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<PongState, N>, StepError> {
        let len = ctx.strip_len();
        let mut emission = ctx.emission::<N>();

        if len > 0 {
            let lit = Self::pixel_at(state.position(), len);
            let center = i32::try_from(lit).unwrap_or(i32::MAX);
            let blanking = i32::from(self.blanking);

            for offset in 1..=blanking {
                emission.set_clipped(center.saturating_add(offset), BLACK)?;
            }
            emission.set(lit, self.color)?;
            for offset in (1..=blanking).rev() {
                emission.set_clipped(center.saturating_sub(offset), BLACK)?;
            }
        }

        Ok(Step {
            state: PongState(state.0.advance(PONG_MAX)),
            emission: emission.finish()?,
            delay: self.cadence(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pong_starts_at_far_end_and_is_clamped() {
        // cos(0) = 1 puts the raw wave at exactly `len`
        assert_eq!(Pong::pixel_at(0, 256), 255);
    }

    #[test]
    fn pong_reaches_the_near_end_at_half_period() {
        assert!(Pong::pixel_at(314, 256) <= 1);
    }

    #[test]
    fn pong_on_single_pixel_strip_always_lights_pixel_zero() {
        for c in [0, 157, 314, 471, 628] {
            assert_eq!(Pong::pixel_at(c, 1), 0);
        }
    }
}
