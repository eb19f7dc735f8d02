//! Two-phase patterns covering the whole strip.
//!
//! Both animations alternate between phase 0 and phase 1, and the two phases
//! are exact inverses of each other.

use super::{Animation, Counter, Step, StepContext};
use crate::colors::{BLACK, BLUE, Pixel, RED};
use crate::types::{AnimationId, Cadence, StepError};

const TOGGLE_MAX: u32 = 1;

/// Bands of two colors that swap places every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Police {
    /// Pixels per band; zero is treated as one.
    pub band_width: u16,
    /// Colors of alternating bands in phase 0.
    pub colors: [Pixel; 2],
}

impl Default for Police {
    fn default() -> Self {
        Self {
            band_width: 64,
            colors: [RED, BLUE],
        }
    }
}

/// State of [`Police`]: the phase, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoliceState(Counter);

impl PoliceState {
    /// Which color the first band shows, 0 or 1.
    pub fn phase(&self) -> u32 {
        self.0.value()
    }
}

impl Animation for Police {
    const ID: AnimationId = AnimationId::Police;
    type State = PoliceState;

    fn initial_state(&self) -> PoliceState {
        PoliceState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(1000)
    }

    fn worst_case_ops(&self, strip_len: usize) -> usize {
        strip_len.div_ceil(usize::from(self.band_width.max(1))) + 1
    }

    fn step<const N: usize>(
        &self,
        state: PoliceState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<PoliceState, N>, StepError> {
        let len = ctx.strip_len();
        let width = usize::from(self.band_width.max(1));
        let phase = state.phase() as usize;
        let mut emission = ctx.emission::<N>();

        for (band, start) in (0..len).step_by(width).enumerate() {
            let color = self.colors[(band + phase) % 2];
            emission.fill(start..start + width, color)?;
        }

        Ok(Step {
            state: PoliceState(state.0.advance(TOGGLE_MAX)),
            emission: emission.finish()?,
            delay: self.cadence(),
        })
    }
}

/// Every other pixel lit, flipping parity every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Railway {
    /// Color of the lit pixels.
    pub color: Pixel,
}

impl Default for Railway {
    fn default() -> Self {
        Self { color: RED }
    }
}

/// State of [`Railway`]: the lit parity, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RailwayState(Counter);

impl RailwayState {
    /// Parity of the lit pixels.
    pub fn phase(&self) -> u32 {
        self.0.value()
    }
}

impl Animation for Railway {
    const ID: AnimationId = AnimationId::Railway;
    type State = RailwayState;

    fn initial_state(&self) -> RailwayState {
        RailwayState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(1000)
    }

    fn worst_case_ops(&self, strip_len: usize) -> usize {
        // Clearing fill, every other pixel and the transmit
        strip_len.div_ceil(2) + 2
    }

    fn step<const N: usize>(
        &self,
        state: RailwayState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<RailwayState, N>, StepError> {
        let len = ctx.strip_len();
        let mut emission = ctx.emission::<N>();

        emission.fill_all(BLACK)?;
        for index in (state.phase() as usize..len).step_by(2) {
            emission.set(index, self.color)?;
        }

        Ok(Step {
            state: RailwayState(state.0.advance(TOGGLE_MAX)),
            emission: emission.finish()?,
            delay: self.cadence(),
        })
    }
}
