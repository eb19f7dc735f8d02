//! Random sparkles.

use super::{Animation, Step, StepContext};
use crate::colors::{BLACK, Pixel, WHITE};
use crate::types::{AnimationId, Cadence, StepError};
use heapless::Vec;

/// Upper bound on [`Glitter::sparks`]; larger values are clamped.
pub const MAX_SPARKS: usize = 32;

/// Flashes a handful of random pixels, then turns them off again.
///
/// Each step picks `sparks` indices uniformly from the strip, lights them,
/// holds for `flash`, restores them to black, and then asks for `rest`
/// before the next step. Picks may repeat within one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glitter {
    /// Pixels flashed per step.
    pub sparks: u8,
    /// Flash color.
    pub color: Pixel,
    /// How long the sparks stay lit.
    pub flash: Cadence,
    /// Delay after the sparks are cleared.
    pub rest: Cadence,
}

impl Default for Glitter {
    fn default() -> Self {
        Self {
            sparks: 5,
            color: WHITE,
            flash: Cadence::from_millis(10),
            rest: Cadence::from_millis(50),
        }
    }
}

/// State of [`Glitter`]. The animation is stateless; every pick comes from
/// the entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlitterState(());

impl Glitter {
    /// Sparks per step, clamped to [`MAX_SPARKS`].
    pub fn spark_count(&self) -> usize {
        usize::from(self.sparks).min(MAX_SPARKS)
    }
}

impl Animation for Glitter {
    const ID: AnimationId = AnimationId::Glitter;
    type State = GlitterState;

    fn initial_state(&self) -> GlitterState {
        GlitterState(())
    }

    fn cadence(&self) -> Cadence {
        self.rest
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        // Lit and restored picks, two transmits and the hold
        2 * self.spark_count() + 3
    }

    fn step<const N: usize>(
        &self,
        state: GlitterState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<GlitterState, N>, StepError> {
        // At most MAX_SPARKS picks, so collecting cannot overflow
        let picks: Vec<usize, MAX_SPARKS> = core::iter::from_fn(|| ctx.random_index())
            .take(self.spark_count())
            .collect();

        let mut emission = ctx.emission::<N>();
        for &index in &picks {
            emission.set(index, self.color)?;
        }
        emission.transmit()?.hold(self.flash)?;
        for &index in &picks {
            emission.set(index, BLACK)?;
        }

        Ok(Step {
            state,
            emission: emission.finish()?,
            delay: self.rest,
        })
    }
}
