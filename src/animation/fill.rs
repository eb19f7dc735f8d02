//! Whole-strip animations: every frame is a single fill.

use super::{Animation, Counter, Step, StepContext};
use crate::colors::{BLACK, BLUE, GREEN, HsvColor, HsvPolicy, Pixel, RED, WHITE, hsv_to_rgb, scale8};
use crate::types::{AnimationId, Cadence, StepError};

/// Last counter value of the sine-driven animations.
///
/// `c / 50` runs from 0 to 6.28, one full sine period.
const WAVE_MAX: u32 = 314;
const WAVE_DIVISOR: f32 = 50.0;

/// One fill and the transmit.
const FILL_OPS: usize = 2;

const BLINK_MAX: u32 = 5;
const RAINBOW_MAX: u32 = 255;

fn fill_step<S, const N: usize>(
    ctx: &StepContext<'_>,
    color: Pixel,
    state: S,
    delay: Cadence,
) -> Result<Step<S, N>, StepError> {
    let mut emission = ctx.emission::<N>();
    emission.fill_all(color)?;
    Ok(Step {
        state,
        emission: emission.finish()?,
        delay,
    })
}

/// Scales every channel of `color` by `level / 255`.
fn dim(color: Pixel, level: u8) -> Pixel {
    Pixel::new(
        scale8(color.red, level),
        scale8(color.green, level),
        scale8(color.blue, level),
    )
}

fn sine_level(counter: Counter, center: f32, amplitude: f32) -> u8 {
    let phase = counter.value() as f32 / WAVE_DIVISOR;
    let level = center + amplitude * libm::sinf(phase);
    level.clamp(0.0, 255.0) as u8
}

/// All pixels black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Off;

/// State of [`Off`]. Carries nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffState(());

impl Animation for Off {
    const ID: AnimationId = AnimationId::Off;
    type State = OffState;

    fn initial_state(&self) -> OffState {
        OffState(())
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(500)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        FILL_OPS
    }

    fn step<const N: usize>(
        &self,
        state: OffState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<OffState, N>, StepError> {
        fill_step(ctx, BLACK, state, self.cadence())
    }
}

/// Cycles through three colors with an off frame after each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    /// The three colors, in display order.
    pub colors: [Pixel; 3],
}

impl Default for Blink {
    fn default() -> Self {
        Self {
            colors: [RED, GREEN, BLUE],
        }
    }
}

/// State of [`Blink`]: the phase in `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkState(Counter);

impl BlinkState {
    /// Current phase; even phases show a color.
    pub fn phase(&self) -> u32 {
        self.0.value()
    }
}

impl Animation for Blink {
    const ID: AnimationId = AnimationId::Blink;
    type State = BlinkState;

    fn initial_state(&self) -> BlinkState {
        BlinkState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(500)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        FILL_OPS
    }

    fn step<const N: usize>(
        &self,
        state: BlinkState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<BlinkState, N>, StepError> {
        let color = match state.phase() {
            0 => self.colors[0],
            2 => self.colors[1],
            4 => self.colors[2],
            _ => BLACK,
        };

        let next = BlinkState(state.0.advance(BLINK_MAX));
        fill_step(ctx, color, next, self.cadence())
    }
}

/// Slow breathing: brightness follows a sine wave between 155 and 255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathe {
    /// Color at full brightness.
    pub color: Pixel,
}

impl Default for Breathe {
    fn default() -> Self {
        Self { color: WHITE }
    }
}

/// State of [`Breathe`]: the wave position in `0..=314`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreatheState(Counter);

impl BreatheState {
    /// Position on the sine wave.
    pub fn position(&self) -> u32 {
        self.0.value()
    }
}

impl Animation for Breathe {
    const ID: AnimationId = AnimationId::Breathe;
    type State = BreatheState;

    fn initial_state(&self) -> BreatheState {
        BreatheState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(10)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        FILL_OPS
    }

    fn step<const N: usize>(
        &self,
        state: BreatheState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<BreatheState, N>, StepError> {
        let level = sine_level(state.0, 205.0, 50.0);
        let next = BreatheState(state.0.advance(WAVE_MAX));
        fill_step(ctx, dim(self.color, level), next, self.cadence())
    }
}

/// Full fade: brightness follows a sine wave between 0 and 255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Color at full brightness.
    pub color: Pixel,
}

impl Default for Fade {
    fn default() -> Self {
        Self { color: WHITE }
    }
}

/// State of [`Fade`]: the wave position in `0..=314`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeState(Counter);

impl FadeState {
    /// Position on the sine wave.
    pub fn position(&self) -> u32 {
        self.0.value()
    }
}

impl Animation for Fade {
    const ID: AnimationId = AnimationId::Fade;
    type State = FadeState;

    fn initial_state(&self) -> FadeState {
        FadeState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(10)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        FILL_OPS
    }

    fn step<const N: usize>(
        &self,
        state: FadeState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<FadeState, N>, StepError> {
        let level = sine_level(state.0, 127.5, 127.5);
        let next = FadeState(state.0.advance(WAVE_MAX));
        fill_step(ctx, dim(self.color, level), next, self.cadence())
    }
}

/// Rotates the whole strip through the hue wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rainbow {
    /// Hue to RGB mapping.
    pub policy: HsvPolicy,
}

/// State of [`Rainbow`]: the current hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainbowState(Counter);

impl RainbowState {
    /// Hue of the next frame.
    pub fn hue(&self) -> u8 {
        self.0.value() as u8
    }
}

impl Animation for Rainbow {
    const ID: AnimationId = AnimationId::Rainbow;
    type State = RainbowState;

    fn initial_state(&self) -> RainbowState {
        RainbowState(Counter::ZERO)
    }

    fn cadence(&self) -> Cadence {
        Cadence::from_millis(10)
    }

    fn worst_case_ops(&self, _strip_len: usize) -> usize {
        FILL_OPS
    }

    fn step<const N: usize>(
        &self,
        state: RainbowState,
        ctx: &mut StepContext<'_>,
    ) -> Result<Step<RainbowState, N>, StepError> {
        let color = hsv_to_rgb(HsvColor::from_hue(state.hue()), self.policy);
        let next = RainbowState(state.0.advance(RAINBOW_MAX));
        fill_step(ctx, color, next, self.cadence())
    }
}
