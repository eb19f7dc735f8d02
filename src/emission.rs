//! Frame emissions.
//!
//! An [`Emission`] is everything one animation step wants the strip to do:
//! an ordered list of pixel writes, transmits and short holds. It is built
//! completely before the scheduler forwards any of it, so a frame is never
//! half-written by one animation and half by another.

use crate::colors::Pixel;
use crate::types::{Cadence, StepError};
use core::ops::Range;
use heapless::Vec;

/// Longest strip an emission can address.
pub const MAX_STRIP_LENGTH: usize = u16::MAX as usize;

/// A single write into the strip's pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelWrite {
    /// Set one pixel.
    Set { index: u16, color: Pixel },

    /// Set every pixel in `start..end`.
    Fill { start: u16, end: u16, color: Pixel },
}

impl PixelWrite {
    /// Applies this write to an in-memory pixel buffer.
    ///
    /// Indices past the end of `pixels` are ignored.
    pub fn apply(&self, pixels: &mut [Pixel]) {
        match *self {
            PixelWrite::Set { index, color } => {
                if let Some(pixel) = pixels.get_mut(index as usize) {
                    *pixel = color;
                }
            }
            PixelWrite::Fill { start, end, color } => {
                let end = (end as usize).min(pixels.len());
                let start = (start as usize).min(end);
                pixels[start..end].fill(color);
            }
        }
    }
}

/// One operation of an emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmissionOp {
    /// Write into the pixel buffer.
    Write(PixelWrite),

    /// Push the pixel buffer out to the strip.
    Transmit,

    /// Wait before forwarding the remaining ops.
    Hold(Cadence),
}

/// The ordered output of one animation step.
///
/// Holds up to `N` ops. Pixel writes are validated against the strip length
/// when they are added, so forwarding an emission can never address a pixel
/// outside the strip.
///
/// # Type Parameters
/// * `N` - Maximum number of ops in one emission
#[derive(Debug, Clone)]
pub struct Emission<const N: usize> {
    ops: Vec<EmissionOp, N>,
    strip_len: u16,
}

impl<const N: usize> Emission<N> {
    /// Creates an empty emission for a strip of `strip_len` pixels.
    ///
    /// Strips longer than [`MAX_STRIP_LENGTH`] are truncated to that length.
    pub fn new(strip_len: usize) -> Self {
        Self {
            ops: Vec::new(),
            strip_len: strip_len.min(MAX_STRIP_LENGTH) as u16,
        }
    }

    /// Length of the strip this emission targets.
    #[inline]
    pub fn strip_len(&self) -> usize {
        self.strip_len as usize
    }

    /// Sets a single pixel.
    ///
    /// # Errors
    /// * `PixelOutOfRange` - `index` is not inside the strip
    /// * `EmissionFull` - no room for another op
    pub fn set(&mut self, index: usize, color: Pixel) -> Result<&mut Self, StepError> {
        if index >= self.strip_len() {
            return Err(StepError::PixelOutOfRange {
                index,
                len: self.strip_len(),
            });
        }

        self.push(EmissionOp::Write(PixelWrite::Set {
            index: index as u16,
            color,
        }))
    }

    /// Sets a pixel given as a signed position, skipping positions that
    /// fall outside the strip.
    pub fn set_clipped(&mut self, position: i32, color: Pixel) -> Result<&mut Self, StepError> {
        match usize::try_from(position) {
            Ok(index) if index < self.strip_len() => self.set(index, color),
            _ => Ok(self),
        }
    }

    /// Fills `range`, clamped to the strip.
    ///
    /// Empty ranges (after clamping) produce no op.
    pub fn fill(&mut self, range: Range<usize>, color: Pixel) -> Result<&mut Self, StepError> {
        let end = range.end.min(self.strip_len());
        let start = range.start.min(end);
        if start == end {
            return Ok(self);
        }

        self.push(EmissionOp::Write(PixelWrite::Fill {
            start: start as u16,
            end: end as u16,
            color,
        }))
    }

    /// Fills the whole strip.
    pub fn fill_all(&mut self, color: Pixel) -> Result<&mut Self, StepError> {
        self.fill(0..self.strip_len(), color)
    }

    /// Appends a transmit.
    pub fn transmit(&mut self) -> Result<&mut Self, StepError> {
        self.push(EmissionOp::Transmit)
    }

    /// Appends a hold between two transmits of the same step.
    pub fn hold(&mut self, duration: Cadence) -> Result<&mut Self, StepError> {
        self.push(EmissionOp::Hold(duration))
    }

    /// Terminates the emission with a transmit unless it already ends with one.
    pub fn finish(mut self) -> Result<Self, StepError> {
        if !self.is_terminated() {
            self.transmit()?;
        }
        Ok(self)
    }

    /// Returns true if the last op is a transmit.
    pub fn is_terminated(&self) -> bool {
        matches!(self.ops.last(), Some(EmissionOp::Transmit))
    }

    /// All ops in order.
    #[inline]
    pub fn ops(&self) -> &[EmissionOp] {
        &self.ops
    }

    /// Iterates over the pixel writes, skipping transmits and holds.
    pub fn writes(&self) -> impl Iterator<Item = &PixelWrite> + '_ {
        self.ops.iter().filter_map(|op| match op {
            EmissionOp::Write(write) => Some(write),
            _ => None,
        })
    }

    /// Number of transmits.
    pub fn transmit_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EmissionOp::Transmit))
            .count()
    }

    /// Applies every pixel write, in order, to an in-memory buffer.
    pub fn render_into(&self, pixels: &mut [Pixel]) {
        for write in self.writes() {
            write.apply(pixels);
        }
    }

    fn push(&mut self, op: EmissionOp) -> Result<&mut Self, StepError> {
        self.ops.push(op).map_err(|_| StepError::EmissionFull)?;
        Ok(self)
    }
}
