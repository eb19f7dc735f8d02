//! Frame sinks: where emissions end up.
//!
//! [`PixelBuffer`] keeps the strip in memory and is handy for tests and
//! simulators. [`SmartLedsStrip`] puts the same buffer in front of any
//! `smart_leds` driver and applies a global brightness on transmit.

use crate::colors::{BLACK, Pixel};
use crate::scheduler::FrameSink;
use core::convert::Infallible;
use core::ops::Range;
use smart_leds::{RGB8, SmartLedsWrite};

/// Strip length used when nothing else is configured.
pub const DEFAULT_STRIP_LENGTH: usize = 256;

/// Global brightness used when nothing else is configured.
///
/// Well below full scale: comfortable to look at and easy on the supply.
pub const DEFAULT_BRIGHTNESS: u8 = 30;

/// Initialization-time strip settings.
///
/// These belong to the sink; the scheduler only ever asks the sink for its
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripConfig {
    /// Number of pixels.
    pub length: usize,

    /// Global brightness scalar, 255 meaning full scale.
    pub brightness: u8,
}

impl StripConfig {
    pub const DEFAULT: Self = Self {
        length: DEFAULT_STRIP_LENGTH,
        brightness: DEFAULT_BRIGHTNESS,
    };
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An in-memory strip of `LEN` pixels.
///
/// Transmitting only counts frames; the buffer itself is the output.
#[derive(Debug, Clone)]
pub struct PixelBuffer<const LEN: usize> {
    pixels: [Pixel; LEN],
    frames: u32,
}

impl<const LEN: usize> PixelBuffer<LEN> {
    /// Creates a buffer with every pixel black.
    pub fn new() -> Self {
        Self {
            pixels: [BLACK; LEN],
            frames: 0,
        }
    }

    /// Current pixel colors.
    #[inline]
    pub fn pixels(&self) -> &[Pixel; LEN] {
        &self.pixels
    }

    /// Number of transmits so far.
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl<const LEN: usize> Default for PixelBuffer<LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LEN: usize> FrameSink for PixelBuffer<LEN> {
    type Error = Infallible;

    fn len(&self) -> usize {
        LEN
    }

    fn set_pixel(&mut self, index: usize, color: Pixel) {
        debug_assert!(index < LEN, "pixel {} outside strip of {}", index, LEN);
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn fill(&mut self, range: Range<usize>, color: Pixel) {
        let end = range.end.min(LEN);
        let start = range.start.min(end);
        self.pixels[start..end].fill(color);
    }

    fn transmit(&mut self) -> Result<(), Infallible> {
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}

/// A `smart_leds` driver behind a pixel buffer.
///
/// Writes go to the buffer; `transmit` scales the buffer by the global
/// brightness and hands it to the driver.
pub struct SmartLedsStrip<W, const LEN: usize> {
    writer: W,
    buffer: PixelBuffer<LEN>,
    brightness: u8,
}

impl<W, const LEN: usize> SmartLedsStrip<W, LEN>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    /// Wraps `writer` using full brightness.
    pub fn new(writer: W) -> Self {
        Self::with_brightness(writer, u8::MAX)
    }

    /// Wraps `writer` using the brightness from `config`.
    ///
    /// The buffer length is fixed by `LEN`; `config.length` is only checked
    /// in debug builds.
    pub fn with_config(writer: W, config: StripConfig) -> Self {
        debug_assert_eq!(config.length, LEN, "strip length does not match buffer");
        Self::with_brightness(writer, config.brightness)
    }

    /// Wraps `writer` using the given brightness.
    pub fn with_brightness(writer: W, brightness: u8) -> Self {
        Self {
            writer,
            buffer: PixelBuffer::new(),
            brightness,
        }
    }

    /// Changes the global brightness for subsequent transmits.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// The buffered pixel colors, before brightness scaling.
    pub fn pixels(&self) -> &[Pixel; LEN] {
        self.buffer.pixels()
    }

    /// The wrapped driver.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Releases the wrapped driver.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W, const LEN: usize> FrameSink for SmartLedsStrip<W, LEN>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    type Error = W::Error;

    fn len(&self) -> usize {
        LEN
    }

    fn set_pixel(&mut self, index: usize, color: Pixel) {
        self.buffer.set_pixel(index, color);
    }

    fn fill(&mut self, range: Range<usize>, color: Pixel) {
        self.buffer.fill(range, color);
    }

    fn transmit(&mut self) -> Result<(), W::Error> {
        let colors = self
            .buffer
            .pixels
            .iter()
            .map(|pixel| RGB8::new(pixel.red, pixel.green, pixel.blue));
        self.writer
            .write(smart_leds::brightness(colors, self.brightness))
    }
}
