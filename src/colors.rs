//! Color types and HSV conversion.
//!
//! Animations work in 8-bit RGB ([`Pixel`]) because that is what addressable
//! strips consume. Hue-based animations describe their colors as
//! [`HsvColor`] and convert through [`hsv_to_rgb`], choosing one of three
//! interpolation policies.

use palette::{FromColor, Hsv, Srgb};

/// An 8-bit RGB pixel color.
pub type Pixel = Srgb<u8>;

pub const BLACK: Pixel = Srgb::new(0, 0, 0);
pub const WHITE: Pixel = Srgb::new(255, 255, 255);
pub const RED: Pixel = Srgb::new(255, 0, 0);
pub const GREEN: Pixel = Srgb::new(0, 255, 0);
pub const BLUE: Pixel = Srgb::new(0, 0, 255);

/// Builds a gray pixel with all three channels at `level`.
#[inline]
pub const fn gray(level: u8) -> Pixel {
    Srgb::new(level, level, level)
}

/// A hue/saturation/value color with 8-bit components.
///
/// The full `0..=255` hue range covers one trip around the color wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HsvColor {
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
}

impl HsvColor {
    /// Creates a new HSV color.
    #[inline]
    pub const fn new(hue: u8, sat: u8, val: u8) -> Self {
        Self { hue, sat, val }
    }

    /// A fully saturated, full brightness color of the given hue.
    #[inline]
    pub const fn from_hue(hue: u8) -> Self {
        Self::new(hue, 255, 255)
    }
}

/// How hue is mapped onto the RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HsvPolicy {
    /// Integer three-section ramp. Only hues `0..=191` are meaningful;
    /// larger hues are clamped to 191.
    Raw,

    /// Mathematically even spectrum over the full hue range.
    Spectrum,

    /// Eight-section ramp with extra room for yellow and orange, tuned to
    /// look even on LEDs.
    #[default]
    Rainbow,
}

/// Converts an HSV color to an RGB pixel using the given policy.
///
/// Pure function: the same input always yields the same pixel.
pub fn hsv_to_rgb(hsv: HsvColor, policy: HsvPolicy) -> Pixel {
    match policy {
        HsvPolicy::Raw => hsv_to_rgb_raw(hsv),
        HsvPolicy::Spectrum => hsv_to_rgb_spectrum(hsv),
        HsvPolicy::Rainbow => hsv_to_rgb_rainbow(hsv),
    }
}

/// Scales `value` by `scale / 256`, with 255 meaning "unchanged".
#[inline]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Like [`scale8`], but never scales a non-zero value down to zero.
#[inline]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    let scaled = ((value as u16 * scale as u16) >> 8) as u8;
    if value != 0 && scale != 0 {
        scaled + 1
    } else {
        scaled
    }
}

const RAW_SECTION: u8 = 0x40;
const RAW_MAX_HUE: u8 = 191;

fn hsv_to_rgb_raw(hsv: HsvColor) -> Pixel {
    let hue = hsv.hue.min(RAW_MAX_HUE);
    let value = hsv.val;
    let invsat = 255 - hsv.sat;
    let floor = ((value as u16 * invsat as u16) / 256) as u8;
    let amplitude = value - floor;

    let section = hue / RAW_SECTION;
    let offset = hue % RAW_SECTION;
    let rampup = offset;
    let rampdown = (RAW_SECTION - 1) - offset;

    // amplitude * 63 / 64 stays below 256
    let up = ((rampup as u16 * amplitude as u16) / 64) as u8 + floor;
    let down = ((rampdown as u16 * amplitude as u16) / 64) as u8 + floor;

    match section {
        0 => Srgb::new(down, up, floor),
        1 => Srgb::new(floor, down, up),
        _ => Srgb::new(up, floor, down),
    }
}

fn hsv_to_rgb_spectrum(hsv: HsvColor) -> Pixel {
    let degrees = hsv.hue as f32 * 360.0 / 256.0;
    let sat = hsv.sat as f32 / 255.0;
    let val = hsv.val as f32 / 255.0;
    let hsv: Hsv = Hsv::new(degrees, sat, val);
    let rgb: Srgb = Srgb::from_color(hsv);
    rgb.into_format::<u8>()
}

fn hsv_to_rgb_rainbow(hsv: HsvColor) -> Pixel {
    let hue = hsv.hue;
    let offset8 = (hue & 0x1F) << 3;
    let third = scale8(offset8, 85);
    let two_thirds = scale8(offset8, 170);

    let (mut r, mut g, mut b) = match hue >> 5 {
        // red -> orange
        0 => (255 - third, third, 0),
        // orange -> yellow
        1 => (171, 85 + third, 0),
        // yellow -> green
        2 => (171 - two_thirds, 170 + third, 0),
        // green -> aqua
        3 => (0, 255 - third, third),
        // aqua -> blue
        4 => (0, 171 - two_thirds, 85 + two_thirds),
        // blue -> purple
        5 => (third, 0, 255 - third),
        // purple -> pink
        6 => (85 + third, 0, 171 - third),
        // pink -> red
        _ => (170 + third, 0, 85 - third),
    };

    if hsv.sat != 255 {
        if hsv.sat == 0 {
            r = 255;
            g = 255;
            b = 255;
        } else {
            let desat = scale8_video(255 - hsv.sat, 255 - hsv.sat);
            let satscale = 255 - desat;
            r = scale8(r, satscale).saturating_add(desat);
            g = scale8(g, satscale).saturating_add(desat);
            b = scale8(b, satscale).saturating_add(desat);
        }
    }

    if hsv.val != 255 {
        let val = scale8_video(hsv.val, hsv.val);
        if val == 0 {
            r = 0;
            g = 0;
            b = 0;
        } else {
            r = scale8(r, val);
            g = scale8(g, val);
            b = scale8(b, val);
        }
    }

    Srgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale8_full_scale_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(scale8(v, 255), v);
        }
    }

    #[test]
    fn scale8_video_keeps_nonzero_values_lit() {
        assert_eq!(scale8_video(1, 1), 1);
        assert_eq!(scale8_video(0, 200), 0);
        assert_eq!(scale8_video(200, 0), 0);
    }

    #[test]
    fn raw_clamps_hue_above_section_range() {
        let at_max = hsv_to_rgb(HsvColor::new(191, 255, 255), HsvPolicy::Raw);
        let beyond = hsv_to_rgb(HsvColor::new(250, 255, 255), HsvPolicy::Raw);
        assert_eq!(at_max, beyond);
    }

    #[test]
    fn rainbow_pink_to_red_section_stays_in_range() {
        let last = hsv_to_rgb(HsvColor::from_hue(255), HsvPolicy::Rainbow);
        assert!(last.red >= 170);
        assert_eq!(last.green, 0);
    }
}
