//! Integration tests for the frame sinks

use smart_leds::{RGB8, SmartLedsWrite};
use strip_sequencer::strip::{DEFAULT_BRIGHTNESS, DEFAULT_STRIP_LENGTH};
use strip_sequencer::{BLACK, FrameSink, GREEN, PixelBuffer, RED, SmartLedsStrip, StripConfig};

/// Mock driver recording every frame written to it
#[derive(Default)]
struct MockDriver {
    frames: Vec<Vec<RGB8>>,
    fail: bool,
}

#[derive(Debug, PartialEq)]
struct DriverError;

impl SmartLedsWrite for MockDriver {
    type Error = DriverError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail {
            return Err(DriverError);
        }
        self.frames.push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}

#[test]
fn default_config_is_a_dim_256_pixel_strip() {
    let config = StripConfig::default();
    assert_eq!(config.length, DEFAULT_STRIP_LENGTH);
    assert_eq!(config.length, 256);
    assert_eq!(config.brightness, DEFAULT_BRIGHTNESS);
    assert_eq!(config.brightness, 30);
}

#[test]
fn pixel_buffer_applies_writes_and_counts_frames() {
    let mut buffer = PixelBuffer::<6>::new();
    assert_eq!(buffer.len(), 6);

    buffer.fill(0..6, RED);
    buffer.set_pixel(2, GREEN);
    buffer.fill(4..6, BLACK);
    buffer.transmit().unwrap();

    assert_eq!(buffer.pixels(), &[RED, RED, GREEN, RED, BLACK, BLACK]);
    assert_eq!(buffer.frames(), 1);
}

#[test]
fn nothing_reaches_the_driver_before_transmit() {
    let mut strip: SmartLedsStrip<MockDriver, 4> = SmartLedsStrip::new(MockDriver::default());
    strip.fill(0..4, RED);
    assert!(strip.writer().frames.is_empty());

    strip.transmit().unwrap();
    assert_eq!(strip.writer().frames.len(), 1);
}

#[test]
fn full_brightness_passes_colors_through() {
    let mut strip: SmartLedsStrip<MockDriver, 3> = SmartLedsStrip::new(MockDriver::default());
    strip.fill(0..3, BLACK);
    strip.set_pixel(0, RED);
    strip.set_pixel(2, GREEN);
    strip.transmit().unwrap();

    let driver = strip.into_writer();
    assert_eq!(
        driver.frames[0],
        vec![RGB8::new(255, 0, 0), RGB8::new(0, 0, 0), RGB8::new(0, 255, 0)]
    );
}

#[test]
fn global_brightness_scales_the_transmitted_frame_only() {
    let config = StripConfig {
        length: 2,
        brightness: 30,
    };
    let mut strip: SmartLedsStrip<MockDriver, 2> =
        SmartLedsStrip::with_config(MockDriver::default(), config);
    strip.fill(0..2, RED);
    strip.transmit().unwrap();

    // The buffer keeps full-scale colors
    assert_eq!(strip.pixels(), &[RED, RED]);

    let sent = strip.writer().frames[0][0];
    assert!((29..=31).contains(&sent.r), "scaled red was {}", sent.r);
    assert_eq!(sent.g, 0);
    assert_eq!(sent.b, 0);

    strip.set_brightness(0);
    strip.transmit().unwrap();
    assert_eq!(strip.writer().frames[1][0].r, 0);
}

#[test]
fn driver_errors_are_reported_by_transmit() {
    let driver = MockDriver {
        fail: true,
        ..MockDriver::default()
    };
    let mut strip: SmartLedsStrip<MockDriver, 2> = SmartLedsStrip::new(driver);
    assert_eq!(strip.transmit(), Err(DriverError));
}
