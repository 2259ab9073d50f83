//! Panel and settle adapters over `embedded-hal` 0.2 pins and delays.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_time::duration::Milliseconds;

use super::{Panel, Settle};
use crate::codec::Output;
use crate::validator::Diagnostic;

/// A [`Panel`] wired from discrete pins: one button (pressed = high), the
/// four display outputs A..D and the three diagnostic lines.
///
/// The panel seam is infallible, so pin errors degrade: a failed button read
/// counts as released, a failed write is dropped.
pub struct PinPanel<BTN, A, B, C, D, F1, F2, F3> {
    button: BTN,
    display_a: A,
    display_b: B,
    display_c: C,
    display_d: D,
    line_content: F1,
    line_length: F2,
    line_accept: F3,
}

impl<BTN, A, B, C, D, F1, F2, F3> PinPanel<BTN, A, B, C, D, F1, F2, F3>
where
    BTN: InputPin,
    A: OutputPin,
    B: OutputPin,
    C: OutputPin,
    D: OutputPin,
    F1: OutputPin,
    F2: OutputPin,
    F3: OutputPin,
{
    pub fn new(button: BTN, displays: (A, B, C, D), diagnostics: (F1, F2, F3)) -> Self {
        Self {
            button,
            display_a: displays.0,
            display_b: displays.1,
            display_c: displays.2,
            display_d: displays.3,
            line_content: diagnostics.0,
            line_length: diagnostics.1,
            line_accept: diagnostics.2,
        }
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    let _ = if on { pin.set_high() } else { pin.set_low() };
}

impl<BTN, A, B, C, D, F1, F2, F3> Panel for PinPanel<BTN, A, B, C, D, F1, F2, F3>
where
    BTN: InputPin,
    A: OutputPin,
    B: OutputPin,
    C: OutputPin,
    D: OutputPin,
    F1: OutputPin,
    F2: OutputPin,
    F3: OutputPin,
{
    fn button_pressed(&mut self) -> bool {
        self.button.is_high().unwrap_or(false)
    }

    fn set_output(&mut self, output: Output, on: bool) {
        match output {
            Output::A => drive(&mut self.display_a, on),
            Output::B => drive(&mut self.display_b, on),
            Output::C => drive(&mut self.display_c, on),
            Output::D => drive(&mut self.display_d, on),
        }
    }

    fn clear_outputs(&mut self) {
        drive(&mut self.display_a, false);
        drive(&mut self.display_b, false);
        drive(&mut self.display_c, false);
        drive(&mut self.display_d, false);
    }

    fn set_diagnostic(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::ContentFault => drive(&mut self.line_content, true),
            Diagnostic::LengthFault => drive(&mut self.line_length, true),
            Diagnostic::Accepted => drive(&mut self.line_accept, true),
        }
    }
}

/// [`Settle`] over any blocking `embedded-hal` millisecond delay.
pub struct HalDelay<D>(pub D);

impl<D: DelayMs<u32>> Settle for HalDelay<D> {
    fn wait(&mut self, duration: Milliseconds<u32>) {
        self.0.delay_ms(duration.0);
    }
}
