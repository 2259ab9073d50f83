//! The seams between the link logic and the hardware.
//!
//! The loop consumes three capabilities: a bus that can send one frame and
//! surface one pending frame, a panel with one button and the indicator
//! outputs, and a settle wait. They are traits so boards can hand in whatever
//! their HAL provides and tests can hand in recording doubles; the loop takes
//! them as explicit handles, never as process-wide state.
//!
//! [`pins`] and [`nb_can`] adapt the seams onto `embedded-hal` pins and
//! `embedded-can` drivers.

pub mod nb_can;
pub mod pins;

use embedded_time::duration::Milliseconds;

use crate::codec::Output;
use crate::frame::Frame;
use crate::validator::Diagnostic;

/// Thin interface to the CAN controller.
///
/// Implementations hold a single receive slot: if several frames arrive
/// between polls, only the most recent is surfaced. Any transmit retry or
/// backoff is the implementation's business; the link loop never retries.
pub trait BusGateway {
    type Error;

    /// Queues one frame for transmission. Must not block.
    fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Surfaces the pending frame, if any, without consuming it.
    ///
    /// Repeated polls return the same frame until [`clear_receive_pending`]
    /// is called.
    ///
    /// [`clear_receive_pending`]: BusGateway::clear_receive_pending
    fn poll_receive(&mut self) -> Option<Frame>;

    /// Drops the pending frame so it is not processed twice.
    ///
    /// The loop calls this exactly once per surfaced frame, after the frame
    /// has been decoded and displayed (or discarded).
    fn clear_receive_pending(&mut self);
}

/// One momentary button, four display outputs, three diagnostic lines.
pub trait Panel {
    /// Reads the button. Debouncing, if any, is the implementor's concern.
    fn button_pressed(&mut self) -> bool;

    /// Drives one display output.
    fn set_output(&mut self, output: Output, on: bool);

    /// Turns all four display outputs off.
    ///
    /// Kept separate from [`set_output`] so the display path's
    /// clear-then-set policy stays observable.
    ///
    /// [`set_output`]: Panel::set_output
    fn clear_outputs(&mut self);

    /// Lights one diagnostic line. Never clears the others: repeated
    /// classifications accumulate on the panel.
    fn set_diagnostic(&mut self, diagnostic: Diagnostic);
}

/// The settle wait applied after each transmit, before the button is read
/// again.
pub trait Settle {
    fn wait(&mut self, duration: Milliseconds<u32>);
}
