//! The polling link loop.
//!
//! A node owns its three gateway handles and runs a steady-state cycle: check
//! the button and send, then check the bus and display. There is no terminal
//! state; the loop runs until the host stops calling it. Nothing in here
//! blocks apart from the injected settle wait, and no failure is fatal — a
//! rejected transmit is surfaced to the caller and the next poll carries on.

use embedded_time::duration::Milliseconds;
use num_traits::FromPrimitive;

use crate::codec::{self, DisplayPattern, Output};
use crate::config;
use crate::frame::Frame;
use crate::gateway::{BusGateway, Panel, Settle};
use crate::validator::{self, ValidationOutcome};

#[cfg(test)]
mod tests;

/// What the receive check did with a pending frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reception {
    /// Group marker matched; the pattern went out to the display.
    Displayed(DisplayPattern),
    /// Group marker mismatch; the frame was discarded.
    Ignored,
}

/// What one [`Node::poll`] iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Activity {
    pub sent: bool,
    pub received: Option<Reception>,
}

/// One end of the link. Generic across the bus, panel and settle
/// implementations so boards and tests inject their own.
pub struct Node<B, P, S> {
    /// The gateway handles. Public so the host can reach its own hardware
    /// between polls; the loop only uses them inside [`Node::poll`].
    pub bus: B,
    pub panel: P,
    pub settle: S,

    post_send_settle: Milliseconds<u32>,
    last_received: Option<Frame>,
}

impl<B, P, S> Node<B, P, S>
where
    B: BusGateway,
    P: Panel,
    S: Settle,
{
    pub fn new(bus: B, panel: P, settle: S) -> Self {
        Self {
            bus,
            panel,
            settle,
            post_send_settle: config::POST_SEND_SETTLE,
            last_received: None,
        }
    }

    /// Overrides the settle wait applied after each transmit.
    pub fn with_settle(mut self, duration: Milliseconds<u32>) -> Self {
        self.post_send_settle = duration;
        self
    }

    /// Runs one iteration: transmit check first, then receive check.
    ///
    /// A transmit rejection is returned after the settle wait and skips the
    /// rest of the iteration; the pending frame, if any, is picked up by the
    /// next poll. The rejection is never retried here.
    pub fn poll(&mut self) -> Result<Activity, B::Error> {
        let mut activity = Activity::default();

        if self.panel.button_pressed() {
            let sent = self.bus.transmit(&codec::encode_status_frame());
            // Settle before the button is read again, whether or not the
            // controller took the frame.
            self.settle.wait(self.post_send_settle);
            sent?;
            activity.sent = true;
        }

        if let Some(frame) = self.bus.poll_receive() {
            let reception = if frame.byte_at(0) == codec::GROUP_MARKER {
                // The display byte sits at index 1: the station pairs the
                // marker with a second byte. A bare one-byte status frame
                // reads zero here and blanks the display.
                let pattern = codec::decode_display_pattern(frame.byte_at(1));

                self.panel.clear_outputs();
                for bit in 0..4u8 {
                    let output = Output::from_u8(bit).unwrap();
                    self.panel.set_output(output, pattern.is_lit(output));
                }

                Reception::Displayed(pattern)
            } else {
                Reception::Ignored
            };

            self.last_received = Some(frame);
            // Cleared only after decode and display, so the frame cannot be
            // lost half-processed.
            self.bus.clear_receive_pending();

            activity.received = Some(reception);
        }

        Ok(activity)
    }

    /// Polls forever. Transmit rejections are dropped: the only failure
    /// surface on this hardware is the indicator lines.
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.poll();
        }
    }

    /// Classifies the most recently received frame against the expected
    /// confirmation frame, lighting one diagnostic line.
    ///
    /// `None` until the first frame has been polled off the bus. The retained
    /// frame is kept regardless of the group check, so this sees exactly what
    /// the bus last delivered.
    pub fn confirm(&mut self) -> Option<ValidationOutcome> {
        let frame = self.last_received.as_ref()?;
        Some(validator::confirm_frame(frame, &mut self.panel))
    }

    /// The most recently received frame, if any.
    pub fn last_received(&self) -> Option<&Frame> {
        self.last_received.as_ref()
    }
}
