//! Bus gateway adapter over a non-blocking `embedded-can` driver.

use embedded_can::Frame as _;
use embedded_can::nb::Can;

use super::BusGateway;
use crate::frame::Frame;

/// Transmit-side failures surfaced by [`NbCanGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// No free mailbox; the frame was not queued.
    Busy,
    /// The controller rejected the frame.
    Controller(E),
}

/// [`BusGateway`] over any [`embedded_can::nb::Can`] driver.
///
/// Receive side: the controller is drained on every poll and the newest
/// protocol frame wins the single slot. Extended-id and remote frames never
/// enter the slot; receive-side controller errors leave it untouched.
pub struct NbCanGateway<C: Can> {
    can: C,
    slot: Option<Frame>,
}

impl<C: Can> NbCanGateway<C> {
    pub fn new(can: C) -> Self {
        Self { can, slot: None }
    }

    /// Consumes the adapter and hands the driver back.
    pub fn free(self) -> C {
        self.can
    }
}

impl<C: Can> BusGateway for NbCanGateway<C> {
    type Error = BusError<C::Error>;

    fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        // The payload is capacity-bounded at 8 bytes, within any CAN MTU.
        let wire = C::Frame::new(frame.id(), frame.payload()).unwrap();

        match self.can.transmit(&wire) {
            Ok(_displaced) => Ok(()),
            Err(nb::Error::WouldBlock) => Err(BusError::Busy),
            Err(nb::Error::Other(e)) => Err(BusError::Controller(e)),
        }
    }

    fn poll_receive(&mut self) -> Option<Frame> {
        while let Ok(wire) = self.can.receive() {
            if let Some(frame) = Frame::from_can(&wire) {
                self.slot = Some(frame);
            }
        }

        self.slot.clone()
    }

    fn clear_receive_pending(&mut self) {
        self.slot = None;
    }
}
