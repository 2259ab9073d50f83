//! Encoding and decoding of the one application-defined frame type.
//!
//! The wire format is minimal: a status frame carries the group identifier as
//! its CAN id and the low-nibble group marker as its single payload byte. The
//! display side reads a four-bit pattern out of a payload byte, one bit per
//! indicator output.

mod bitfields;


pub use bitfields::{DisplayPattern, StatusByte};

use embedded_can::StandardId;

use crate::frame::Frame;

/// Group identifier marking this link's traffic on the shared bus.
pub const GROUP_ID: u16 = 26;

/// Low-nibble group marker carried in payload byte 0 of every status frame.
pub const GROUP_MARKER: u8 = (GROUP_ID % 16) as u8;

/// [`GROUP_ID`] as a standard CAN id.
pub const GROUP_STANDARD_ID: StandardId = match StandardId::new(GROUP_ID) {
    Some(id) => id,
    None => panic!("group identifier exceeds the standard 11-bit range"),
};

/// One of the four indicator outputs, in payload bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// Builds the status frame sent on a button press: id [`GROUP_ID`], one
/// payload byte holding the group marker.
pub fn encode_status_frame() -> Frame {
    let status = StatusByte::new(GROUP_MARKER);
    // A single byte always fits the payload.
    Frame::new(GROUP_STANDARD_ID, &[status.raw()]).unwrap()
}

/// Extracts the four display bits from a payload byte.
///
/// Total over all byte values; bits 4..=7 are ignored.
pub fn decode_display_pattern(byte: u8) -> DisplayPattern {
    DisplayPattern::from_byte(byte)
}
