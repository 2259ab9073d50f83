//! The wire-level frame value type.
//!
//! Deliberately smaller than a general CAN frame: this link only ever deals in
//! standard-id data frames, so extended ids and remote frames are rejected at
//! the import boundary instead of being carried around and checked everywhere.

use arrayvec::ArrayVec;
use embedded_can::{Id, StandardId};

/// Maximum payload of a classic CAN data frame.
pub const PAYLOAD_CAPACITY: usize = 8;

/// Payload longer than [`PAYLOAD_CAPACITY`] passed to [`Frame::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadTooLong;

/// One standard-id CAN data frame.
///
/// The declared data length is the payload length; it is fixed at
/// construction, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    id: StandardId,
    payload: ArrayVec<[u8; PAYLOAD_CAPACITY]>,
}

impl Frame {
    /// Builds a frame, rejecting payloads that do not fit a classic data frame.
    pub fn new(id: StandardId, data: &[u8]) -> Result<Self, PayloadTooLong> {
        if data.len() > PAYLOAD_CAPACITY {
            return Err(PayloadTooLong);
        }

        Ok(Self {
            id,
            payload: data.iter().copied().collect(),
        })
    }

    /// Imports a driver-level frame.
    ///
    /// Extended-id and remote frames are not part of this protocol and import
    /// as `None`.
    pub fn from_can<F: embedded_can::Frame>(frame: &F) -> Option<Self> {
        if frame.is_remote_frame() {
            return None;
        }

        match frame.id() {
            Id::Standard(id) => Some(Self {
                id,
                payload: frame.data().iter().copied().collect(),
            }),
            Id::Extended(_) => None,
        }
    }

    pub fn id(&self) -> StandardId {
        self.id
    }

    /// Declared data length, 0..=8.
    pub fn data_length(&self) -> usize {
        self.payload.len()
    }

    /// The declared payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Reads a payload byte; bytes past the declared length read as zero.
    ///
    /// The display decoder reads byte index 1 out of frames that may only
    /// declare one byte, so the read has to be total.
    pub fn byte_at(&self, index: usize) -> u8 {
        self.payload.get(index).copied().unwrap_or(0)
    }
}
