//! External bus configuration, stated as data.
//!
//! Bit timing and acceptance filtering live in the CAN controller, not in the
//! link logic; gateway implementations map these values onto their hardware's
//! registers. Nothing in this crate interprets them.

use embedded_time::duration::Milliseconds;

/// Controller bit timing, in time quanta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    pub prescaler: u16,
    pub sync_jump_width: u8,
    pub segment_1: u8,
    pub segment_2: u8,
}

/// The link's timing on a 30 MHz controller clock: 15 quanta per bit
/// (1 + 6 + 8), prescaler 4.
pub const TIMING_30MHZ: BitTiming = BitTiming {
    prescaler: 4,
    sync_jump_width: 1,
    segment_1: 6,
    segment_2: 8,
};

/// One id/mask acceptance filter bank, split into the register half-words.
///
/// The high half-word carries the standard identifier bits; the low half-word
/// passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcceptanceFilter {
    pub id_high: u16,
    pub id_low: u16,
    pub mask_high: u16,
    pub mask_low: u16,
}

/// The filter sorting station traffic into the receive FIFO.
pub const INBOUND_FILTER: AcceptanceFilter = AcceptanceFilter {
    id_high: 0x0000,
    id_low: 0x0000,
    mask_high: 0xFFE0,
    mask_low: 0x0000,
};

/// Default settle wait applied after each transmit, before the button is read
/// again.
pub const POST_SEND_SETTLE: Milliseconds<u32> = Milliseconds(1);

/// Everything a bus gateway needs to bring the controller up for this link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub timing: BitTiming,
    pub filter: AcceptanceFilter,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            timing: TIMING_30MHZ,
            filter: INBOUND_FILTER,
        }
    }
}
