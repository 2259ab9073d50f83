//! Point-to-point status signalling between two CAN nodes.
//!
//! One node transmits a one-byte status frame whenever its button is pressed;
//! the peer picks pending frames off the bus, checks them for the shared group
//! marker and mirrors a four-bit pattern onto its indicator outputs. A second,
//! stricter classifier can be run against the most recent frame to light one
//! of three diagnostic lines.
//!
//! The crate holds the parts with actual design content: the wire codec, the
//! polling link loop and the confirmation classifier. Everything
//! hardware-shaped (controller bring-up, pin muxing, the busy-wait after a
//! send) sits behind the [`gateway`] seams, so a board crate plugs in whatever
//! its HAL provides. Adapters for `embedded-hal` pins and `embedded-can`
//! drivers are included.
//!
//! Reception is strictly polled, there is no queueing beyond the gateway's
//! single receive slot, and nothing here ever blocks apart from the injected
//! post-transmit settle wait.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod codec;
pub mod config;
pub mod frame;
pub mod gateway;
pub mod node;
pub mod validator;

#[cfg(any(test, feature = "std"))]
pub mod mock;

pub use codec::{
    DisplayPattern, GROUP_ID, GROUP_MARKER, Output, decode_display_pattern, encode_status_frame,
};
pub use frame::Frame;
pub use node::{Activity, Node, Reception};
pub use validator::{Diagnostic, ValidationOutcome, confirm_frame};
