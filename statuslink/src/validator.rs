//! Strict classification of an inbound frame against the expected
//! confirmation frame.
//!
//! This is a separate, stricter path than the link loop's group check: the
//! loop compares the low-nibble marker in payload byte 0, while this
//! classifier exact-matches the CAN identifier. The two checks carry their
//! own constants and are intentionally not derived from one another.

use crate::frame::Frame;
use crate::gateway::Panel;

/// Identifier the confirmation frame must carry, matched exactly.
pub const CONFIRM_ID: u16 = 0x26;

/// Declared length the confirmation frame must carry.
pub const CONFIRM_DLC: usize = 1;

/// Payload byte the confirmation frame must carry.
pub const CONFIRM_MARKER: u8 = 0x14 % 16;

/// How a frame classified against the confirmation constants. Terminal; a
/// mismatching frame is not retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationOutcome {
    /// The identifier is not [`CONFIRM_ID`]. Length and payload go unchecked.
    HeaderMismatch,
    /// The declared length is not [`CONFIRM_DLC`].
    LengthMismatch,
    /// Payload byte 0 is not [`CONFIRM_MARKER`].
    PayloadMismatch,
    Accepted,
}

/// The three physical diagnostic lines.
///
/// Header and payload mismatches share a line, so a lit
/// [`ContentFault`](Diagnostic::ContentFault) alone does not say which of the
/// two failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    ContentFault,
    LengthFault,
    Accepted,
}

impl Diagnostic {
    /// 1-based number of the physical line.
    pub fn line(self) -> u8 {
        match self {
            Diagnostic::ContentFault => 1,
            Diagnostic::LengthFault => 2,
            Diagnostic::Accepted => 3,
        }
    }
}

impl ValidationOutcome {
    /// The diagnostic line signalling this outcome.
    pub fn diagnostic(self) -> Diagnostic {
        match self {
            ValidationOutcome::HeaderMismatch | ValidationOutcome::PayloadMismatch => {
                Diagnostic::ContentFault
            }
            ValidationOutcome::LengthMismatch => Diagnostic::LengthFault,
            ValidationOutcome::Accepted => Diagnostic::Accepted,
        }
    }
}

/// Classifies `frame` and lights the matching diagnostic line.
///
/// Exactly one line is driven per call, and lines are never cleared first:
/// outcomes accumulate on the panel across calls. The display outputs are
/// untouched.
pub fn confirm_frame<P: Panel>(frame: &Frame, panel: &mut P) -> ValidationOutcome {
    let outcome = classify(frame);
    panel.set_diagnostic(outcome.diagnostic());
    outcome
}

/// First failed gate wins; later gates go unchecked.
fn classify(frame: &Frame) -> ValidationOutcome {
    if frame.id().as_raw() != CONFIRM_ID {
        return ValidationOutcome::HeaderMismatch;
    }

    if frame.data_length() != CONFIRM_DLC {
        return ValidationOutcome::LengthMismatch;
    }

    if frame.payload()[0] != CONFIRM_MARKER {
        return ValidationOutcome::PayloadMismatch;
    }

    ValidationOutcome::Accepted
}
