//! Recording doubles for the gateway seams.
//!
//! Every double stamps its calls from a shared [`Sequence`], so tests can
//! assert ordering across collaborators (transmit before settle before the
//! next button read) instead of just counting calls. Everything here is
//! core-only; the module also builds under the `std` feature for host-side
//! simulation.

use core::cell::Cell;

use arrayvec::ArrayVec;
use embedded_can::Id;
use embedded_time::duration::Milliseconds;

use crate::codec::Output;
use crate::frame::Frame;
use crate::gateway::{BusGateway, Panel, Settle};
use crate::validator::Diagnostic;

/// Shared ordinal source; each recorded call takes the next stamp.
pub struct Sequence(Cell<u32>);

impl Sequence {
    pub const fn new() -> Self {
        Self(Cell::new(0))
    }

    fn stamp(&self) -> u32 {
        let n = self.0.get();
        self.0.set(n + 1);
        n
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

/// The mock controller refused the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedTransmit;

/// [`BusGateway`] double with a latest-wins single receive slot.
pub struct MockBus<'a> {
    seq: &'a Sequence,
    slot: Option<Frame>,
    /// Transmitted frames with their stamps.
    pub sent: ArrayVec<[(u32, Frame); 8]>,
    /// Stamps of every `poll_receive` call.
    pub polls: ArrayVec<[u32; 8]>,
    /// Stamps of every `clear_receive_pending` call.
    pub clears: ArrayVec<[u32; 8]>,
    /// Makes the next transmit fail.
    pub reject_next_transmit: bool,
}

impl<'a> MockBus<'a> {
    pub fn new(seq: &'a Sequence) -> Self {
        Self {
            seq,
            slot: None,
            sent: ArrayVec::new(),
            polls: ArrayVec::new(),
            clears: ArrayVec::new(),
            reject_next_transmit: false,
        }
    }

    /// Puts a frame in the receive slot, displacing any frame already there.
    pub fn inject(&mut self, frame: Frame) {
        self.slot = Some(frame);
    }

    pub fn pending(&self) -> Option<&Frame> {
        self.slot.as_ref()
    }
}

impl BusGateway for MockBus<'_> {
    type Error = RejectedTransmit;

    fn transmit(&mut self, frame: &Frame) -> Result<(), RejectedTransmit> {
        let at = self.seq.stamp();
        if self.reject_next_transmit {
            self.reject_next_transmit = false;
            return Err(RejectedTransmit);
        }
        self.sent.push((at, frame.clone()));
        Ok(())
    }

    fn poll_receive(&mut self) -> Option<Frame> {
        self.polls.push(self.seq.stamp());
        self.slot.clone()
    }

    fn clear_receive_pending(&mut self) {
        self.clears.push(self.seq.stamp());
        self.slot = None;
    }
}

/// [`Panel`] double: scripted button reads, live output and diagnostic
/// state, and a full write log.
pub struct MockPanel<'a> {
    seq: &'a Sequence,
    presses: ArrayVec<[bool; 16]>,
    cursor: usize,
    /// Stamps of every button read.
    pub button_reads: ArrayVec<[u32; 16]>,
    /// Current level of display outputs A..D.
    pub outputs: [bool; 4],
    /// Current level of diagnostic lines 1..=3.
    pub diagnostics: [bool; 3],
    /// Every `set_output` call: stamp, output, level.
    pub output_writes: ArrayVec<[(u32, Output, bool); 16]>,
    /// Stamps of every `clear_outputs` call.
    pub output_clears: ArrayVec<[u32; 8]>,
    /// Every `set_diagnostic` call: stamp and line.
    pub diagnostic_writes: ArrayVec<[(u32, Diagnostic); 8]>,
}

impl<'a> MockPanel<'a> {
    pub fn new(seq: &'a Sequence) -> Self {
        Self {
            seq,
            presses: ArrayVec::new(),
            cursor: 0,
            button_reads: ArrayVec::new(),
            outputs: [false; 4],
            diagnostics: [false; 3],
            output_writes: ArrayVec::new(),
            output_clears: ArrayVec::new(),
            diagnostic_writes: ArrayVec::new(),
        }
    }

    /// Scripts the next unscripted button read; reads past the script come
    /// back released.
    pub fn queue_button(&mut self, pressed: bool) {
        self.presses.push(pressed);
    }
}

impl Panel for MockPanel<'_> {
    fn button_pressed(&mut self) -> bool {
        self.button_reads.push(self.seq.stamp());
        let pressed = self.presses.get(self.cursor).copied().unwrap_or(false);
        self.cursor += 1;
        pressed
    }

    fn set_output(&mut self, output: Output, on: bool) {
        self.output_writes.push((self.seq.stamp(), output, on));
        self.outputs[output as usize] = on;
    }

    fn clear_outputs(&mut self) {
        self.output_clears.push(self.seq.stamp());
        self.outputs = [false; 4];
    }

    fn set_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostic_writes.push((self.seq.stamp(), diagnostic));
        self.diagnostics[usize::from(diagnostic.line() - 1)] = true;
    }
}

/// [`Settle`] double recording each wait.
pub struct MockSettle<'a> {
    seq: &'a Sequence,
    /// Every wait: stamp and requested duration.
    pub waits: ArrayVec<[(u32, Milliseconds<u32>); 8]>,
}

impl<'a> MockSettle<'a> {
    pub fn new(seq: &'a Sequence) -> Self {
        Self {
            seq,
            waits: ArrayVec::new(),
        }
    }
}

impl Settle for MockSettle<'_> {
    fn wait(&mut self, duration: Milliseconds<u32>) {
        self.waits.push((self.seq.stamp(), duration));
    }
}

/// Driver-level frame stand-in for exercising the `embedded-can` adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    id: Id,
    data: ArrayVec<[u8; 8]>,
    dlc: usize,
    remote: bool,
}

impl embedded_can::Frame for WireFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        Some(Self {
            id: id.into(),
            data: data.iter().copied().collect(),
            dlc: data.len(),
            remote: false,
        })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        Some(Self {
            id: id.into(),
            data: ArrayVec::new(),
            dlc,
            remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
