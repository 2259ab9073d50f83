use embedded_can::StandardId;

use super::*;
use crate::codec::{GROUP_MARKER, encode_status_frame};
use crate::mock::{MockBus, MockPanel, MockSettle, RejectedTransmit, Sequence};

fn node(seq: &Sequence) -> Node<MockBus<'_>, MockPanel<'_>, MockSettle<'_>> {
    Node::new(MockBus::new(seq), MockPanel::new(seq), MockSettle::new(seq))
}

fn inbound(id: u16, data: &[u8]) -> Frame {
    Frame::new(StandardId::new(id).unwrap(), data).unwrap()
}

#[test]
fn idle_poll_does_nothing() {
    let seq = Sequence::new();
    let mut node = node(&seq);

    let activity = node.poll().unwrap();

    assert_eq!(activity, Activity::default());
    assert!(node.bus.sent.is_empty());
    assert!(node.settle.waits.is_empty());
    assert!(node.panel.output_writes.is_empty());
}

#[test]
fn button_press_transmits_the_status_frame() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.panel.queue_button(true);

    let activity = node.poll().unwrap();

    assert!(activity.sent);
    assert_eq!(node.bus.sent.len(), 1);
    assert_eq!(node.bus.sent[0].1, encode_status_frame());
}

#[test]
fn settle_sits_between_transmit_and_the_next_button_read() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.panel.queue_button(true);

    node.poll().unwrap();
    node.poll().unwrap();

    let transmitted_at = node.bus.sent[0].0;
    let settled_at = node.settle.waits[0].0;
    let next_read_at = node.panel.button_reads[1];
    assert!(transmitted_at < settled_at);
    assert!(settled_at < next_read_at);
    assert_eq!(node.settle.waits[0].1, config::POST_SEND_SETTLE);
}

#[test]
fn no_press_means_no_settle() {
    let seq = Sequence::new();
    let mut node = node(&seq);

    node.poll().unwrap();

    assert!(node.settle.waits.is_empty());
}

#[test]
fn matching_frame_drives_all_four_outputs() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.bus.inject(inbound(26, &[GROUP_MARKER, 0b1101]));

    let activity = node.poll().unwrap();

    assert_eq!(node.panel.outputs, [true, false, true, true]);
    assert_eq!(node.panel.output_writes.len(), 4);
    assert_eq!(node.panel.output_clears.len(), 1);
    // Clear-then-set: the wipe precedes every per-output write.
    assert!(node.panel.output_clears[0] < node.panel.output_writes[0].0);

    match activity.received {
        Some(Reception::Displayed(pattern)) => assert_eq!(pattern.bits(), 0b1101),
        other => panic!("expected a displayed pattern, got {other:?}"),
    }
}

#[test]
fn pending_flag_clears_after_the_display_is_driven() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.bus.inject(inbound(26, &[GROUP_MARKER, 0x0F]));

    node.poll().unwrap();

    assert_eq!(node.bus.clears.len(), 1);
    assert!(node.bus.pending().is_none());
    let last_write = node.panel.output_writes.last().unwrap().0;
    assert!(node.bus.clears[0] > last_write);
}

#[test]
fn group_mismatch_discards_but_still_clears_pending() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.bus.inject(inbound(26, &[9, 0xFF]));

    let activity = node.poll().unwrap();

    assert_eq!(activity.received, Some(Reception::Ignored));
    assert!(node.panel.output_writes.is_empty());
    assert!(node.panel.output_clears.is_empty());
    assert_eq!(node.bus.clears.len(), 1);
    assert!(node.bus.pending().is_none());
}

// Our own status frame declares a single byte, so the display byte at index 1
// reads as zero: receiving a bare status frame blanks the display. The
// deployed station pairs the marker with a second, display-carrying byte.
#[test]
fn one_byte_status_frame_blanks_the_display() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.panel.outputs = [true; 4];
    node.bus.inject(encode_status_frame());

    let activity = node.poll().unwrap();

    assert_eq!(node.panel.outputs, [false; 4]);
    assert_eq!(node.panel.output_writes.len(), 4);
    assert!(node.panel.output_writes.iter().all(|(_, _, on)| !on));
    assert_eq!(
        activity.received,
        Some(Reception::Displayed(codec::decode_display_pattern(0)))
    );
}

#[test]
fn transmit_rejection_surfaces_after_the_settle() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.panel.queue_button(true);
    node.bus.reject_next_transmit = true;
    node.bus.inject(inbound(26, &[GROUP_MARKER, 0x03]));

    let err = node.poll();

    assert_eq!(err, Err(RejectedTransmit));
    assert_eq!(node.settle.waits.len(), 1);
    // The iteration stopped at the rejection: the pending frame is untouched
    // and gets picked up by the next poll.
    assert!(node.bus.pending().is_some());
    assert!(node.bus.clears.is_empty());

    let activity = node.poll().unwrap();
    assert_eq!(node.panel.outputs, [true, true, false, false]);
    assert!(matches!(activity.received, Some(Reception::Displayed(_))));
}

#[test]
fn transmit_and_receive_share_one_iteration() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.panel.queue_button(true);
    node.bus.inject(inbound(26, &[GROUP_MARKER, 0x05]));

    let activity = node.poll().unwrap();

    assert!(activity.sent);
    assert!(matches!(activity.received, Some(Reception::Displayed(_))));
    // Transmit check first: the send happens before the bus is polled.
    assert!(node.bus.sent[0].0 < node.bus.polls[0]);
}

#[test]
fn latest_injected_frame_wins_the_slot() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.bus.inject(inbound(26, &[GROUP_MARKER, 0x01]));
    node.bus.inject(inbound(26, &[GROUP_MARKER, 0x02]));

    let activity = node.poll().unwrap();

    assert_eq!(
        activity.received,
        Some(Reception::Displayed(codec::decode_display_pattern(0x02)))
    );
}

#[test]
fn confirm_is_none_before_any_reception() {
    let seq = Sequence::new();
    let mut node = node(&seq);

    assert_eq!(node.confirm(), None);
    assert!(node.panel.diagnostic_writes.is_empty());
}

#[test]
fn confirm_classifies_the_last_received_frame() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.bus.inject(inbound(0x26, &[4]));

    node.poll().unwrap();
    let outcome = node.confirm();

    assert_eq!(outcome, Some(ValidationOutcome::Accepted));
    assert_eq!(node.panel.diagnostics, [false, false, true]);
}

// The retained frame ignores the group check: whatever the bus last
// delivered is what gets classified.
#[test]
fn confirm_sees_group_rejected_frames_too() {
    let seq = Sequence::new();
    let mut node = node(&seq);
    node.bus.inject(inbound(0x30, &[9]));

    node.poll().unwrap();
    let outcome = node.confirm();

    assert_eq!(outcome, Some(ValidationOutcome::HeaderMismatch));
    assert_eq!(node.last_received().unwrap().id().as_raw(), 0x30);
}
