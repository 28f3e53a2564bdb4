use crate::loader::MessageKind;
use crate::merge::MergedMessage;
use crate::model::schedule::{ActuationEvent, ActuationKind};
use crate::tempo::TempoInfo;
use log::{debug, warn};
use std::collections::HashMap;

/// What to do with a release for a note that has no activation on record.
#[derive(Debug, Clone, Copy, Default)]
pub enum ReleasePolicy {
    /// Emit the deactivation anyway, so a solenoid left energized by a
    /// missed or doubled activation still gets released.
    #[default]
    EmitUnmatched,

    /// Drop the message; only notes the song actually activated are ever
    /// released.
    SuppressUnmatched,
}

/// Converts a tick position into whole milliseconds since the start of
/// the song.
///
/// All integer arithmetic, truncating toward zero: ticks scale up to
/// microseconds through the tempo, then down to milliseconds. Equal tick
/// positions always land on the same millisecond, on every platform.
pub fn ticks_to_ms(ticks: u64, tempo: &TempoInfo) -> u64 {
    let us = u128::from(ticks) * u128::from(tempo.tempo_us_per_beat)
        / u128::from(tempo.ticks_per_beat);
    (us / 1_000) as u64
}

/// Walks the merged stream and produces the actuation schedule: one event
/// per note message, timestamped in milliseconds and sorted by time.
///
/// A note-on with velocity 0 deactivates, per the MIDI convention. The
/// active-note table keeps one entry per note, holding its latest
/// activation tick; re-activating a note that is already on overwrites
/// the entry rather than stacking a second one.
pub fn build_timeline(
    merged: &[MergedMessage],
    tempo: &TempoInfo,
    policy: ReleasePolicy,
) -> Vec<ActuationEvent> {
    let mut events = Vec::new();
    let mut active: HashMap<u8, u64> = HashMap::new();

    for message in merged {
        match message.kind {
            MessageKind::NoteOn { note, velocity } if velocity > 0 => {
                if let Some(since) = active.insert(note, message.abs_tick) {
                    debug!(
                        "Note {} re-activated while already on since tick {}.",
                        note, since
                    );
                }

                events.push(ActuationEvent {
                    time_ms: ticks_to_ms(message.abs_tick, tempo),
                    note,
                    velocity,
                    kind: ActuationKind::Activate,
                });
            }
            MessageKind::NoteOn { note, .. } | MessageKind::NoteOff { note, .. } => {
                if active.remove(&note).is_none() {
                    match policy {
                        ReleasePolicy::EmitUnmatched => {
                            debug!("Releasing note {} with no activation on record.", note);
                        }
                        ReleasePolicy::SuppressUnmatched => {
                            warn!("Dropping release of note {}; it was never activated..!", note);
                            continue;
                        }
                    }
                }

                events.push(ActuationEvent {
                    time_ms: ticks_to_ms(message.abs_tick, tempo),
                    note,
                    velocity: 0,
                    kind: ActuationKind::Deactivate,
                });
            }
            MessageKind::SetTempo { .. } | MessageKind::Other => {}
        }
    }

    if !active.is_empty() {
        debug!("{} note(s) still active at end of song.", active.len());
    }

    // Merged order is already tick-sorted; the stable sort keeps that
    // order within groups that truncate to the same millisecond.
    events.sort_by_key(|event| event.time_ms);

    debug!("Built timeline of {} actuation events.", events.len());
    events
}
