use crate::loader::{MessageKind, MidiDocument};
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A decoded message annotated with its position in ticks since the start
/// of the song, across all tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedMessage {
    pub abs_tick: u64,
    pub track_index: usize,
    pub kind: MessageKind,
}

// Heap entries compare by (abs_tick, track_index, seq); the derive goes
// field by field, and those three are unique per entry, so `kind` never
// decides an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    abs_tick: u64,
    track_index: usize,
    seq: usize,
    kind: MessageKind,
}

/// Merge all tracks into one stream ordered by absolute tick, with ties
/// broken by track index and then in-track order. Every input message
/// appears in the output exactly once.
pub fn merge_tracks(document: &MidiDocument) -> Vec<MergedMessage> {
    let total: usize = document.tracks.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);

    // One cursor per track; absolute ticks accumulate over that track's
    // own deltas only.
    let mut cursors: Vec<_> = document
        .tracks
        .iter()
        .map(|track| track.iter().enumerate())
        .collect();
    let mut track_ticks = vec![0u64; document.tracks.len()];

    let mut heap: BinaryHeap<Reverse<Pending>> = BinaryHeap::with_capacity(cursors.len());
    for (track_index, cursor) in cursors.iter_mut().enumerate() {
        if let Some((seq, message)) = cursor.next() {
            track_ticks[track_index] += u64::from(message.delta_ticks);
            heap.push(Reverse(Pending {
                abs_tick: track_ticks[track_index],
                track_index,
                seq,
                kind: message.kind,
            }));
        }
    }

    while let Some(Reverse(head)) = heap.pop() {
        merged.push(MergedMessage {
            abs_tick: head.abs_tick,
            track_index: head.track_index,
            kind: head.kind,
        });

        if let Some((seq, message)) = cursors[head.track_index].next() {
            track_ticks[head.track_index] += u64::from(message.delta_ticks);
            heap.push(Reverse(Pending {
                abs_tick: track_ticks[head.track_index],
                track_index: head.track_index,
                seq,
                kind: message.kind,
            }));
        }
    }

    debug!(
        "Merged {} messages from {} tracks",
        merged.len(),
        document.tracks.len()
    );

    merged
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loader::RawMidiMessage;

    fn on(delta_ticks: u32, note: u8) -> RawMidiMessage {
        RawMidiMessage {
            delta_ticks,
            kind: MessageKind::NoteOn { note, velocity: 100 },
        }
    }

    fn off(delta_ticks: u32, note: u8) -> RawMidiMessage {
        RawMidiMessage {
            delta_ticks,
            kind: MessageKind::NoteOff { note, velocity: 0 },
        }
    }

    fn document(ticks_per_beat: u16, tracks: Vec<Vec<RawMidiMessage>>) -> MidiDocument {
        MidiDocument {
            ticks_per_beat,
            tracks,
        }
    }

    #[test]
    fn accumulates_deltas_per_track() {
        env_logger::try_init().unwrap_or(());

        let doc = document(480, vec![vec![on(0, 60), off(480, 60), on(480, 62)]]);
        let merged = merge_tracks(&doc);

        let ticks: Vec<u64> = merged.iter().map(|m| m.abs_tick).collect();
        assert_eq!(ticks, vec![0, 480, 960]);
    }

    #[test]
    fn preserves_message_count() {
        env_logger::try_init().unwrap_or(());

        let doc = document(
            480,
            vec![
                vec![on(0, 60), off(10, 60), on(5, 61)],
                vec![],
                vec![on(3, 70), off(900, 70)],
            ],
        );
        let merged = merge_tracks(&doc);
        assert_eq!(merged.len(), 5);
    }

    #[test]
    fn interleaves_tracks_by_absolute_tick() {
        env_logger::try_init().unwrap_or(());

        let doc = document(
            480,
            vec![
                vec![on(0, 60), off(960, 60)],
                vec![on(480, 64)],
            ],
        );
        let merged = merge_tracks(&doc);

        let positions: Vec<(u64, usize)> =
            merged.iter().map(|m| (m.abs_tick, m.track_index)).collect();
        assert_eq!(positions, vec![(0, 0), (480, 1), (960, 0)]);
    }

    #[test]
    fn breaks_tick_ties_by_track_index() {
        env_logger::try_init().unwrap_or(());

        // Both notes land on tick 0; track order must decide.
        let doc = document(480, vec![vec![on(0, 72)], vec![on(0, 48)]]);
        let merged = merge_tracks(&doc);

        assert_eq!(merged[0].track_index, 0);
        assert_eq!(merged[0].kind, MessageKind::NoteOn { note: 72, velocity: 100 });
        assert_eq!(merged[1].track_index, 1);
        assert_eq!(merged[1].kind, MessageKind::NoteOn { note: 48, velocity: 100 });
        assert!(merged.iter().all(|m| m.abs_tick == 0));
    }

    #[test]
    fn keeps_in_track_order_for_zero_delta_runs() {
        env_logger::try_init().unwrap_or(());

        let doc = document(480, vec![vec![on(0, 60), on(0, 61), on(0, 62), off(0, 60)]]);
        let merged = merge_tracks(&doc);

        let kinds: Vec<MessageKind> = merged.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::NoteOn { note: 60, velocity: 100 },
                MessageKind::NoteOn { note: 61, velocity: 100 },
                MessageKind::NoteOn { note: 62, velocity: 100 },
                MessageKind::NoteOff { note: 60, velocity: 0 },
            ]
        );
    }

    #[test]
    fn empty_document_merges_to_nothing() {
        env_logger::try_init().unwrap_or(());

        let doc = document(480, Vec::new());
        assert!(merge_tracks(&doc).is_empty());
    }
}
