use crate::ReleasePolicy;
use log::info;

pub fn parse_release_policy(s: &str) -> ReleasePolicy {
    match s.to_lowercase().as_str() {
        "e" | "emit" => ReleasePolicy::EmitUnmatched,
        "s" | "suppress" => ReleasePolicy::SuppressUnmatched,
        other => {
            info!("Unknown release policy '{}', defaulting to `emit`..!", other);
            ReleasePolicy::EmitUnmatched
        }
    }
}

/// Build SMF bytes with metrical (ticks-per-beat) division from per-track
/// `(delta, event)` lists. An end-of-track meta is appended to each track.
#[cfg(test)]
pub fn smf_bytes(
    ticks_per_beat: u16,
    tracks: Vec<Vec<(u32, midly::TrackEventKind<'static>)>>,
) -> Vec<u8> {
    use midly::Timing;
    use midly::num::u15;

    smf_bytes_with_timing(Timing::Metrical(u15::new(ticks_per_beat)), tracks)
}

#[cfg(test)]
pub fn smf_bytes_with_timing(
    timing: midly::Timing,
    tracks: Vec<Vec<(u32, midly::TrackEventKind<'static>)>>,
) -> Vec<u8> {
    use midly::num::u28;
    use midly::{Format, Header, MetaMessage, Smf, TrackEvent, TrackEventKind};

    let mut smf = Smf::new(Header::new(Format::Parallel, timing));

    for events in tracks {
        let mut track = Vec::with_capacity(events.len() + 1);
        for (delta, kind) in events {
            track.push(TrackEvent {
                delta: u28::new(delta),
                kind,
            });
        }
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
    }

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes)
        .expect("in-memory SMF write should not fail..!");
    bytes
}

#[cfg(test)]
pub fn note_on(delta: u32, note: u8, velocity: u8) -> (u32, midly::TrackEventKind<'static>) {
    use midly::num::{u4, u7};
    use midly::{MidiMessage, TrackEventKind};

    (
        delta,
        TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOn {
                key: u7::new(note),
                vel: u7::new(velocity),
            },
        },
    )
}

#[cfg(test)]
pub fn note_off(delta: u32, note: u8) -> (u32, midly::TrackEventKind<'static>) {
    use midly::num::{u4, u7};
    use midly::{MidiMessage, TrackEventKind};

    (
        delta,
        TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOff {
                key: u7::new(note),
                vel: u7::new(0),
            },
        },
    )
}

#[cfg(test)]
pub fn set_tempo(delta: u32, us_per_beat: u32) -> (u32, midly::TrackEventKind<'static>) {
    use midly::num::u24;
    use midly::{MetaMessage, TrackEventKind};

    (delta, TrackEventKind::Meta(MetaMessage::Tempo(u24::new(us_per_beat))))
}

/// A channel event the timeline ignores, for exercising clock advancement.
#[cfg(test)]
pub fn controller(delta: u32, controller: u8, value: u8) -> (u32, midly::TrackEventKind<'static>) {
    use midly::num::{u4, u7};
    use midly::{MidiMessage, TrackEventKind};

    (
        delta,
        TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::Controller {
                controller: u7::new(controller),
                value: u7::new(value),
            },
        },
    )
}
