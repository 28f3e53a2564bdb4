use crate::error::ConvertError;
use log::debug;
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

/// One decoded track event, delta-timed within its own track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMidiMessage {
    /// Ticks elapsed since the previous message in the same track.
    pub delta_ticks: u32,
    pub kind: MessageKind,
}

/// The subset of MIDI event kinds the timeline cares about. Everything
/// else decodes to `Other` so its delta ticks still advance the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    SetTempo { us_per_beat: u32 },
    Other,
}

/// A decoded MIDI file: header resolution plus one ordered message list
/// per track, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDocument {
    pub ticks_per_beat: u16,
    pub tracks: Vec<Vec<RawMidiMessage>>,
}

/// Decode raw Standard MIDI File bytes into a [`MidiDocument`].
///
/// Only tick-per-beat (metrical) division is supported; SMPTE timecode
/// division fails with [`ConvertError::MalformedFile`] rather than
/// silently mis-converting.
pub fn load_midi_bytes(bytes: &[u8]) -> Result<MidiDocument, ConvertError> {
    let smf = Smf::parse(bytes)?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(t) => t.as_int(),
        Timing::Timecode(fps, subframe) => {
            return Err(ConvertError::MalformedFile(format!(
                "SMPTE timecode division ({:?} fps, {} subframes) is not supported",
                fps, subframe
            )));
        }
    };

    if ticks_per_beat == 0 {
        return Err(ConvertError::MalformedFile(
            "header declares zero ticks per beat".into(),
        ));
    }

    debug!("Ticks per beat: {}", ticks_per_beat);
    debug!(
        "MIDI format: {:?}, tracks: {}",
        smf.header.format,
        smf.tracks.len()
    );

    let mut tracks = Vec::with_capacity(smf.tracks.len());
    for (track_idx, track) in smf.tracks.iter().enumerate() {
        let mut messages = Vec::with_capacity(track.len());

        for event in track.iter() {
            let kind = match &event.kind {
                TrackEventKind::Midi { message, .. } => match message {
                    MidiMessage::NoteOn { key, vel } => MessageKind::NoteOn {
                        note: key.as_int(),
                        velocity: vel.as_int(),
                    },
                    MidiMessage::NoteOff { key, vel } => MessageKind::NoteOff {
                        note: key.as_int(),
                        velocity: vel.as_int(),
                    },
                    _ => MessageKind::Other,
                },
                TrackEventKind::Meta(MetaMessage::Tempo(us)) => MessageKind::SetTempo {
                    us_per_beat: us.as_int(),
                },
                _ => MessageKind::Other,
            };

            messages.push(RawMidiMessage {
                delta_ticks: event.delta.as_int(),
                kind,
            });
        }

        debug!("Track {}: {} events", track_idx, messages.len());
        tracks.push(messages);
    }

    Ok(MidiDocument {
        ticks_per_beat,
        tracks,
    })
}
