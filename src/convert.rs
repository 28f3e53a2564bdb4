use crate::error::ConvertError;
use crate::loader::load_midi_bytes;
use crate::merge::merge_tracks;
use crate::model::schedule::{ChannelMap, ConversionResult};
use crate::tempo::resolve_tempo;
use crate::timeline::{ReleasePolicy, build_timeline};
use log::info;
use std::fs;
use std::path::Path;

/// Runs the whole pipeline over a file on disk: read, decode, merge the
/// tracks, resolve the tempo, and build the actuation schedule.
pub fn convert_midi_file<P: AsRef<Path>>(
    path: P,
    policy: ReleasePolicy,
    channels: ChannelMap,
) -> Result<ConversionResult, ConvertError> {
    let bytes = fs::read(path.as_ref()).map_err(|e| ConvertError::NotFound {
        path: path.as_ref().to_path_buf(),
        source: e,
    })?;

    convert_midi_bytes(&bytes, policy, channels)
}

/// The same pipeline over bytes already in memory.
pub fn convert_midi_bytes(
    bytes: &[u8],
    policy: ReleasePolicy,
    channels: ChannelMap,
) -> Result<ConversionResult, ConvertError> {
    let document = load_midi_bytes(bytes)?;
    let merged = merge_tracks(&document);
    let tempo = resolve_tempo(document.ticks_per_beat, &merged);
    let events = build_timeline(&merged, &tempo, policy);

    info!(
        "Converted {} MIDI messages into {} actuation events..!",
        merged.len(),
        events.len()
    );

    Ok(ConversionResult {
        ticks_per_beat: tempo.ticks_per_beat,
        tempo_us_per_beat: tempo.tempo_us_per_beat,
        events,
        note_to_channel: channels,
    })
}
