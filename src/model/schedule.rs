use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wiring table mapping MIDI note numbers to solenoid channel indices.
/// Ordered, so identical inputs always serialize identically.
pub type ChannelMap = BTreeMap<u8, u8>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationKind {
    #[serde(rename = "on")]
    Activate,
    #[serde(rename = "off")]
    Deactivate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationEvent {
    pub time_ms: u64,
    pub note: u8,
    pub velocity: u8,
    #[serde(rename = "type")]
    pub kind: ActuationKind,
}

/// Everything a driver needs to play the song: the header's tick
/// resolution, the resolved tempo, the actuation schedule, and the
/// wiring table it was converted for.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConversionResult {
    pub ticks_per_beat: u16,
    pub tempo_us_per_beat: u32,
    pub events: Vec<ActuationEvent>,
    pub note_to_channel: ChannelMap,
}
