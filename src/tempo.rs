use crate::loader::MessageKind;
use crate::merge::MergedMessage;
use log::{debug, info, warn};

/// 120 beats per minute, the fallback the format prescribes for songs
/// that never state a tempo.
pub const DEFAULT_TEMPO_US_PER_BEAT: u32 = 500_000;

/// Timing parameters for the whole song: the tick resolution from the
/// header, and the single tempo the schedule is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoInfo {
    pub ticks_per_beat: u16,
    pub tempo_us_per_beat: u32,
}

/// Pick the governing tempo for the song: the first set-tempo message in
/// merged order, i.e. the one at the earliest absolute tick, from the
/// lowest-numbered track on ties. Any later tempo changes are ignored,
/// and songs that never state a tempo run at 120 BPM.
pub fn resolve_tempo(ticks_per_beat: u16, merged: &[MergedMessage]) -> TempoInfo {
    for message in merged {
        if let MessageKind::SetTempo { us_per_beat } = message.kind {
            if us_per_beat == 0 {
                warn!(
                    "Ignoring nonsense zero tempo at tick {}..!",
                    message.abs_tick
                );
                continue;
            }

            debug!(
                "Using tempo of {}µs per beat, set at tick {} by track {}.",
                us_per_beat, message.abs_tick, message.track_index
            );
            return TempoInfo {
                ticks_per_beat,
                tempo_us_per_beat: us_per_beat,
            };
        }
    }

    info!("Song does not state a tempo; assuming 120 BPM..!");
    TempoInfo {
        ticks_per_beat,
        tempo_us_per_beat: DEFAULT_TEMPO_US_PER_BEAT,
    }
}
