use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use midi_to_solenoid::{
    ActuationKind, Args, ChannelMap, convert_midi_file, parse_release_policy,
};
use std::fs;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let policy = parse_release_policy(&args.release_policy);

    let channels: ChannelMap = match &args.channel_map {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read channel map '{}'", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse channel map '{}'", path.display()))?
        }
        None => ChannelMap::new(),
    };

    info!("Converting MIDI file: '{}'...", args.midi.display());
    let result = convert_midi_file(&args.midi, policy, channels)?;

    debug!(
        "Converted {} actuation events at {}µs per beat..!",
        result.events.len(),
        result.tempo_us_per_beat
    );

    if args.dry_run {
        info!("Previewing at most {} events..!", args.dry_run_max);
        for (i, ev) in result.events.iter().enumerate() {
            if i >= args.dry_run_max {
                break;
            }
            let kind = match ev.kind {
                ActuationKind::Activate => "on",
                ActuationKind::Deactivate => "off",
            };

            info!(
                "Event {}: time_ms={} note={} velocity={} type={}",
                i, ev.time_ms, ev.note, ev.velocity, kind
            );
        }
        return Ok(());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write schedule to '{}'", path.display()))?;
            info!(
                "Wrote {} events to '{}'..!",
                result.events.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
