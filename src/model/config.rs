use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "midi_to_solenoid",
    about = "Convert a MIDI file into a time-ordered solenoid actuation schedule!"
)]
pub struct Args {
    /// Path to the target MIDI file.
    pub midi: PathBuf,

    /// Path to a JSON file mapping MIDI note numbers to solenoid channels, e.g. {"60": 0, "62": 1}.
    #[arg(short, long = "channel-map")]
    pub channel_map: Option<PathBuf>,

    /// What to do with a note-off that was never switched on: emit|suppress.
    #[arg(short, long = "release-policy", default_value = "emit")]
    pub release_policy: String,

    /// Write the schedule to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Dry run (print first dry_run_max events and exit).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum events to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,
}
