use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the conversion pipeline.
///
/// Only locating the input and decoding the container can fail. Merging,
/// tempo resolution and timeline building are total over any decoded
/// document, no matter how pathological its musical content is.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be located or read.
    #[error("MIDI file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a valid Standard MIDI File container: bad magic,
    /// truncated chunk, or an unsupported division format.
    #[error("malformed MIDI file: {0}")]
    MalformedFile(String),
}

impl From<midly::Error> for ConvertError {
    fn from(err: midly::Error) -> Self {
        ConvertError::MalformedFile(err.to_string())
    }
}
