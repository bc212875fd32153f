//! Opening and decoding a `Track` into a `rodio` sink.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::OutputError;
use crate::library::Track;

/// Create a paused `Sink` holding `track` from its start.
pub(super) fn create_paused_sink(stream: &OutputStream, track: &Track) -> Result<Sink, OutputError> {
    let file = File::open(&track.path).map_err(|source| OutputError::Open {
        path: track.path.clone(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| OutputError::Decode {
        path: track.path.clone(),
        source,
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
