//! Capabilities the controller drives but does not implement.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::OutputError;
use crate::library::Track;

/// Something that can play one track at a time.
///
/// Position semantics: `pause` keeps the position, `stop` rewinds to zero
/// while keeping the loaded track, so a later `play` starts it over.
pub trait AudioOutput {
    fn stop(&mut self);
    /// Replace whatever is loaded with `track` and start it from zero.
    fn load_and_play(&mut self, track: &Track) -> Result<(), OutputError>;
    /// Resume (or restart after `stop`) the loaded track.
    fn play(&mut self) -> Result<(), OutputError>;
    fn pause(&mut self);
    /// Elapsed position within the loaded track.
    fn elapsed(&self) -> Duration;
    fn loaded_track(&self) -> Option<&Track>;
}

/// A two-state visual marker.
pub trait ToggleIcon {
    fn set_state(&mut self, primary: bool);
    fn toggle(&mut self);
}

/// Receives the track-info line.
pub trait InfoDisplay {
    fn set_text(&mut self, text: &str);
}

/// Shared track-info text; the controller writes it, the UI reads it.
pub type TrackInfoHandle = Arc<Mutex<String>>;

impl InfoDisplay for TrackInfoHandle {
    fn set_text(&mut self, text: &str) {
        if let Ok(mut s) = self.lock() {
            s.clear();
            s.push_str(text);
        }
    }
}
