//! Playback sequencing.
//!
//! [`PlaybackController`] owns the current track pointer, the shuffle and
//! playing flags and the auto-advance deadline. It turns user intents
//! (play/pause, next, previous, shuffle) into commands on an
//! [`AudioOutput`] and keeps the bound icons and track-info display in sync.
//!
//! "Previous" restarts the current track once it has played past the
//! restart threshold (5 s by default) and only steps back before that.

mod capability;
mod clock;
mod controller;
mod sequence;

pub use capability::{AudioOutput, ToggleIcon, TrackInfoHandle};
pub use clock::Clock;
pub use controller::{DEFAULT_RESTART_THRESHOLD, PlaybackController};
