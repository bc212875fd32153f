//! Track list construction.
//!
//! `scan` walks a directory and turns every audio file it finds into a
//! [`Track`]. The resulting `Vec<Track>` is the player's track list for the
//! whole session.

mod model;
mod name;
mod scan;

pub use model::Track;
pub use scan::scan;
