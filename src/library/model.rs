use std::path::PathBuf;
use std::time::Duration;

/// A playable audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    /// Tag title, or the file stem when the file has none.
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// `None` when the container metadata could not be read.
    pub duration: Option<Duration>,
    /// Name shown in the track-info line and the track list.
    pub name: String,
}

impl Track {
    /// Build a track with no tag metadata besides its name and duration.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, duration: Option<Duration>) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            title: name.clone(),
            artist: None,
            album: None,
            duration,
            name,
        }
    }
}
