use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::capability::{AudioOutput, InfoDisplay, ToggleIcon};
use super::clock::{AutoAdvance, Clock, SystemClock};
use super::sequence::{Direction, pick_index};

/// Default elapsed time past which "previous" restarts the current track.
pub const DEFAULT_RESTART_THRESHOLD: Duration = Duration::from_secs(5);

/// Observable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub is_shuffle: bool,
    pub pending_auto_advance: Option<AutoAdvance>,
}

/// Sequences a fixed track list onto an [`AudioOutput`].
///
/// All operations are synchronous. The only deferred work is the
/// auto-advance deadline, which the host fires by calling [`tick`](Self::tick).
pub struct PlaybackController<O, C = SystemClock> {
    tracks: Vec<Track>,
    output: O,
    clock: C,
    rng: StdRng,
    restart_threshold: Duration,
    state: PlaybackState,
    track_info: Option<Box<dyn InfoDisplay>>,
    play_pause_icon: Option<Box<dyn ToggleIcon>>,
    shuffle_icon: Option<Box<dyn ToggleIcon>>,
}

impl<O: AudioOutput> PlaybackController<O, SystemClock> {
    pub fn builder(tracks: Vec<Track>) -> ControllerBuilder<O, SystemClock> {
        ControllerBuilder::new(tracks)
    }
}

impl<O: AudioOutput, C: Clock> PlaybackController<O, C> {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_shuffle(&self) -> bool {
        self.state.is_shuffle
    }

    pub fn restart_threshold(&self) -> Duration {
        self.restart_threshold
    }

    /// Elapsed position of the loaded track.
    pub fn elapsed(&self) -> Duration {
        self.output.elapsed()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Pause when playing, otherwise play the current track (picking the
    /// first one via the next-track rule if none is selected yet).
    ///
    /// Returns the resulting playing flag.
    pub fn toggle_play_pause(&mut self) -> Result<bool> {
        if self.state.is_playing {
            self.pause();
        } else {
            let index = match self.state.current_index {
                Some(i) => i,
                None => {
                    let i = self.pick(Direction::Next)?;
                    self.state.current_index = Some(i);
                    i
                }
            };
            self.play_track(index)?;
        }
        Ok(self.state.is_playing)
    }

    /// Move to the next track; keeps playing if playback was running.
    pub fn next(&mut self) -> Result<usize> {
        self.advance(Direction::Next)
    }

    /// Restart the current track when it has played past the restart
    /// threshold, otherwise move to the previous one.
    ///
    /// A restart always starts playback, even from pause.
    pub fn previous(&mut self) -> Result<usize> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        if let Some(index) = self.state.current_index {
            if self.played_enough_to_restart() {
                debug!(index, elapsed = ?self.output.elapsed(), "restarting current track");
                self.output.stop();
                self.play_track(index)?;
                return Ok(index);
            }
        }
        self.advance(Direction::Previous)
    }

    /// Flip shuffle mode. Returns the new flag.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.state.is_shuffle = !self.state.is_shuffle;
        if let Some(icon) = self.shuffle_icon.as_mut() {
            icon.toggle();
        }
        debug!(shuffle = self.state.is_shuffle, "shuffle toggled");
        self.state.is_shuffle
    }

    /// Fire the pending auto-advance if it is due. Returns whether it fired.
    pub fn tick(&mut self) -> Result<bool> {
        let now = self.clock.now();
        match self.state.pending_auto_advance {
            Some(pending) if pending.is_due(now) => {
                self.state.pending_auto_advance = None;
                debug!("track finished, advancing");
                self.advance(Direction::Next)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn played_enough_to_restart(&self) -> bool {
        self.output.elapsed() > self.restart_threshold
    }

    fn pick(&mut self, direction: Direction) -> Result<usize> {
        pick_index(
            self.state.current_index,
            self.tracks.len(),
            self.state.is_shuffle,
            direction,
            &mut self.rng,
        )
        .ok_or(PlayerError::EmptyPlaylist)
    }

    fn advance(&mut self, direction: Direction) -> Result<usize> {
        let index = self.pick(direction)?;
        self.state.current_index = Some(index);
        if self.state.is_playing {
            self.play_track(index)?;
        }
        Ok(index)
    }

    fn play_track(&mut self, index: usize) -> Result<()> {
        let track = &self.tracks[index];
        let started = if self.output.loaded_track() != Some(track) {
            self.output.stop();
            self.output.load_and_play(track)
        } else {
            self.output.play()
        };

        if let Err(e) = started {
            warn!(index, path = %track.path.display(), error = %e, "playback failed");
            self.set_playing(false);
            self.cancel_auto_advance();
            return Err(e.into());
        }

        // Duplicated clips report their first position.
        let position = self.tracks.iter().position(|t| t == track).unwrap_or(0);
        let text = format!("{position}. {}", track.name);
        let duration = track.duration;
        info!(index, track = %text, "playing");

        self.set_playing(true);
        if let Some(display) = self.track_info.as_mut() {
            display.set_text(&text);
        }
        self.schedule_auto_advance(duration);
        Ok(())
    }

    fn pause(&mut self) {
        self.output.pause();
        self.set_playing(false);
        self.cancel_auto_advance();
        debug!(elapsed = ?self.output.elapsed(), "paused");
    }

    fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
        if let Some(icon) = self.play_pause_icon.as_mut() {
            icon.set_state(playing);
        }
    }

    fn cancel_auto_advance(&mut self) {
        self.state.pending_auto_advance = None;
    }

    fn schedule_auto_advance(&mut self, duration: Option<Duration>) {
        self.cancel_auto_advance();
        let Some(total) = duration else {
            debug!("track duration unknown, no auto-advance");
            return;
        };
        let delay = total.saturating_sub(self.output.elapsed());
        self.state.pending_auto_advance = Some(AutoAdvance::new(self.clock.now(), delay));
    }
}

/// Builds a [`PlaybackController`]. An audio output is required.
pub struct ControllerBuilder<O, C = SystemClock> {
    tracks: Vec<Track>,
    output: Option<O>,
    clock: C,
    restart_threshold: Duration,
    shuffle: bool,
    seed: Option<u64>,
    track_info: Option<Box<dyn InfoDisplay>>,
    play_pause_icon: Option<Box<dyn ToggleIcon>>,
    shuffle_icon: Option<Box<dyn ToggleIcon>>,
}

impl<O: AudioOutput> ControllerBuilder<O, SystemClock> {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            output: None,
            clock: SystemClock,
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
            shuffle: false,
            seed: None,
            track_info: None,
            play_pause_icon: None,
            shuffle_icon: None,
        }
    }
}

impl<O: AudioOutput, C: Clock> ControllerBuilder<O, C> {
    pub fn output(mut self, output: O) -> Self {
        self.output = Some(output);
        self
    }

    pub fn clock<C2: Clock>(self, clock: C2) -> ControllerBuilder<O, C2> {
        ControllerBuilder {
            tracks: self.tracks,
            output: self.output,
            clock,
            restart_threshold: self.restart_threshold,
            shuffle: self.shuffle,
            seed: self.seed,
            track_info: self.track_info,
            play_pause_icon: self.play_pause_icon,
            shuffle_icon: self.shuffle_icon,
        }
    }

    pub fn restart_threshold(mut self, threshold: Duration) -> Self {
        self.restart_threshold = threshold;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Fix the shuffle RNG seed.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn track_info(mut self, display: impl InfoDisplay + 'static) -> Self {
        self.track_info = Some(Box::new(display));
        self
    }

    pub fn play_pause_icon(mut self, icon: impl ToggleIcon + 'static) -> Self {
        self.play_pause_icon = Some(Box::new(icon));
        self
    }

    pub fn shuffle_icon(mut self, icon: impl ToggleIcon + 'static) -> Self {
        self.shuffle_icon = Some(Box::new(icon));
        self
    }

    pub fn build(self) -> Result<PlaybackController<O, C>> {
        let output = self.output.ok_or(PlayerError::NoOutputBound)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(PlaybackController {
            tracks: self.tracks,
            output,
            clock: self.clock,
            rng,
            restart_threshold: self.restart_threshold,
            state: PlaybackState {
                is_shuffle: self.shuffle,
                ..PlaybackState::default()
            },
            track_info: self.track_info,
            play_pause_icon: self.play_pause_icon,
            shuffle_icon: self.shuffle_icon,
        })
    }
}
