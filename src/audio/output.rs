use std::thread;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::OutputError;
use crate::library::Track;
use crate::player::AudioOutput;

use super::position::Position;
use super::sink::create_paused_sink;

const FADE_STEPS: u32 = 20;

/// Plays tracks on the default output device.
///
/// Must stay on the thread that opened it; the stream handle is not `Send`
/// on every platform.
pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<Track>,
    position: Position,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn open() -> Result<Self, OutputError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| OutputError::Device(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            position: Position::default(),
        })
    }

    /// Ramp the volume down over `over`, then stop.
    pub fn fade_out(&mut self, over: Duration) {
        let Some(sink) = self.sink.take() else {
            return;
        };
        if !over.is_zero() && !sink.is_paused() {
            let step = (over / FADE_STEPS).max(Duration::from_millis(1));
            for i in 1..=FADE_STEPS {
                sink.set_volume(1.0 - i as f32 / FADE_STEPS as f32);
                thread::sleep(step);
            }
        }
        sink.stop();
        self.position.pause(Instant::now());
    }
}

impl AudioOutput for RodioOutput {
    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.position.reset();
    }

    fn load_and_play(&mut self, track: &Track) -> Result<(), OutputError> {
        let sink = match create_paused_sink(&self.stream, track) {
            Ok(s) => s,
            Err(e) => {
                self.loaded = None;
                return Err(e);
            }
        };
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.loaded = Some(track.clone());
        self.position.reset();
        debug!(path = %track.path.display(), "loaded");
        self.play()
    }

    fn play(&mut self) -> Result<(), OutputError> {
        if self.sink.is_none() {
            // Stopped: rebuild from the start of the loaded track.
            let track = self.loaded.as_ref().ok_or(OutputError::NothingLoaded)?;
            self.sink = Some(create_paused_sink(&self.stream, track)?);
            self.position.reset();
        }
        if let Some(s) = &self.sink {
            s.play();
        }
        self.position.start(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
        self.position.pause(Instant::now());
    }

    fn elapsed(&self) -> Duration {
        self.position.elapsed(Instant::now())
    }

    fn loaded_track(&self) -> Option<&Track> {
        self.loaded.as_ref()
    }
}
