//! Terminal host: wires settings, library, audio output and the controller
//! together and runs the event loop.

use std::env;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::RodioOutput;
use crate::config::{Settings, resolve_config_path};
use crate::library::scan;
use crate::player::{PlaybackController, TrackInfoHandle};
use crate::toggle::ToggleButton;
use crate::ui::Widgets;

mod event_loop;
mod logging;

/// Run `undo` when `result` is an error, then pass the result through.
fn undo_on_err<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = Settings::load_or_default();
    if let Some(msg) = &problem {
        eprintln!("playdeck: {msg}, using defaults");
    }
    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("playdeck: logging disabled: {e}");
    }
    if let Some(msg) = problem {
        warn!(problem = %msg, "using default settings");
    }
    info!(config = ?resolve_config_path(), "settings loaded");

    let dir = env::args().nth(1).unwrap_or_else(|| {
        env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let tracks = scan(Path::new(&dir), &settings.library);
    let output = RodioOutput::open()?;

    let widgets = Widgets {
        track_info: TrackInfoHandle::new(Mutex::new(String::new())),
        play_pause: ToggleButton::new(&settings.ui.pause_icon, &settings.ui.play_icon, false)
            .into_handle(),
        shuffle: ToggleButton::new(
            &settings.ui.shuffle_on_icon,
            &settings.ui.shuffle_off_icon,
            settings.player.shuffle,
        )
        .into_handle(),
    };

    let mut player = PlaybackController::<RodioOutput>::builder(tracks)
        .output(output)
        .restart_threshold(settings.player.restart_threshold())
        .shuffle(settings.player.shuffle)
        .seed(settings.player.seed)
        .track_info(Arc::clone(&widgets.track_info))
        .play_pause_icon(Arc::clone(&widgets.play_pause))
        .shuffle_icon(Arc::clone(&widgets.shuffle))
        .build()?;

    enable_raw_mode()?;
    let mut terminal = undo_on_err(enter_terminal(), || {
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut player,
        &widgets,
        &mut event_loop::EventLoopState::default(),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    run_result
}
