use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::audio::RodioOutput;
use crate::config;
use crate::error::PlayerError;
use crate::player::{AudioOutput, Clock, PlaybackController};
use crate::ui::{self, Widgets};

/// State carried across loop iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Last error shown in the status box; cleared by the next successful action.
    pub status: Option<String>,
}

/// What a key press asks the player to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    PlayPause,
    Next,
    Previous,
    Shuffle,
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::Quit);
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::PlayPause),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Some(Action::Next),
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => Some(Action::Previous),
        KeyCode::Char('s') => Some(Action::Shuffle),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Apply a non-quit action to the controller.
pub fn apply<O: AudioOutput, C: Clock>(
    action: Action,
    player: &mut PlaybackController<O, C>,
) -> Result<(), PlayerError> {
    match action {
        Action::PlayPause => player.toggle_play_pause().map(|_| ()),
        Action::Next => player.next().map(|_| ()),
        Action::Previous => player.previous().map(|_| ()),
        Action::Shuffle => {
            player.toggle_shuffle();
            Ok(())
        }
        Action::Quit => Ok(()),
    }
}

fn record(result: Result<(), PlayerError>, state: &mut EventLoopState) {
    match result {
        Ok(()) => state.status = None,
        Err(e) => {
            warn!(error = %e, "player command failed");
            state.status = Some(e.to_string());
        }
    }
}

/// Main terminal loop: fires auto-advance, draws, handles input.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut PlaybackController<RodioOutput>,
    widgets: &Widgets,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Err(e) = player.tick() {
            record(Err(e), state);
        }

        terminal.draw(|f| ui::draw(f, player, widgets, &settings.ui, state.status.as_deref()))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key) {
            Some(Action::Quit) => {
                player
                    .output_mut()
                    .fade_out(Duration::from_millis(settings.audio.quit_fade_out_ms));
                return Ok(());
            }
            Some(action) => record(apply(action, player), state),
            None => {}
        }
    }
}
