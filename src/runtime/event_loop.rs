use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{self, PlaybackHandle};
use crate::config;
use crate::controls::ShortcutDispatcher;
use crate::mpris::MprisHandle;
use crate::player::{Command, PlaybackState, Player};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Filter input: while open, printable keys edit the query and the
    /// queue view narrows to matching tracks.
    pub filter_open: bool,
    pub filter_query: String,
    /// Last playback state pushed to MPRIS.
    last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `player`.
    pub fn new(player: &Player) -> Self {
        Self {
            filter_open: false,
            filter_query: String::new(),
            last_mpris_playback: player.playback(),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player,
    playback_handle: &PlaybackHandle,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<Command>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dispatcher =
        ShortcutDispatcher::new(Duration::from_millis(settings.controls.debounce_ms));

    loop {
        // Auto-advance when the audio thread reports end of track.
        if audio::take_finished(playback_handle) {
            player.on_track_finished();
        }

        let elapsed = playback_handle
            .lock()
            .map(|info| info.elapsed)
            .unwrap_or_default();

        // Keep MPRIS in sync even when playback changes come from media
        // keys or auto-advance.
        if player.playback() != state.last_mpris_playback {
            update_mpris(mpris, player);
            state.last_mpris_playback = player.playback();
        }

        let filter = ui::FilterView {
            active: state.filter_open,
            query: &state.filter_query,
        };
        terminal.draw(|f| ui::draw(f, player, elapsed, &filter, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if player.apply(cmd) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if handle_key_event(key, player, &mut dispatcher, state) {
                            break;
                        }
                    }
                    KeyEventKind::Release => dispatcher.key_up(key.code),
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the application should quit.
fn handle_key_event(
    key: KeyEvent,
    player: &mut Player,
    dispatcher: &mut ShortcutDispatcher,
    state: &mut EventLoopState,
) -> bool {
    // Playback shortcuts run through the debouncing dispatcher first;
    // skips stay live while the filter is open, pause does not.
    if let Some(cmd) = dispatcher.key_down(key.code, state.filter_open, Instant::now()) {
        return player.apply(cmd);
    }

    if state.filter_open {
        match key.code {
            KeyCode::Esc => {
                state.filter_open = false;
                state.filter_query.clear();
            }
            KeyCode::Enter => {
                state.filter_open = false;
            }
            KeyCode::Backspace => {
                state.filter_query.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    state.filter_query.push(c);
                }
            }
            _ => {}
        }

        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => {
            state.filter_open = true;
        }
        KeyCode::Esc => {
            state.filter_query.clear();
        }
        _ => {}
    }

    false
}
