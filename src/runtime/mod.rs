use std::env;
use std::path::Path;
use std::sync::mpsc;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioOutput;
use crate::player::{Command, Player};
use crate::state::{SessionState, StateEvent};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let store = startup::session_store(&settings);

    let mut state = SessionState::new();
    let seeded = startup::restore_or_seed(store.as_ref(), &mut state, Path::new(&dir), &settings);
    if seeded {
        if let Some(store) = store.as_ref() {
            if let Err(e) = store.save_queue(state.queue()) {
                eprintln!("segue: could not persist the scanned queue: {e}");
            }
        }
    }

    let audio = AudioOutput::spawn();
    let playback_handle = audio.playback_handle();
    let mut player = Player::new(state, audio.sender());

    let (control_tx, control_rx) = mpsc::channel::<Command>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    // The session watcher: every current-track change refreshes the media
    // notification and lands in the session store.
    let mpris_events = mpris.clone();
    let store_events = store.clone();
    let autosave = settings.session.autosave;
    player.state_mut().subscribe(move |event| {
        if let StateEvent::CurrentChanged { track } = event {
            mpris_events.set_track_metadata(Some(track));
            if autosave {
                if let Some(s) = store_events.as_ref() {
                    if let Err(e) = s.save_current(track) {
                        eprintln!("segue: could not persist the current track: {e}");
                    }
                }
            }
        }
    });

    mpris_sync::update_mpris(&mpris, &player);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // The space gate stays held until key-up, so ask the terminal to
    // report key releases. Terminals without the protocol ignore this.
    let _ = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    );
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut loop_state = event_loop::EventLoopState::new(&player);
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut player,
        &playback_handle,
        &mpris,
        &control_rx,
        &mut loop_state,
    );

    audio.quit();

    let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
