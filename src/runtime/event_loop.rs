use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::{App, Button, HitAreas};
use crate::audio::AudioOutput;
use crate::error::PlayerError;
use crate::player::{PlaybackController, ProgressUpdate, format_progress};
use crate::ui;

/// A user action, decoded from a key press or mouse click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Select(usize),
    Next,
    Prev,
    Play,
    Stop,
    Reset,
    ToggleLoop,
    /// Seek to a fraction of the track length.
    Seek(f64),
    Dismiss,
    Quit,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Play => Command::Play,
            Button::Stop => Command::Stop,
            Button::Reset => Command::Reset,
            Button::Loop => Command::ToggleLoop,
        }
    }
}

pub fn command_for_key(key: KeyEvent, app: &App) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    if app.has_dialog() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Command::Dismiss),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Next),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Prev),
        KeyCode::Enter | KeyCode::Char('p') => Some(Command::Play),
        KeyCode::Char('s') => Some(Command::Stop),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('l') => Some(Command::ToggleLoop),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let tenth = c.to_digit(10).unwrap_or(0);
            Some(Command::Seek(f64::from(tenth) / 10.0))
        }
        _ => None,
    }
}

pub fn command_for_mouse(mouse: MouseEvent, app: &App) -> Option<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    if app.has_dialog() {
        return Some(Command::Dismiss);
    }

    let (col, row) = (mouse.column, mouse.row);
    if let Some(button) = app.hit.button_at(col, row) {
        return Some(button.into());
    }
    if let Some(idx) = app.hit.list_index_at(col, row, app.tracks.len()) {
        return Some(Command::Select(idx));
    }
    app.hit.seek_fraction_at(col, row).map(Command::Seek)
}

fn clear_progress(app: &mut App) {
    app.time_label = format_progress(Duration::ZERO, Duration::ZERO);
    app.progress = 0;
    app.playing = false;
    app.now_playing = None;
}

/// Run one command against the controller and reflect the outcome in `app`.
///
/// Returns `true` when the player should quit.
pub fn handle_command<O: AudioOutput>(
    cmd: Command,
    controller: &mut PlaybackController<O>,
    app: &mut App,
) -> bool {
    debug!(?cmd, "command");
    match cmd {
        Command::Quit => return true,
        Command::Dismiss => app.dismiss_dialog(),
        Command::Select(idx) => app.select(idx),
        Command::Next => app.next(),
        Command::Prev => app.prev(),
        Command::Play => {
            let name = app.selected_track().map(|t| t.name.clone());
            match controller.play(app.selected_track()) {
                Ok(()) => {
                    app.now_playing = name;
                    app.playing = true;
                }
                Err(PlayerError::NoSelection) => app.show_dialog("Select a song first!"),
                Err(e) => {
                    // The previous track was released before the failed open.
                    if !controller.is_open() {
                        clear_progress(app);
                    }
                    let shown = match (&e, name) {
                        (PlayerError::UnplayableFormat { .. }, Some(name)) => name,
                        _ => e.to_string(),
                    };
                    app.show_dialog(format!("Error playing file: {shown}"));
                }
            }
        }
        Command::Stop => {
            controller.stop();
            app.playing = false;
        }
        Command::Reset => match controller.reset() {
            Ok(()) => app.playing = controller.is_open(),
            Err(e) => {
                warn!(error = %e, "reset failed");
                app.show_dialog(format!("Cannot restart: {e}"));
            }
        },
        Command::ToggleLoop => {
            app.looping = controller.toggle_loop();
            if controller.is_open() {
                app.show_dialog(if app.looping {
                    "Looping enabled!"
                } else {
                    "Looping disabled!"
                });
            }
        }
        Command::Seek(fraction) => {
            if let Err(e) = controller.seek(fraction) {
                app.show_dialog(format!("Cannot seek: {e}"));
            }
        }
    }
    false
}

/// Apply a sampler reading on the UI thread and react to the end of the track.
pub fn apply_update<O: AudioOutput>(
    update: &ProgressUpdate,
    controller: &mut PlaybackController<O>,
    app: &mut App,
) {
    if !app.apply_progress(update, controller.session()) || !update.finished {
        return;
    }
    if let Err(e) = controller.on_track_end() {
        warn!(error = %e, "could not loop track");
        app.show_dialog(format!("Cannot loop: {e}"));
        controller.stop();
    }
    // The timer runs exactly while a track is playing.
    app.playing = controller.is_sampling();
}

/// Main terminal event loop: drains progress readings, draws, and dispatches
/// input. Returns `Ok(())` when the user quits.
pub fn run<O: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    controller: &mut PlaybackController<O>,
    app: &mut App,
    updates: &Receiver<ProgressUpdate>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(update) = updates.try_recv() {
            apply_update(&update, controller, app);
        }

        let mut hit = HitAreas::default();
        terminal.draw(|f| hit = ui::draw(f, app))?;
        app.hit = hit;

        if event::poll(Duration::from_millis(50))? {
            let cmd = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => command_for_key(key, app),
                Event::Mouse(mouse) => command_for_mouse(mouse, app),
                _ => None,
            };
            if let Some(cmd) = cmd {
                if handle_command(cmd, controller, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}
