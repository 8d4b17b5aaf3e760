use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioOutput;
use crate::player::{PlaybackController, ProgressUpdate, Sampler};

mod event_loop;
mod logging;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings::Loaded { settings, fallback } = settings::load_settings();
    let log_file = logging::init(&settings.log);
    if let Some(reason) = fallback {
        warn!(%reason, "running with default settings");
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let tracks = startup::track_list(&args, &settings.library);
    info!(
        tracks = tracks.len(),
        log_file = ?log_file,
        "starting spindle"
    );

    let output = RodioOutput::open_default()?;
    let (updates_tx, updates_rx) = mpsc::channel::<ProgressUpdate>();
    let sampler = Sampler::new(
        Duration::from_millis(settings.playback.sample_interval_ms),
        updates_tx,
    );
    let mut controller = PlaybackController::new(output, settings.playback.looping, sampler);

    let mut app = App::new(tracks, settings.ui.title.clone());
    app.show_help = settings.ui.show_help;
    app.looping = controller.is_looping();
    if !app.has_tracks() {
        app.show_dialog("No audio files found");
    }

    enable_raw_mode()?;
    let run_result = run_in_terminal(&mut controller, &mut app, &updates_rx);

    // Window close: release the open track before tearing the terminal down.
    controller.shutdown();
    info!("shutting down");

    disable_raw_mode()?;
    execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;

    run_result
}

fn run_in_terminal(
    controller: &mut PlaybackController<RodioOutput>,
    app: &mut App,
    updates: &mpsc::Receiver<ProgressUpdate>,
) -> Result<(), Box<dyn std::error::Error>> {
    execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let result = event_loop::run(&mut terminal, controller, app, updates);
    terminal.show_cursor()?;
    result
}
