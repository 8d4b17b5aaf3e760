//! Application model types: `App`, `Button` and `HitAreas`.
//!
//! `App` is everything the renderer shows. Only the UI thread mutates it:
//! progress readings from the sampler thread arrive as messages and are
//! applied here.

use std::time::Duration;

use ratatui::layout::{Position, Rect};

use crate::library::Track;
use crate::player::{ProgressUpdate, format_progress};

/// The four transport buttons, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Play,
    Stop,
    Reset,
    Loop,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Play, Button::Stop, Button::Reset, Button::Loop];

    pub fn label(self, looping: bool) -> &'static str {
        match self {
            Button::Play => "Play",
            Button::Stop => "Stop",
            Button::Reset => "Reset",
            Button::Loop if looping => "Loop: on",
            Button::Loop => "Loop: off",
        }
    }
}

/// Screen regions from the last frame, used to route mouse clicks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitAreas {
    /// Rows of the track list (inside its border).
    pub list: Rect,
    /// Track index shown on the first row of `list`.
    pub list_offset: usize,
    pub progress: Rect,
    pub buttons: Vec<(Button, Rect)>,
}

impl HitAreas {
    pub fn button_at(&self, column: u16, row: u16) -> Option<Button> {
        let pos = Position::new(column, row);
        self.buttons
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(b, _)| *b)
    }

    /// Track index under the cursor; `len` bounds it to real rows.
    pub fn list_index_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        if !self.list.contains(Position::new(column, row)) {
            return None;
        }
        let idx = self.list_offset + usize::from(row - self.list.y);
        (idx < len).then_some(idx)
    }

    /// Fraction of the progress bar left of the click: `(x - bar.x) / bar.width`.
    pub fn seek_fraction_at(&self, column: u16, row: u16) -> Option<f64> {
        if self.progress.width == 0 || !self.progress.contains(Position::new(column, row)) {
            return None;
        }
        Some(f64::from(column - self.progress.x) / f64::from(self.progress.width))
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    /// Nothing is selected until the user picks a row.
    pub selected: Option<usize>,
    pub title: String,
    pub show_help: bool,

    /// `MM:SS / MM:SS`
    pub time_label: String,
    /// 0..=100
    pub progress: u16,
    pub looping: bool,
    pub playing: bool,
    pub now_playing: Option<String>,

    /// Message shown in a modal dialog until dismissed.
    pub dialog: Option<String>,
    pub hit: HitAreas,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>, title: impl Into<String>) -> Self {
        Self {
            tracks,
            selected: None,
            title: title.into(),
            show_help: true,
            time_label: format_progress(Duration::ZERO, Duration::ZERO),
            progress: 0,
            looping: false,
            playing: false,
            now_playing: None,
            dialog: None,
            hit: HitAreas::default(),
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selected.and_then(|i| self.tracks.get(i))
    }

    /// Select the track at `idx`; out-of-range indices are ignored.
    pub fn select(&mut self, idx: usize) {
        if idx < self.tracks.len() {
            self.selected = Some(idx);
        }
    }

    /// Move selection down one row (wrapping). With nothing selected, picks the first row.
    pub fn next(&mut self) {
        if !self.has_tracks() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.tracks.len(),
            None => 0,
        });
    }

    /// Move selection up one row (wrapping). With nothing selected, picks the last row.
    pub fn prev(&mut self) {
        if !self.has_tracks() {
            return;
        }
        let last = self.tracks.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Apply a progress reading if it belongs to `current_session`.
    ///
    /// Returns whether it was applied; readings from a replaced session are dropped.
    pub fn apply_progress(&mut self, update: &ProgressUpdate, current_session: u64) -> bool {
        if update.session != current_session {
            return false;
        }
        self.time_label = update.label.clone();
        self.progress = update.percent;
        true
    }

    pub fn show_dialog(&mut self, message: impl Into<String>) {
        self.dialog = Some(message.into());
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }
}
