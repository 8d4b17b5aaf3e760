//! UI rendering helpers for the terminal user interface.
//!
//! `draw` renders the whole window with `ratatui` and reports where the
//! clickable regions ended up so the event loop can route mouse input.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Button, HitAreas};

const HELP: &str = "[j/k] select | [enter/p] play | [s] stop | [r] reset | [l] loop | [0-9] seek | [q] quit";

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// First visible row so that `selected` sits near the middle of `height` rows.
fn list_window_start(total: usize, height: usize, selected: Option<usize>) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    let sel = selected.unwrap_or(0);
    let half = height / 2;
    let start = sel.saturating_sub(half);
    start.min(total - height)
}

fn draw_buttons(frame: &mut Frame, app: &App, area: Rect) -> Vec<(Button, Rect)> {
    let mut constraints: Vec<Constraint> = Button::ALL
        .iter()
        .map(|b| Constraint::Length(b.label(app.looping).chars().count() as u16 + 4))
        .collect();
    constraints.push(Constraint::Min(0));

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(1)
        .split(area);

    Button::ALL
        .iter()
        .zip(cells.iter())
        .map(|(&button, &cell)| {
            let style = if button == Button::Loop && app.looping {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let widget = Paragraph::new(button.label(app.looping))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, cell);
            (button, cell)
        })
        .collect()
}

/// Render the entire UI into `frame` and return the clickable regions.
pub fn draw(frame: &mut Frame, app: &App) -> HitAreas {
    let window = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.title))
        .title_alignment(Alignment::Center);
    let area = frame.area();
    let inner = window.inner(area);
    frame.render_widget(window, area);

    let help_height = if app.show_help { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(help_height),
        ])
        .split(inner);

    // Time label
    let label = Paragraph::new(app.time_label.as_str())
        .alignment(Alignment::Center)
        .bold();
    frame.render_widget(label, chunks[0]);

    // Progress bar
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(app.progress.min(100))
        .label(format!("{}%", app.progress.min(100)));
    frame.render_widget(gauge, chunks[1]);

    // Track list
    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(match &app.now_playing {
            Some(name) if app.playing => format!(" tracks • playing: {name} "),
            Some(name) => format!(" tracks • stopped: {name} "),
            None => " tracks ".to_string(),
        });
    let list_area = list_block.inner(chunks[2]);
    let start = list_window_start(app.tracks.len(), list_area.height as usize, app.selected);
    let end = (start + list_area.height as usize).min(app.tracks.len());

    let items: Vec<ListItem> = app.tracks[start..end]
        .iter()
        .map(|t| ListItem::new(t.name.as_str()))
        .collect();
    let list = List::new(items)
        .block(list_block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if let Some(sel) = app.selected.filter(|&i| i >= start && i < end) {
        state.select(Some(sel - start));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    // Buttons
    let buttons = draw_buttons(frame, app, chunks[3]);

    if app.show_help {
        let help = Paragraph::new(HELP)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .wrap(Wrap { trim: true });
        frame.render_widget(help, chunks[4]);
    }

    // Modal dialog on top of everything
    if let Some(message) = &app.dialog {
        let width = message.chars().count() as u16 + 6;
        let popup_area = centered_rect_sized(width.max(30), 5, area);
        frame.render_widget(Clear, popup_area);
        let dialog = Paragraph::new(format!("{message}\n\n[enter] OK"))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .title(" message "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(dialog, popup_area);
    }

    HitAreas {
        list: list_area,
        list_offset: start,
        progress: chunks[1],
        buttons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Track;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App, width: u16, height: u16) -> (String, HitAreas) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hit = HitAreas::default();
        terminal
            .draw(|f| {
                hit = draw(f, app);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        (text, hit)
    }

    fn app() -> App {
        App::new(
            vec![Track::new("Gotta_Love_Me.wav"), Track::new("Bodies - Kendrick Lamar.wav")],
            "spindle",
        )
    }

    #[test]
    fn list_window_keeps_selection_centered() {
        assert_eq!(list_window_start(5, 10, Some(4)), 0);
        assert_eq!(list_window_start(20, 5, Some(0)), 0);
        assert_eq!(list_window_start(20, 5, Some(10)), 8);
        assert_eq!(list_window_start(20, 5, Some(19)), 15);
        assert_eq!(list_window_start(20, 0, Some(3)), 0);
    }

    #[test]
    fn renders_title_label_tracks_and_buttons() {
        let (text, hit) = render(&app(), 70, 16);
        assert!(text.contains("spindle"));
        assert!(text.contains("00:00 / 00:00"));
        assert!(text.contains("Gotta_Love_Me.wav"));
        assert!(text.contains("Play"));
        assert!(text.contains("Stop"));
        assert!(text.contains("Reset"));
        assert!(text.contains("Loop: off"));

        let buttons: Vec<Button> = hit.buttons.iter().map(|(b, _)| *b).collect();
        assert_eq!(buttons, Button::ALL.to_vec());
        assert_eq!(hit.progress.height, 1);
        assert_eq!(hit.list_offset, 0);
        assert!(hit.list.height > 0);
    }

    #[test]
    fn hit_areas_route_back_to_what_was_drawn() {
        let (_, hit) = render(&app(), 70, 16);

        let (play, area) = hit.buttons[0];
        assert_eq!(hit.button_at(area.x + 1, area.y + 1), Some(play));
        assert_eq!(hit.list_index_at(hit.list.x, hit.list.y + 1, 2), Some(1));
        let mid = hit.progress.x + hit.progress.width / 2;
        let fraction = hit.seek_fraction_at(mid, hit.progress.y).unwrap();
        assert!((fraction - 0.5).abs() < 0.05);
    }

    #[test]
    fn dialog_is_drawn_on_top() {
        let mut app = app();
        app.show_dialog("Select a song first!");
        let (text, _) = render(&app, 70, 16);
        assert!(text.contains("Select a song first!"));
    }
}
