//! UI rendering components

pub mod flashcards;
pub mod quiz;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Loading spinner frames
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg_primary)),
        area,
    );

    match state.screen {
        Screen::Loading => draw_loading(frame, area, state, theme),
        Screen::Error => draw_error(frame, area, state, theme),
        Screen::Quiz => quiz::draw(frame, area, state, theme),
        Screen::Flashcards => flashcards::draw(frame, area, state, theme),
    }
}

/// Draw the loading screen with a spinner
fn draw_loading(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let spinner = SPINNER[state.spinner_frame % SPINNER.len()];

    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(theme.accent_primary)),
            Span::styled(
                format!(" Reading {}...", state.image_name),
                Style::default().fg(theme.fg_primary),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Transcribing the page and generating your study material.",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(Span::styled("[q] Cancel", Style::default().fg(theme.fg_muted))),
    ];

    let para = Paragraph::new(text).alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(para, centered_rect(70, 50, area));
}

/// Draw the error screen
fn draw_error(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let message = state.error.as_deref().unwrap_or("Something went wrong.");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Generation failed",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.fg_secondary))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[q] Quit, then run snapquiz play again to retry",
            Style::default().fg(theme.fg_muted),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.bg_secondary));

    let overlay = centered_rect(70, 50, area);
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let para = Paragraph::new(text)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

/// Create a centered rectangle with the given percentage of width and height
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Progress line shared by the quiz and flashcard screens
pub(crate) fn progress_line(current: usize, total: usize, theme: &Theme) -> Line<'static> {
    let filled = if total == 0 { 0 } else { (current + 1) * 20 / total };
    let bar: String =
        (0..20).map(|i| if i < filled { '█' } else { '░' }).collect();

    Line::from(vec![
        Span::styled(format!("{}", current + 1), Style::default().fg(theme.accent_primary)),
        Span::styled(format!(" / {}  ", total), Style::default().fg(theme.fg_muted)),
        Span::styled(bar, Style::default().fg(theme.accent_primary)),
    ])
}
