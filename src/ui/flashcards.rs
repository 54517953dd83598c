//! Flashcard screen: one card at a time, front or back

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::theme::Theme;

use super::{centered_rect, progress_line};

/// Draw the flashcard screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(cards) = &state.cards else {
        return;
    };

    let card = cards.current_card();
    let flipped = cards.is_flipped();

    // Back of the card gets the secondary accent, like the web front end
    let accent = if flipped { theme.accent_secondary } else { theme.accent_primary };
    let badge = if flipped { " Answer " } else { " Question " };
    let text = if flipped { card.back.clone() } else { card.front.clone() };

    let block = Block::default()
        .title(badge)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(theme.bg_secondary));

    let overlay = centered_rect(70, 60, area);
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![
        progress_line(cards.current_index(), cards.len(), theme),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            if flipped { "Tap space to flip back ↩" } else { "Tap space to reveal the answer ↩" },
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
    ];

    // Dot indicators, current card widened
    let mut dots = vec![Span::raw(" ")];
    for i in 0..cards.len() {
        let (dot, style) = if i == cards.current_index() {
            ("●●", Style::default().fg(theme.accent_secondary))
        } else {
            ("·", Style::default().fg(theme.fg_muted))
        };
        dots.push(Span::styled(dot, style));
        dots.push(Span::raw(" "));
    }
    lines.push(Line::from(dots));
    lines.push(Line::from(""));

    if cards.on_last_card() {
        lines.push(Line::from(Span::styled(
            format!("🎉 You've reviewed all {} cards!", cards.len()),
            Style::default().fg(theme.fg_secondary),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[r] Start Over    [h] Prev    [q] Quit",
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[h/l] Prev/Next    [Space] Flip    [1-9] Jump    [q] Quit",
            Style::default().fg(theme.fg_muted),
        )));
    }

    let para = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}
