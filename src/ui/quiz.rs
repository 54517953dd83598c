//! Quiz screen: question view and results view

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::quiz::QuizSession;
use crate::theme::Theme;

use super::{centered_rect, progress_line};

/// Draw the quiz screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(quiz) = &state.quiz else {
        return;
    };

    let title = if quiz.is_finished() { " Quiz Results " } else { " Quiz " };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let overlay = centered_rect(80, 85, area);
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    if quiz.is_finished() {
        draw_results(frame, inner, quiz, theme);
    } else {
        draw_question(frame, inner, quiz, theme);
    }
}

/// Draw the current question with its options and selection cursor
fn draw_question(frame: &mut Frame, area: Rect, quiz: &QuizSession, theme: &Theme) {
    let question = quiz.current_question();
    let chosen = quiz.chosen();
    let correct = question.correct_letter();

    let mut lines = vec![
        progress_line(quiz.current_index(), quiz.len(), theme),
        Line::from(""),
        Line::from(Span::styled(
            format!("Question {} of {}", quiz.current_index() + 1, quiz.len()),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            question.question.clone(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, _) in question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        let is_cursor = i == quiz.selected_option();
        let prefix = if is_cursor { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○

        // After answering, color the correct option and a wrong pick
        let style = match chosen {
            Some(_) if letter == correct => Style::default().fg(theme.success),
            Some(picked) if letter == picked => Style::default().fg(theme.error),
            Some(_) => Style::default().fg(theme.fg_muted),
            None if is_cursor => {
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
            }
            None => Style::default().fg(theme.fg_secondary),
        };

        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", prefix, letter, question.display_option(i)),
            style,
        )));
        lines.push(Line::from(""));
    }

    // Feedback + hint
    if let Some(picked) = chosen {
        if picked == correct {
            lines.push(Line::from(Span::styled(
                "✓ Correct!",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("✗ Correct answer: {}", correct),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        let next_hint = if quiz.current_index() + 1 < quiz.len() {
            "[Enter] Next Question    [q] Quit"
        } else {
            "[Enter] See Results    [q] Quit"
        };
        lines.push(Line::from(Span::styled(next_hint, Style::default().fg(theme.fg_muted))));
    } else {
        lines.push(Line::from(Span::styled(
            "[j/k] Select    [Enter] Confirm    [q] Quit",
            Style::default().fg(theme.fg_muted),
        )));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Draw the results screen: score ring stand-in, rating, stats, review
fn draw_results(frame: &mut Frame, area: Rect, quiz: &QuizSession, theme: &Theme) {
    let score = quiz.score();
    let total = quiz.len();
    let wrong = total - score;
    let pct = quiz.percentage();
    let rating = quiz.rating();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", pct),
            Style::default().fg(rating.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("score", Style::default().fg(theme.fg_muted))),
        Line::from(""),
        Line::from(vec![
            Span::raw(rating.icon),
            Span::raw(" "),
            Span::styled(
                rating.label,
                Style::default().fg(rating.color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("✓ {} Correct", score), Style::default().fg(theme.success)),
            Span::styled("   |   ", Style::default().fg(theme.fg_muted)),
            Span::styled(format!("✗ {} Wrong", wrong), Style::default().fg(theme.error)),
            Span::styled("   |   ", Style::default().fg(theme.fg_muted)),
            Span::styled(
                format!("⬡ {} Total", total),
                Style::default().fg(theme.accent_secondary),
            ),
        ]),
        Line::from(""),
    ];

    if quiz.review_open() {
        lines.push(Line::from(Span::styled(
            "Question Review ▾",
            Style::default().fg(theme.fg_secondary),
        )));
        lines.push(Line::from(""));

        for (i, question) in quiz.questions().iter().enumerate() {
            let user_answer = quiz.answer_at(i);
            let is_correct = user_answer == Some(question.correct_letter());

            let (marker, style) = if is_correct {
                ("✓", Style::default().fg(theme.success))
            } else {
                ("✗", Style::default().fg(theme.error))
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(question.question.clone(), Style::default().fg(theme.fg_primary)),
            ]));

            if !is_correct {
                let yours = user_answer.map(String::from).unwrap_or_else(|| "—".to_string());
                lines.push(Line::from(Span::styled(
                    format!(
                        "     Your answer: {} · Correct: {}",
                        yours,
                        question.correct_letter()
                    ),
                    Style::default().fg(theme.fg_muted),
                )));
            }
        }
        lines.push(Line::from(""));
    } else {
        lines.push(Line::from(Span::styled(
            "Question Review ▸",
            Style::default().fg(theme.fg_muted),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "[r] Try Again    [v] Review    [q] Quit",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
