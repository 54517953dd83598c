//! Quiz session state machine
//!
//! One play-through of an MCQ set: per-question answers recorded
//! immutably on first selection, forward-only navigation, a terminal
//! `finished` state, and score/rating computation for the results view.

use ratatui::style::Color;

use super::McqItem;

/// State for one quiz play-through.
///
/// Constructed fresh each time a quiz is started or restarted and
/// discarded when the user leaves; nothing is persisted.
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Questions, already shuffled
    questions: Vec<McqItem>,
    /// Current question index
    current: usize,
    /// Chosen letter per question, `None` while unanswered
    answers: Vec<Option<char>>,
    /// Terminal state, entered by advancing past the last question
    finished: bool,
    /// Whether the results review panel is expanded
    review_open: bool,
    /// Option the selection cursor is on (UI navigation state)
    selected_option: usize,
}

impl QuizSession {
    /// Create a session over a non-empty question set.
    ///
    /// Returns `None` for an empty set so score computation can never
    /// divide by zero: no session exists to finish.
    pub fn new(questions: Vec<McqItem>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let answers = vec![None; questions.len()];
        Some(Self {
            questions,
            current: 0,
            answers,
            finished: false,
            review_open: false,
            selected_option: 0,
        })
    }

    /// All questions
    pub fn questions(&self) -> &[McqItem] {
        &self.questions
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Sessions are never empty by construction
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current question index
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question currently shown
    pub fn current_question(&self) -> &McqItem {
        &self.questions[self.current]
    }

    /// Whether the session reached the terminal state
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the review panel is expanded
    pub fn review_open(&self) -> bool {
        self.review_open
    }

    /// Toggle the results review panel
    pub fn toggle_review(&mut self) {
        self.review_open = !self.review_open;
    }

    /// Chosen letter for the current question, if answered
    pub fn chosen(&self) -> Option<char> {
        self.answers[self.current]
    }

    /// Chosen letter for an arbitrary question index
    pub fn answer_at(&self, index: usize) -> Option<char> {
        self.answers.get(index).copied().flatten()
    }

    /// Option index the selection cursor is on
    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    /// Move the selection cursor down, wrapping
    pub fn select_next_option(&mut self) {
        let count = self.current_question().options.len();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    /// Move the selection cursor up, wrapping
    pub fn select_prev_option(&mut self) {
        let count = self.current_question().options.len();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Record an answer for the current question.
    ///
    /// Only the first selection counts; a second call while already
    /// answered is a no-op and returns `false`.
    pub fn select_answer(&mut self, letter: char) -> bool {
        if self.finished || self.answers[self.current].is_some() {
            return false;
        }
        self.answers[self.current] = Some(letter.to_ascii_uppercase());
        true
    }

    /// Move to the next question, or finish after the last one
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected_option = 0;
        } else {
            self.finished = true;
        }
    }

    /// Reset to a fresh play-through of the same questions
    pub fn restart(&mut self) {
        self.current = 0;
        self.answers = vec![None; self.questions.len()];
        self.finished = false;
        self.review_open = false;
        self.selected_option = 0;
    }

    /// Count of questions answered with the correct letter
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_letter()))
            .count()
    }

    /// Score as a rounded percentage; the set is non-empty by construction
    pub fn percentage(&self) -> u32 {
        let total = self.questions.len() as f64;
        ((self.score() as f64 / total) * 100.0).round() as u32
    }

    /// Rating tier for the final score
    pub fn rating(&self) -> Rating {
        Rating::for_percentage(self.percentage())
    }
}

/// Fixed rating tier shown on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    /// Tier label
    pub label: &'static str,
    /// Tier icon
    pub icon: &'static str,
    /// Tier display color
    pub color: Color,
}

impl Rating {
    /// Map a percentage to its tier. Thresholds are fixed display
    /// contract: 100, 80, 60, 40, else bottom.
    pub fn for_percentage(pct: u32) -> Rating {
        match pct {
            100 => Rating { label: "Perfect Score!", icon: "🏆", color: Color::Rgb(255, 215, 0) },
            80..=99 => Rating { label: "Excellent!", icon: "🎉", color: Color::Rgb(0, 245, 212) },
            60..=79 => Rating { label: "Good Job!", icon: "👍", color: Color::Rgb(52, 211, 153) },
            40..=59 => {
                Rating { label: "Keep Studying", icon: "📖", color: Color::Rgb(245, 158, 11) }
            }
            _ => Rating { label: "Keep Going!", icon: "💪", color: Color::Rgb(248, 113, 113) },
        }
    }
}
