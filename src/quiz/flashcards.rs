//! Flashcard session navigator
//!
//! Navigation always resets the card to front-shown first, then moves the
//! index after a short fixed delay so a flip-back transition can finish
//! before the content changes. The delay is modelled as a pending jump
//! with a deadline; the UI event loop calls [`FlashcardSession::tick`]
//! each frame to apply jumps that have come due. Time is passed in
//! explicitly so tests never have to sleep.

use std::time::{Duration, Instant};

use super::FlashcardItem;

/// Delay between flipping back to the front and moving the index
pub const FLIP_RESET_DELAY: Duration = Duration::from_millis(150);

/// A scheduled index move
#[derive(Debug, Clone, Copy)]
struct PendingJump {
    target: usize,
    due: Instant,
}

/// State for one flashcard review session
#[derive(Debug, Clone)]
pub struct FlashcardSession {
    cards: Vec<FlashcardItem>,
    current: usize,
    /// Whether the back of the card is shown
    flipped: bool,
    pending: Option<PendingJump>,
}

impl FlashcardSession {
    /// Create a session over a non-empty deck
    pub fn new(cards: Vec<FlashcardItem>) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(Self { cards, current: 0, flipped: false, pending: None })
    }

    /// All cards
    pub fn cards(&self) -> &[FlashcardItem] {
        &self.cards
    }

    /// Number of cards in the deck
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Decks are never empty by construction
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current card index
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The card currently shown
    pub fn current_card(&self) -> &FlashcardItem {
        &self.cards[self.current]
    }

    /// Whether the back of the card is shown
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Whether the last card is shown
    pub fn on_last_card(&self) -> bool {
        self.current == self.cards.len() - 1
    }

    /// Toggle between front and back of the current card
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move to the next card, clamped at the end (no wraparound)
    pub fn next(&mut self, now: Instant) {
        let target = (self.current + 1).min(self.cards.len() - 1);
        self.schedule_jump(target, now);
    }

    /// Move to the previous card, clamped at the start
    pub fn prev(&mut self, now: Instant) {
        let target = self.current.saturating_sub(1);
        self.schedule_jump(target, now);
    }

    /// Jump directly to a card, clamped into range
    pub fn jump(&mut self, index: usize, now: Instant) {
        let target = index.min(self.cards.len() - 1);
        self.schedule_jump(target, now);
    }

    /// Apply a pending jump once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(jump) = self.pending {
            if now >= jump.due {
                self.current = jump.target;
                self.pending = None;
            }
        }
    }

    /// Back to the first card, front-shown (the "start over" action)
    pub fn restart(&mut self) {
        self.current = 0;
        self.flipped = false;
        self.pending = None;
    }

    fn schedule_jump(&mut self, target: usize, now: Instant) {
        self.flipped = false;
        self.pending = Some(PendingJump { target, due: now + FLIP_RESET_DELAY });
    }
}
