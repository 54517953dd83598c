//! Application state definitions

use std::time::Instant;

use crate::pipeline::{GenerateResponse, GeneratedItems, Mode, PipelineError};
use crate::quiz::{FlashcardSession, QuizSession, shuffle_mcq};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Waiting on the generation pipeline
    #[default]
    Loading,
    /// Playing an MCQ session (answering or results)
    Quiz,
    /// Reviewing a flashcard deck
    Flashcards,
    /// Generation failed; message shown, user may quit and retry
    Error,
}

/// Full application state for one interactive session
#[derive(Debug)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Mode this session was started in
    pub mode: Mode,

    /// Name of the uploaded image, for the title bar
    pub image_name: String,

    /// Active quiz session (MCQ mode, after generation)
    pub quiz: Option<QuizSession>,

    /// Active flashcard session (flashcard mode, after generation)
    pub cards: Option<FlashcardSession>,

    /// Error message shown on the error screen
    pub error: Option<String>,

    /// Loading spinner frame counter
    pub spinner_frame: usize,
}

impl AppState {
    /// Fresh state, waiting on the pipeline
    pub fn new(mode: Mode, image_name: String) -> Self {
        Self {
            screen: Screen::Loading,
            mode,
            image_name,
            quiz: None,
            cards: None,
            error: None,
            spinner_frame: 0,
        }
    }

    /// Apply the pipeline's outcome: build the matching session, or land
    /// on the error screen. MCQ items get the shuffle pass here, mirroring
    /// where the web client runs it.
    pub fn apply_result(&mut self, result: Result<GenerateResponse, PipelineError>) {
        match result {
            Ok(response) => match response.data {
                GeneratedItems::Mcq(questions) => {
                    match QuizSession::new(shuffle_mcq(questions)) {
                        Some(session) => {
                            self.quiz = Some(session);
                            self.screen = Screen::Quiz;
                        }
                        None => self.fail(
                            "No valid questions could be generated from this page. \
                             Please try another image or ensure the text is clear.",
                        ),
                    }
                }
                GeneratedItems::Flashcards(cards) => match FlashcardSession::new(cards) {
                    Some(session) => {
                        self.cards = Some(session);
                        self.screen = Screen::Flashcards;
                    }
                    None => self.fail("No flashcards could be generated. Please try again."),
                },
            },
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Per-frame update: spinner animation and pending flashcard jumps
    pub fn tick(&mut self, now: Instant) {
        match self.screen {
            Screen::Loading => self.spinner_frame = self.spinner_frame.wrapping_add(1),
            Screen::Flashcards => {
                if let Some(cards) = &mut self.cards {
                    cards.tick(now);
                }
            }
            _ => {}
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.screen = Screen::Error;
    }
}
