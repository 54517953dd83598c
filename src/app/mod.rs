//! Interactive session: terminal lifecycle and the event loop

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::pipeline::{GenerateRequest, GenerateResponse, Mode, Pipeline, PipelineError};
use crate::ui;
use input::{Action, flashcard_key_to_action, quiz_key_to_action};
use state::{AppState, Screen};

/// Read an image file and package it as a pipeline request.
///
/// The MIME type comes from the file extension; the bytes go over as
/// plain base64 with no data-URL prefix.
pub fn load_request(path: &Path, mode: Mode) -> Result<GenerateRequest> {
    let mime_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        other => bail!("unsupported image type {:?}: expected jpg, png, webp, gif, or bmp", other),
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image {:?}", path))?;

    Ok(GenerateRequest {
        image: BASE64.encode(bytes),
        mime_type: mime_type.to_string(),
        mode,
    })
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// Receives the pipeline outcome from the generation task
    rx: mpsc::Receiver<Result<GenerateResponse, PipelineError>>,
}

impl App {
    /// Create an application instance and kick off generation.
    ///
    /// The pipeline runs on its own task; its single result arrives over
    /// a channel and is folded into state by the event loop. Overlapping
    /// requests cannot happen: one session, one generation.
    pub fn new(
        config: Config,
        pipeline: Arc<Pipeline>,
        request: GenerateRequest,
        image_name: String,
    ) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let state = AppState::new(request.mode, image_name);

        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let result = pipeline.generate(&request).await;
            let _ = tx.send(result).await;
        });

        Ok(Self { config, state, terminal, rx })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            let theme = self.config.active_theme();
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &theme);
            })?;

            // Fold in the pipeline result once it lands
            if let Ok(result) = self.rx.try_recv() {
                self.state.apply_result(result);
            }

            // Handle events
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) {
                        break;
                    }
                }
            }

            self.state.tick(Instant::now());
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if the app should exit
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state.screen {
            Screen::Loading | Screen::Error => {
                matches!(key, KeyCode::Char('q') | KeyCode::Esc)
            }
            Screen::Quiz => match quiz_key_to_action(key) {
                Some(Action::Quit) => true,
                Some(action) => {
                    self.handle_quiz_action(action);
                    false
                }
                None => false,
            },
            Screen::Flashcards => match flashcard_key_to_action(key) {
                Some(Action::Quit) => true,
                Some(action) => {
                    self.handle_flashcard_action(action);
                    false
                }
                None => false,
            },
        }
    }

    fn handle_quiz_action(&mut self, action: Action) {
        let Some(quiz) = &mut self.state.quiz else {
            return;
        };

        if quiz.is_finished() {
            match action {
                Action::Restart => quiz.restart(),
                Action::ToggleReview => quiz.toggle_review(),
                _ => {}
            }
            return;
        }

        match action {
            Action::CursorUp => quiz.select_prev_option(),
            Action::CursorDown => quiz.select_next_option(),
            Action::Confirm => {
                if quiz.chosen().is_none() {
                    let letter = (b'A' + quiz.selected_option() as u8) as char;
                    quiz.select_answer(letter);
                } else {
                    quiz.advance();
                }
            }
            _ => {}
        }
    }

    fn handle_flashcard_action(&mut self, action: Action) {
        let Some(cards) = &mut self.state.cards else {
            return;
        };
        let now = Instant::now();

        match action {
            Action::Flip => cards.flip(),
            Action::NextCard => cards.next(now),
            Action::PrevCard => cards.prev(now),
            Action::JumpCard(index) => cards.jump(index, now),
            Action::Restart => cards.restart(),
            _ => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
