//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform;
use crate::schema::FieldKind;
use crate::state::{AppState, SubmitStart, View};
use crate::submit::{SimulatedSubmit, SubmissionReceipt, SubmitEffect, SubmitError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A finished submit effect, routed back to the form that started it
#[derive(Debug)]
struct SubmitCompletion {
    view: View,
    result: Result<SubmissionReceipt, SubmitError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Effect run for accepted submissions
    effect: Arc<dyn SubmitEffect>,
    completions_tx: mpsc::UnboundedSender<SubmitCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SubmitCompletion>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &TuiConfig) -> Self {
        let effect = SimulatedSubmit::new(config.submit_delay()).failing(config.simulate_failure());
        Self::with_effect(Arc::new(effect), config.start_view())
    }

    pub fn with_effect(effect: Arc<dyn SubmitEffect>, start_view: View) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(start_view),
            effect,
            completions_tx,
            completions_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Switch to another form; each form keeps its own state
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view != view {
            tracing::debug!(from = ?self.state.current_view, to = ?view, "switching form");
            self.state.current_view = view;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        if platform::is_submit(&key) {
            self.submit_active_form();
            return Ok(());
        }
        if platform::is_paste(&key) {
            self.paste_from_clipboard();
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Esc => self.quit = true,
            KeyCode::F(1) => self.navigate(View::Registration),
            KeyCode::F(2) => self.navigate(View::Signup),
            KeyCode::Left | KeyCode::Right if ctrl => self.navigate(self.state.current_view.next()),
            _ => self.handle_form_key(key)?,
        }
        Ok(())
    }

    /// Handle keys that edit or navigate the active form
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Enter && self.state.active_form().is_submit_active() {
            self.submit_active_form();
            return Ok(());
        }

        let form = self.state.active_form_mut();
        let kind = form.active_spec().map(|spec| spec.kind);

        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Up if kind == Some(FieldKind::MultiChoice) => form.move_option_cursor(false),
            KeyCode::Down if kind == Some(FieldKind::MultiChoice) => form.move_option_cursor(true),
            KeyCode::Up => form.prev_field(),
            KeyCode::Down => form.next_field(),
            KeyCode::Left if kind == Some(FieldKind::SingleChoice) => form.cycle_choice(false)?,
            KeyCode::Right if kind == Some(FieldKind::SingleChoice) => form.cycle_choice(true)?,
            KeyCode::Char(' ') if kind == Some(FieldKind::MultiChoice) => form.toggle_option()?,
            // Enter in the multiline field adds a newline
            KeyCode::Enter if form.is_active_field_multiline() => form.input_char('\n')?,
            KeyCode::Enter => form.next_field(),
            // Unbound control chords never reach a field
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Char(c) => form.input_char(c)?,
            KeyCode::Backspace => form.backspace()?,
            _ => {}
        }
        Ok(())
    }

    /// Handle text pasted by the terminal (bracketed paste)
    pub fn handle_paste(&mut self, text: &str) -> Result<()> {
        if self.state.has_errors() {
            return Ok(());
        }
        self.state.active_form_mut().input_str(text)?;
        Ok(())
    }

    fn paste_from_clipboard(&mut self) {
        let text = match arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "clipboard unavailable");
                self.push_error(format!("Clipboard unavailable: {err}"));
                return;
            }
        };
        if let Err(err) = self.state.active_form_mut().input_str(&text) {
            self.push_error(err.to_string());
        }
    }

    /// Validate the active form and, if accepted, run the effect in the background
    pub fn submit_active_form(&mut self) {
        let view = self.state.current_view;
        let form = self.state.form_mut(view);

        let submission = match form.begin_submit() {
            SubmitStart::AlreadySubmitting => return,
            SubmitStart::Rejected => {
                let count = form.errors().len();
                self.state.status_message = Some(format!("Fix {count} field(s) before submitting"));
                return;
            }
            SubmitStart::Failed(message) => {
                self.push_error(message);
                return;
            }
            SubmitStart::Ready(submission) => submission,
        };

        let effect = Arc::clone(&self.effect);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            // Run the effect in its own task so a panic still reports back
            let result = tokio::spawn(async move { effect.submit(submission).await })
                .await
                .unwrap_or(Err(SubmitError::Interrupted));
            if tx.send(SubmitCompletion { view, result }).is_err() {
                tracing::debug!("app closed before submission completed");
            }
        });
    }

    /// Apply any finished submissions without blocking
    pub fn poll_submissions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.complete_submission(completion);
        }
    }

    /// Wait for the next submission to finish and apply it
    pub async fn wait_for_submission(&mut self) {
        if let Some(completion) = self.completions_rx.recv().await {
            self.complete_submission(completion);
        }
    }

    fn complete_submission(&mut self, completion: SubmitCompletion) {
        let SubmitCompletion { view, result } = completion;
        let form = self.state.form_mut(view);
        form.finish_submit(&result);

        match result {
            Ok(receipt) => {
                self.state.status_message = Some(format!(
                    "{} submitted (id {})",
                    view.label(),
                    receipt.short_id()
                ));
            }
            Err(_) => {
                let message = form
                    .submit_error()
                    .unwrap_or("Submission failed")
                    .to_string();
                self.push_error(message);
            }
        }
    }
}
