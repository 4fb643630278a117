//! Application state definitions

use super::forms::{Form, FormView};
use crate::forms::{RegistrationForm, SignupForm};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Registration,
    Signup,
}

impl View {
    pub fn next(&self) -> Self {
        match self {
            Self::Registration => Self::Signup,
            Self::Signup => Self::Registration,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Registration => "Registration",
            Self::Signup => "Signup",
        }
    }

    pub fn all() -> [View; 2] {
        [Self::Registration, Self::Signup]
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub registration: FormView<RegistrationForm>,
    pub signup: FormView<SignupForm>,
    /// Errors waiting to be shown in the modal error dialog
    pub error_queue: VecDeque<String>,
    /// Transient message shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(start_view: View) -> Self {
        Self {
            current_view: start_view,
            ..Default::default()
        }
    }

    pub fn form(&self, view: View) -> &dyn Form {
        match view {
            View::Registration => &self.registration,
            View::Signup => &self.signup,
        }
    }

    pub fn form_mut(&mut self, view: View) -> &mut dyn Form {
        match view {
            View::Registration => &mut self.registration,
            View::Signup => &mut self.signup,
        }
    }

    pub fn active_form(&self) -> &dyn Form {
        self.form(self.current_view)
    }

    pub fn active_form_mut(&mut self) -> &mut dyn Form {
        self.form_mut(self.current_view)
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_registration() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Registration);
        assert_eq!(state.active_form().title(), "User Registration");
    }

    #[test]
    fn test_view_next_toggles() {
        assert_eq!(View::Registration.next(), View::Signup);
        assert_eq!(View::Signup.next(), View::Registration);
    }

    #[test]
    fn test_active_form_follows_view() {
        let state = AppState::new(View::Signup);
        assert_eq!(state.active_form().title(), "Signup");
    }

    #[test]
    fn test_forms_are_independent() {
        let mut state = AppState::default();
        state.form_mut(View::Registration).input_str("Ada").unwrap();
        assert_eq!(state.registration.record().text("name"), "Ada");
        assert_eq!(state.signup.record().text("email"), "");
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_view_deserializes_lowercase() {
        let view: View = serde_json::from_str("\"signup\"").unwrap();
        assert_eq!(view, View::Signup);
    }
}
