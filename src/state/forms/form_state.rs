//! Form view state: a controller plus focus and cursor

use super::controller::{FormController, SubmitStart};
use super::field;
use crate::error::FormError;
use crate::forms::FormSchema;
use crate::schema::{FieldKind, FieldSpec, FieldValue, Record, Schema};
use crate::submit::{Submission, SubmissionReceipt, SubmitError};
use crate::validator::FieldErrors;

/// Common operations over any form view, used by key handling and rendering
pub trait Form {
    fn title(&self) -> &'static str;
    fn schema(&self) -> &Schema;
    fn record(&self) -> &Record;
    fn errors(&self) -> &FieldErrors;
    fn submit_error(&self) -> Option<&str>;
    fn is_submitting(&self) -> bool;

    /// Number of focusable rows: every field plus the submit button
    fn field_count(&self) -> usize {
        self.schema().fields.len() + 1
    }
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FieldSpec> {
        self.schema().fields.get(index)
    }
    fn active_spec(&self) -> Option<&FieldSpec> {
        self.get_field(self.active_field())
    }
    /// True when focus is on the submit button
    fn is_submit_active(&self) -> bool {
        self.active_field() == self.field_count() - 1
    }
    fn is_active_field_multiline(&self) -> bool {
        self.active_spec()
            .is_some_and(|f| f.kind == FieldKind::MultilineText)
    }

    /// Highlighted option of the active multi-choice field
    fn option_cursor(&self) -> usize;

    fn input_char(&mut self, c: char) -> Result<(), FormError>;
    fn input_str(&mut self, text: &str) -> Result<(), FormError>;
    fn backspace(&mut self) -> Result<(), FormError>;
    fn cycle_choice(&mut self, forward: bool) -> Result<(), FormError>;
    fn move_option_cursor(&mut self, down: bool);
    fn toggle_option(&mut self) -> Result<(), FormError>;

    fn begin_submit(&mut self) -> SubmitStart<Submission>;
    fn finish_submit(&mut self, result: &Result<SubmissionReceipt, SubmitError>);
}

/// One form as shown on screen
#[derive(Debug)]
pub struct FormView<F: FormSchema> {
    pub controller: FormController<F>,
    pub active_field_index: usize,
    pub option_cursor: usize,
}

impl<F: FormSchema> FormView<F> {
    pub fn new() -> Self {
        Self {
            controller: FormController::new(),
            active_field_index: 0,
            option_cursor: 0,
        }
    }

    /// Apply an edit to the active field, if the edit applies to its kind
    fn edit_active<E>(&mut self, edit: E) -> Result<(), FormError>
    where
        E: FnOnce(&FieldSpec, &FieldValue) -> Option<FieldValue>,
    {
        let Some(spec) = self.active_spec() else {
            return Ok(());
        };
        let empty = FieldValue::empty_for(spec.kind);
        let current = self.controller.record().get(&spec.name).unwrap_or(&empty);
        match edit(spec, current) {
            Some(value) => {
                let name = spec.name.clone();
                self.controller.set_field_value(&name, value)
            }
            None => Ok(()),
        }
    }
}

impl<F: FormSchema> Default for FormView<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormSchema> Form for FormView<F> {
    fn title(&self) -> &'static str {
        F::TITLE
    }
    fn schema(&self) -> &Schema {
        self.controller.schema()
    }
    fn record(&self) -> &Record {
        self.controller.record()
    }
    fn errors(&self) -> &FieldErrors {
        self.controller.errors()
    }
    fn submit_error(&self) -> Option<&str> {
        self.controller.submit_error()
    }
    fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let index = index.min(self.field_count() - 1);
        if index != self.active_field_index {
            self.option_cursor = 0;
        }
        self.active_field_index = index;
    }

    fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    fn input_char(&mut self, c: char) -> Result<(), FormError> {
        self.edit_active(|spec, value| field::push_char(spec.kind, value, c))
    }

    fn input_str(&mut self, text: &str) -> Result<(), FormError> {
        self.edit_active(|spec, value| field::push_str(spec.kind, value, text))
    }

    fn backspace(&mut self) -> Result<(), FormError> {
        self.edit_active(|spec, value| field::pop_char(spec.kind, value))
    }

    fn cycle_choice(&mut self, forward: bool) -> Result<(), FormError> {
        self.edit_active(|spec, value| field::cycle_choice(spec, value, forward))
    }

    fn move_option_cursor(&mut self, down: bool) {
        let Some(spec) = self.active_spec() else {
            return;
        };
        if spec.kind != FieldKind::MultiChoice || spec.options.is_empty() {
            return;
        }
        let count = spec.options.len();
        self.option_cursor = if down {
            (self.option_cursor + 1) % count
        } else {
            (self.option_cursor + count - 1) % count
        };
    }

    fn toggle_option(&mut self) -> Result<(), FormError> {
        let cursor = self.option_cursor;
        self.edit_active(|spec, value| field::toggle_choice(spec, value, cursor))
    }

    fn begin_submit(&mut self) -> SubmitStart<Submission> {
        match self.controller.begin_submit() {
            SubmitStart::AlreadySubmitting => SubmitStart::AlreadySubmitting,
            SubmitStart::Rejected => SubmitStart::Rejected,
            SubmitStart::Failed(message) => SubmitStart::Failed(message),
            SubmitStart::Ready(output) => SubmitStart::Ready(output.into()),
        }
    }

    fn finish_submit(&mut self, result: &Result<SubmissionReceipt, SubmitError>) {
        self.controller.finish_submit(result);
        self.active_field_index = 0;
        self.option_cursor = 0;
    }
}
