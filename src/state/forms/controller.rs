//! Form controller: owns one form's record, errors and submitting flag

use crate::error::FormError;
use crate::forms::FormSchema;
use crate::schema::{FieldValue, Record, Schema};
use crate::submit::{SubmissionReceipt, SubmitEffect, SubmitError};
use crate::validator::{validate, FieldErrors, ValidationResult};
use std::marker::PhantomData;

/// Result of starting a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart<T> {
    /// A submission is already in flight; nothing changed
    AlreadySubmitting,
    /// Validation failed; errors are stored on the controller
    Rejected,
    /// The record validated but could not become the form's output; the
    /// message is also stored as the submit error
    Failed(String),
    /// Validation passed; the caller must run the effect and then call
    /// [`FormController::finish_submit`]
    Ready(T),
}

/// Result of a complete submit cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    AlreadySubmitting,
    Rejected,
    Submitted(SubmissionReceipt),
    Failed(String),
}

pub struct FormController<F: FormSchema> {
    schema: Schema,
    record: Record,
    errors: FieldErrors,
    submit_error: Option<String>,
    is_submitting: bool,
    _form: PhantomData<F>,
}

impl<F: FormSchema> std::fmt::Debug for FormController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("form", &F::TITLE)
            .field("record", &self.record)
            .field("errors", &self.errors)
            .field("submit_error", &self.submit_error)
            .field("is_submitting", &self.is_submitting)
            .finish()
    }
}

impl<F: FormSchema> FormController<F> {
    pub fn new() -> Self {
        let schema = F::schema();
        let record = schema.empty_record();
        Self {
            schema,
            record,
            errors: FieldErrors::new(),
            submit_error: None,
            is_submitting: false,
            _form: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Non-field error from the last failed submission
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Overwrite one field's value. Validation is deferred to submit time.
    pub fn set_field_value(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        self.record.set(&self.schema.fields, name, value)
    }

    /// Validate the record and, if accepted, enter the submitting state
    pub fn begin_submit(&mut self) -> SubmitStart<F::Output> {
        if self.is_submitting {
            tracing::debug!(form = F::TITLE, "submit ignored, already submitting");
            return SubmitStart::AlreadySubmitting;
        }
        self.submit_error = None;

        let valid = match validate(&self.record, &self.schema) {
            ValidationResult::Rejected(errors) => {
                tracing::info!(
                    form = F::TITLE,
                    fields = errors.len(),
                    "submit rejected by validation"
                );
                self.errors = errors;
                return SubmitStart::Rejected;
            }
            ValidationResult::Accepted(valid) => valid,
        };

        let output = match F::extract(&valid) {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(
                    form = F::TITLE,
                    %err,
                    "accepted record did not match form shape"
                );
                let message = format!("Submission failed: {err}");
                self.errors = FieldErrors::new();
                self.submit_error = Some(message.clone());
                return SubmitStart::Failed(message);
            }
        };

        self.errors = FieldErrors::new();
        self.is_submitting = true;
        tracing::info!(form = F::TITLE, "submitting");
        SubmitStart::Ready(output)
    }

    /// Leave the submitting state after the effect resolved. The record is
    /// reset whatever the outcome; a failure is kept as a non-field error.
    pub fn finish_submit(&mut self, result: &Result<SubmissionReceipt, SubmitError>) {
        self.record = self.schema.empty_record();
        self.errors = FieldErrors::new();
        self.is_submitting = false;

        match result {
            Ok(receipt) => {
                tracing::info!(form = F::TITLE, id = %receipt.id, "submission complete");
            }
            Err(err) => {
                tracing::warn!(form = F::TITLE, %err, "submission failed");
                self.submit_error = Some(format!("Submission failed: {err}"));
            }
        }
    }

    /// Run a whole submit cycle against `effect`
    pub async fn submit(&mut self, effect: &dyn SubmitEffect) -> SubmitOutcome {
        let output = match self.begin_submit() {
            SubmitStart::AlreadySubmitting => return SubmitOutcome::AlreadySubmitting,
            SubmitStart::Rejected => return SubmitOutcome::Rejected,
            SubmitStart::Failed(message) => return SubmitOutcome::Failed(message),
            SubmitStart::Ready(output) => output,
        };

        let result = effect.submit(output.into()).await;
        self.finish_submit(&result);

        match result {
            Ok(receipt) => SubmitOutcome::Submitted(receipt),
            Err(_) => SubmitOutcome::Failed(self.submit_error.clone().unwrap_or_default()),
        }
    }
}

impl<F: FormSchema> Default for FormController<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{RegistrationForm, SignupForm};
    use crate::forms::Signup;
    use crate::submit::{MockSubmitEffect, Submission};
    use crate::validator::ValidRecord;

    /// Signup schema whose accepted records never convert to an output
    struct UnconvertibleSignup;

    impl FormSchema for UnconvertibleSignup {
        type Output = Signup;
        const TITLE: &'static str = "Unconvertible";

        fn schema() -> Schema {
            SignupForm::schema()
        }

        fn extract(_record: &ValidRecord) -> Result<Signup, FormError> {
            Err(FormError::UnknownField("nickname".to_string()))
        }
    }

    fn fill_signup<F: FormSchema>(controller: &mut FormController<F>) {
        controller.set_field_value("email", FieldValue::text("a@b.com")).unwrap();
        controller.set_field_value("Password", FieldValue::text("abcdefghij")).unwrap();
        controller
            .set_field_value("ConfirmPassword", FieldValue::text("abcdefghij"))
            .unwrap();
    }

    fn fill_registration(controller: &mut FormController<RegistrationForm>) {
        let values = [
            ("name", FieldValue::text("Ada")),
            ("email", FieldValue::text("a@b.com")),
            ("password", FieldValue::text("12345678")),
            ("bio", FieldValue::text("x")),
            ("gender", FieldValue::text("male")),
            ("favoriteFood", FieldValue::choices(["Pizza"])),
            ("country", FieldValue::text("us")),
            ("profilePicture", FieldValue::file("me.png")),
        ];
        for (name, value) in values {
            controller.set_field_value(name, value).unwrap();
        }
    }

    fn succeeding_effect(times: usize) -> MockSubmitEffect {
        let mut effect = MockSubmitEffect::new();
        effect
            .expect_submit()
            .times(times)
            .returning(|_| Ok(SubmissionReceipt::new()));
        effect
    }

    mod field_values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_controller_is_idle_and_empty() {
            let controller = FormController::<SignupForm>::new();
            assert!(!controller.is_submitting());
            assert!(controller.errors().is_empty());
            assert!(controller.submit_error().is_none());
            assert_eq!(controller.record(), &SignupForm::schema().empty_record());
        }

        #[test]
        fn test_set_field_value_does_not_validate() {
            let mut controller = FormController::<SignupForm>::new();
            controller
                .set_field_value("email", FieldValue::text("nope"))
                .unwrap();
            assert!(controller.errors().is_empty());
            assert_eq!(controller.record().text("email"), "nope");
        }

        #[test]
        fn test_set_field_value_keeps_previous_errors() {
            let mut controller = FormController::<SignupForm>::new();
            assert_eq!(controller.begin_submit(), SubmitStart::Rejected);
            let errors = controller.errors().clone();
            controller
                .set_field_value("email", FieldValue::text("a@b.com"))
                .unwrap();
            assert_eq!(controller.errors(), &errors);
        }

        #[test]
        fn test_set_unknown_field_errors() {
            let mut controller = FormController::<SignupForm>::new();
            let err = controller
                .set_field_value("username", FieldValue::text("x"))
                .unwrap_err();
            assert_eq!(err, FormError::UnknownField("username".to_string()));
        }
    }

    mod submit_cycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_rejected_record_stores_errors_and_skips_effect() {
            let mut controller = FormController::<RegistrationForm>::new();
            fill_registration(&mut controller);
            controller
                .set_field_value("name", FieldValue::text(""))
                .unwrap();
            let before = controller.record().clone();

            let effect = succeeding_effect(0);
            let outcome = controller.submit(&effect).await;

            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert_eq!(
                controller.errors(),
                &FieldErrors::from([("name", vec!["Name is required"])])
            );
            assert_eq!(controller.record(), &before);
            assert!(!controller.is_submitting());
        }

        #[tokio::test]
        async fn test_bio_too_long_is_rejected() {
            let mut controller = FormController::<RegistrationForm>::new();
            fill_registration(&mut controller);
            controller
                .set_field_value("bio", FieldValue::text("123456789"))
                .unwrap();

            let outcome = controller.submit(&succeeding_effect(0)).await;

            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert_eq!(
                controller.errors().get("bio"),
                Some(&["Bio must not exceed 8 characters".to_string()][..])
            );
        }

        #[tokio::test]
        async fn test_valid_record_submits_then_resets() {
            let mut controller = FormController::<RegistrationForm>::new();
            fill_registration(&mut controller);

            let mut effect = MockSubmitEffect::new();
            effect
                .expect_submit()
                .withf(|submission| {
                    matches!(submission, Submission::Registration(r) if r.name == "Ada")
                })
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new()));

            let outcome = controller.submit(&effect).await;

            assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
            assert!(!controller.is_submitting());
            assert!(controller.errors().is_empty());
            assert_eq!(controller.record(), &RegistrationForm::schema().empty_record());
        }

        #[test]
        fn test_begin_submit_sets_flag_and_clears_errors() {
            let mut controller = FormController::<SignupForm>::new();
            assert_eq!(controller.begin_submit(), SubmitStart::Rejected);
            assert!(!controller.errors().is_empty());

            controller.set_field_value("email", FieldValue::text("a@b.com")).unwrap();
            controller.set_field_value("Password", FieldValue::text("abcdefghij")).unwrap();
            controller
                .set_field_value("ConfirmPassword", FieldValue::text("abcdefghij"))
                .unwrap();

            let start = controller.begin_submit();
            assert!(matches!(start, SubmitStart::Ready(ref s) if s.email == "a@b.com"));
            assert!(controller.is_submitting());
            assert!(controller.errors().is_empty());
        }

        #[tokio::test]
        async fn test_submit_while_submitting_is_noop() {
            let mut controller = FormController::<SignupForm>::new();
            controller.set_field_value("email", FieldValue::text("a@b.com")).unwrap();
            controller.set_field_value("Password", FieldValue::text("abcdefghij")).unwrap();
            controller
                .set_field_value("ConfirmPassword", FieldValue::text("abcdefghij"))
                .unwrap();
            assert!(matches!(controller.begin_submit(), SubmitStart::Ready(_)));

            let record = controller.record().clone();
            let effect = succeeding_effect(0);
            let outcome = controller.submit(&effect).await;

            assert_eq!(outcome, SubmitOutcome::AlreadySubmitting);
            assert!(controller.is_submitting());
            assert_eq!(controller.record(), &record);
            assert!(controller.errors().is_empty());
        }

        #[tokio::test]
        async fn test_signup_mismatch_attaches_to_confirmation() {
            let mut controller = FormController::<SignupForm>::new();
            controller.set_field_value("email", FieldValue::text("a@b.com")).unwrap();
            controller.set_field_value("Password", FieldValue::text("abcdefghij")).unwrap();
            controller
                .set_field_value("ConfirmPassword", FieldValue::text("xyz"))
                .unwrap();

            let outcome = controller.submit(&succeeding_effect(0)).await;

            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert_eq!(
                controller.errors(),
                &FieldErrors::from([("ConfirmPassword", vec!["Passwords do not match"])])
            );
        }
    }

    mod failure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_failed_effect_releases_guard_and_surfaces_error() {
            let mut controller = FormController::<RegistrationForm>::new();
            fill_registration(&mut controller);

            let mut effect = MockSubmitEffect::new();
            effect
                .expect_submit()
                .times(1)
                .returning(|_| Err(SubmitError::Rejected("offline".to_string())));

            let outcome = controller.submit(&effect).await;

            assert_eq!(
                outcome,
                SubmitOutcome::Failed("Submission failed: submission rejected: offline".to_string())
            );
            assert!(!controller.is_submitting());
            assert_eq!(
                controller.submit_error(),
                Some("Submission failed: submission rejected: offline")
            );
            assert!(controller.errors().is_empty());
            assert_eq!(controller.record(), &RegistrationForm::schema().empty_record());
        }

        #[test]
        fn test_next_accepted_submit_clears_submit_error() {
            let mut controller = FormController::<SignupForm>::new();
            controller.finish_submit(&Err(SubmitError::Interrupted));
            assert!(controller.submit_error().is_some());

            controller.set_field_value("email", FieldValue::text("a@b.com")).unwrap();
            controller.set_field_value("Password", FieldValue::text("abcdefghij")).unwrap();
            controller
                .set_field_value("ConfirmPassword", FieldValue::text("abcdefghij"))
                .unwrap();
            assert!(matches!(controller.begin_submit(), SubmitStart::Ready(_)));
            assert!(controller.submit_error().is_none());
        }

        #[test]
        fn test_submit_after_failed_reset_is_rejected() {
            let mut controller = FormController::<SignupForm>::new();
            controller.finish_submit(&Err(SubmitError::Interrupted));
            let effect = succeeding_effect(0);
            let outcome = tokio_test::block_on(controller.submit(&effect));
            // record was reset by the failure, so validation rejects it
            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert!(!controller.is_submitting());
        }

        #[test]
        fn test_validation_reject_clears_stale_submit_error() {
            let mut controller = FormController::<SignupForm>::new();
            controller.finish_submit(&Err(SubmitError::Rejected("offline".to_string())));
            assert!(controller.submit_error().is_some());

            assert_eq!(controller.begin_submit(), SubmitStart::Rejected);

            assert!(controller.submit_error().is_none());
            assert_eq!(
                controller.errors().fields().collect::<Vec<_>>(),
                vec!["Password", "email"]
            );
        }

        #[test]
        fn test_conversion_failure_is_distinct_from_rejection() {
            let mut controller = FormController::<UnconvertibleSignup>::new();
            assert_eq!(controller.begin_submit(), SubmitStart::Rejected);
            assert!(!controller.errors().is_empty());

            fill_signup(&mut controller);
            let start = controller.begin_submit();

            let message = "Submission failed: unknown field `nickname`";
            assert_eq!(start, SubmitStart::Failed(message.to_string()));
            assert_eq!(controller.submit_error(), Some(message));
            assert!(controller.errors().is_empty());
            assert!(!controller.is_submitting());
        }

        #[tokio::test]
        async fn test_conversion_failure_skips_effect() {
            let mut controller = FormController::<UnconvertibleSignup>::new();
            fill_signup(&mut controller);

            let outcome = controller.submit(&succeeding_effect(0)).await;

            assert!(matches!(outcome, SubmitOutcome::Failed(_)));
            assert!(!controller.is_submitting());
        }
    }
}
