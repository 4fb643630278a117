//! Trait abstraction for the submit effect to enable mocking in tests

use crate::forms::{Signup, UserRegistration};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A typed record handed to the submit effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Submission {
    Registration(UserRegistration),
    Signup(Signup),
}

impl Submission {
    pub fn form_name(&self) -> &'static str {
        match self {
            Self::Registration(_) => "registration",
            Self::Signup(_) => "signup",
        }
    }
}

impl From<UserRegistration> for Submission {
    fn from(value: UserRegistration) -> Self {
        Self::Registration(value)
    }
}

impl From<Signup> for Submission {
    fn from(value: Signup) -> Self {
        Self::Signup(value)
    }
}

/// Acknowledgement returned by a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }

    /// First eight characters of the id, for status lines
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("submission interrupted before completing")]
    Interrupted,
}

/// The external effect performed with an accepted record
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitEffect: Send + Sync {
    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, SubmitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_is_eight_chars() {
        let receipt = SubmissionReceipt::new();
        assert_eq!(receipt.short_id().len(), 8);
        assert!(receipt.id.to_string().starts_with(&receipt.short_id()));
    }

    #[test]
    fn test_submission_serializes_with_form_tag() {
        let submission = Submission::from(Signup {
            email: "a@b.com".to_string(),
            password: "abcdefghij".to_string(),
        });
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["form"], "signup");
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("password").is_none());
        assert_eq!(submission.form_name(), "signup");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SubmitError::Rejected("offline".into()).to_string(),
            "submission rejected: offline"
        );
        assert_eq!(
            SubmitError::Interrupted.to_string(),
            "submission interrupted before completing"
        );
    }
}
