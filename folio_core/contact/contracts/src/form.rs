use folio_models::contact::{ViolationReport, Violations};
use thiserror::Error;

use crate::{
    config::ContactConfigError,
    submission::{SubmissionError, SubmissionInProgress},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAvailability {
    /// No configuration has been requested yet.
    NotLoaded,
    /// The last configuration request failed.
    Unavailable,
    /// The configuration switches the form off.
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("The contact form is currently unavailable. Please try again later.")]
    Unavailable,
    #[error("The contact form is currently disabled. Please try again later.")]
    Disabled,
    #[error("{0}")]
    Invalid(Violations),
    #[error(transparent)]
    InProgress(#[from] SubmissionInProgress),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl From<ContactConfigError> for ContactFormError {
    fn from(value: ContactConfigError) -> Self {
        match value {
            ContactConfigError::Unavailable => Self::Unavailable,
        }
    }
}

impl ContactFormError {
    /// Lines to show to the visitor.
    pub fn feedback(&self, report: ViolationReport) -> Vec<String> {
        match self {
            Self::Invalid(violations) => violations.describe(report),
            err => vec![err.to_string()],
        }
    }
}
