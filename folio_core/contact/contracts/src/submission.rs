use folio_models::contact::ServerFieldErrors;
use thiserror::Error;

/// Why the backend did not accept a submission.
///
/// The set is closed: every backend answer and every failed exchange maps to
/// exactly one variant. The `Display` texts are meant for the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Too many contact attempts. Please try again later.")]
    RateLimited,
    #[error("Contact form is currently disabled. Please try again later.")]
    FormDisabled,
    #[error("{}", .0.first_reason().unwrap_or("Please check your input and try again."))]
    ServerValidation(ServerFieldErrors),
    #[error("Could not reach the server. Please check your connection and try again.")]
    TransportFailure,
    /// The backend answered with an error code this client does not know.
    #[error("Failed to send message. Please try again.")]
    Unknown { code: String, message: String },
}

impl SubmissionError {
    /// Whether sending the same submission again may succeed right away.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportFailure | Self::Unknown { .. })
    }
}

/// Returned instead of starting a second exchange while one is still
/// outstanding for the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Your message is already being sent.")]
pub struct SubmissionInProgress;
