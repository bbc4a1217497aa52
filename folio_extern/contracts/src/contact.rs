use std::future::Future;

use folio_models::contact::{
    ContactFormConfig, ContactSubmission, ServerFieldErrors, SubmissionId,
};

/// Client for the contact backend.
///
/// `Err` means the exchange itself failed: the request could not be sent,
/// timed out, or the response body was not a well-formed envelope. A
/// well-formed envelope, even one reporting an error, is `Ok`.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Fetches the contact form configuration.
    fn fetch_config(
        &self,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse<ContactFormConfig>>> + Send;

    /// Sends a contact message. Issues exactly one request and never
    /// retries.
    fn create_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse<SubmissionId>>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactApiResponse<T> {
    Success(T),
    Error(ContactApiError),
}

impl<T> ContactApiResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ContactApiResponse<U> {
        match self {
            Self::Success(data) => ContactApiResponse::Success(f(data)),
            Self::Error(error) => ContactApiResponse::Error(error),
        }
    }
}

/// The `error` object of an error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiError {
    pub code: String,
    pub message: String,
    pub details: ServerFieldErrors,
}

impl ContactApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: ServerFieldErrors::default(),
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_fetch_config(
        mut self,
        result: anyhow::Result<ContactApiResponse<ContactFormConfig>>,
    ) -> Self {
        self.expect_fetch_config()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_create_message(
        mut self,
        submission: ContactSubmission,
        result: anyhow::Result<ContactApiResponse<SubmissionId>>,
    ) -> Self {
        self.expect_create_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
