use std::{
    future::Future,
    sync::atomic::{AtomicBool, Ordering},
};

use folio_core_contact_contracts::submission::{SubmissionError, SubmissionInProgress};
use folio_extern_contracts::contact::{ContactApiError, ContactApiResponse, ContactApiService};
use folio_models::contact::{ContactSubmission, SubmissionId};
use tracing::{info, warn};

pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const FORM_DISABLED: &str = "FORM_DISABLED";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Sends contact submissions, at most one at a time.
#[derive(Debug)]
pub struct ContactSubmissionClient<Api> {
    api: Api,
    in_flight: AtomicBool,
}

impl<Api> ContactSubmissionClient<Api>
where
    Api: ContactApiService,
{
    pub fn new(api: Api) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Claims the client and returns the exchange to await.
    ///
    /// The claim happens before this function returns, so a second call
    /// fails with [`SubmissionInProgress`] until the returned future has
    /// completed or has been dropped. The submission must already have
    /// passed validation against an enabled configuration.
    pub fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<
        impl Future<Output = Result<SubmissionId, SubmissionError>> + Send + '_,
        SubmissionInProgress,
    > {
        let guard = InFlightGuard::acquire(&self.in_flight)?;

        Ok(async move {
            let _guard = guard;
            self.send(submission).await
        })
    }

    #[tracing::instrument(skip_all)]
    async fn send(&self, submission: ContactSubmission) -> Result<SubmissionId, SubmissionError> {
        match self.api.create_message(submission).await {
            Ok(ContactApiResponse::Success(id)) => {
                info!(%id, "Contact message accepted");
                Ok(id)
            }
            Ok(ContactApiResponse::Error(err)) => {
                info!(code = %err.code, "Contact message rejected: {}", err.message);
                Err(submission_error(err))
            }
            Err(err) => {
                warn!("Failed to send contact message: {err:#}");
                Err(SubmissionError::TransportFailure)
            }
        }
    }
}

fn submission_error(err: ContactApiError) -> SubmissionError {
    match err.code.as_str() {
        RATE_LIMITED => SubmissionError::RateLimited,
        FORM_DISABLED => SubmissionError::FormDisabled,
        VALIDATION_ERROR => SubmissionError::ServerValidation(err.details),
        _ => SubmissionError::Unknown {
            code: err.code,
            message: err.message,
        },
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SubmissionInProgress> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| Self(flag))
            .map_err(|_| SubmissionInProgress)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
