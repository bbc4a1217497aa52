use folio_models::contact::{ContactFormConfig, ContactSubmission, ValidationResult};

/// Checks a submission against the form configuration before anything is
/// sent.
///
/// Implementations are pure: no I/O, and the same inputs always give the
/// same result. The full list of violations is computed, in field order, so
/// the caller can choose to show one or all of them.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormValidator: Send + Sync + 'static {
    fn validate(
        &self,
        submission: &ContactSubmission,
        config: &ContactFormConfig,
    ) -> ValidationResult;
}

#[cfg(feature = "mock")]
impl MockContactFormValidator {
    pub fn with_validate(
        mut self,
        submission: ContactSubmission,
        config: ContactFormConfig,
        result: ValidationResult,
    ) -> Self {
        self.expect_validate()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(config),
            )
            .return_const(result);
        self
    }
}
