use std::future::Future;

use folio_models::auth::{AdminCredentials, AdminSession};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AuthService: Send + Sync + 'static {
    /// Checks the given credentials and opens an admin session.
    fn authenticate(
        &self,
        credentials: AdminCredentials,
    ) -> impl Future<Output = Result<AdminSession, AuthenticateError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthenticateError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
}

#[cfg(feature = "mock")]
impl MockAuthService {
    pub fn with_authenticate(
        mut self,
        credentials: AdminCredentials,
        result: Result<AdminSession, AuthenticateError>,
    ) -> Self {
        self.expect_authenticate()
            .once()
            .with(mockall::predicate::eq(credentials))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
