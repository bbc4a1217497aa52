use std::{future::Future, sync::Arc};

use folio_models::contact::ContactFormConfig;
use thiserror::Error;

/// Process wide owner of the remote contact form configuration.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactConfigService: Send + Sync + 'static {
    /// Returns the cached configuration, fetching it first if the cache is
    /// empty.
    ///
    /// Callers arriving while a fetch is outstanding wait for that fetch
    /// instead of starting another one. A failed fetch leaves the cache
    /// empty.
    fn load(
        &self,
    ) -> impl Future<Output = Result<Arc<ContactFormConfig>, ContactConfigError>> + Send;

    /// Drops the cached configuration and fetches it again.
    fn refresh(
        &self,
    ) -> impl Future<Output = Result<Arc<ContactFormConfig>, ContactConfigError>> + Send;

    /// Returns the cached configuration without fetching.
    fn cached(&self) -> Option<Arc<ContactFormConfig>>;

    /// Empties the cache. A fetch that is still outstanding will not install
    /// its result.
    fn invalidate(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactConfigError {
    #[error("The contact form is currently unavailable. Please try again later.")]
    Unavailable,
}

#[cfg(feature = "mock")]
impl MockContactConfigService {
    pub fn with_load(mut self, result: Result<Arc<ContactFormConfig>, ContactConfigError>) -> Self {
        self.expect_load()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
