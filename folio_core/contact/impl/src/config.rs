use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};

use folio_core_contact_contracts::config::{ContactConfigError, ContactConfigService};
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::contact::ContactFormConfig;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ContactConfigServiceImpl<Api> {
    api: Api,
    state: Arc<State>,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<Arc<ContactFormConfig>>>,
    /// Held while a fetch is outstanding.
    fetch: Mutex<()>,
    /// Incremented on every invalidation.
    generation: AtomicU64,
    /// Incremented whenever a fetch finishes, successful or not.
    completed_fetches: AtomicU64,
}

impl<Api> ContactConfigServiceImpl<Api> {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            state: Default::default(),
        }
    }
}

impl<Api> ContactConfigService for ContactConfigServiceImpl<Api>
where
    Api: ContactApiService,
{
    #[tracing::instrument(skip(self))]
    async fn load(&self) -> Result<Arc<ContactFormConfig>, ContactConfigError> {
        let completed_fetches = self.state.completed_fetches.load(Ordering::SeqCst);
        if let Some(config) = self.cached() {
            return Ok(config);
        }

        let _fetch_guard = self.state.fetch.lock().await;
        if let Some(config) = self.cached() {
            return Ok(config);
        }
        // the fetch this caller waited for finished without filling the cache
        if self.state.completed_fetches.load(Ordering::SeqCst) != completed_fetches {
            return Err(ContactConfigError::Unavailable);
        }

        let generation = self.state.generation.load(Ordering::SeqCst);
        let result = self.api.fetch_config().await;
        self.state.completed_fetches.fetch_add(1, Ordering::SeqCst);

        let config = match result {
            Ok(ContactApiResponse::Success(config)) => Arc::new(config),
            Ok(ContactApiResponse::Error(err)) => {
                warn!(
                    code = %err.code,
                    "Contact backend refused to provide the form configuration: {}", err.message
                );
                return Err(ContactConfigError::Unavailable);
            }
            Err(err) => {
                warn!("Failed to fetch contact form configuration: {err:#}");
                return Err(ContactConfigError::Unavailable);
            }
        };

        let mut cache = self
            .state
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if self.state.generation.load(Ordering::SeqCst) == generation {
            info!(
                is_enabled = config.is_enabled,
                "Loaded contact form configuration"
            );
            *cache = Some(Arc::clone(&config));
        } else {
            debug!("Configuration was invalidated during the fetch, not caching it");
        }

        Ok(config)
    }

    async fn refresh(&self) -> Result<Arc<ContactFormConfig>, ContactConfigError> {
        self.invalidate();
        self.load().await
    }

    fn cached(&self) -> Option<Arc<ContactFormConfig>> {
        self.state
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn invalidate(&self) {
        let mut cache = self
            .state
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.state.generation.fetch_add(1, Ordering::SeqCst);
        *cache = None;
    }
}
