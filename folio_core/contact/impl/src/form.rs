use std::sync::Arc;

use folio_core_contact_contracts::{
    config::{ContactConfigError, ContactConfigService},
    form::{ContactFormError, FormAvailability},
    validator::ContactFormValidator,
};
use folio_extern_contracts::contact::ContactApiService;
use folio_models::contact::{ContactFormConfig, ContactSubmission, SubmissionId};
use tracing::debug;

use crate::submission::ContactSubmissionClient;

/// One visitor facing contact form: the draft being edited plus the
/// configuration snapshot it is validated against.
#[derive(Debug)]
pub struct ContactForm<Config, Validator, Api> {
    config_service: Config,
    validator: Validator,
    client: ContactSubmissionClient<Api>,
    config: ConfigState,
    draft: ContactSubmission,
}

#[derive(Debug, Clone)]
enum ConfigState {
    NotLoaded,
    Unavailable,
    Loaded(Arc<ContactFormConfig>),
}

impl<Config, Validator, Api> ContactForm<Config, Validator, Api>
where
    Config: ContactConfigService,
    Validator: ContactFormValidator,
    Api: ContactApiService,
{
    pub fn new(config_service: Config, validator: Validator, api: Api) -> Self {
        Self {
            config_service,
            validator,
            client: ContactSubmissionClient::new(api),
            config: ConfigState::NotLoaded,
            draft: ContactSubmission::default(),
        }
    }

    /// Obtains the configuration for this form.
    ///
    /// The form is only updated once the configuration has arrived. Dropping
    /// the returned future before that leaves the form untouched.
    pub async fn load_config(&mut self) -> Result<Arc<ContactFormConfig>, ContactConfigError> {
        let result = self.config_service.load().await;
        self.config = match &result {
            Ok(config) => ConfigState::Loaded(Arc::clone(config)),
            Err(_) => ConfigState::Unavailable,
        };
        result
    }

    pub fn config(&self) -> Option<&ContactFormConfig> {
        match &self.config {
            ConfigState::Loaded(config) => Some(config),
            ConfigState::NotLoaded | ConfigState::Unavailable => None,
        }
    }

    pub fn availability(&self) -> FormAvailability {
        match &self.config {
            ConfigState::NotLoaded => FormAvailability::NotLoaded,
            ConfigState::Unavailable => FormAvailability::Unavailable,
            ConfigState::Loaded(config) if config.is_enabled => FormAvailability::Enabled,
            ConfigState::Loaded(_) => FormAvailability::Disabled,
        }
    }

    pub fn draft(&self) -> &ContactSubmission {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ContactSubmission {
        &mut self.draft
    }

    /// Restores the initial draft.
    pub fn reset(&mut self) {
        self.draft = ContactSubmission::default();
    }

    pub fn is_submitting(&self) -> bool {
        self.client.is_in_flight()
    }

    /// Validates the draft and, if it is valid, sends it.
    ///
    /// Nothing is sent unless the configuration is loaded, enables the form
    /// and accepts the draft. On success the draft is reset, on any error it
    /// is kept as is.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<SubmissionId, ContactFormError> {
        let config = match &self.config {
            ConfigState::Loaded(config) => Arc::clone(config),
            ConfigState::NotLoaded | ConfigState::Unavailable => {
                return Err(ContactFormError::Unavailable)
            }
        };
        if !config.is_enabled {
            return Err(ContactFormError::Disabled);
        }

        if let Err(violations) = self.validator.validate(&self.draft, &config).into_result() {
            debug!(count = violations.len(), "Draft rejected by local validation");
            return Err(ContactFormError::Invalid(violations));
        }

        let id = self.client.submit(self.draft.clone())?.await?;

        self.reset();
        Ok(id)
    }
}
