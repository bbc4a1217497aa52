use anyhow::Context;
use folio_auth_impl::{AuthServiceConfig, AuthServiceImpl};
use folio_config::Config;
use folio_core_contact_impl::{ContactConfigServiceImpl, ContactForm, ContactFormValidatorImpl};
use folio_core_inbox_impl::MessageTriageImpl;
use folio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use folio_models::auth::AdminUsername;

pub type ContactApi = ContactApiServiceImpl;
pub type ContactConfigService = ContactConfigServiceImpl<ContactApi>;
pub type ContactFormValidator = ContactFormValidatorImpl;
pub type Form = ContactForm<ContactConfigService, ContactFormValidator, ContactApi>;

pub type Auth = AuthServiceImpl;
pub type MessageTriage = MessageTriageImpl;

/// Builds the concrete services from the configuration.
#[derive(Debug)]
pub struct Environment {
    config: Config,
}

impl Environment {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn contact_api(&self) -> anyhow::Result<ContactApi> {
        ContactApiServiceImpl::new(ContactApiServiceConfig::new(
            self.config.api.base_url.clone(),
            *self.config.api.timeout,
        ))
        .context("Failed to create contact api client")
    }

    pub fn contact_config_service(&self) -> anyhow::Result<ContactConfigService> {
        Ok(ContactConfigServiceImpl::new(self.contact_api()?))
    }

    pub fn contact_form(&self) -> anyhow::Result<Form> {
        let api = self.contact_api()?;
        Ok(ContactForm::new(
            ContactConfigServiceImpl::new(api.clone()),
            ContactFormValidatorImpl {
                mode: self.config.contact.validation,
            },
            api,
        ))
    }

    pub fn auth(&self) -> anyhow::Result<Auth> {
        let username = AdminUsername::try_new(self.config.admin.username.as_str())
            .context("Invalid admin username")?;
        Ok(AuthServiceImpl::new(AuthServiceConfig {
            username,
            password_hash: self.config.admin.password_sha256,
        }))
    }

    pub fn message_triage(&self) -> MessageTriage {
        MessageTriageImpl::default()
    }
}
