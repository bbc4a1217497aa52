use std::{sync::Arc, time::Duration};

use anyhow::Context;
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::contact::{
    ContactField, ContactFormConfig, ContactSubmission, RequiredFields, SubmissionId,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{envelope::Envelope, http::HttpClient};

const CONFIG_PATH: &str = "config/";
const CREATE_MESSAGE_PATH: &str = "messages/create/";

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    base_url: Arc<Url>,
    timeout: Duration,
}

impl ContactApiServiceConfig {
    pub fn new(mut base_url: Url, timeout: Duration) -> Self {
        // endpoint paths are joined relative to the base url
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(config.timeout)?;
        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.config
            .base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for {path:?}"))
    }
}

impl ContactApiService for ContactApiServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn fetch_config(&self) -> anyhow::Result<ContactApiResponse<ContactFormConfig>> {
        let response = self
            .http
            .get(self.endpoint(CONFIG_PATH)?)
            .send()
            .await
            .context("Failed to send config request")?
            .json::<Envelope<ConfigData>>()
            .await
            .context("Failed to deserialize config response")?
            .into_response()
            .context("Malformed config response")?;

        match response {
            ContactApiResponse::Success(data) => data
                .try_into()
                .map(ContactApiResponse::Success)
                .context("Invalid contact form configuration"),
            ContactApiResponse::Error(error) => Ok(ContactApiResponse::Error(error)),
        }
    }

    #[tracing::instrument(skip(self, submission))]
    async fn create_message(
        &self,
        submission: ContactSubmission,
    ) -> anyhow::Result<ContactApiResponse<SubmissionId>> {
        // error envelopes come with 4xx/5xx status codes, so the status is
        // not checked and the body is decoded either way
        self.http
            .post(self.endpoint(CREATE_MESSAGE_PATH)?)
            .json(&CreateMessageRequest::from(&submission))
            .send()
            .await
            .context("Failed to send create message request")?
            .json::<Envelope<CreatedMessage>>()
            .await
            .context("Failed to deserialize create message response")?
            .into_response()
            .map(|response| response.map(|created| created.id))
            .context("Malformed create message response")
    }
}

#[derive(Deserialize)]
struct ConfigData {
    is_enabled: bool,
    required_fields: RequiredFieldsData,
    categories: Vec<String>,
    #[serde(default)]
    recaptcha_enabled: bool,
    #[serde(default)]
    recaptcha_site_key: String,
}

#[derive(Deserialize)]
struct RequiredFieldsData {
    name: bool,
    email: bool,
    phone: bool,
    company: bool,
    subject: bool,
}

impl TryFrom<ConfigData> for ContactFormConfig {
    type Error = anyhow::Error;

    fn try_from(value: ConfigData) -> Result<Self, Self::Error> {
        let RequiredFieldsData {
            name,
            email,
            phone,
            company,
            subject,
        } = value.required_fields;

        let required_fields = RequiredFields::new(
            [
                (ContactField::Name, name),
                (ContactField::Email, email),
                (ContactField::Phone, phone),
                (ContactField::Company, company),
                (ContactField::Subject, subject),
            ]
            .into_iter()
            .filter_map(|(field, required)| required.then_some(field)),
        )?;

        Ok(Self {
            is_enabled: value.is_enabled,
            required_fields,
            categories: value.categories,
            challenge_enabled: value.recaptcha_enabled,
            challenge_key: value.recaptcha_site_key,
        })
    }
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    subject: &'a str,
    message: &'a str,
    category: &'a str,
    consent_given: bool,
    newsletter_subscribed: bool,
}

impl<'a> From<&'a ContactSubmission> for CreateMessageRequest<'a> {
    fn from(value: &'a ContactSubmission) -> Self {
        Self {
            name: &value.name,
            email: &value.email,
            phone: &value.phone,
            company: &value.company,
            subject: &value.subject,
            message: &value.message,
            category: &value.category,
            consent_given: value.consent_given,
            newsletter_subscribed: value.newsletter_subscribed,
        }
    }
}

#[derive(Deserialize)]
struct CreatedMessage {
    id: SubmissionId,
}
