use anyhow::bail;
use clap::Args;
use folio_core_contact_contracts::{
    config::ContactConfigService, form::ContactFormError, validator::ContactFormValidator,
};
use folio_core_contact_impl::ContactForm;
use folio_extern_contracts::contact::ContactApiService;
use folio_models::contact::{ContactSubmission, SubmissionId, DEFAULT_CATEGORY};
use tracing::{info, warn};

use crate::environment::Environment;

#[derive(Debug, Args)]
pub struct SendArgs {
    /// The message to send
    #[arg(short, long)]
    message: String,
    #[arg(short, long, default_value = "")]
    name: String,
    #[arg(short, long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    category: String,
    /// Do not consent to the processing of the message
    #[arg(long)]
    no_consent: bool,
    /// Subscribe to the newsletter
    #[arg(long)]
    newsletter: bool,
}

impl SendArgs {
    pub async fn invoke(self, env: Environment) -> anyhow::Result<()> {
        let report = env.config().contact.report;
        let mut form = env.contact_form()?;

        match self.send(&mut form).await {
            Ok(id) => {
                info!(%id, "Contact message sent");
                println!("Message sent! Thanks for reaching out. I'll get back to you soon.");
                println!("{id}");
                Ok(())
            }
            Err(err) => {
                warn!("Contact message not sent: {err}");
                for line in err.feedback(report) {
                    eprintln!("{line}");
                }
                bail!("Failed to send message");
            }
        }
    }

    async fn send<Config, Validator, Api>(
        self,
        form: &mut ContactForm<Config, Validator, Api>,
    ) -> Result<SubmissionId, ContactFormError>
    where
        Config: ContactConfigService,
        Validator: ContactFormValidator,
        Api: ContactApiService,
    {
        form.load_config().await?;
        *form.draft_mut() = self.into();
        form.submit().await
    }
}

impl From<SendArgs> for ContactSubmission {
    fn from(value: SendArgs) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            company: value.company,
            subject: value.subject,
            message: value.message,
            category: value.category,
            consent_given: !value.no_consent,
            newsletter_subscribed: value.newsletter,
        }
    }
}
