pub use config::ContactConfigServiceImpl;
pub use form::ContactForm;
pub use submission::ContactSubmissionClient;
pub use validator::ContactFormValidatorImpl;

pub mod config;
pub mod form;
pub mod submission;
pub mod validator;
