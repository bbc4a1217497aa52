use std::{collections::BTreeSet, fmt};

use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category preselected in a fresh contact form.
pub const DEFAULT_CATEGORY: &str = "general";

/// An input of the contact form.
///
/// The declaration order is the order in which violations are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Company,
    Subject,
    Message,
    Category,
    Consent,
}

impl ContactField {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Company,
        Self::Subject,
        Self::Message,
        Self::Category,
        Self::Consent,
    ];

    /// Fields whose presence requirement is controlled by the remote
    /// configuration.
    pub const CONFIGURABLE: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Company,
        Self::Subject,
    ];

    pub fn is_configurable(self) -> bool {
        Self::CONFIGURABLE.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Category => "category",
            Self::Consent => "consent",
        }
    }

    /// Human readable label, as shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Company => "Company",
            Self::Subject => "Subject",
            Self::Message => "Message",
            Self::Category => "Category",
            Self::Consent => "Consent",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of [`ContactField::CONFIGURABLE`] a deployment marks as
/// mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFields(BTreeSet<ContactField>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("The {0} field cannot be configured as required.")]
pub struct NotConfigurableError(pub ContactField);

impl RequiredFields {
    pub fn new(
        fields: impl IntoIterator<Item = ContactField>,
    ) -> Result<Self, NotConfigurableError> {
        fields
            .into_iter()
            .map(|field| {
                field
                    .is_configurable()
                    .then_some(field)
                    .ok_or(NotConfigurableError(field))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.iter().copied()
    }
}

/// Server controlled behaviour of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormConfig {
    pub is_enabled: bool,
    pub required_fields: RequiredFields,
    /// Selectable categories. An empty list hides the category selector.
    pub categories: Vec<String>,
    pub challenge_enabled: bool,
    pub challenge_key: String,
}

/// One contact attempt, as entered by the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub subject: String,
    pub message: String,
    pub category: String,
    pub consent_given: bool,
    pub newsletter_subscribed: bool,
}

impl Default for ContactSubmission {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            subject: String::new(),
            message: String::new(),
            category: DEFAULT_CATEGORY.into(),
            consent_given: true,
            newsletter_subscribed: false,
        }
    }
}

impl ContactSubmission {
    /// Returns the free text value of `field`, or `None` for inputs that are
    /// not free text (category and consent).
    pub fn text(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => Some(&self.name),
            ContactField::Email => Some(&self.email),
            ContactField::Phone => Some(&self.phone),
            ContactField::Company => Some(&self.company),
            ContactField::Subject => Some(&self.subject),
            ContactField::Message => Some(&self.message),
            ContactField::Category | ContactField::Consent => None,
        }
    }
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 128),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        TryFrom,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct SubmissionId(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationReason {
    Missing,
    InvalidCategory,
    ConsentRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub field: ContactField,
    pub reason: ViolationReason,
}

impl Violation {
    pub fn new(field: ContactField, reason: ViolationReason) -> Self {
        Self { field, reason }
    }

    pub fn message(&self) -> String {
        match self.reason {
            ViolationReason::Missing => format!("{} is required", self.field.label()),
            ViolationReason::InvalidCategory => {
                "Please choose one of the available categories".into()
            }
            ViolationReason::ConsentRequired => {
                "Consent is required to process your message".into()
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// How many violations the presentation layer shows at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReport {
    #[default]
    First,
    All,
}

/// Which fields the validator treats as mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Mandatory fields come from [`ContactFormConfig::required_fields`].
    #[default]
    Configured,
    /// Name, email and message are always mandatory and the configured set
    /// is ignored.
    Universal,
}

/// A non-empty, ordered list of violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self(violations))
    }

    pub fn first(&self) -> &Violation {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Renders the violations the way `report` asks for.
    pub fn describe(&self, report: ViolationReport) -> Vec<String> {
        match report {
            ViolationReport::First => vec![self.first().message()],
            ViolationReport::All => self.0.iter().map(Violation::message).collect(),
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.first().fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Violations),
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Violations::new(violations).map_or(Self::Valid, Self::Invalid)
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Valid => None,
            Self::Invalid(violations) => Some(violations),
        }
    }

    pub fn into_result(self) -> Result<(), Violations> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(violations) => Err(violations),
        }
    }
}

/// Field level reasons the backend gave for rejecting a submission, in the
/// order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFieldErrors(Vec<(String, Vec<String>)>);

impl ServerFieldErrors {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, reasons)| (field.as_str(), reasons.as_slice()))
    }

    /// The first reason of the first field that has one.
    pub fn first_reason(&self) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(_, reasons)| reasons.first())
            .map(String::as_str)
    }
}
