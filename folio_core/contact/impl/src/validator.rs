use folio_core_contact_contracts::validator::ContactFormValidator;
use folio_models::contact::{
    ContactField, ContactFormConfig, ContactSubmission, ValidationMode, ValidationResult,
    Violation, ViolationReason,
};
use folio_utils::Blank;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFormValidatorImpl {
    pub mode: ValidationMode,
}

/// What is checked for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// The text value must not be blank.
    Required(Presence),
    /// If the configuration lists categories, the value must be one of them.
    AllowedCategory,
    /// Consent must have been given.
    Consent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Always,
    /// Required iff the configuration says so.
    Configured,
    Optional,
}

impl ContactFormValidatorImpl {
    fn rule(&self, field: ContactField) -> Rule {
        match (field, self.mode) {
            (ContactField::Category, _) => Rule::AllowedCategory,
            (ContactField::Consent, _) => Rule::Consent,
            (ContactField::Message, _) => Rule::Required(Presence::Always),
            (ContactField::Name | ContactField::Email, ValidationMode::Universal) => {
                Rule::Required(Presence::Always)
            }
            (_, ValidationMode::Universal) => Rule::Required(Presence::Optional),
            (_, ValidationMode::Configured) => Rule::Required(Presence::Configured),
        }
    }
}

impl ContactFormValidator for ContactFormValidatorImpl {
    fn validate(
        &self,
        submission: &ContactSubmission,
        config: &ContactFormConfig,
    ) -> ValidationResult {
        let violations = ContactField::ALL
            .into_iter()
            .filter_map(|field| {
                check(self.rule(field), field, submission, config)
                    .map(|reason| Violation::new(field, reason))
            })
            .collect();

        ValidationResult::from_violations(violations)
    }
}

fn check(
    rule: Rule,
    field: ContactField,
    submission: &ContactSubmission,
    config: &ContactFormConfig,
) -> Option<ViolationReason> {
    let violated = match rule {
        Rule::Required(presence) => {
            let required = match presence {
                Presence::Always => true,
                Presence::Configured => config.required_fields.contains(field),
                Presence::Optional => false,
            };
            required && submission.text(field).map_or(true, |text| text.is_blank())
        }
        Rule::AllowedCategory => {
            !config.categories.is_empty() && !config.categories.contains(&submission.category)
        }
        Rule::Consent => !submission.consent_given,
    };

    violated.then_some(match rule {
        Rule::Required(_) => ViolationReason::Missing,
        Rule::AllowedCategory => ViolationReason::InvalidCategory,
        Rule::Consent => ViolationReason::ConsentRequired,
    })
}

#[cfg(test)]
mod tests {
    use folio_models::contact::{RequiredFields, ViolationReport, Violations};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn valid() {
        // Arrange
        let sut = ContactFormValidatorImpl::default();

        // Act
        let result = sut.validate(&complete_submission(), &config([ContactField::Name]));

        // Assert
        assert_eq!(result, ValidationResult::Valid);
    }

    #[test]
    fn missing_required_email() {
        // Arrange
        let sut = ContactFormValidatorImpl::default();
        let submission = ContactSubmission {
            name: "A".into(),
            email: String::new(),
            message: "Hi".into(),
            ..Default::default()
        };

        // Act
        let result = sut.validate(&submission, &config([ContactField::Email]));

        // Assert
        assert_eq!(
            result,
            invalid([(ContactField::Email, ViolationReason::Missing)])
        );
    }

    #[test]
    fn all_violations_in_field_order() {
        // Arrange
        let sut = ContactFormValidatorImpl::default();
        let submission = ContactSubmission {
            name: "  ".into(),
            subject: "\t".into(),
            category: "spam".into(),
            consent_given: false,
            ..Default::default()
        };

        // Act
        let result = sut.validate(
            &submission,
            &config([ContactField::Subject, ContactField::Name, ContactField::Phone]),
        );

        // Assert
        assert_eq!(
            result,
            invalid([
                (ContactField::Name, ViolationReason::Missing),
                (ContactField::Phone, ViolationReason::Missing),
                (ContactField::Subject, ViolationReason::Missing),
                (ContactField::Message, ViolationReason::Missing),
                (ContactField::Category, ViolationReason::InvalidCategory),
                (ContactField::Consent, ViolationReason::ConsentRequired),
            ])
        );
        let violations = result.violations().unwrap();
        assert_eq!(
            violations.describe(ViolationReport::First),
            ["Name is required"]
        );
        assert_eq!(violations.describe(ViolationReport::All).len(), 6);
    }

    #[test]
    fn degenerate_config() {
        // Arrange
        let sut = ContactFormValidatorImpl::default();
        let config = ContactFormConfig {
            categories: Vec::new(),
            ..config([])
        };
        let submission = ContactSubmission {
            message: "Hi".into(),
            category: "anything".into(),
            ..Default::default()
        };

        // Act
        let result = sut.validate(&submission, &config);

        // Assert
        assert_eq!(result, ValidationResult::Valid);
    }

    #[test]
    fn idempotent() {
        let sut = ContactFormValidatorImpl::default();
        let submission = ContactSubmission {
            consent_given: false,
            ..Default::default()
        };
        let config = config([ContactField::Company]);

        assert_eq!(
            sut.validate(&submission, &config),
            sut.validate(&submission, &config)
        );
    }

    #[test]
    fn universal_ignores_configured_fields() {
        // Arrange
        let sut = ContactFormValidatorImpl {
            mode: ValidationMode::Universal,
        };
        let submission = ContactSubmission {
            message: "Hi".into(),
            ..Default::default()
        };

        // Act
        let result = sut.validate(
            &submission,
            &config([ContactField::Phone, ContactField::Subject]),
        );

        // Assert
        assert_eq!(
            result,
            invalid([
                (ContactField::Name, ViolationReason::Missing),
                (ContactField::Email, ViolationReason::Missing),
            ])
        );
    }

    #[test]
    fn universal_still_checks_category_and_consent() {
        let sut = ContactFormValidatorImpl {
            mode: ValidationMode::Universal,
        };
        let submission = ContactSubmission {
            category: "spam".into(),
            consent_given: false,
            ..complete_submission()
        };

        let result = sut.validate(&submission, &config([]));

        assert_eq!(
            result,
            invalid([
                (ContactField::Category, ViolationReason::InvalidCategory),
                (ContactField::Consent, ViolationReason::ConsentRequired),
            ])
        );
    }

    fn config<const N: usize>(required: [ContactField; N]) -> ContactFormConfig {
        ContactFormConfig {
            is_enabled: true,
            required_fields: RequiredFields::new(required).unwrap(),
            categories: vec!["general".into(), "consulting".into()],
            challenge_enabled: false,
            challenge_key: String::new(),
        }
    }

    fn complete_submission() -> ContactSubmission {
        ContactSubmission {
            name: "Max Mustermann".into(),
            email: "max@example.com".into(),
            phone: "+49 123".into(),
            company: "ACME".into(),
            subject: "Hello".into(),
            message: "Hello World!".into(),
            ..Default::default()
        }
    }

    fn invalid<const N: usize>(
        violations: [(ContactField, ViolationReason); N],
    ) -> ValidationResult {
        ValidationResult::Invalid(
            Violations::new(
                violations
                    .into_iter()
                    .map(|(field, reason)| Violation::new(field, reason))
                    .collect(),
            )
            .unwrap(),
        )
    }
}
