use std::fmt::Write;

use anyhow::Context;
use folio_core_contact_contracts::config::ContactConfigService;
use folio_models::contact::{ContactField, ContactFormConfig};

use crate::environment::Environment;

pub async fn show_config(env: Environment) -> anyhow::Result<()> {
    let config = env
        .contact_config_service()?
        .load()
        .await
        .context("Failed to load contact form configuration")?;

    print!("{}", render(&config));

    Ok(())
}

fn render(config: &ContactFormConfig) -> String {
    let required = ContactField::ALL
        .into_iter()
        .filter(|&field| field == ContactField::Message || config.required_fields.contains(field))
        .map(ContactField::as_str)
        .collect::<Vec<_>>();

    let mut out = String::new();
    let _ = writeln!(out, "enabled:    {}", config.is_enabled);
    let _ = writeln!(out, "required:   {}", required.join(", "));
    if config.categories.is_empty() {
        let _ = writeln!(out, "categories: -");
    } else {
        let _ = writeln!(out, "categories: {}", config.categories.join(", "));
    }
    let _ = writeln!(out, "challenge:  {}", config.challenge_enabled);
    out
}

#[cfg(test)]
mod tests {
    use folio_models::contact::RequiredFields;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn render_config() {
        let config = ContactFormConfig {
            is_enabled: true,
            required_fields: RequiredFields::new([ContactField::Subject, ContactField::Email])
                .unwrap(),
            categories: vec!["general".into(), "consulting".into()],
            challenge_enabled: false,
            challenge_key: String::new(),
        };

        assert_eq!(
            render(&config),
            "enabled:    true\nrequired:   email, subject, message\ncategories: general, \
             consulting\nchallenge:  false\n"
        );
    }

    #[test]
    fn render_without_categories() {
        let config = ContactFormConfig {
            is_enabled: false,
            required_fields: RequiredFields::default(),
            categories: Vec::new(),
            challenge_enabled: true,
            challenge_key: "key".into(),
        };

        assert_eq!(
            render(&config),
            "enabled:    false\nrequired:   message\ncategories: -\nchallenge:  true\n"
        );
    }
}
