use std::{net::TcpListener, time::Duration};

use folio_extern_contracts::contact::{ContactApiError, ContactApiResponse, ContactApiService};
use folio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use folio_models::contact::{ContactField, ContactSubmission, RequiredFields};
use folio_testing::contact::{
    FakeContactBackend, FakeContactBackendSettings, TRIGGER_MALFORMED, TRIGGER_SERVER_ERROR,
};
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn fetch_config() {
    let (sut, _) = make_sut(FakeContactBackendSettings {
        required_fields: vec!["email".into(), "subject".into()],
        ..Default::default()
    })
    .await;

    let result = sut.fetch_config().await.unwrap();

    let config = match result {
        ContactApiResponse::Success(config) => config,
        other => panic!("expected success, got {other:?}"),
    };
    assert!(config.is_enabled);
    assert_eq!(
        config.required_fields,
        RequiredFields::new([ContactField::Email, ContactField::Subject]).unwrap()
    );
    assert_eq!(config.categories, ["general", "consulting"]);
    assert!(!config.challenge_enabled);
}

#[tokio::test]
async fn fetch_config_error_envelope() {
    let (sut, _) = make_sut(FakeContactBackendSettings {
        config_broken: true,
        ..Default::default()
    })
    .await;

    let result = sut.fetch_config().await.unwrap();

    assert_matches!(
        result,
        ContactApiResponse::Error(ContactApiError { code, .. }) if code == "SERVER_ERROR"
    );
}

#[tokio::test]
async fn create_message_ok() {
    let (sut, backend) = make_sut(Default::default()).await;

    let result = sut.create_message(valid_submission()).await.unwrap();

    let id = match result {
        ContactApiResponse::Success(id) => id,
        other => panic!("expected success, got {other:?}"),
    };
    let accepted = backend.accepted().await;
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].0.to_string(), *id);
    assert_eq!(accepted[0].1.email, "max@example.com");
    assert_eq!(backend.create_requests(), 1);
}

#[tokio::test]
async fn create_message_form_disabled() {
    let (sut, _) = make_sut(FakeContactBackendSettings {
        enabled: false,
        ..Default::default()
    })
    .await;

    let result = sut.create_message(valid_submission()).await.unwrap();

    assert_matches!(
        result,
        ContactApiResponse::Error(ContactApiError { code, .. }) if code == "FORM_DISABLED"
    );
}

#[tokio::test]
async fn create_message_rate_limited() {
    let (sut, backend) = make_sut(FakeContactBackendSettings {
        rate_limit: Some(1),
        ..Default::default()
    })
    .await;

    let first = sut.create_message(valid_submission()).await.unwrap();
    let second = sut.create_message(valid_submission()).await.unwrap();

    assert_matches!(first, ContactApiResponse::Success(_));
    assert_matches!(
        second,
        ContactApiResponse::Error(ContactApiError { code, .. }) if code == "RATE_LIMITED"
    );
    assert_eq!(backend.create_requests(), 2);
}

#[tokio::test]
async fn create_message_validation_details_in_order() {
    let (sut, _) = make_sut(Default::default()).await;

    let result = sut
        .create_message(ContactSubmission {
            name: String::new(),
            email: " ".into(),
            message: String::new(),
            ..valid_submission()
        })
        .await
        .unwrap();

    let error = match result {
        ContactApiResponse::Error(error) => error,
        other => panic!("expected error, got {other:?}"),
    };
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert_eq!(
        error.details.iter().map(|(field, _)| field).collect::<Vec<_>>(),
        ["name", "email", "message"]
    );
    assert_eq!(error.details.first_reason(), Some("This field is required."));
}

#[tokio::test]
async fn create_message_server_error() {
    let (sut, _) = make_sut(Default::default()).await;

    let result = sut
        .create_message(ContactSubmission {
            message: TRIGGER_SERVER_ERROR.into(),
            ..valid_submission()
        })
        .await
        .unwrap();

    assert_matches!(
        result,
        ContactApiResponse::Error(ContactApiError { code, .. }) if code == "SERVER_ERROR"
    );
}

#[tokio::test]
async fn create_message_malformed_response() {
    let (sut, _) = make_sut(Default::default()).await;

    let result = sut
        .create_message(ContactSubmission {
            message: TRIGGER_MALFORMED.into(),
            ..valid_submission()
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn connection_refused() {
    // reserve a port, then release it so nothing is listening there
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let sut = ContactApiServiceImpl::new(ContactApiServiceConfig::new(
        format!("http://127.0.0.1:{port}/api/contact/")
            .parse()
            .unwrap(),
        Duration::from_secs(5),
    ))
    .unwrap();

    assert!(sut.fetch_config().await.is_err());
    assert!(sut.create_message(valid_submission()).await.is_err());
}

async fn make_sut(
    settings: FakeContactBackendSettings,
) -> (ContactApiServiceImpl, std::sync::Arc<FakeContactBackend>) {
    let (base_url, backend) = folio_testing::contact::spawn(settings).await.unwrap();
    let config = ContactApiServiceConfig::new(base_url.parse().unwrap(), Duration::from_secs(5));
    (ContactApiServiceImpl::new(config).unwrap(), backend)
}

fn valid_submission() -> ContactSubmission {
    ContactSubmission {
        name: "Max Mustermann".into(),
        email: "max@example.com".into(),
        message: "Hello World!".into(),
        ..Default::default()
    }
}
