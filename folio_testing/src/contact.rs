use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const BASE_PATH: &str = "/api/contact/";
const CONFIG_ROUTE: &str = "/api/contact/config/";
const CREATE_MESSAGE_ROUTE: &str = "/api/contact/messages/create/";

/// Message body that makes the backend fail with `SERVER_ERROR`.
pub const TRIGGER_SERVER_ERROR: &str = "trigger:server-error";
/// Message body that makes the backend answer with something that is not an
/// envelope.
pub const TRIGGER_MALFORMED: &str = "trigger:malformed";

#[derive(Debug, Clone)]
pub struct FakeContactBackendSettings {
    pub enabled: bool,
    pub required_fields: Vec<String>,
    pub categories: Vec<String>,
    /// Accepted submissions after which every further submission is rate
    /// limited.
    pub rate_limit: Option<usize>,
    /// Answer configuration requests with an error envelope.
    pub config_broken: bool,
}

impl Default for FakeContactBackendSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            required_fields: vec!["name".into(), "email".into()],
            categories: vec!["general".into(), "consulting".into()],
            rate_limit: None,
            config_broken: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceivedMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub consent_given: bool,
    #[serde(default)]
    pub newsletter_subscribed: bool,
}

#[derive(Debug)]
pub struct FakeContactBackend {
    settings: FakeContactBackendSettings,
    create_requests: AtomicUsize,
    accepted: RwLock<Vec<(Uuid, ReceivedMessage)>>,
}

impl FakeContactBackend {
    pub fn new(settings: FakeContactBackendSettings) -> Arc<Self> {
        Arc::new(Self {
            settings,
            create_requests: AtomicUsize::new(0),
            accepted: Default::default(),
        })
    }

    /// Number of create message requests received, accepted or not.
    pub fn create_requests(&self) -> usize {
        self.create_requests.load(Ordering::SeqCst)
    }

    pub async fn accepted(&self) -> Vec<(Uuid, ReceivedMessage)> {
        self.accepted.read().await.clone()
    }
}

pub fn router(backend: Arc<FakeContactBackend>) -> Router {
    Router::new()
        .route(CONFIG_ROUTE, routing::get(config))
        .route(CREATE_MESSAGE_ROUTE, routing::post(create_message))
        .with_state(backend)
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    settings: FakeContactBackendSettings,
) -> anyhow::Result<()> {
    info!("Starting fake contact backend on {host}:{port}");
    info!("Contact api base url: http://{host}:{port}{BASE_PATH}");
    info!(
        "Messages {TRIGGER_SERVER_ERROR:?} and {TRIGGER_MALFORMED:?} provoke a server error and \
         a malformed response"
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(FakeContactBackend::new(settings)))
        .await
        .context("Failed to start HTTP server")
}

/// Serves a fake backend on an ephemeral localhost port in the background
/// and returns its base url.
pub async fn spawn(
    settings: FakeContactBackendSettings,
) -> anyhow::Result<(String, Arc<FakeContactBackend>)> {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;

    let backend = FakeContactBackend::new(settings);
    let router = router(Arc::clone(&backend));
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok((format!("http://{addr}{BASE_PATH}"), backend))
}

type State = axum::extract::State<Arc<FakeContactBackend>>;

async fn config(state: State) -> Response {
    let settings = &state.settings;
    if settings.config_broken {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "SERVER_ERROR",
            "Failed to load contact form configuration",
            None,
        );
    }

    let required = |field: &str| settings.required_fields.iter().any(|x| x == field);

    success(
        StatusCode::OK,
        json!({
            "is_enabled": settings.enabled,
            "required_fields": {
                "name": required("name"),
                "email": required("email"),
                "phone": required("phone"),
                "company": required("company"),
                "subject": required("subject"),
            },
            "categories": settings.categories,
            "recaptcha_enabled": false,
            "recaptcha_site_key": "",
        }),
    )
}

async fn create_message(state: State, Json(message): Json<ReceivedMessage>) -> Response {
    state.create_requests.fetch_add(1, Ordering::SeqCst);
    let settings = &state.settings;

    if !settings.enabled {
        return error(
            StatusCode::SERVICE_UNAVAILABLE,
            "FORM_DISABLED",
            "Contact form is currently disabled. Please try again later.",
            None,
        );
    }

    let mut accepted = state.accepted.write().await;

    if settings.rate_limit.is_some_and(|limit| accepted.len() >= limit) {
        return error(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            "Too many contact attempts. Please try again later.",
            None,
        );
    }

    match message.message.as_str() {
        TRIGGER_SERVER_ERROR => {
            return error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERVER_ERROR",
                "An error occurred while sending your message. Please try again.",
                None,
            )
        }
        TRIGGER_MALFORMED => return Json(json!({"ok": true})).into_response(),
        _ => {}
    }

    let details = validate(settings, &message);
    if !details.is_empty() {
        return error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Please check your input",
            Some(details),
        );
    }

    let id = Uuid::new_v4();
    accepted.push((id, message));

    success(StatusCode::CREATED, json!({ "id": id.to_string() }))
}

fn validate(
    settings: &FakeContactBackendSettings,
    message: &ReceivedMessage,
) -> Map<String, Value> {
    let mut details = Map::new();

    for (field, value) in [
        ("name", &message.name),
        ("email", &message.email),
        ("phone", &message.phone),
        ("company", &message.company),
        ("subject", &message.subject),
    ] {
        if settings.required_fields.iter().any(|x| x == field) && value.trim().is_empty() {
            details.insert(field.into(), json!(["This field is required."]));
        }
    }

    if message.message.trim().is_empty() {
        details.insert("message".into(), json!(["This field may not be blank."]));
    }

    if !settings.categories.is_empty() && !settings.categories.contains(&message.category) {
        details.insert(
            "category".into(),
            json!([format!("\"{}\" is not a valid choice.", message.category)]),
        );
    }

    if !message.consent_given {
        details.insert(
            "consent_given".into(),
            json!(["Consent is required to process your message."]),
        );
    }

    details
}

fn success(status: StatusCode, data: Value) -> Response {
    (status, Json(json!({ "status": "success", "data": data }))).into_response()
}

fn error(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<Map<String, Value>>,
) -> Response {
    let mut error = json!({ "code": code, "message": message });
    if let Some(details) = details {
        error["details"] = Value::Object(details);
    }
    (status, Json(json!({ "status": "error", "error": error }))).into_response()
}
