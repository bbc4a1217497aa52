use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use folio_auth_contracts::AuthService;
use folio_core_inbox_contracts::MessageTriageService;
use folio_core_inbox_impl::received_ago;
use folio_models::{
    auth::{AdminCredentials, AdminPassword, AdminSession},
    inbox::{InboxQuery, MessageId, MessageStatus, NewInboxMessage},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::environment::Environment;

#[derive(Debug, Args)]
pub struct InboxArgs {
    /// JSON file with the received messages
    file: PathBuf,
    #[arg(short, long, env = "FOLIO_ADMIN_USERNAME")]
    username: String,
    #[arg(short, long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
    /// Open a message, marking it as read
    #[arg(long, value_name = "ID")]
    select: Vec<Uuid>,
    /// Mark a message as replied
    #[arg(long, value_name = "ID")]
    reply: Vec<Uuid>,
    /// Delete a message
    #[arg(long, value_name = "ID")]
    delete: Vec<Uuid>,
    /// Only list messages with this status
    #[arg(long, value_enum)]
    status: Option<StatusFilter>,
    /// Only list messages whose name, email or body contains this text
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusFilter {
    Unread,
    Read,
    Replied,
}

impl From<StatusFilter> for MessageStatus {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::Unread => Self::Unread,
            StatusFilter::Read => Self::Read,
            StatusFilter::Replied => Self::Replied,
        }
    }
}

/// A received message as stored in the messages file.
#[derive(Debug, Deserialize)]
struct MessageRecord {
    #[serde(default)]
    id: Option<Uuid>,
    name: String,
    email: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl From<MessageRecord> for NewInboxMessage {
    fn from(value: MessageRecord) -> Self {
        Self {
            id: value.id.map_or_else(MessageId::random, MessageId::from),
            name: value.name,
            email: value.email,
            body: value.message,
            received_at: value.timestamp,
        }
    }
}

impl InboxArgs {
    pub async fn invoke(self, env: Environment) -> anyhow::Result<()> {
        let auth = env.auth()?;
        let triage = env.message_triage();

        let messages = read_messages(&self.file).await?;
        let added = triage.ingest(messages);
        info!(added, file = %self.file.display(), "Loaded inbox");

        print!("{}", self.run(&auth, &triage, Utc::now()).await?);

        Ok(())
    }

    async fn run(
        self,
        auth: &impl AuthService,
        triage: &impl MessageTriageService,
        now: DateTime<Utc>,
    ) -> anyhow::Result<String> {
        let session = auth
            .authenticate(AdminCredentials {
                username: self.username,
                password: AdminPassword::new(self.password),
            })
            .await?;

        for id in self.select {
            triage
                .select(&session, id.into())
                .with_context(|| format!("Failed to open message {id}"))?;
        }
        for id in self.reply {
            triage
                .mark_replied(&session, id.into())
                .with_context(|| format!("Failed to mark message {id} as replied"))?;
        }
        for id in self.delete {
            triage
                .delete(&session, id.into())
                .with_context(|| format!("Failed to delete message {id}"))?;
        }

        let query = InboxQuery {
            status: self.status.map(Into::into),
            search: self.search,
        };
        Ok(render(triage, &session, &query, now))
    }
}

async fn read_messages(path: &Path) -> anyhow::Result<Vec<NewInboxMessage>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = serde_json::from_str::<Vec<MessageRecord>>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(records.into_iter().map(Into::into).collect())
}

fn render(
    triage: &impl MessageTriageService,
    session: &AdminSession,
    query: &InboxQuery,
    now: DateTime<Utc>,
) -> String {
    let counts = triage.counts_by_status(session);
    let mut out = format!(
        "{} messages: {} unread, {} read, {} replied\n",
        counts.total(),
        counts.unread,
        counts.read,
        counts.replied
    );

    for message in triage.messages(session, query) {
        let _ = writeln!(
            out,
            "\n[{}] {} <{}>, {}\n  id: {}\n  {}",
            message.status,
            message.name,
            message.email,
            received_ago(message.received_at, now),
            message.id,
            message.body
        );
    }

    if let Some(selected) = triage.selected(session) {
        let _ = writeln!(out, "\nSelected: {} ({})", selected.name, selected.id);
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use folio_auth_contracts::{AuthenticateError, MockAuthService};
    use folio_core_inbox_contracts::MockMessageTriageService;
    use folio_core_inbox_impl::MessageTriageImpl;
    use folio_models::{
        auth::{AdminSessionId, AdminUsername},
        inbox::{InboxMessage, StatusCounts},
    };
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    const DEMO_MESSAGES: &str = include_str!("../../../demos/messages.json");

    #[tokio::test]
    async fn run_triage() {
        // Arrange
        let session = session();
        let auth = MockAuthService::new().with_authenticate(credentials(), Ok(session.clone()));
        let triage = MessageTriageImpl::default();
        let records = serde_json::from_str::<Vec<MessageRecord>>(DEMO_MESSAGES).unwrap();
        triage.ingest(records.into_iter().map(Into::into).collect());
        let [first, second, third] = demo_ids();

        let args = InboxArgs {
            select: vec![first],
            reply: vec![second],
            delete: vec![third],
            ..args()
        };

        // Act
        let result = args.run(&auth, &triage, now()).await;

        // Assert
        let output = result.unwrap();
        assert!(output.starts_with("2 messages: 0 unread, 1 read, 1 replied\n"));
        assert!(output.contains("[read] John Doe <john@example.com>, 2 hours ago"));
        assert!(output.contains("[replied] Sarah Chen <sarah.chen@techcorp.com>, 5 hours ago"));
        assert!(!output.contains("Michael Rodriguez"));
        assert!(output.ends_with(&format!("\nSelected: John Doe ({first})\n")));
    }

    #[tokio::test]
    async fn read_demo_messages() {
        // Arrange
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/messages.json");

        // Act
        let result = read_messages(&path).await;

        // Assert
        let messages = result.unwrap();
        assert_eq!(
            messages.iter().map(|m| *m.id).collect::<Vec<_>>(),
            demo_ids()
        );
        assert_eq!(messages[1].name, "Sarah Chen");
        assert_eq!(
            messages[1].received_at,
            Utc.with_ymd_and_hms(2024, 5, 10, 7, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn read_missing_messages_file() {
        let result = read_messages(Path::new("/nonexistent/messages.json")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn invalid_credentials() {
        // Arrange
        let auth = MockAuthService::new()
            .with_authenticate(credentials(), Err(AuthenticateError::InvalidCredentials));
        let triage = MockMessageTriageService::new();

        // Act
        let result = args().run(&auth, &triage, now()).await;

        // Assert
        let err = result.unwrap_err();
        assert_matches!(
            err.downcast_ref::<AuthenticateError>(),
            Some(AuthenticateError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn unknown_message() {
        // Arrange
        let session = session();
        let auth = MockAuthService::new().with_authenticate(credentials(), Ok(session));
        let triage = MessageTriageImpl::default();

        // Act
        let result = InboxArgs {
            reply: vec![Uuid::nil()],
            ..args()
        }
        .run(&auth, &triage, now())
        .await;

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn render_filtered() {
        // Arrange
        let session = session();
        let query = InboxQuery {
            status: Some(MessageStatus::Unread),
            search: None,
        };
        let message = InboxMessage {
            id: MessageId::from(Uuid::nil()),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            body: "Hi".into(),
            received_at: now() - chrono::Duration::days(2),
            status: MessageStatus::Unread,
        };
        let triage = MockMessageTriageService::new()
            .with_counts_by_status(
                session.clone(),
                StatusCounts {
                    unread: 1,
                    read: 2,
                    replied: 0,
                },
            )
            .with_messages(session.clone(), query.clone(), vec![message])
            .with_selected(session.clone(), None);

        // Act
        let output = render(&triage, &session, &query, now());

        // Assert
        assert_eq!(
            output,
            "3 messages: 1 unread, 2 read, 0 replied\n\n[unread] John Doe <john@example.com>, 2 \
             days ago\n  id: 00000000-0000-0000-0000-000000000000\n  Hi\n"
        );
    }

    fn demo_ids() -> [Uuid; 3] {
        [
            "6f1c2a3e-8f4b-4d2a-9c1e-2b7d5e8a1f01",
            "0b9e4d7c-3a21-4f6e-b8d5-7c4a2e9f3b02",
            "c4d8e2f1-5b37-4a9c-a6e0-9d1f3b7c5e03",
        ]
        .map(|id| id.parse().unwrap())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn session() -> AdminSession {
        AdminSession {
            id: AdminSessionId::random(),
            username: AdminUsername::try_new("admin").unwrap(),
            started_at: now(),
        }
    }

    fn credentials() -> AdminCredentials {
        AdminCredentials {
            username: "admin".into(),
            password: AdminPassword::new("admin123"),
        }
    }

    fn args() -> InboxArgs {
        InboxArgs {
            file: PathBuf::from("messages.json"),
            username: "admin".into(),
            password: "admin123".into(),
            select: Vec::new(),
            reply: Vec::new(),
            delete: Vec::new(),
            status: None,
            search: None,
        }
    }
}
