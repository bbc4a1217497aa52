use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::macros::id;

id!(MessageId);

/// Triage state of a received message. States only ever advance in
/// declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub received_at: DateTime<Utc>,
    pub status: MessageStatus,
}

/// A message as delivered by the ingestion feed. It has no status yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInboxMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

impl From<NewInboxMessage> for InboxMessage {
    fn from(value: NewInboxMessage) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            body: value.body,
            received_at: value.received_at,
            status: MessageStatus::Unread,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub unread: usize,
    pub read: usize,
    pub replied: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.unread + self.read + self.replied
    }
}

impl<'a> FromIterator<&'a InboxMessage> for StatusCounts {
    fn from_iter<T: IntoIterator<Item = &'a InboxMessage>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut counts, message| {
                match message.status {
                    MessageStatus::Unread => counts.unread += 1,
                    MessageStatus::Read => counts.read += 1,
                    MessageStatus::Replied => counts.replied += 1,
                }
                counts
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxQuery {
    pub status: Option<MessageStatus>,
    /// Case-insensitive substring matched against name, email and body.
    pub search: Option<String>,
}

impl InboxQuery {
    pub fn matches(&self, message: &InboxMessage) -> bool {
        if self.status.is_some_and(|status| status != message.status) {
            return false;
        }

        let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let search = search.to_lowercase();
        [&message.name, &message.email, &message.body]
            .into_iter()
            .any(|text| text.to_lowercase().contains(&search))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn message(status: MessageStatus) -> InboxMessage {
        InboxMessage {
            status,
            ..NewInboxMessage {
                id: MessageId::random(),
                name: "Sarah Chen".into(),
                email: "sarah.chen@techcorp.com".into(),
                body: "We have a Kubernetes migration project.".into(),
                received_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            }
            .into()
        }
    }

    #[test]
    fn new_messages_are_unread() {
        assert_eq!(message(MessageStatus::Unread).status, MessageStatus::Unread);
        assert_eq!(MessageStatus::default(), MessageStatus::Unread);
    }

    #[test]
    fn status_order() {
        assert!(MessageStatus::Unread < MessageStatus::Read);
        assert!(MessageStatus::Read < MessageStatus::Replied);
    }

    #[test]
    fn counts() {
        let messages = [
            message(MessageStatus::Unread),
            message(MessageStatus::Replied),
            message(MessageStatus::Unread),
        ];
        let counts = messages.iter().collect::<StatusCounts>();
        assert_eq!(
            counts,
            StatusCounts {
                unread: 2,
                read: 0,
                replied: 1
            }
        );
        assert_eq!(counts.total(), messages.len());
    }

    #[test]
    fn query() {
        let read = message(MessageStatus::Read);

        assert!(InboxQuery::default().matches(&read));
        assert!(InboxQuery {
            status: Some(MessageStatus::Read),
            search: Some("  KUBERNETES ".into()),
        }
        .matches(&read));
        assert!(!InboxQuery {
            status: Some(MessageStatus::Unread),
            search: None,
        }
        .matches(&read));
        assert!(!InboxQuery {
            status: None,
            search: Some("terraform".into()),
        }
        .matches(&read));
    }
}
