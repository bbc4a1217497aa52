use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Utc};
use folio_core_inbox_contracts::{MessageTriageService, TriageError};
use folio_models::{
    auth::AdminSession,
    inbox::{InboxMessage, InboxQuery, MessageId, MessageStatus, NewInboxMessage, StatusCounts},
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct MessageTriageImpl {
    state: Arc<Mutex<Inbox>>,
}

#[derive(Debug, Default)]
struct Inbox {
    /// In arrival order.
    messages: Vec<InboxMessage>,
    selected: Option<MessageId>,
}

impl Inbox {
    fn find_mut(&mut self, id: MessageId) -> Result<&mut InboxMessage, TriageError> {
        self.messages
            .iter_mut()
            .find(|message| message.id == id)
            .ok_or(TriageError::NotFound)
    }
}

impl MessageTriageImpl {
    fn inbox(&self) -> MutexGuard<'_, Inbox> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageTriageService for MessageTriageImpl {
    fn ingest(&self, messages: Vec<NewInboxMessage>) -> usize {
        let mut inbox = self.inbox();
        let mut known = inbox.messages.iter().map(|m| m.id).collect::<HashSet<_>>();

        let mut added = 0;
        for message in messages {
            if !known.insert(message.id) {
                warn!(id = %message.id, "Skipping message that is already in the inbox");
                continue;
            }
            inbox.messages.push(message.into());
            added += 1;
        }

        debug!(added, total = inbox.messages.len(), "Ingested messages");
        added
    }

    fn messages(&self, _session: &AdminSession, query: &InboxQuery) -> Vec<InboxMessage> {
        self.inbox()
            .messages
            .iter()
            .filter(|message| query.matches(message))
            .cloned()
            .collect()
    }

    fn select(
        &self,
        _session: &AdminSession,
        id: MessageId,
    ) -> Result<InboxMessage, TriageError> {
        let mut inbox = self.inbox();
        let message = inbox.find_mut(id)?;
        if message.status == MessageStatus::Unread {
            message.status = MessageStatus::Read;
            debug!(%id, "Marked message as read");
        }
        let message = message.clone();
        inbox.selected = Some(id);
        Ok(message)
    }

    fn selected(&self, _session: &AdminSession) -> Option<InboxMessage> {
        let inbox = self.inbox();
        let id = inbox.selected?;
        inbox.messages.iter().find(|message| message.id == id).cloned()
    }

    fn mark_replied(
        &self,
        _session: &AdminSession,
        id: MessageId,
    ) -> Result<InboxMessage, TriageError> {
        let mut inbox = self.inbox();
        let message = inbox.find_mut(id)?;
        if message.status != MessageStatus::Replied {
            message.status = MessageStatus::Replied;
            debug!(%id, "Marked message as replied");
        }
        Ok(message.clone())
    }

    fn delete(&self, _session: &AdminSession, id: MessageId) -> Result<InboxMessage, TriageError> {
        let mut inbox = self.inbox();
        let index = inbox
            .messages
            .iter()
            .position(|message| message.id == id)
            .ok_or(TriageError::NotFound)?;
        let message = inbox.messages.remove(index);
        if inbox.selected == Some(id) {
            inbox.selected = None;
        }
        debug!(%id, "Deleted message");
        Ok(message)
    }

    fn counts_by_status(&self, _session: &AdminSession) -> StatusCounts {
        self.inbox().messages.iter().collect()
    }
}

/// Coarse relative time as shown in the message list.
pub fn received_ago(received_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - received_at).num_hours();
    match hours {
        ..1 => "Just now".into(),
        1..24 => format!("{hours} hours ago"),
        _ => format!("{} days ago", hours / 24),
    }
}
