use folio_models::{
    auth::AdminSession,
    inbox::{InboxMessage, InboxQuery, MessageId, NewInboxMessage, StatusCounts},
};
use thiserror::Error;

/// Admin side triage of received contact messages.
///
/// Every message moves forward only, `unread -> read -> replied`, until it
/// is deleted. All operations complete without suspending, and every change
/// is visible to the next reader immediately.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MessageTriageService: Send + Sync + 'static {
    /// Appends newly received messages as `unread`. Messages whose id is
    /// already present are skipped. Returns the number of added messages.
    fn ingest(&self, messages: Vec<NewInboxMessage>) -> usize;

    /// Returns the messages matching `query`, in arrival order.
    fn messages(&self, session: &AdminSession, query: &InboxQuery) -> Vec<InboxMessage>;

    /// Makes the message the current selection and marks it `read` if it
    /// was `unread`.
    fn select(&self, session: &AdminSession, id: MessageId)
        -> Result<InboxMessage, TriageError>;

    /// Returns the current selection.
    fn selected(&self, session: &AdminSession) -> Option<InboxMessage>;

    /// Marks the message `replied`. Does nothing if it already is.
    fn mark_replied(
        &self,
        session: &AdminSession,
        id: MessageId,
    ) -> Result<InboxMessage, TriageError>;

    /// Removes the message. Clears the selection if it was selected.
    fn delete(&self, session: &AdminSession, id: MessageId) -> Result<InboxMessage, TriageError>;

    /// Counts the messages per status.
    fn counts_by_status(&self, session: &AdminSession) -> StatusCounts;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriageError {
    #[error("Message not found.")]
    NotFound,
}

#[cfg(feature = "mock")]
impl MockMessageTriageService {
    pub fn with_counts_by_status(mut self, session: AdminSession, result: StatusCounts) -> Self {
        self.expect_counts_by_status()
            .once()
            .with(mockall::predicate::eq(session))
            .return_const(result);
        self
    }

    pub fn with_selected(mut self, session: AdminSession, result: Option<InboxMessage>) -> Self {
        self.expect_selected()
            .once()
            .with(mockall::predicate::eq(session))
            .return_const(result);
        self
    }

    pub fn with_messages(
        mut self,
        session: AdminSession,
        query: InboxQuery,
        result: Vec<InboxMessage>,
    ) -> Self {
        self.expect_messages()
            .once()
            .with(
                mockall::predicate::eq(session),
                mockall::predicate::eq(query),
            )
            .return_const(result);
        self
    }
}
