//! Terminal-independent listing state for each vertical.
//!
//! A board owns what is currently on screen. Frontends issue a [`Ticket`]
//! before every access-layer call and hand the result back together with
//! that ticket; responses older than the one already displayed are dropped,
//! so a slow early search can never overwrite a newer result.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    display::{ResourceCard, RideCard},
    error::ApiError,
    models::{NewResource, NewRide, Resource, Ride},
    search::{self, CategoryFilter},
    validation::{ResourceForm, RideForm},
};

/// Sequence number attached to an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Monotonic ticket source that remembers the newest applied response.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: u64,
    applied: Option<Ticket>,
}

impl Sequencer {
    /// Hand out the next ticket.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Record `ticket` as applied if it is newer than anything applied so far.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            return false;
        }
        self.applied = Some(ticket);
        true
    }

    /// Whether every issued ticket has been applied or superseded.
    pub fn is_settled(&self) -> bool {
        self.applied == Some(Ticket(self.issued)) || self.issued == 0
    }
}

/// Kind of inline form feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Green confirmation.
    Success,
    /// Red failure notice.
    Error,
}

/// Inline feedback shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    /// Styling.
    pub kind: MessageKind,
    /// Text.
    pub text: String,
}

impl FormMessage {
    /// Successful submission.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    /// Failed validation or operation.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// How long a form message stays up before it is dismissed.
pub const MESSAGE_TTL: Duration = Duration::from_millis(5000);

/// Current form message and when it lapses.
#[derive(Debug, Default)]
struct MessageSlot {
    current: Option<(FormMessage, Instant)>,
}

impl MessageSlot {
    fn show(&mut self, message: FormMessage) {
        self.current = Some((message, Instant::now() + MESSAGE_TTL));
    }

    fn get(&self) -> Option<&FormMessage> {
        self.current.as_ref().map(|(message, _)| message)
    }

    fn clear(&mut self) {
        self.current = None;
    }

    fn expire(&mut self) -> bool {
        match &self.current {
            Some((_, deadline)) if Instant::now() >= *deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

/// Outcome of handing a response to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The listing was replaced.
    Rendered,
    /// The response belongs to a superseded request.
    Stale,
    /// The call failed; the listing is unchanged.
    Failed,
}

/// Listing state for the resources page.
#[derive(Debug, Default)]
pub struct ResourceBoard {
    items: Vec<Resource>,
    query: String,
    category: CategoryFilter,
    message: MessageSlot,
    sequencer: Sequencer,
}

impl ResourceBoard {
    /// Records currently displayed, in insertion order.
    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    /// Cards for the current listing.
    pub fn cards(&self) -> Vec<ResourceCard> {
        self.items.iter().map(ResourceCard::from).collect()
    }

    /// Whether the empty-state notice should replace the grid.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Current category filter.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Replace the category filter.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Whether a search is needed rather than a plain list.
    pub fn is_filtered(&self) -> bool {
        !search::needle(&self.query).is_empty() || self.category != CategoryFilter::All
    }

    /// Last form message, if any.
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.get()
    }

    /// Dismiss the form message.
    pub fn clear_message(&mut self) {
        self.message.clear();
    }

    /// Drop the form message once it has been up for [`MESSAGE_TTL`].
    pub fn expire_message(&mut self) -> bool {
        self.message.expire()
    }

    /// Ticket for the next access-layer call.
    pub fn issue(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    /// Whether no response is outstanding.
    pub fn is_settled(&self) -> bool {
        self.sequencer.is_settled()
    }

    /// Replace the listing with a response unless it is stale or failed.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<Resource>, ApiError>) -> Applied {
        let fresh = self.sequencer.accept(ticket);
        match result {
            Ok(items) if fresh => {
                self.items = items;
                Applied::Rendered
            }
            Ok(_) => {
                debug!(?ticket, "Dropping stale resource listing");
                Applied::Stale
            }
            Err(err) if fresh => {
                warn!(?err, "Resource listing failed");
                self.message.show(FormMessage::error(err.to_string()));
                Applied::Failed
            }
            Err(err) => {
                debug!(?ticket, ?err, "Ignoring failure of superseded resource listing");
                Applied::Stale
            }
        }
    }

    /// Validate the form; on failure the error is kept as the form message.
    pub fn submit(&mut self, form: &ResourceForm) -> Option<NewResource> {
        match form.validate() {
            Ok(draft) => {
                self.message.clear();
                Some(draft)
            }
            Err(err) => {
                self.message.show(FormMessage::error(err.to_string()));
                None
            }
        }
    }

    /// Record the result of an `add` call.
    pub fn added(&mut self, result: Result<Resource, ApiError>) -> bool {
        match result {
            Ok(_) => {
                self.message.show(FormMessage::success("Item added successfully! 🎉"));
                true
            }
            Err(err) => {
                warn!(?err, "Adding resource failed");
                self.message.show(FormMessage::error("Failed to add item. Please try again."));
                false
            }
        }
    }
}

/// Listing state for the rides page.
#[derive(Debug, Default)]
pub struct RideBoard {
    items: Vec<Ride>,
    query: String,
    message: MessageSlot,
    sequencer: Sequencer,
}

impl RideBoard {
    /// Records currently displayed, soonest departure first.
    pub fn items(&self) -> &[Ride] {
        &self.items
    }

    /// Cards for the current listing.
    pub fn cards(&self) -> Vec<RideCard> {
        self.items.iter().map(RideCard::from).collect()
    }

    /// Whether the empty-state notice should replace the list.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Last form message, if any.
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.get()
    }

    /// Dismiss the form message.
    pub fn clear_message(&mut self) {
        self.message.clear();
    }

    /// Drop the form message once it has been up for [`MESSAGE_TTL`].
    pub fn expire_message(&mut self) -> bool {
        self.message.expire()
    }

    /// Ticket for the next access-layer call.
    pub fn issue(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    /// Whether no response is outstanding.
    pub fn is_settled(&self) -> bool {
        self.sequencer.is_settled()
    }

    /// Replace the listing with a response sorted by departure.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<Ride>, ApiError>) -> Applied {
        let fresh = self.sequencer.accept(ticket);
        match result {
            Ok(mut items) if fresh => {
                search::sort_by_departure(&mut items);
                self.items = items;
                Applied::Rendered
            }
            Ok(_) => {
                debug!(?ticket, "Dropping stale ride listing");
                Applied::Stale
            }
            Err(err) if fresh => {
                warn!(?err, "Ride listing failed");
                self.message.show(FormMessage::error(err.to_string()));
                Applied::Failed
            }
            Err(err) => {
                debug!(?ticket, ?err, "Ignoring failure of superseded ride listing");
                Applied::Stale
            }
        }
    }

    /// Validate the form against `today`; on failure the error is kept.
    pub fn submit(&mut self, form: &RideForm, today: NaiveDate) -> Option<NewRide> {
        match form.validate(today) {
            Ok(draft) => {
                self.message.clear();
                Some(draft)
            }
            Err(err) => {
                self.message.show(FormMessage::error(err.to_string()));
                None
            }
        }
    }

    /// Record the result of an `add` call.
    pub fn added(&mut self, result: Result<Ride, ApiError>) -> bool {
        match result {
            Ok(_) => {
                self.message.show(FormMessage::success("Ride posted successfully! 🎉"));
                true
            }
            Err(err) => {
                warn!(?err, "Posting ride failed");
                self.message.show(FormMessage::error("Failed to post ride. Please try again."));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn sequencer_drops_older_tickets() {
        let mut sequencer = Sequencer::default();
        assert!(sequencer.is_settled());
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(!sequencer.is_settled());

        assert!(sequencer.accept(second));
        assert!(!sequencer.accept(first));
        assert!(sequencer.is_settled());
    }

    #[test]
    fn failure_keeps_listing_and_sets_message() {
        let mut board = ResourceBoard::default();
        let ticket = board.issue();
        board.apply(ticket, Ok(seed::resources()));

        let ticket = board.issue();
        let outcome = board.apply(
            ticket,
            Err(ApiError::OperationFailure("offline".to_string())),
        );
        assert_eq!(outcome, Applied::Failed);
        assert_eq!(board.items().len(), 8);
        assert_eq!(
            board.message().map(|m| m.kind),
            Some(MessageKind::Error)
        );
    }

    #[test]
    fn failure_of_superseded_request_is_ignored() {
        let mut board = RideBoard::default();
        let older = board.issue();
        let newer = board.issue();
        board.apply(newer, Ok(seed::rides()));

        let outcome = board.apply(
            older,
            Err(ApiError::OperationFailure("timeout".to_string())),
        );
        assert_eq!(outcome, Applied::Stale);
        assert!(board.message().is_none());
        assert_eq!(board.items().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn form_message_lapses_after_five_seconds() {
        let mut board = ResourceBoard::default();
        board.submit(&ResourceForm::default());
        assert!(board.message().is_some());

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert!(!board.expire_message());
        assert!(board.message().is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(board.expire_message());
        assert!(board.message().is_none());
        assert!(!board.expire_message());
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_restarts_the_countdown() {
        let mut board = RideBoard::default();
        board.added(Err(ApiError::OperationFailure("offline".to_string())));
        tokio::time::advance(Duration::from_secs(4)).await;

        let seeded = seed::rides().remove(0);
        board.added(Ok(seeded));
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(!board.expire_message());
        assert_eq!(
            board.message().map(|m| m.kind),
            Some(MessageKind::Success)
        );

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(board.expire_message());
    }

    #[test]
    fn ride_board_sorts_on_apply() {
        let mut board = RideBoard::default();
        let ticket = board.issue();
        board.apply(ticket, Ok(seed::rides()));
        let ids: Vec<_> = board.items().iter().map(|ride| ride.id).collect();
        assert_eq!(ids, vec![4, 6, 2, 1, 5, 3]);
    }

    #[test]
    fn invalid_form_records_error_without_draft() {
        let mut board = ResourceBoard::default();
        let draft = board.submit(&ResourceForm::default());
        assert!(draft.is_none());
        let message = board.message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.starts_with("Please fill in all required fields"));
    }

    #[test]
    fn filtered_state_tracks_query_and_category() {
        let mut board = ResourceBoard::default();
        assert!(!board.is_filtered());
        board.set_query("   ");
        assert!(!board.is_filtered());
        board.set_category(CategoryFilter::parse("Books"));
        assert!(board.is_filtered());
    }
}
