//! Event commands
use serde::Serialize;
use volunteer_core::{EventCard, Page, Registration};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub query: Option<String>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_more: bool,
    pub events: Vec<EventCard>,
}

impl FeedPage {
    fn new(query: Option<String>, page: Page) -> Self {
        Self {
            query,
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_more: page.has_more,
            events: page.items.iter().map(EventCard::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MyEvent {
    pub event_id: i64,
    #[serde(flatten)]
    pub card: EventCard,
}

pub async fn events(state: &AppState, query: Option<String>, page: usize) -> CommandResult<FeedPage> {
    let mut feed = match state.app().event_feed().await {
        Ok(feed) => feed,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    let query = query.filter(|q| !q.trim().is_empty());
    if let Some(query) = &query {
        feed.search(query);
    }

    CommandResult::ok(FeedPage::new(query, feed.page(page)))
}

pub async fn event(state: &AppState, id: i64) -> CommandResult<EventCard> {
    match state.app().event(id).await {
        Ok(event) => CommandResult::ok(EventCard::from(&event)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn register(state: &AppState, id: i64) -> CommandResult<Registration> {
    match state.app().register(id).await {
        Ok(registration) => CommandResult::ok(registration),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn my_events(state: &AppState) -> CommandResult<Vec<MyEvent>> {
    match state.app().my_events().await {
        Ok(rows) => CommandResult::ok(
            rows.iter()
                .map(|row| MyEvent {
                    event_id: row.event_id,
                    card: EventCard::from(&row.event),
                })
                .collect(),
        ),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
