//! Activity feed
//!
//! The API returns the whole event list at once; searching and paging happen
//! on the client over that list.

use serde::Serialize;
use volunteer_api::Event;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Event>,
    /// 1-based page number
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone)]
pub struct EventFeed {
    events: Vec<Event>,
    /// Indexes into `events` matching the current query
    matches: Vec<usize>,
    query: String,
    page_size: usize,
    current_page: usize,
}

impl EventFeed {
    pub fn new(events: Vec<Event>, page_size: usize) -> Self {
        let matches = (0..events.len()).collect();

        Self {
            events,
            matches,
            query: String::new(),
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Filter by title or organization, case-insensitively, and rewind to
    /// the first page. An empty query matches everything.
    pub fn search(&mut self, query: &str) {
        let needle = query.trim().to_lowercase();

        self.matches = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, event)| needle.is_empty() || matches_query(event, &needle))
            .map(|(index, _)| index)
            .collect();
        self.query = query.trim().to_string();
        self.current_page = 1;

        tracing::debug!(query = %self.query, matches = self.matches.len(), "Filtered events");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn total_items(&self) -> usize {
        self.matches.len()
    }

    /// Never less than one; an empty result is a single empty page.
    pub fn total_pages(&self) -> usize {
        self.matches.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page `number` (1-based), clamped to the available range.
    pub fn page(&self, number: usize) -> Page {
        let total_pages = self.total_pages();
        let page = number.clamp(1, total_pages);
        let start = (page - 1) * self.page_size;

        let items = self
            .matches
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&index| self.events[index].clone())
            .collect();

        Page {
            items,
            page,
            total_pages,
            total_items: self.matches.len(),
            has_more: page < total_pages,
        }
    }

    pub fn current(&self) -> Page {
        self.page(self.current_page)
    }

    /// Advance to the next page, as when a list is scrolled to its end.
    pub fn next_page(&mut self) -> Option<Page> {
        if self.current_page >= self.total_pages() {
            return None;
        }
        self.current_page += 1;
        Some(self.current())
    }

    /// Everything loaded so far: pages 1 through the current one.
    pub fn loaded(&self) -> Vec<&Event> {
        self.matches
            .iter()
            .take(self.current_page * self.page_size)
            .map(|&index| &self.events[index])
            .collect()
    }
}

fn matches_query(event: &Event, needle: &str) -> bool {
    event.title.to_lowercase().contains(needle)
        || event
            .organization
            .as_deref()
            .map_or(false, |org| org.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, title: &str, organization: &str) -> Event {
        Event {
            event_id: id,
            title: title.to_string(),
            event_type_id: None,
            start_date: "2025-03-08".to_string(),
            end_date: "2025-03-08".to_string(),
            start_time: None,
            end_time: None,
            city_id: None,
            organization_id: None,
            organization: Some(organization.to_string()),
            description: None,
            rating: None,
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event(1, "Beach Cleanup", "Ocean Care"),
            event(2, "Food Drive", "Food Bank"),
            event(3, "Tree Planting", "Green Earth"),
            event(4, "Animal Shelter Help", "Pet Haven"),
            event(5, "Senior Center Visit", "Elder Care"),
            event(6, "Park Maintenance", "City Parks"),
            event(7, "Blood Drive", "Red Cross"),
            event(8, "Homeless Shelter", "Hope Center"),
            event(9, "Library Reading", "Public Library"),
            event(10, "River Cleanup", "Water Watch"),
        ]
    }

    fn ids(page: &Page) -> Vec<i64> {
        page.items.iter().map(|e| e.event_id).collect()
    }

    #[test]
    fn test_paging() {
        let mut feed = EventFeed::new(sample(), 4);
        assert_eq!(feed.total_pages(), 3);

        let first = feed.current();
        assert_eq!(ids(&first), vec![1, 2, 3, 4]);
        assert!(first.has_more);

        assert_eq!(ids(&feed.next_page().unwrap()), vec![5, 6, 7, 8]);
        let last = feed.next_page().unwrap();
        assert_eq!(ids(&last), vec![9, 10]);
        assert!(!last.has_more);
        assert!(feed.next_page().is_none());

        assert_eq!(feed.loaded().len(), 10);
    }

    #[test]
    fn test_page_number_is_clamped() {
        let feed = EventFeed::new(sample(), 4);
        assert_eq!(feed.page(0).page, 1);
        assert_eq!(feed.page(99).page, 3);
    }

    #[test]
    fn test_search_matches_title_or_organization() {
        let mut feed = EventFeed::new(sample(), 4);

        feed.search("cleanup");
        assert_eq!(ids(&feed.current()), vec![1, 10]);

        feed.search("  CARE ");
        assert_eq!(feed.query(), "CARE");
        assert_eq!(ids(&feed.current()), vec![1, 5]);

        feed.search("");
        assert_eq!(feed.total_items(), 10);
    }

    #[test]
    fn test_search_rewinds_to_first_page() {
        let mut feed = EventFeed::new(sample(), 2);
        feed.next_page();
        feed.next_page();
        assert_eq!(feed.current_page(), 3);

        feed.search("drive");
        assert_eq!(feed.current_page(), 1);
        assert_eq!(ids(&feed.current()), vec![2, 7]);
    }

    #[test]
    fn test_no_matches_is_one_empty_page() {
        let mut feed = EventFeed::new(sample(), 3);
        feed.search("zzz");

        let page = feed.current();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let feed = EventFeed::new(sample(), 0);
        assert_eq!(feed.total_pages(), 10);
    }
}
