use serde::Serialize;

use crate::domain::Entity;

pub const BATCH_SIZE: usize = 24;
pub const NO_RESULTS: &str = "There are no results";
pub const LOADING: &str = "Loading...";
pub const SEARCH_FAILED: &str = "Search failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryIcon {
    pub label: String,
    pub icon_url: String,
}

/// One list entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub number: String,
    pub name: String,
    pub sprite_url: Option<String>,
    pub icons: Vec<CategoryIcon>,
}

impl From<&Entity> for Card {
    fn from(entity: &Entity) -> Self {
        Self {
            number: format!("#{}", entity.id),
            name: entity.name.clone(),
            sprite_url: entity.sprite_url.clone(),
            icons: entity
                .categories
                .iter()
                .map(|tag| CategoryIcon {
                    label: tag.name.clone(),
                    icon_url: tag.icon_url.clone(),
                })
                .collect(),
        }
    }
}

/// Holds the current result set and the render cursor into it.
///
/// `cursor` stays within `[0, results.len()]`; `has_more()` is `cursor < len`.
#[derive(Debug, Default)]
pub struct Pager {
    results: Vec<Entity>,
    cursor: usize,
    displayed: Vec<Card>,
    placeholder: Option<&'static str>,
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result set and renders the first batch.
    pub fn set_results(&mut self, results: Vec<Entity>) {
        self.results = results;
        self.cursor = 0;
        self.displayed.clear();
        self.placeholder = None;

        if self.results.is_empty() {
            self.placeholder = Some(NO_RESULTS);
            return;
        }
        self.render_next();
    }

    pub fn render_next(&mut self) -> &[Card] {
        let start = self.displayed.len();
        let end = (self.cursor + BATCH_SIZE).min(self.results.len());
        let batch = self.results[self.cursor..end].iter().map(Card::from);
        self.displayed.extend(batch);
        self.cursor = end;
        &self.displayed[start..]
    }

    pub fn show_loading(&mut self) {
        self.show_placeholder(LOADING);
    }

    /// Drops the held result set; a placeholder never sits on top of live results.
    pub fn show_placeholder(&mut self, text: &'static str) {
        self.results.clear();
        self.cursor = 0;
        self.displayed.clear();
        self.placeholder = Some(text);
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.results.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn displayed(&self) -> &[Card] {
        &self.displayed
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.placeholder
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: u32) -> Vec<Entity> {
        (1..=count)
            .map(|id| Entity {
                id,
                name: format!("mon-{id}"),
                sprite_url: None,
                categories: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn empty_results_show_placeholder() {
        let mut pager = Pager::new();
        pager.set_results(Vec::new());
        assert_eq!(pager.placeholder(), Some(NO_RESULTS));
        assert!(!pager.has_more());
        assert!(pager.displayed().is_empty());
    }

    #[test]
    fn renders_every_entity_once_in_order() {
        let mut pager = Pager::new();
        pager.set_results(entities(50));
        assert_eq!(pager.displayed().len(), 24);
        assert!(pager.has_more());

        assert_eq!(pager.render_next().len(), 24);
        assert!(pager.has_more());
        let last = pager.render_next();
        assert_eq!(last.len(), 2);
        assert_eq!(last[1].number, "#50");
        assert!(!pager.has_more());
        assert_eq!(pager.cursor(), 50);

        let numbers: Vec<_> = pager.displayed().iter().map(|c| c.number.clone()).collect();
        let expected: Vec<_> = (1..=50).map(|id| format!("#{id}")).collect();
        assert_eq!(numbers, expected);

        assert!(pager.render_next().is_empty());
        assert_eq!(pager.cursor(), 50);
    }

    #[test]
    fn new_results_reset_cursor() {
        let mut pager = Pager::new();
        pager.set_results(entities(30));
        pager.render_next();
        pager.set_results(entities(3));
        assert_eq!(pager.cursor(), 3);
        assert_eq!(pager.displayed().len(), 3);
        assert!(!pager.has_more());
    }

    #[test]
    fn placeholder_discards_previous_results() {
        let mut pager = Pager::new();
        pager.set_results(entities(60));
        pager.show_loading();
        assert_eq!(pager.total(), 0);
        assert_eq!(pager.cursor(), 0);
        assert!(!pager.has_more());
        assert!(pager.render_next().is_empty());
        assert_eq!(pager.placeholder(), Some(LOADING));
    }

    #[test]
    fn exact_batch_has_no_more() {
        let mut pager = Pager::new();
        pager.set_results(entities(24));
        assert!(!pager.has_more());
    }
}
