//! Tag filtering for the board view.
//!
//! A [`TagFilter`] holds the set of active tags. With no active tags every game is
//! shown; otherwise a game is shown when it carries at least one of them.

use crate::model::Game;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    tags: Vec<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter with the given tags active. Blank names are ignored.
    pub fn with_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut filter = Self::new();
        for tag in tags {
            filter.activate(tag.as_ref());
        }
        filter
    }

    /// Activates `tag` if inactive, deactivates it otherwise.
    pub fn toggle(&mut self, tag: &str) {
        let tag = tag.trim();
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.activate(tag);
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_active(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn active(&self) -> &[String] {
        &self.tags
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| game.has_tag(t))
    }

    fn activate(&mut self, tag: &str) {
        let tag = tag.trim();
        if !tag.is_empty() && !self.is_active(tag) {
            self.tags.push(tag.to_string());
        }
    }
}
