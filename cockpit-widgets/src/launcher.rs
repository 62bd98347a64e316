//! Optional launcher facility: a catalog of commands grouped by category.

use serde::Serialize;

/// One launcher entry pointing at a registered command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LauncherItem {
    pub command: String,
    pub category: String,
    /// Lower ranks sort first; unranked items go last
    pub rank: Option<i32>,
}

impl LauncherItem {
    pub fn new(command: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            category: category.into(),
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = Some(rank);
        self
    }
}

pub trait Launcher {
    fn add(&mut self, item: LauncherItem);

    fn items(&self) -> &[LauncherItem];
}

/// In-memory launcher
#[derive(Clone, Debug, Default)]
pub struct LauncherModel {
    items: Vec<LauncherItem>,
}

impl LauncherModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// Items of one category, ordered by rank then insertion
    pub fn items_in(&self, category: &str) -> Vec<&LauncherItem> {
        let mut items: Vec<&LauncherItem> =
            self.items.iter().filter(|i| i.category == category).collect();
        // stable sort keeps insertion order among equal ranks
        items.sort_by_key(|i| i.rank.unwrap_or(i32::MAX));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Launcher for LauncherModel {
    fn add(&mut self, item: LauncherItem) {
        ::log::debug!("Launcher entry {} under {}", item.command, item.category);
        self.items.push(item);
    }

    fn items(&self) -> &[LauncherItem] {
        &self.items
    }
}
