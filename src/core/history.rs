/// Bounded history of completed stories.
use std::collections::VecDeque;

/// How many stories are kept.
pub const HISTORY_CAPACITY: usize = 10;

const SEPARATOR_WIDTH: usize = 40;

/// The most recent stories, oldest first. Appending past capacity drops
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    stories: VecDeque<String>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stories: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, story: String) {
        self.stories.push_back(story);
        if self.stories.len() > self.capacity {
            self.stories.pop_front();
            log::debug!("history full, evicted oldest story");
        }
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stories.iter().map(String::as_str)
    }

    /// All stories joined by a dashed separator line, oldest first.
    /// Empty string when there is nothing stored.
    pub fn render(&self) -> String {
        let separator = format!("\n{}\n", "-".repeat(SEPARATOR_WIDTH));
        self.iter().collect::<Vec<_>>().join(&separator)
    }
}
