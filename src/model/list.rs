use super::todo::{SectionKind, TodoItem};

/// All items in persisted order.
///
/// The persisted order is always every unfinished item followed by every
/// finished item, each group keeping its own relative order. Call
/// [`TodoList::normalize`] after changing an item's `completed` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
}

impl TodoList {
    /// Build a list from items in any order, normalizing section order.
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        let mut list = TodoList { items };
        list.normalize();
        list
    }

    /// Stable-partition items into unfinished then finished.
    pub fn normalize(&mut self) {
        let (unfinished, finished): (Vec<_>, Vec<_>) =
            self.items.drain(..).partition(|t| !t.completed);
        self.items = unfinished;
        self.items.extend(finished);
    }

    /// Items of one section, in persisted order
    pub fn section(&self, kind: SectionKind) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(move |t| t.section() == kind)
    }

    pub fn section_len(&self, kind: SectionKind) -> usize {
        self.section(kind).count()
    }

    pub fn find(&self, id: u32) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|t| t.id == id)
    }

    /// Next unused ID (one past the current maximum, starting at 1).
    /// `None` once the maximum is `u32::MAX`.
    pub fn next_id(&self) -> Option<u32> {
        match self.items.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }
}
