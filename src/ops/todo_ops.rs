use crate::model::list::TodoList;
use crate::model::todo::{SectionKind, TodoItem};
use crate::parse::is_storable_text;

/// Error type for to-do operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("item not found: {0}")]
    NotFound(u32),
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("text cannot contain '::', '|||', line breaks, or start/end with ':': {0:?}")]
    InvalidText(String),
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("no item IDs left: the list already uses 4294967295")]
    IdsExhausted,
}

// ---------------------------------------------------------------------------
// Move operations
// ---------------------------------------------------------------------------

/// Move the element at `from` so that it ends up at index `to`.
///
/// This is the one splice every reorder goes through. Equal indices are a
/// no-op; either index out of range is an error and leaves `items` untouched.
pub fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), TodoError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(TodoError::IndexOutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Reorder within one section, then rebuild the persisted order.
pub fn move_in_section(
    list: &mut TodoList,
    section: SectionKind,
    from: usize,
    to: usize,
) -> Result<(), TodoError> {
    let (mut unfinished, mut finished): (Vec<_>, Vec<_>) =
        list.items.drain(..).partition(|t| !t.completed);

    let result = match section {
        SectionKind::Unfinished => move_element(&mut unfinished, from, to),
        SectionKind::Finished => move_element(&mut finished, from, to),
    };

    list.items = unfinished;
    list.items.extend(finished);
    result
}

// ---------------------------------------------------------------------------
// Item edits
// ---------------------------------------------------------------------------

fn check_text(text: &str) -> Result<(), TodoError> {
    if is_storable_text(text) {
        Ok(())
    } else {
        Err(TodoError::InvalidText(text.to_string()))
    }
}

fn check_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    check_text(title)
}

/// Append a new unfinished item. Returns its ID.
pub fn add_item(
    list: &mut TodoList,
    title: String,
    description: String,
    notification_times: Vec<i64>,
) -> Result<u32, TodoError> {
    check_title(&title)?;
    check_text(&description)?;

    let id = list.next_id().ok_or(TodoError::IdsExhausted)?;
    list.items.push(TodoItem {
        id,
        title,
        description,
        completed: false,
        notification_times,
    });
    list.normalize();
    Ok(id)
}

/// Change an item's title and/or description.
pub fn edit_item(
    list: &mut TodoList,
    id: u32,
    title: Option<String>,
    description: Option<String>,
) -> Result<(), TodoError> {
    if let Some(t) = &title {
        check_title(t)?;
    }
    if let Some(d) = &description {
        check_text(d)?;
    }
    let item = list.find_mut(id).ok_or(TodoError::NotFound(id))?;
    if let Some(t) = title {
        item.title = t;
    }
    if let Some(d) = description {
        item.description = d;
    }
    Ok(())
}

/// Mark an item finished or unfinished. The item keeps its position relative
/// to the other items of its new section.
pub fn set_completed(list: &mut TodoList, id: u32, completed: bool) -> Result<(), TodoError> {
    let item = list.find_mut(id).ok_or(TodoError::NotFound(id))?;
    if item.completed == completed {
        return Ok(());
    }
    item.completed = completed;
    list.normalize();
    Ok(())
}

/// Remove an item, returning it.
pub fn delete_item(list: &mut TodoList, id: u32) -> Result<TodoItem, TodoError> {
    let idx = list
        .items
        .iter()
        .position(|t| t.id == id)
        .ok_or(TodoError::NotFound(id))?;
    Ok(list.items.remove(idx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
