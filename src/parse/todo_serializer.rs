use crate::model::todo::TodoItem;

use super::{FIELD_SEPARATOR, RECORD_SEPARATOR, TIME_SEPARATOR};

/// Serialize items into store text, in the given order.
pub fn serialize_todos(items: &[TodoItem]) -> String {
    items
        .iter()
        .map(serialize_record)
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

fn serialize_record(item: &TodoItem) -> String {
    let times = item
        .notification_times
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(TIME_SEPARATOR);
    [
        item.id.to_string(),
        item.title.clone(),
        item.description.clone(),
        item.completed.to_string(),
        times,
    ]
    .join(FIELD_SEPARATOR)
}
