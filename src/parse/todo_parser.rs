use std::collections::HashSet;

use crate::model::todo::TodoItem;

use super::{FIELD_SEPARATOR, RECORD_SEPARATOR, TIME_SEPARATOR};

/// Parse a store file from its source text.
///
/// Store format: records joined by `|||`, each record
/// `id::title::description::completed::t1,t2,...`. The time field is
/// optional, and a single time (older stores) parses the same as a list of one.
///
/// Returns the parsed items plus the raw text of any records that could not
/// be parsed (too few fields or a non-numeric ID) or that repeat the ID of
/// an earlier record.
pub fn parse_todos(source: &str) -> (Vec<TodoItem>, Vec<String>) {
    let mut items = Vec::new();
    let mut dropped = Vec::new();
    let mut seen = HashSet::new();

    if source.is_empty() {
        return (items, dropped);
    }

    for record in source.split(RECORD_SEPARATOR) {
        match parse_record(record) {
            Some(item) if seen.insert(item.id) => items.push(item),
            _ => dropped.push(record.to_string()),
        }
    }

    (items, dropped)
}

fn parse_record(record: &str) -> Option<TodoItem> {
    let parts: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if parts.len() < 4 {
        return None;
    }
    let id = parts[0].trim().parse::<u32>().ok()?;

    Some(TodoItem {
        id,
        title: parts[1].to_string(),
        description: parts[2].to_string(),
        completed: parts[3].trim().eq_ignore_ascii_case("true"),
        notification_times: parts.get(4).map(|s| parse_times(s)).unwrap_or_default(),
    })
}

fn parse_times(field: &str) -> Vec<i64> {
    if field.is_empty() {
        return Vec::new();
    }
    field
        .split(TIME_SEPARATOR)
        .filter_map(|t| t.trim().parse::<i64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let (items, dropped) = parse_todos("");
        assert!(items.is_empty());
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_parse_records() {
        let (items, dropped) =
            parse_todos("1::Buy milk::2 litres::false::1700000000000,1700000600000|||2::Call mom::::true::");
        assert!(dropped.is_empty());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].title, "Buy milk");
        assert_eq!(items[0].description, "2 litres");
        assert!(!items[0].completed);
        assert_eq!(items[0].notification_times, vec![1700000000000, 1700000600000]);
        assert_eq!(items[1].description, "");
        assert!(items[1].completed);
        assert!(items[1].notification_times.is_empty());
    }

    #[test]
    fn test_four_field_record_has_no_times() {
        let (items, _) = parse_todos("3::Title::Desc::TRUE");
        assert!(items[0].completed);
        assert!(items[0].notification_times.is_empty());
    }

    #[test]
    fn test_single_time_variant() {
        let (items, _) = parse_todos("3::Title::Desc::false::1700000000000");
        assert_eq!(items[0].notification_times, vec![1700000000000]);
    }

    #[test]
    fn test_bad_times_are_skipped() {
        let (items, _) = parse_todos("3::Title::Desc::false::12,abc,,34");
        assert_eq!(items[0].notification_times, vec![12, 34]);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let (items, dropped) = parse_todos("1::ok::::false|||garbage|||x::bad id::::false");
        assert_eq!(items.len(), 1);
        assert_eq!(dropped, vec!["garbage".to_string(), "x::bad id::::false".to_string()]);
    }

    #[test]
    fn test_completed_ignores_surrounding_whitespace() {
        let (items, _) = parse_todos("1::a::b::true\n");
        assert!(items[0].completed);
        let (items, _) = parse_todos("1::a::b:: TRUE ::5");
        assert!(items[0].completed);
        assert_eq!(items[0].notification_times, vec![5]);
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let (items, dropped) = parse_todos("1::first::::false::|||2::other::::false::|||1::again::::true::");
        assert_eq!(items.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["first", "other"]);
        assert_eq!(dropped, vec!["1::again::::true::".to_string()]);
    }

    #[test]
    fn test_unrecognized_completed_value_is_false() {
        let (items, _) = parse_todos("1::t::d::yes");
        assert!(!items[0].completed);
    }
}
