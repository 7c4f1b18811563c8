use std::cmp::Reverse;

use serde::Serialize;

use crate::model::config::{FilterOption, SortOption};
use crate::model::list::TodoList;
use crate::model::todo::{SectionKind, TodoItem};
use crate::ops::todo_ops::{self, TodoError};
use crate::reorder::Move;

// ---------------------------------------------------------------------------
// Display ordering
// ---------------------------------------------------------------------------

/// Order items for display. All sorts are stable.
pub fn sort_for_display(mut items: Vec<&TodoItem>, sort: SortOption) -> Vec<&TodoItem> {
    match sort {
        SortOption::Default => {}
        // Items without reminders go last in both date orders.
        SortOption::DateAscending => {
            items.sort_by_key(|t| t.earliest_notification().unwrap_or(i64::MAX))
        }
        SortOption::DateDescending => {
            items.sort_by_key(|t| Reverse(t.earliest_notification().unwrap_or(i64::MIN)))
        }
        SortOption::TitleAz => items.sort_by_key(|t| t.title.to_lowercase()),
        SortOption::TitleZa => items.sort_by_key(|t| Reverse(t.title.to_lowercase())),
    }
    items
}

/// One section of `list` as it is displayed (and dragged) under `sort`.
pub fn display_section(list: &TodoList, section: SectionKind, sort: SortOption) -> Vec<&TodoItem> {
    sort_for_display(list.section(section).collect(), sort)
}

/// Sections shown for a filter, top to bottom
pub fn visible_sections(filter: FilterOption) -> &'static [SectionKind] {
    match filter {
        FilterOption::All => &[SectionKind::Unfinished, SectionKind::Finished],
        FilterOption::Completed => &[SectionKind::Finished],
        FilterOption::Uncompleted => &[SectionKind::Unfinished],
    }
}

// ---------------------------------------------------------------------------
// Commits
// ---------------------------------------------------------------------------

/// Apply a committed drag to the owner's list.
///
/// Under any sort other than `Default` the displayed order is not the
/// persisted order, so the commit is ignored and `Ok(false)` is returned.
pub fn apply_commit(
    list: &mut TodoList,
    section: SectionKind,
    sort: SortOption,
    mv: Move,
) -> Result<bool, TodoError> {
    if sort != SortOption::Default {
        log::info!(
            "ignoring reorder {} -> {} in {} while sorted by {}",
            mv.from,
            mv.to,
            section,
            sort.as_str()
        );
        return Ok(false);
    }
    todo_ops::move_in_section(list, section, mv.from, mv.to)?;
    Ok(true)
}

/// Where the list view should scroll after a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "row", rename_all = "snake_case")]
pub enum ScrollHint {
    /// Animate so the given row (in the combined list) is visible
    ScrollTo(usize),
    /// Keep the current first visible row and offset
    PreserveOffset,
    NoScroll,
}

/// Scroll hint after moving within `section`.
///
/// Rows in the combined view are the unfinished section, one divider row,
/// then the finished section.
pub fn scroll_hint(
    section: SectionKind,
    mv: Move,
    unfinished_len: usize,
    finished_len: usize,
) -> ScrollHint {
    let section_len = match section {
        SectionKind::Unfinished => unfinished_len,
        SectionKind::Finished => finished_len,
    };
    let last = section_len.saturating_sub(1);

    if (mv.to == 0 && mv.from != 0) || mv.from == last || mv.to == last {
        let row = match section {
            SectionKind::Unfinished => mv.to.min(last),
            SectionKind::Finished => (unfinished_len + 1 + mv.to).min(unfinished_len + finished_len),
        };
        ScrollHint::ScrollTo(row)
    } else if mv.from == 0 {
        ScrollHint::PreserveOffset
    } else {
        ScrollHint::NoScroll
    }
}
