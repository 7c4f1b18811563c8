use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::config::{FilterOption, SortOption};
use crate::model::list::TodoList;
use crate::model::todo::{SectionKind, TodoItem};
use crate::ops::display::{ScrollHint, display_section, visible_sections};
use crate::ops::replay::{ReplayOutcome, StepRecord};
use crate::reorder::Session;
use crate::util::unicode::fit_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SectionJson<'a> {
    pub section: SectionKind,
    pub items: Vec<&'a TodoItem>,
}

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub sort: SortOption,
    pub filter: FilterOption,
    pub sections: Vec<SectionJson<'a>>,
}

#[derive(Serialize)]
pub struct IdJson {
    pub id: u32,
}

pub fn list_json(list: &TodoList, filter: FilterOption, sort: SortOption) -> ListJson<'_> {
    ListJson {
        sort,
        filter,
        sections: visible_sections(filter)
            .iter()
            .map(|&section| SectionJson {
                section,
                items: display_section(list, section, sort),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Format a reminder time (epoch ms) in UTC.
pub fn format_reminder(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn item_line(item: &TodoItem, title_width: usize) -> String {
    let mark = if item.completed { 'x' } else { ' ' };
    let mut line = format!(
        "  [{}] {:>3}  {}",
        mark,
        item.id,
        fit_to_width(&item.title, title_width)
    );
    if let Some(first) = item.earliest_notification() {
        line.push_str("  ");
        line.push_str(&format_reminder(first));
        let more = item.notification_times.len() - 1;
        if more > 0 {
            line.push_str(&format!(" (+{})", more));
        }
    }
    line.trim_end().to_string()
}

/// Render the visible sections of `list`, one row per item.
pub fn render_list(
    list: &TodoList,
    filter: FilterOption,
    sort: SortOption,
    title_width: usize,
) -> String {
    let mut blocks = Vec::new();
    for &section in visible_sections(filter) {
        let items = display_section(list, section, sort);
        let mut lines = vec![format!("{} ({})", section, items.len())];
        if items.is_empty() {
            lines.push("  (empty)".to_string());
        }
        lines.extend(items.iter().map(|t| item_line(t, title_width)));
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}

fn describe_scroll(hint: ScrollHint) -> String {
    match hint {
        ScrollHint::ScrollTo(row) => format!("scroll to row {}", row),
        ScrollHint::PreserveOffset => "keep scroll offset".to_string(),
        ScrollHint::NoScroll => "no scroll".to_string(),
    }
}

fn describe_step(n: usize, step: &StepRecord) -> Vec<String> {
    let mut lines = Vec::new();
    match step.session {
        Session::Idle => lines.push(format!("step {}: idle", n)),
        Session::Dragging {
            dragged_index,
            offset,
            target_index,
        } => lines.push(format!(
            "step {}: row {} offset {} -> target {}",
            n, dragged_index, offset, target_index
        )),
    }
    for row in &step.rows {
        let v = &row.visual;
        if v.lifted {
            lines.push(format!(
                "    row {} #{} lifted dy={} scale={:.2} alpha={:.2}",
                row.index, row.item_id, v.translation_y, v.scale, v.alpha
            ));
        } else {
            lines.push(format!(
                "    row {} #{} target scale={:.2}",
                row.index, row.item_id, v.scale
            ));
        }
    }
    lines
}

/// Render a replay outcome. `list` is used to look up titles.
pub fn render_replay(outcome: &ReplayOutcome, list: &TodoList) -> String {
    let mut lines = Vec::new();
    for (i, step) in outcome.steps.iter().enumerate() {
        lines.extend(describe_step(i + 1, step));
    }

    if outcome.commits.is_empty() {
        lines.push("no move".to_string());
    }
    for c in &outcome.commits {
        let title = list.find(c.item_id).map_or("", |t| t.title.as_str());
        if c.applied {
            lines.push(format!(
                "moved #{} \"{}\" {} -> {}, {}",
                c.item_id,
                title,
                c.from,
                c.to,
                describe_scroll(c.scroll)
            ));
        } else {
            lines.push(format!(
                "ignored #{} \"{}\" {} -> {} (list is sorted)",
                c.item_id, title, c.from, c.to
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::DragConfig;
    use crate::ops::replay::{GestureTrace, ReplayOptions, replay_trace};
    use insta::assert_snapshot;

    fn sample_list() -> TodoList {
        let mut milk = TodoItem::new(1, "Buy milk");
        milk.notification_times = vec![1_700_000_000_000];
        let tea = TodoItem::new(2, "買牛奶");
        let mut rent = TodoItem::new(3, "Pay rent");
        rent.completed = true;
        rent.notification_times = vec![1_700_003_600_000, 1_700_000_000_000];
        TodoList::from_items(vec![milk, tea, rent])
    }

    #[test]
    fn test_format_reminder() {
        assert_eq!(format_reminder(1_700_000_000_000), "2023-11-14 22:13 UTC");
        assert_eq!(format_reminder(0), "1970-01-01 00:00 UTC");
    }

    #[test]
    fn test_render_list() {
        let output = render_list(&sample_list(), FilterOption::All, SortOption::Default, 10);
        assert_snapshot!(output, @r"
Unfinished (2)
  [ ]   1  Buy milk    2023-11-14 22:13 UTC
  [ ]   2  買牛奶

Finished (1)
  [x]   3  Pay rent    2023-11-14 22:13 UTC (+1)
");
    }

    #[test]
    fn test_render_list_filtered_and_sorted() {
        let output = render_list(
            &sample_list(),
            FilterOption::Uncompleted,
            SortOption::TitleZa,
            6,
        );
        assert_snapshot!(output, @r"
Unfinished (2)
  [ ]   2  買牛奶
  [ ]   1  Buy m…  2023-11-14 22:13 UTC
");
    }

    #[test]
    fn test_render_empty_section() {
        let output = render_list(&TodoList::default(), FilterOption::Completed, SortOption::Default, 10);
        assert_eq!(output, "Finished (0)\n  (empty)");
    }

    #[test]
    fn test_render_replay_with_steps() {
        let mut list = sample_list();
        let trace: GestureTrace = serde_json::from_str(
            r#"{"heights": [40, 40], "events": [{"start": 0}, {"move": 21}, "end"]}"#,
        )
        .unwrap();
        let options = ReplayOptions {
            record_steps: true,
            style: DragConfig::default(),
            ..ReplayOptions::default()
        };
        let outcome = replay_trace(&mut list, SectionKind::Unfinished, &trace, &options).unwrap();
        assert_snapshot!(render_replay(&outcome, &list), @r#"
step 1: row 0 offset 0 -> target 0
    row 0 #1 lifted dy=0 scale=0.95 alpha=0.70
step 2: row 0 offset 21 -> target 1
    row 0 #1 lifted dy=21 scale=0.95 alpha=0.70
    row 1 #2 target scale=1.05
step 3: idle
moved #1 "Buy milk" 0 -> 1, scroll to row 1
"#);
    }

    #[test]
    fn test_render_replay_no_move() {
        let outcome = ReplayOutcome::default();
        assert_eq!(render_replay(&outcome, &sample_list()), "no move");
    }

    #[test]
    fn test_list_json_shape() {
        let list = sample_list();
        let json = serde_json::to_value(list_json(&list, FilterOption::Completed, SortOption::Default)).unwrap();
        assert_eq!(json["sort"], "default");
        assert_eq!(json["filter"], "completed");
        assert_eq!(json["sections"][0]["section"], "finished");
        assert_eq!(json["sections"][0]["items"][0]["id"], 3);
    }
}
