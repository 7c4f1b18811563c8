//! Replay a recorded gesture trace against one section of a list.
//!
//! The list plays the owner: each commit goes through [`apply_commit`], and
//! the controller is handed the refreshed display list afterwards, as a view
//! layer would after the owner's collection changes.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::config::{DragConfig, SortOption};
use crate::model::list::TodoList;
use crate::model::todo::SectionKind;
use crate::ops::display::{ScrollHint, apply_commit, display_section, scroll_hint};
use crate::ops::todo_ops::TodoError;
use crate::reorder::{DragEvent, ItemVisual, Move, ReorderController, Session, item_visual};

/// A recorded gesture, plus any row heights known up front.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GestureTrace {
    /// Initial height per row position; `null` for rows not yet measured
    #[serde(default)]
    pub heights: Vec<Option<f32>>,
    pub events: Vec<TraceStep>,
}

/// One step of a trace: a layout measurement or a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStep {
    Measure { index: usize, height: f32 },
    Start(usize),
    Move(f32),
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    pub from: usize,
    pub to: usize,
    /// ID of the moved item, as displayed when the drag ended
    pub item_id: u32,
    /// False when the commit was ignored because the display was sorted
    pub applied: bool,
    pub scroll: ScrollHint,
}

/// A row drawn differently from rest during a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowVisual {
    pub index: usize,
    pub item_id: u32,
    #[serde(flatten)]
    pub visual: ItemVisual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub session: Session,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<RowVisual>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub commits: Vec<CommitRecord>,
    /// State after each step; only filled when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub sort: SortOption,
    /// Record the session and highlighted rows after every step
    pub record_steps: bool,
    pub style: DragConfig,
}

fn display_ids(list: &TodoList, section: SectionKind, sort: SortOption) -> Vec<u32> {
    display_section(list, section, sort)
        .into_iter()
        .map(|t| t.id)
        .collect()
}

/// Run `trace` over the display list of `section`, applying commits to `list`.
pub fn replay_trace(
    list: &mut TodoList,
    section: SectionKind,
    trace: &GestureTrace,
    options: &ReplayOptions,
) -> Result<ReplayOutcome, TodoError> {
    let sort = options.sort;
    let pending: Rc<RefCell<Vec<Move>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pending);
    let mut controller = ReorderController::new(display_ids(list, section, sort), move |from, to| {
        sink.borrow_mut().push(Move { from, to });
    });
    for (index, height) in trace.heights.iter().enumerate() {
        if let Some(height) = *height {
            controller.record_height(index, height);
        }
    }

    let mut outcome = ReplayOutcome::default();
    for step in &trace.events {
        match *step {
            TraceStep::Measure { index, height } => controller.record_height(index, height),
            TraceStep::Start(index) => {
                controller.dispatch(DragEvent::Start(index));
            }
            TraceStep::Move(delta_y) => {
                controller.dispatch(DragEvent::Move(delta_y));
            }
            TraceStep::End => {
                controller.dispatch(DragEvent::End);
            }
        }

        let commits: Vec<Move> = pending.borrow_mut().drain(..).collect();
        for mv in commits {
            let item_id = controller.items()[mv.from];
            let applied = apply_commit(list, section, sort, mv)?;
            let scroll = scroll_hint(
                section,
                mv,
                list.section_len(SectionKind::Unfinished),
                list.section_len(SectionKind::Finished),
            );
            outcome.commits.push(CommitRecord {
                from: mv.from,
                to: mv.to,
                item_id,
                applied,
                scroll,
            });
            if applied {
                controller.set_items(display_ids(list, section, sort));
            }
        }

        if options.record_steps {
            outcome.steps.push(record_step(&controller, &options.style));
        }
    }

    Ok(outcome)
}

fn record_step(controller: &ReorderController<u32>, style: &DragConfig) -> StepRecord {
    let session = controller.session();
    let rows = controller
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, &item_id)| {
            let visual = item_visual(&session, index, style);
            (visual != ItemVisual::RESTING).then_some(RowVisual {
                index,
                item_id,
                visual,
            })
        })
        .collect();
    StepRecord { session, rows }
}
