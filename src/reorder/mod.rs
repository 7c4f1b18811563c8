//! Drag-to-reorder engine for one vertical list.
//!
//! A [`ReorderController`] owns the lifecycle of a single drag gesture: it is
//! fed [`DragEvent`]s by whatever detects pointer gestures, height
//! measurements by whatever lays the rows out, and reports at most one
//! [`Move`] per gesture back to the list owner.
//!
//! # Invariants
//!
//! 1. The controller is either idle or dragging; `dragged_index()` is `Some`
//!    exactly while dragging.
//! 2. The drop target is recomputed from the drag origin on every update,
//!    never incrementally from the previous target.
//! 3. The move callback fires at most once per gesture, only on `End`, and
//!    only when origin and target are distinct valid indices.
//! 4. Invalid calls (bad index, no session, stale origin after the list
//!    shrank) are silent no-ops or silent cleanups.

mod feedback;
mod target;

pub use feedback::{ItemVisual, item_visual};
pub use target::compute_target;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Live drag state, as read by the rendering layer every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Idle,
    Dragging {
        /// Index the item occupied when the drag began (the origin)
        dragged_index: usize,
        /// Net vertical displacement since drag start, positive is downward
        offset: f32,
        /// Index the item would land on if released now
        target_index: usize,
    },
}

impl Session {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Session::Dragging { .. })
    }

    pub fn dragged_index(&self) -> Option<usize> {
        match self {
            Session::Dragging { dragged_index, .. } => Some(*dragged_index),
            Session::Idle => None,
        }
    }

    pub fn target_index(&self) -> Option<usize> {
        match self {
            Session::Dragging { target_index, .. } => Some(*target_index),
            Session::Idle => None,
        }
    }

    /// Accumulated drag offset; always 0 when idle.
    pub fn offset(&self) -> f32 {
        match self {
            Session::Dragging { offset, .. } => *offset,
            Session::Idle => 0.0,
        }
    }
}

/// A gesture phase delivered by the gesture source.
///
/// Serialized externally tagged: `{"start": 0}`, `{"move": 21.5}`, `"end"`.
/// A cancelled gesture is delivered as `End`; both converge on the same
/// cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragEvent {
    Start(usize),
    Move(f32),
    End,
}

/// A committed reorder: the item at `from` should end up at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// Handle returned by [`ReorderController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type MoveCallback = Box<dyn FnMut(usize, usize)>;
type Observer = Box<dyn FnMut(&Session)>;

/// Converts a vertical drag gesture plus per-row heights into a reorder.
pub struct ReorderController<T> {
    items: Vec<T>,
    /// Last measured height per row position. Keyed by index, not identity,
    /// and never cleared.
    heights: HashMap<usize, f32>,
    session: Session,
    on_move: MoveCallback,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<T> ReorderController<T> {
    /// Create an idle controller over `items`. `on_move(from, to)` is the
    /// owner's commit callback.
    pub fn new(items: Vec<T>, on_move: impl FnMut(usize, usize) + 'static) -> Self {
        ReorderController {
            items,
            heights: HashMap::new(),
            session: Session::Idle,
            on_move: Box::new(on_move),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the working list. An active session is kept; its indices now
    /// refer to positions in the new list.
    pub fn set_items(&mut self, items: Vec<T>) {
        if let Some(dragged) = self.session.dragged_index()
            && dragged >= items.len()
        {
            log::debug!(
                "list replaced mid-drag: origin {} is past the new length {}",
                dragged,
                items.len()
            );
        }
        self.items = items;
    }

    /// Record (or overwrite) the measured height of the row at `index`.
    /// Non-positive and non-finite heights are ignored.
    pub fn record_height(&mut self, index: usize, height: f32) {
        if !(height.is_finite() && height > 0.0) {
            log::debug!("ignoring height {} for row {}", height, index);
            return;
        }
        self.heights.insert(index, height);
    }

    pub fn height(&self, index: usize) -> Option<f32> {
        self.heights.get(&index).copied()
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.session.dragged_index()
    }

    pub fn target_index(&self) -> Option<usize> {
        self.session.target_index()
    }

    pub fn drag_offset(&self) -> f32 {
        self.session.offset()
    }

    /// Start a session anchored at `index`. Out-of-range indices are ignored.
    pub fn begin_drag(&mut self, index: usize) {
        if index >= self.items.len() {
            log::debug!(
                "drag start at {} ignored: list has {} items",
                index,
                self.items.len()
            );
            return;
        }
        self.session = Session::Dragging {
            dragged_index: index,
            offset: 0.0,
            target_index: index,
        };
        log::debug!("drag started at {}", index);
        self.notify();
    }

    /// Accumulate `delta_y` and recompute the drop target from the origin.
    ///
    /// If the origin is no longer a valid index (the list shrank under the
    /// drag), the session is cleaned up as if it had ended, without a commit.
    pub fn update_drag(&mut self, delta_y: f32) {
        let Session::Dragging {
            dragged_index,
            offset,
            ..
        } = self.session
        else {
            log::trace!("drag update with no active session");
            return;
        };

        if dragged_index >= self.items.len() {
            log::debug!(
                "origin {} invalidated by list change ({} items), cancelling drag",
                dragged_index,
                self.items.len()
            );
            self.end_drag();
            return;
        }

        let offset = offset + delta_y;
        let heights = &self.heights;
        let target_index = compute_target(dragged_index, offset, self.items.len(), |i| {
            heights.get(&i).copied()
        });
        log::trace!(
            "drag from {}: offset {} -> target {}",
            dragged_index,
            offset,
            target_index
        );

        self.session = Session::Dragging {
            dragged_index,
            offset,
            target_index,
        };
        self.notify();
    }

    /// Finish the session, firing the move callback if the item landed
    /// somewhere new. Returns the committed move, if any. Always leaves the
    /// controller idle; a no-op when already idle.
    pub fn end_drag(&mut self) -> Option<Move> {
        let Session::Dragging {
            dragged_index,
            target_index,
            ..
        } = self.session
        else {
            return None;
        };
        self.session = Session::Idle;

        let len = self.items.len();
        let commit = (dragged_index < len && target_index < len && dragged_index != target_index)
            .then_some(Move {
                from: dragged_index,
                to: target_index,
            });

        match commit {
            Some(m) => {
                log::debug!("drag committed: {} -> {}", m.from, m.to);
                (self.on_move)(m.from, m.to);
            }
            None => log::debug!("drag ended without a move"),
        }
        self.notify();
        commit
    }

    /// Single entry point for gesture events. Returns the committed move when
    /// the event ends a gesture with a genuine index change.
    pub fn dispatch(&mut self, event: DragEvent) -> Option<Move> {
        match event {
            DragEvent::Start(index) => {
                self.begin_drag(index);
                None
            }
            DragEvent::Move(delta_y) => {
                self.update_drag(delta_y);
                None
            }
            DragEvent::End => self.end_drag(),
        }
    }

    /// Register an observer called with the new session after every state
    /// change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Session) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        let session = self.session;
        for (_, observer) in self.observers.iter_mut() {
            observer(&session);
        }
    }
}

impl<T> fmt::Debug for ReorderController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderController")
            .field("items", &self.items.len())
            .field("heights", &self.heights)
            .field("session", &self.session)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Controller over `n` rows, each measured at `height`, recording commits.
    fn controller(n: usize, height: f32) -> (ReorderController<usize>, Rc<RefCell<Vec<Move>>>) {
        let commits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&commits);
        let mut c = ReorderController::new((0..n).collect(), move |from, to| {
            sink.borrow_mut().push(Move { from, to });
        });
        for i in 0..n {
            c.record_height(i, height);
        }
        (c, commits)
    }

    #[test]
    fn test_new_controller_is_idle() {
        let (c, _) = controller(3, 40.0);
        assert_eq!(c.session(), Session::Idle);
        assert_eq!(c.dragged_index(), None);
        assert_eq!(c.target_index(), None);
        assert_eq!(c.drag_offset(), 0.0);
    }

    #[test]
    fn test_begin_drag_sets_origin_and_target() {
        let (mut c, _) = controller(3, 40.0);
        c.begin_drag(1);
        assert_eq!(
            c.session(),
            Session::Dragging {
                dragged_index: 1,
                offset: 0.0,
                target_index: 1
            }
        );
    }

    #[test]
    fn test_begin_drag_out_of_range_is_noop() {
        let (mut c, _) = controller(3, 40.0);
        c.begin_drag(3);
        assert_eq!(c.session(), Session::Idle);
        c.begin_drag(usize::MAX);
        assert_eq!(c.session(), Session::Idle);
    }

    #[test]
    fn test_begin_drag_on_empty_list_is_noop() {
        let mut c: ReorderController<u8> = ReorderController::new(Vec::new(), |_, _| {});
        c.begin_drag(0);
        assert!(!c.session().is_dragging());
    }

    #[test]
    fn test_begin_then_end_never_commits() {
        let (mut c, commits) = controller(3, 40.0);
        for i in 0..3 {
            c.begin_drag(i);
            assert_eq!(c.end_drag(), None);
        }
        assert!(commits.borrow().is_empty());
    }

    #[test]
    fn test_monotonic_downward_drag() {
        let (mut c, _) = controller(3, 40.0);
        c.begin_drag(0);
        c.update_drag(21.0);
        assert_eq!(c.target_index(), Some(1));
        c.update_drag(20.0);
        assert_eq!(c.target_index(), Some(1));
        c.update_drag(20.0);
        assert_eq!(c.target_index(), Some(2));
        assert_eq!(c.drag_offset(), 61.0);
    }

    #[test]
    fn test_target_follows_accumulated_sign_not_increment() {
        let (mut c, _) = controller(4, 40.0);
        c.begin_drag(2);
        c.update_drag(-50.0);
        assert_eq!(c.target_index(), Some(1));
        // Moving back down but still net upward keeps scanning upward.
        c.update_drag(5.0);
        assert_eq!(c.target_index(), Some(1));
        c.update_drag(40.0);
        assert_eq!(c.target_index(), Some(2));
    }

    #[test]
    fn test_zero_sum_returns_to_origin() {
        let (mut c, _) = controller(5, 40.0);
        c.begin_drag(2);
        for delta in [35.0, 50.0, -120.0, 10.0, 25.0] {
            c.update_drag(delta);
        }
        assert_eq!(c.drag_offset(), 0.0);
        assert_eq!(c.target_index(), Some(2));
    }

    #[test]
    fn test_missing_height_does_not_block() {
        let mut c = ReorderController::new(vec!['a', 'b', 'c'], |_, _| {});
        c.record_height(0, 30.0);
        c.record_height(2, 30.0);
        c.begin_drag(0);
        c.update_drag(16.0);
        assert_eq!(c.target_index(), Some(2));
    }

    #[test]
    fn test_late_height_report_is_picked_up_on_next_update() {
        let mut c = ReorderController::new(vec!['a', 'b', 'c'], |_, _| {});
        c.begin_drag(0);
        c.update_drag(25.0);
        assert_eq!(c.target_index(), Some(0));
        c.record_height(1, 40.0);
        c.update_drag(0.0);
        assert_eq!(c.target_index(), Some(1));
    }

    #[test]
    fn test_end_commits_once() {
        let (mut c, commits) = controller(3, 40.0);
        c.begin_drag(0);
        c.update_drag(61.0);
        assert_eq!(c.end_drag(), Some(Move { from: 0, to: 2 }));
        assert_eq!(c.end_drag(), None);
        assert_eq!(*commits.borrow(), vec![Move { from: 0, to: 2 }]);
    }

    #[test]
    fn test_end_returns_to_idle() {
        let (mut c, _) = controller(3, 40.0);
        c.begin_drag(1);
        c.update_drag(-30.0);
        c.end_drag();
        assert_eq!(c.session(), Session::Idle);
        assert_eq!(c.drag_offset(), 0.0);
    }

    #[test]
    fn test_update_without_session_is_noop() {
        let (mut c, commits) = controller(3, 40.0);
        c.update_drag(100.0);
        assert_eq!(c.session(), Session::Idle);
        assert_eq!(c.end_drag(), None);
        assert!(commits.borrow().is_empty());
    }

    #[test]
    fn test_shrinking_list_cancels_on_next_update() {
        let (mut c, commits) = controller(4, 40.0);
        c.begin_drag(3);
        c.update_drag(-90.0);
        assert_eq!(c.target_index(), Some(1));
        c.set_items(vec![0, 1]);
        // Session survives set_items itself.
        assert!(c.session().is_dragging());
        c.update_drag(-1.0);
        assert_eq!(c.session(), Session::Idle);
        assert!(commits.borrow().is_empty());
    }

    #[test]
    fn test_end_after_shrink_does_not_commit_stale_target() {
        let (mut c, commits) = controller(4, 40.0);
        c.begin_drag(0);
        c.update_drag(130.0);
        assert_eq!(c.target_index(), Some(3));
        c.set_items(vec![0, 1]);
        assert_eq!(c.end_drag(), None);
        assert!(commits.borrow().is_empty());
    }

    #[test]
    fn test_heights_survive_sessions_and_list_changes() {
        let (mut c, _) = controller(3, 40.0);
        c.begin_drag(0);
        c.end_drag();
        c.set_items(vec![7, 8, 9, 10]);
        assert_eq!(c.height(2), Some(40.0));
        assert_eq!(c.height(3), None);
    }

    #[test]
    fn test_record_height_overwrites_and_rejects_invalid() {
        let (mut c, _) = controller(2, 40.0);
        c.record_height(1, 55.0);
        assert_eq!(c.height(1), Some(55.0));
        c.record_height(1, 0.0);
        c.record_height(1, -3.0);
        c.record_height(1, f32::NAN);
        assert_eq!(c.height(1), Some(55.0));
    }

    #[test]
    fn test_dispatch_routes_events() {
        let (mut c, commits) = controller(3, 40.0);
        assert_eq!(c.dispatch(DragEvent::Start(2)), None);
        assert_eq!(c.dispatch(DragEvent::Move(-21.0)), None);
        assert_eq!(c.target_index(), Some(1));
        assert_eq!(c.dispatch(DragEvent::End), Some(Move { from: 2, to: 1 }));
        assert_eq!(commits.borrow().len(), 1);
    }

    #[test]
    fn test_restart_replaces_session() {
        let (mut c, _) = controller(3, 40.0);
        c.begin_drag(0);
        c.update_drag(61.0);
        c.begin_drag(1);
        assert_eq!(c.target_index(), Some(1));
        assert_eq!(c.drag_offset(), 0.0);
    }

    #[test]
    fn test_observers_see_every_change() {
        let (mut c, _) = controller(3, 40.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        c.subscribe(move |s| sink.borrow_mut().push(*s));

        c.update_drag(5.0); // no session, no notification
        c.begin_drag(0);
        c.update_drag(21.0);
        c.end_drag();
        c.end_drag(); // already idle

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1].target_index(), Some(1));
        assert_eq!(seen[2], Session::Idle);
    }

    #[test]
    fn test_unsubscribe() {
        let (mut c, _) = controller(3, 40.0);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = c.subscribe(move |_| *sink.borrow_mut() += 1);
        c.begin_drag(0);
        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.end_drag();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_drag_event_json_shape() {
        let events: Vec<DragEvent> =
            serde_json::from_str(r#"[{"start": 1}, {"move": -12.5}, {"move": 3}, "end"]"#).unwrap();
        assert_eq!(
            events,
            vec![
                DragEvent::Start(1),
                DragEvent::Move(-12.5),
                DragEvent::Move(3.0),
                DragEvent::End
            ]
        );
    }
}
