//! Display ordering policy shared by the engine and presentation layers.
//!
//! # Invariants
//! - Tasks sort after every timed item; they occupy "end of day".
//! - Tasks compare by priority rank, timed items by time of day.
//! - Callers must use a stable sort: ties keep their input order and no
//!   secondary key is applied.

use crate::model::agenda::{AgendaItem, TaskItem};
use std::cmp::Ordering;

/// Comparator for heterogeneous day/week buckets.
pub fn compare_for_display(left: &AgendaItem, right: &AgendaItem) -> Ordering {
    match (left, right) {
        (AgendaItem::Task(left), AgendaItem::Task(right)) => {
            left.priority.rank().cmp(&right.priority.rank())
        }
        (AgendaItem::Task(_), _) => Ordering::Greater,
        (_, AgendaItem::Task(_)) => Ordering::Less,
        _ => time_key(left).cmp(&time_key(right)),
    }
}

/// Two-key comparator for the upcoming-task list: due date, then priority.
pub fn compare_upcoming(left: &TaskItem, right: &TaskItem) -> Ordering {
    left.due_date
        .cmp(&right.due_date)
        .then_with(|| left.priority.rank().cmp(&right.priority.rank()))
}

/// Stable in-place sort using `compare_for_display`.
pub fn sort_for_display(items: &mut [AgendaItem]) {
    items.sort_by(compare_for_display);
}

// Items without a time sort as the latest possible time.
fn time_key(item: &AgendaItem) -> (bool, Option<chrono::NaiveTime>) {
    let time = item.time_of_day();
    (time.is_none(), time)
}
