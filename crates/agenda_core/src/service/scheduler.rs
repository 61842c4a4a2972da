//! Scheduling engine over the three agenda stores.
//!
//! # Responsibility
//! - Aggregate, filter and order items into week, day and upcoming views.
//! - Allocate ids from the namespace shared by all three kinds.
//! - Pass single-item writes through to the matching store.
//!
//! # Invariants
//! - Every read operation snapshots stores via `find_all()` at its start
//!   and never writes.
//! - Unreadable stores count as empty; read operations never fail.
//! - Bucket and day ordering uses `ordering::compare_for_display`; the
//!   upcoming list uses `ordering::compare_upcoming`.

use crate::model::agenda::{
    AgendaId, AgendaItem, AgendaKind, OneOffItem, RecurringItem, TaskItem,
};
use crate::model::view::{AgendaCounts, WeeklyView};
use crate::repo::item_store::{ItemStore, RepoResult, SqliteItemStore};
use crate::repo::memory_store::MemoryItemStore;
use crate::service::identity::next_id_after;
use crate::service::ordering::{compare_upcoming, sort_for_display};
use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use rusqlite::Connection;
use std::time::Instant;

/// Scheduler wired to SQLite stores sharing one connection.
pub type SqliteScheduler<'conn> = Scheduler<
    SqliteItemStore<'conn, RecurringItem>,
    SqliteItemStore<'conn, OneOffItem>,
    SqliteItemStore<'conn, TaskItem>,
>;

/// Scheduler wired to volatile in-process stores.
pub type MemoryScheduler = Scheduler<
    MemoryItemStore<RecurringItem>,
    MemoryItemStore<OneOffItem>,
    MemoryItemStore<TaskItem>,
>;

/// Returns the Monday on or before and the Sunday on or after `reference`.
pub fn week_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    let start = reference
        .checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN);
    let end = start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Engine context owning one store per agenda kind.
pub struct Scheduler<R, S, T> {
    regular: R,
    special: S,
    task: T,
}

impl<'conn> SqliteScheduler<'conn> {
    /// Builds a scheduler whose stores all use `conn`.
    pub fn sqlite(conn: &'conn Connection) -> Self {
        Self::new(
            SqliteItemStore::new(conn),
            SqliteItemStore::new(conn),
            SqliteItemStore::new(conn),
        )
    }
}

impl MemoryScheduler {
    pub fn in_memory() -> Self {
        Self::new(
            MemoryItemStore::new(),
            MemoryItemStore::new(),
            MemoryItemStore::new(),
        )
    }
}

impl<R, S, T> Scheduler<R, S, T>
where
    R: ItemStore<RecurringItem>,
    S: ItemStore<OneOffItem>,
    T: ItemStore<TaskItem>,
{
    pub fn new(regular: R, special: S, task: T) -> Self {
        Self {
            regular,
            special,
            task,
        }
    }

    pub fn regular_store(&self) -> &R {
        &self.regular
    }

    pub fn special_store(&self) -> &S {
        &self.special
    }

    pub fn task_store(&self) -> &T {
        &self.task
    }

    /// Builds the Monday-to-Sunday view of the week containing `reference`.
    ///
    /// Recurring items land on their weekday in every week. One-off items
    /// and tasks land on the weekday of their date when it falls inside the
    /// week, bounds inclusive.
    pub fn generate_weekly_schedule(&self, reference: NaiveDate) -> WeeklyView {
        let started_at = Instant::now();
        let (start, end) = week_bounds(reference);
        let mut days: [Vec<AgendaItem>; 7] = Default::default();

        for item in self.regular.find_all() {
            days[item.weekday.num_days_from_monday() as usize].push(item.into());
        }

        let dated = self
            .special
            .find_all()
            .into_iter()
            .map(AgendaItem::from)
            .chain(self.task.find_all().into_iter().map(AgendaItem::from));
        for item in dated {
            let Some(date) = item.relevant_date() else {
                continue;
            };
            if date < start || date > end {
                continue;
            }
            days[date.weekday().num_days_from_monday() as usize].push(item);
        }

        for bucket in &mut days {
            sort_for_display(bucket);
        }

        let view = WeeklyView::new(start, days);
        debug!(
            "event=schedule_build module=service status=ok view=week week_start={start} items={} duration_ms={}",
            view.total_items(),
            started_at.elapsed().as_millis()
        );
        view
    }

    /// Ordered items falling on exactly `date`.
    pub fn agendas_for_day(&self, date: NaiveDate) -> Vec<AgendaItem> {
        let weekday = date.weekday();
        let mut items: Vec<AgendaItem> = self
            .regular
            .find_all()
            .into_iter()
            .filter(|item| item.weekday == weekday)
            .map(AgendaItem::from)
            .collect();

        items.extend(
            self.special
                .find_all()
                .into_iter()
                .filter(|item| item.date == date)
                .map(AgendaItem::from),
        );
        items.extend(
            self.task
                .find_all()
                .into_iter()
                .filter(|item| item.due_date == date)
                .map(AgendaItem::from),
        );

        sort_for_display(&mut items);
        debug!(
            "event=schedule_build module=service status=ok view=day date={date} items={}",
            items.len()
        );
        items
    }

    /// Tasks due within `[reference, reference + days_ahead]`, ordered by
    /// due date then priority.
    pub fn upcoming_tasks(&self, reference: NaiveDate, days_ahead: u32) -> Vec<TaskItem> {
        let deadline = reference
            .checked_add_days(Days::new(u64::from(days_ahead)))
            .unwrap_or(NaiveDate::MAX);

        let mut tasks: Vec<TaskItem> = self
            .task
            .find_all()
            .into_iter()
            .filter(|task| task.due_date >= reference && task.due_date <= deadline)
            .collect();
        tasks.sort_by(compare_upcoming);
        tasks
    }

    /// Number of stored items per kind.
    pub fn agenda_counts(&self) -> AgendaCounts {
        AgendaCounts {
            regular: self.regular.find_all().len(),
            special: self.special.find_all().len(),
            task: self.task.find_all().len(),
        }
    }

    /// Returns one more than the largest id stored in any of the three
    /// stores (1 when all are empty), or `None` when the id space is used up.
    ///
    /// Ids come from `ItemStore::max_id`, so rows that fail to decode still
    /// reserve their id. A store that cannot report its ids fails the call
    /// instead of degrading to empty.
    ///
    /// Two callers that allocate before either persists receive the same
    /// id; serialize allocation with the write that uses it.
    pub fn next_id(&self) -> RepoResult<Option<AgendaId>> {
        let maxima = [
            self.regular.max_id()?,
            self.special.max_id()?,
            self.task.max_id()?,
        ];
        Ok(next_id_after(maxima.into_iter().flatten()))
    }

    /// Looks an id up across all three kinds.
    pub fn find_by_id(&self, id: AgendaId) -> Option<AgendaItem> {
        self.regular
            .find_by_id(id)
            .map(AgendaItem::from)
            .or_else(|| self.special.find_by_id(id).map(AgendaItem::from))
            .or_else(|| self.task.find_by_id(id).map(AgendaItem::from))
    }

    /// Upserts `item` into the store matching its kind.
    pub fn save(&self, item: &AgendaItem) -> RepoResult<()> {
        match item {
            AgendaItem::Regular(item) => self.regular.save(item),
            AgendaItem::Special(item) => self.special.save(item),
            AgendaItem::Task(item) => self.task.save(item),
        }
    }

    /// Deletes `id` from the store of `kind`; absent ids are a no-op.
    pub fn delete_by_id(&self, kind: AgendaKind, id: AgendaId) -> RepoResult<()> {
        match kind {
            AgendaKind::Regular => self.regular.delete_by_id(id),
            AgendaKind::Special => self.special.delete_by_id(id),
            AgendaKind::Task => self.task.delete_by_id(id),
        }
    }
}
