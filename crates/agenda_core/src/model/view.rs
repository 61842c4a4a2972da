//! Read-only views returned by the scheduling engine.
//!
//! # Invariants
//! - `WeeklyView` always holds exactly seven buckets, Monday first.
//! - Views are built fresh per request and never mutated afterwards.

use crate::model::agenda::{AgendaItem, AgendaKind};
use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Weekdays in canonical Monday-to-Sunday order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Agenda items of one calendar week, bucketed per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyView {
    week_start: NaiveDate,
    days: [Vec<AgendaItem>; 7],
}

impl WeeklyView {
    /// Builds a view from already-ordered buckets indexed Monday = 0.
    pub(crate) fn new(week_start: NaiveDate, days: [Vec<AgendaItem>; 7]) -> Self {
        Self { week_start, days }
    }

    /// Monday of the covered week.
    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Sunday of the covered week.
    pub fn week_end(&self) -> NaiveDate {
        self.week_start
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Ordered items for one weekday. Empty when nothing falls on that day.
    pub fn items_for(&self, weekday: Weekday) -> &[AgendaItem] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    /// Iterates all seven weekdays in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[AgendaItem])> + '_ {
        WEEKDAYS
            .iter()
            .map(move |weekday| (*weekday, self.items_for(*weekday)))
    }

    /// Calendar date of the given weekday within this week.
    pub fn date_of(&self, weekday: Weekday) -> NaiveDate {
        self.week_start
            .checked_add_days(Days::new(u64::from(weekday.num_days_from_monday())))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn total_items(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}

/// Number of stored items per agenda kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgendaCounts {
    pub regular: usize,
    pub special: usize,
    pub task: usize,
}

impl AgendaCounts {
    pub fn get(&self, kind: AgendaKind) -> usize {
        match kind {
            AgendaKind::Regular => self.regular,
            AgendaKind::Special => self.special,
            AgendaKind::Task => self.task,
        }
    }

    pub fn total(&self) -> usize {
        self.regular + self.special + self.task
    }

    /// Label-keyed counts (`Regular`, `Special`, `Task`), every label present.
    pub fn labeled(&self) -> BTreeMap<&'static str, usize> {
        AgendaKind::ALL
            .iter()
            .map(|kind| (kind.label(), self.get(*kind)))
            .collect()
    }
}
