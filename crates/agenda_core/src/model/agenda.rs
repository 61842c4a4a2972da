//! Agenda item model.
//!
//! # Responsibility
//! - Define the three concrete item kinds and the `AgendaItem` sum type.
//! - Expose the shared fields and the derived relevant date.
//!
//! # Invariants
//! - `id` is unique across the union of all three kinds.
//! - Recurring items always carry `weekday` and `time_of_day`.
//! - One-off items always carry `date` and `time_of_day`.
//! - Tasks always carry `due_date`; `priority` defaults to `Medium`.
//! - The model does not validate titles; callers do that before saving.

use crate::model::priority::Priority;
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier shared by every agenda kind.
pub type AgendaId = u32;

/// Discriminator for the three agenda kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaKind {
    /// Repeats every week on a fixed weekday and time.
    Regular,
    /// Happens once, on a fixed date and time.
    Special,
    /// Day-granular item with a due date and priority.
    Task,
}

impl AgendaKind {
    /// All kinds in display order.
    pub const ALL: [AgendaKind; 3] = [Self::Task, Self::Special, Self::Regular];

    /// Stable label used in counts and user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Special => "Special",
            Self::Task => "Task",
        }
    }

    /// Parses a label case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "regular" | "recurring" => Some(Self::Regular),
            "special" | "one_off" | "oneoff" => Some(Self::Special),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

impl Display for AgendaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Item that recurs every week with no terminal occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringItem {
    pub id: AgendaId,
    pub title: String,
    /// Free-text classification label.
    pub category: String,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub weekday: Weekday,
    pub time_of_day: NaiveTime,
}

impl RecurringItem {
    pub fn new(
        id: AgendaId,
        title: impl Into<String>,
        category: impl Into<String>,
        weekday: Weekday,
        time_of_day: NaiveTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            group: None,
            notes: None,
            weekday,
            time_of_day,
        }
    }
}

/// Item that occurs exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOffItem {
    pub id: AgendaId,
    pub title: String,
    pub category: String,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time_of_day: NaiveTime,
}

impl OneOffItem {
    pub fn new(
        id: AgendaId,
        title: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
        time_of_day: NaiveTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            group: None,
            notes: None,
            date,
            time_of_day,
        }
    }
}

/// Day-granular task with a due date and priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: AgendaId,
    pub title: String,
    pub category: String,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
}

impl TaskItem {
    /// Creates a task with `Priority::Medium`.
    pub fn new(
        id: AgendaId,
        title: impl Into<String>,
        category: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            group: None,
            notes: None,
            due_date,
            priority: Priority::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Any agenda item, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgendaItem {
    Regular(RecurringItem),
    Special(OneOffItem),
    Task(TaskItem),
}

macro_rules! shared_field {
    ($self:ident, $field:ident) => {
        match $self {
            AgendaItem::Regular(item) => &item.$field,
            AgendaItem::Special(item) => &item.$field,
            AgendaItem::Task(item) => &item.$field,
        }
    };
}

impl AgendaItem {
    pub fn id(&self) -> AgendaId {
        *shared_field!(self, id)
    }

    pub fn title(&self) -> &str {
        shared_field!(self, title)
    }

    pub fn category(&self) -> &str {
        shared_field!(self, category)
    }

    pub fn group(&self) -> Option<&str> {
        shared_field!(self, group).as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        shared_field!(self, notes).as_deref()
    }

    pub fn kind(&self) -> AgendaKind {
        match self {
            Self::Regular(_) => AgendaKind::Regular,
            Self::Special(_) => AgendaKind::Special,
            Self::Task(_) => AgendaKind::Task,
        }
    }

    /// Returns the calendar date this item is anchored to.
    ///
    /// Recurring items have no single date and return `None`.
    pub fn relevant_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Regular(_) => None,
            Self::Special(item) => Some(item.date),
            Self::Task(item) => Some(item.due_date),
        }
    }

    /// Returns the time of day for timed kinds; tasks have none.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        match self {
            Self::Regular(item) => Some(item.time_of_day),
            Self::Special(item) => Some(item.time_of_day),
            Self::Task(_) => None,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, Self::Task(_))
    }
}

impl From<RecurringItem> for AgendaItem {
    fn from(value: RecurringItem) -> Self {
        Self::Regular(value)
    }
}

impl From<OneOffItem> for AgendaItem {
    fn from(value: OneOffItem) -> Self {
        Self::Special(value)
    }
}

impl From<TaskItem> for AgendaItem {
    fn from(value: TaskItem) -> Self {
        Self::Task(value)
    }
}

/// Common access to the id of any stored item kind.
pub trait Identified {
    fn agenda_id(&self) -> AgendaId;
}

impl Identified for RecurringItem {
    fn agenda_id(&self) -> AgendaId {
        self.id
    }
}

impl Identified for OneOffItem {
    fn agenda_id(&self) -> AgendaId {
        self.id
    }
}

impl Identified for TaskItem {
    fn agenda_id(&self) -> AgendaId {
        self.id
    }
}

impl Identified for AgendaItem {
    fn agenda_id(&self) -> AgendaId {
        self.id()
    }
}
