//! Agenda create/update/delete use-cases for presentation layers.
//!
//! # Responsibility
//! - Validate user input before any item is constructed.
//! - Allocate ids and persist through the matching store.
//! - Turn failures into messages fit for end users.
//!
//! # Invariants
//! - Titles are non-blank; kind-specific fields are present.
//! - Blank groups are stored as `None`.
//! - Id allocation and the write that consumes it happen under one
//!   `&mut self` borrow, so one service instance never hands out an id twice.

use crate::model::agenda::{
    AgendaId, AgendaItem, AgendaKind, OneOffItem, RecurringItem, TaskItem,
};
use crate::model::priority::Priority;
use crate::repo::item_store::{ItemStore, RepoError};
use crate::service::scheduler::Scheduler;
use chrono::{NaiveDate, NaiveTime, Weekday};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftValidationError {
    EmptyTitle,
    MissingDueDate,
    MissingSpecialSchedule,
    MissingRegularSchedule,
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::MissingDueDate => write!(f, "due date is required for a task"),
            Self::MissingSpecialSchedule => {
                write!(f, "date and time are required for a special agenda")
            }
            Self::MissingRegularSchedule => {
                write!(f, "weekday and time are required for a regular agenda")
            }
        }
    }
}

impl Error for DraftValidationError {}

/// Service error for agenda use-cases.
#[derive(Debug)]
pub enum AgendaServiceError {
    Validation(DraftValidationError),
    /// Target agenda does not exist.
    NotFound(AgendaId),
    /// Update would move an item to a different kind.
    KindChanged {
        id: AgendaId,
        stored: AgendaKind,
        requested: AgendaKind,
    },
    /// Every id in the shared namespace is taken.
    IdSpaceExhausted,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AgendaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "agenda not found: {id}"),
            Self::KindChanged {
                id,
                stored,
                requested,
            } => write!(
                f,
                "agenda {id} is a {stored} agenda and cannot become a {requested} agenda"
            ),
            Self::IdSpaceExhausted => write!(f, "no agenda ids left to allocate"),
            Self::Repo(err) => write!(f, "failed to save agenda: {err}"),
        }
    }
}

impl Error for AgendaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DraftValidationError> for AgendaServiceError {
    fn from(value: DraftValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for AgendaServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Unvalidated agenda input as collected by a form or command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDraft {
    pub kind: AgendaKind,
    pub title: String,
    /// Defaults to the kind label when blank.
    pub category: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
    /// Task due date.
    pub due_date: Option<NaiveDate>,
    /// Task priority; `Medium` when unset.
    pub priority: Option<Priority>,
    /// Special agenda date.
    pub date: Option<NaiveDate>,
    /// Regular agenda weekday.
    pub weekday: Option<Weekday>,
    /// Time of day for regular and special agendas.
    pub time_of_day: Option<NaiveTime>,
}

impl AgendaDraft {
    pub fn new(kind: AgendaKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            category: None,
            group: None,
            notes: None,
            due_date: None,
            priority: None,
            date: None,
            weekday: None,
            time_of_day: None,
        }
    }

    pub fn task(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(due_date),
            ..Self::new(AgendaKind::Task, title)
        }
    }

    pub fn special(title: impl Into<String>, date: NaiveDate, time_of_day: NaiveTime) -> Self {
        Self {
            date: Some(date),
            time_of_day: Some(time_of_day),
            ..Self::new(AgendaKind::Special, title)
        }
    }

    pub fn regular(title: impl Into<String>, weekday: Weekday, time_of_day: NaiveTime) -> Self {
        Self {
            weekday: Some(weekday),
            time_of_day: Some(time_of_day),
            ..Self::new(AgendaKind::Regular, title)
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the draft without allocating an id.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        if self.title.trim().is_empty() {
            return Err(DraftValidationError::EmptyTitle);
        }
        match self.kind {
            AgendaKind::Task if self.due_date.is_none() => {
                Err(DraftValidationError::MissingDueDate)
            }
            AgendaKind::Special if self.date.is_none() || self.time_of_day.is_none() => {
                Err(DraftValidationError::MissingSpecialSchedule)
            }
            AgendaKind::Regular if self.weekday.is_none() || self.time_of_day.is_none() => {
                Err(DraftValidationError::MissingRegularSchedule)
            }
            _ => Ok(()),
        }
    }

    /// Validates and builds the item under `id`.
    pub fn into_item(self, id: AgendaId) -> Result<AgendaItem, DraftValidationError> {
        self.validate()?;

        let category = self
            .category
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.kind.label().to_string());
        let group = self
            .group
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let title = self.title;
        let notes = self.notes;

        let item = match self.kind {
            AgendaKind::Task => AgendaItem::Task(TaskItem {
                id,
                title,
                category,
                group,
                notes,
                due_date: self.due_date.ok_or(DraftValidationError::MissingDueDate)?,
                priority: self.priority.unwrap_or_default(),
            }),
            AgendaKind::Special => AgendaItem::Special(OneOffItem {
                id,
                title,
                category,
                group,
                notes,
                date: self
                    .date
                    .ok_or(DraftValidationError::MissingSpecialSchedule)?,
                time_of_day: self
                    .time_of_day
                    .ok_or(DraftValidationError::MissingSpecialSchedule)?,
            }),
            AgendaKind::Regular => AgendaItem::Regular(RecurringItem {
                id,
                title,
                category,
                group,
                notes,
                weekday: self
                    .weekday
                    .ok_or(DraftValidationError::MissingRegularSchedule)?,
                time_of_day: self
                    .time_of_day
                    .ok_or(DraftValidationError::MissingRegularSchedule)?,
            }),
        };
        Ok(item)
    }
}

/// Agenda write facade over a scheduler context.
pub struct AgendaService<R, S, T> {
    scheduler: Scheduler<R, S, T>,
}

impl<R, S, T> AgendaService<R, S, T>
where
    R: ItemStore<RecurringItem>,
    S: ItemStore<OneOffItem>,
    T: ItemStore<TaskItem>,
{
    pub fn new(scheduler: Scheduler<R, S, T>) -> Self {
        Self { scheduler }
    }

    /// Read access for views (week, day, upcoming, counts).
    pub fn scheduler(&self) -> &Scheduler<R, S, T> {
        &self.scheduler
    }

    pub fn into_scheduler(self) -> Scheduler<R, S, T> {
        self.scheduler
    }

    /// Validates `draft`, assigns the next free id and persists the item.
    pub fn create(&mut self, draft: AgendaDraft) -> Result<AgendaItem, AgendaServiceError> {
        let kind = draft.kind;
        if let Err(err) = draft.validate() {
            warn!("event=agenda_create module=service status=rejected kind={kind} reason={err:?}");
            return Err(err.into());
        }

        let id = self
            .scheduler
            .next_id()?
            .ok_or(AgendaServiceError::IdSpaceExhausted)?;
        let item = draft.into_item(id)?;
        self.persist(&item, "agenda_create")?;
        Ok(item)
    }

    /// Replaces the stored item `id` with `draft`, keeping its id and kind.
    pub fn update(
        &mut self,
        id: AgendaId,
        draft: AgendaDraft,
    ) -> Result<AgendaItem, AgendaServiceError> {
        let stored = self
            .scheduler
            .find_by_id(id)
            .ok_or(AgendaServiceError::NotFound(id))?;
        if stored.kind() != draft.kind {
            return Err(AgendaServiceError::KindChanged {
                id,
                stored: stored.kind(),
                requested: draft.kind,
            });
        }

        let item = draft.into_item(id)?;
        self.persist(&item, "agenda_update")?;
        Ok(item)
    }

    /// Deletes `id` from whichever store holds it.
    ///
    /// Returns the removed item, or `None` when nothing had that id.
    pub fn delete(&mut self, id: AgendaId) -> Result<Option<AgendaItem>, AgendaServiceError> {
        let Some(stored) = self.scheduler.find_by_id(id) else {
            return Ok(None);
        };
        self.scheduler.delete_by_id(stored.kind(), id)?;
        info!(
            "event=agenda_delete module=service status=ok kind={} id={id}",
            stored.kind()
        );
        Ok(Some(stored))
    }

    fn persist(&self, item: &AgendaItem, event: &str) -> Result<(), AgendaServiceError> {
        match self.scheduler.save(item) {
            Ok(()) => {
                info!(
                    "event={event} module=service status=ok kind={} id={}",
                    item.kind(),
                    item.id()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event={event} module=service status=error kind={} id={} error={err}",
                    item.kind(),
                    item.id()
                );
                Err(err.into())
            }
        }
    }
}
