//! Row mappings between agenda kinds and their SQLite tables.
//!
//! Dates are stored as `YYYY-MM-DD`, times as `HH:MM:SS[.fff]`, weekdays as
//! lowercase English names and priorities as their one-character code.
//! Absent `group`/`notes` are stored as `NULL`, never as an empty string.

use crate::model::agenda::{AgendaId, AgendaKind, OneOffItem, RecurringItem, TaskItem};
use crate::model::priority::Priority;
use crate::repo::item_store::{RepoError, RepoResult, StoredItem};
use chrono::{NaiveDate, NaiveTime, Weekday};
use rusqlite::types::Value;
use rusqlite::Row;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

impl StoredItem for RecurringItem {
    const KIND: AgendaKind = AgendaKind::Regular;
    const TABLE: &'static str = "regular_agendas";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "category",
        "group_name",
        "notes",
        "weekday",
        "time_of_day",
    ];

    fn to_values(&self) -> Vec<Value> {
        let mut values = shared_values(
            self.id,
            &self.title,
            &self.category,
            self.group.as_deref(),
            self.notes.as_deref(),
        );
        values.push(Value::Text(weekday_to_db(self.weekday).to_string()));
        values.push(Value::Text(self.time_of_day.format(TIME_FORMAT).to_string()));
        values
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let weekday_text: String = row.get("weekday")?;
        let weekday = parse_weekday(&weekday_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid weekday `{weekday_text}` in regular_agendas.weekday"
            ))
        })?;

        Ok(Self {
            id: parse_id(row, Self::TABLE)?,
            title: row.get("title")?,
            category: row.get("category")?,
            group: row.get("group_name")?,
            notes: row.get("notes")?,
            weekday,
            time_of_day: parse_time(row, Self::TABLE)?,
        })
    }
}

impl StoredItem for OneOffItem {
    const KIND: AgendaKind = AgendaKind::Special;
    const TABLE: &'static str = "special_agendas";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "category",
        "group_name",
        "notes",
        "date",
        "time_of_day",
    ];

    fn to_values(&self) -> Vec<Value> {
        let mut values = shared_values(
            self.id,
            &self.title,
            &self.category,
            self.group.as_deref(),
            self.notes.as_deref(),
        );
        values.push(Value::Text(self.date.format(DATE_FORMAT).to_string()));
        values.push(Value::Text(self.time_of_day.format(TIME_FORMAT).to_string()));
        values
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: parse_id(row, Self::TABLE)?,
            title: row.get("title")?,
            category: row.get("category")?,
            group: row.get("group_name")?,
            notes: row.get("notes")?,
            date: parse_date(row, "date", Self::TABLE)?,
            time_of_day: parse_time(row, Self::TABLE)?,
        })
    }
}

impl StoredItem for TaskItem {
    const KIND: AgendaKind = AgendaKind::Task;
    const TABLE: &'static str = "task_agendas";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "category",
        "group_name",
        "notes",
        "due_date",
        "priority",
    ];

    fn to_values(&self) -> Vec<Value> {
        let mut values = shared_values(
            self.id,
            &self.title,
            &self.category,
            self.group.as_deref(),
            self.notes.as_deref(),
        );
        values.push(Value::Text(self.due_date.format(DATE_FORMAT).to_string()));
        values.push(Value::Text(self.priority.code().to_string()));
        values
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let priority_text: String = row.get("priority")?;
        let mut chars = priority_text.chars();
        let priority = match (chars.next(), chars.next()) {
            (Some(code), None) => Priority::from_code(code),
            _ => {
                return Err(RepoError::InvalidData(format!(
                    "invalid priority `{priority_text}` in task_agendas.priority"
                )));
            }
        };

        Ok(Self {
            id: parse_id(row, Self::TABLE)?,
            title: row.get("title")?,
            category: row.get("category")?,
            group: row.get("group_name")?,
            notes: row.get("notes")?,
            due_date: parse_date(row, "due_date", Self::TABLE)?,
            priority,
        })
    }
}

fn shared_values(
    id: AgendaId,
    title: &str,
    category: &str,
    group: Option<&str>,
    notes: Option<&str>,
) -> Vec<Value> {
    vec![
        Value::Integer(i64::from(id)),
        Value::Text(title.to_string()),
        Value::Text(category.to_string()),
        optional_text(group),
        optional_text(notes),
    ]
}

fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.to_string()))
}

fn parse_id(row: &Row<'_>, table: &str) -> RepoResult<AgendaId> {
    let raw: i64 = row.get("id")?;
    AgendaId::try_from(raw)
        .map_err(|_| RepoError::InvalidData(format!("invalid id `{raw}` in {table}.id")))
}

fn parse_date(row: &Row<'_>, column: &str, table: &str) -> RepoResult<NaiveDate> {
    let text: String = row.get(column)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{text}` in {table}.{column}")))
}

fn parse_time(row: &Row<'_>, table: &str) -> RepoResult<NaiveTime> {
    let text: String = row.get("time_of_day")?;
    NaiveTime::parse_from_str(&text, TIME_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid time `{text}` in {table}.time_of_day"))
    })
}

fn weekday_to_db(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn parse_weekday(value: &str) -> Option<Weekday> {
    match value {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
