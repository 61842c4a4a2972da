//! Core scheduling engine for a personal agenda of recurring items,
//! one-off items and due-date tasks.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AgendaConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::agenda::{
    AgendaId, AgendaItem, AgendaKind, Identified, OneOffItem, RecurringItem, TaskItem,
};
pub use model::priority::{Priority, UnrecognizedCode};
pub use model::view::{AgendaCounts, WeeklyView, WEEKDAYS};
pub use repo::item_store::{ItemStore, RepoError, RepoResult, SqliteItemStore, StoredItem};
pub use repo::memory_store::MemoryItemStore;
pub use service::agenda_service::{
    AgendaDraft, AgendaService, AgendaServiceError, DraftValidationError,
};
pub use service::ordering::{compare_for_display, compare_upcoming, sort_for_display};
pub use service::scheduler::{week_bounds, MemoryScheduler, Scheduler, SqliteScheduler};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
