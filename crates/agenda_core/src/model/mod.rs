//! Unified domain model for recurring, one-off and task agenda items.
//!
//! # Responsibility
//! - Define canonical data structures used by the scheduling engine.
//! - Keep the three item kinds behind one tagged `AgendaItem` shape.
//!
//! # Invariants
//! - Every item is identified by an `AgendaId` unique across all kinds.
//! - Views built from the model are immutable once returned.

pub mod agenda;
pub mod priority;
pub mod view;
