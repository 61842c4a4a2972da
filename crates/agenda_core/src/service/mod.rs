//! Scheduling engine and agenda use-case services.
//!
//! # Responsibility
//! - Turn raw store contents into ordered week/day/upcoming views.
//! - Keep presentation layers decoupled from storage details.

pub mod agenda_service;
pub mod identity;
pub mod ordering;
pub mod scheduler;
