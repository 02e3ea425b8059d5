//! Planner use-case services.
//!
//! # Responsibility
//! - `planner_store` owns the snapshot and every mutation.
//! - `grade_stats` and `agenda` are pure read-side views over a snapshot.

pub mod agenda;
pub mod grade_stats;
pub mod planner_store;
