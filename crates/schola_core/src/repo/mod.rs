//! Persistence contracts for the planner snapshot.
//!
//! # Responsibility
//! - Define the load/save/clear contract the planner store depends on.
//! - Keep SQL and serialization details out of the store.
//!
//! # Invariants
//! - The whole snapshot is stored as one blob under one key.
//! - A blob that fails to parse is reported, never silently replaced.

pub mod snapshot_repo;
