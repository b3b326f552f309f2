//! # Courtside Core
//!
//! Domain types and pure business rules for the court booking service:
//! the court catalogue, slot grid, member booking policy, statistics and
//! spreadsheet import/export. Nothing in this crate touches the database or
//! the network.

pub mod clock;
pub mod courts;
pub mod errors;
pub mod export;
pub mod models;
pub mod rules;
pub mod slots;
pub mod stats;
pub mod validation;
