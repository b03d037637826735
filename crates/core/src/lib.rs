//! Pure domain logic for the trapline maintenance tracker.
//!
//! Everything in this crate is synchronous and free of database or I/O
//! dependencies: closed enumerations, station-range arithmetic, the
//! completion-report sort/render logic, and the row-parsing and fuzzy
//! classification heuristics used by the batch importers.

pub mod baitout_import;
pub mod choices;
pub mod error;
pub mod outing_import;
pub mod report;
pub mod station;
pub mod types;
