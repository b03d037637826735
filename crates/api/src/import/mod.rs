//! Batch importers for tabular field-report files.
//!
//! Both importers run their whole pass inside a single transaction. Rows
//! that fail to parse or resolve are logged and skipped before any SQL for
//! that row runs, so the transaction stays valid; a database error aborts
//! the entire run.

pub mod baitout;
pub mod outings;
