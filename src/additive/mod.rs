//! Additive code normalization and risk classification.
//!
//! - [`table`] — built-in function/risk table, curated names and details.
//! - [`classifier`] — entry points that normalize raw tags and look them up in
//!   [`ReferenceTables`](crate::reference::ReferenceTables).

pub mod classifier;
pub mod table;
