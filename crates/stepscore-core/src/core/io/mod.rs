//! Provides input/output for step data.
//!
//! Step rows leave the core through the [`sink::TableSink`] trait, with an
//! in-memory and a CSV-backed implementation. Recorded step traces enter
//! through [`trace`], which rebuilds steps for replay.

pub mod csv_sink;
pub mod sink;
pub mod trace;
