//! # Core Models Module
//!
//! Data structures describing a single transport step and what is derived
//! from it.
//!
//! ## Key Components
//!
//! - [`ids`] - Identity keys for logical volumes and output tables
//! - [`species`] - Classification of particle names into species codes
//! - [`step`] - The step handed over by the transport engine
//! - [`record`] - The row produced for every step
//!
//! ## Usage
//!
//! ```ignore
//! use stepscore::core::models::{record::StepRecord, step::Step};
//!
//! let record = StepRecord::from_step(&step, event_id);
//! assert_eq!(record.species.code(), 1);
//! ```

pub mod ids;
pub mod record;
pub mod species;
pub mod step;
