//! # Core Module
//!
//! Fundamental building blocks shared by the engine: the step and species
//! models, the detector model that hands out volume identities, and the
//! output sinks that receive step rows.
//!
//! ## Architecture
//!
//! - **Step Representation** ([`models`]) - Steps, tracks, species classification and step records
//! - **Geometry Identity** ([`detector`]) - Logical volumes, placements and the scoring volume
//! - **Output and Input** ([`io`]) - Table sinks for step rows and the step-trace reader
//!
//! Units follow the transport engine's conventions: lengths in millimetres and
//! energies in MeV.

pub mod detector;
pub mod io;
pub mod models;
