//! # stepscore Core Library
//!
//! Per-step observation hook for particle-transport simulations: every
//! propagation step is written as one row of a step table, and the energy
//! deposited inside a designated scoring volume is accumulated per event.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Step`, `ParticleSpecies`,
//!   `StepRecord`), the detector model with its volume identities, and the
//!   row-oriented table sinks.
//!
//! - **[`engine`]: The Logic Core.** The stateful per-step machinery: the
//!   `SteppingAction` entry point with its lazily cached scoring volume, the
//!   `EventManager` that owns per-event energy accumulators, and the run summary.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures such as replaying
//!   a recorded step trace through the engine.

pub mod core;
pub mod engine;
pub mod workflows;
