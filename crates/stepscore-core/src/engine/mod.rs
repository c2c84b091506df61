//! # Engine Module
//!
//! The stateful per-step machinery of stepscore.
//!
//! ## Overview
//!
//! For every step handed over by the transport engine, the [`stepping`]
//! entry point writes one row to the step table through the [`recorder`] and
//! lets the [`scoring`] accumulator add the step's energy deposit to the
//! current event if the step started inside the scoring volume. Events and
//! their accumulators are owned by the [`event`] lifecycle manager, which
//! folds finished events into the [`run`] summary.
//!
//! ## Architecture
//!
//! - **Per-Step Entry Point** ([`stepping`]) - `SteppingAction::process_step`
//! - **Step Recording** ([`recorder`]) - Row emission into an injected table sink
//! - **Energy Scoring** ([`scoring`]) - Lazily resolved scoring volume and conditional accumulation
//! - **Event Lifecycle** ([`event`]) - Current event id and per-event energy accumulator
//! - **Run Statistics** ([`run`]) - Sum and spread of per-event energy deposits
//! - **Configuration** ([`config`]) - Inputs of the replay workflow
//! - **Progress Monitoring** ([`progress`]) - Callback-based run progress reporting
//! - **Error Handling** ([`error`]) - Aggregated engine error type
//!
//! Each simulation worker owns its own `SteppingAction`, with its own cached
//! scoring volume and sink handle; nothing in the engine is shared between
//! workers.

pub mod config;
pub mod error;
pub mod event;
pub mod progress;
pub mod recorder;
pub mod run;
pub mod scoring;
pub mod stepping;
