//! # Workflows Module
//!
//! High-level entry points that drive the engine end to end.
//!
//! - **Replay Workflow** ([`replay`]) - Feeds a recorded step trace through a
//!   `SteppingAction`, opening and closing events on event-id boundaries, and
//!   returns the per-event and per-run energy deposits.

pub mod replay;
