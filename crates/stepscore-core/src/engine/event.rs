use super::run::{RunAccumulator, RunSummary};
use crate::core::models::ids::EventId;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EventError {
    #[error("No event is in progress")]
    NoEventInProgress,
    #[error("Event {current} is still in progress")]
    EventInProgress { current: EventId },
}

/// Event-lifecycle collaborator used by the stepping action.
///
/// Both operations are only valid while an event is in progress.
pub trait EventLifecycle {
    /// Identifier of the event currently being simulated.
    fn current_event_id(&self) -> Result<EventId, EventError>;

    /// Adds a step's energy deposit (MeV) to the current event's accumulator.
    fn add_edep(&mut self, edep: f64) -> Result<(), EventError>;
}

impl<T: EventLifecycle + ?Sized> EventLifecycle for &mut T {
    fn current_event_id(&self) -> Result<EventId, EventError> {
        (**self).current_event_id()
    }

    fn add_edep(&mut self, edep: f64) -> Result<(), EventError> {
        (**self).add_edep(edep)
    }
}

/// Energy scored during one finished event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventSummary {
    pub event_id: EventId,
    /// Energy deposited in the scoring volume in MeV.
    pub edep: f64,
    /// Number of steps that contributed to `edep`.
    pub scoring_steps: u64,
}

#[derive(Debug, Clone, Copy)]
struct OpenEvent {
    id: EventId,
    edep: f64,
    scoring_steps: u64,
}

/// Owns the per-event energy accumulator and the run statistics.
///
/// The accumulator is reset when an event begins and read when it ends; in
/// between, the stepping action adds to it through [`EventLifecycle`].
#[derive(Debug, Clone, Default)]
pub struct EventManager {
    current: Option<OpenEvent>,
    run: RunAccumulator,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_event(&mut self, event_id: EventId) -> Result<(), EventError> {
        if let Some(open) = self.current {
            return Err(EventError::EventInProgress { current: open.id });
        }
        self.current = Some(OpenEvent {
            id: event_id,
            edep: 0.0,
            scoring_steps: 0,
        });
        Ok(())
    }

    pub fn end_event(&mut self) -> Result<EventSummary, EventError> {
        let open = self.current.take().ok_or(EventError::NoEventInProgress)?;
        self.run.add_event(open.edep);
        debug!(
            "Event {} finished: {:.6} MeV from {} scoring step(s).",
            open.id, open.edep, open.scoring_steps
        );
        Ok(EventSummary {
            event_id: open.id,
            edep: open.edep,
            scoring_steps: open.scoring_steps,
        })
    }

    pub fn is_event_in_progress(&self) -> bool {
        self.current.is_some()
    }

    /// Energy accumulated so far in the current event.
    pub fn current_edep(&self) -> Option<f64> {
        self.current.map(|open| open.edep)
    }

    pub fn run_summary(&self) -> RunSummary {
        self.run.summary()
    }
}

impl EventLifecycle for EventManager {
    fn current_event_id(&self) -> Result<EventId, EventError> {
        self.current
            .map(|open| open.id)
            .ok_or(EventError::NoEventInProgress)
    }

    fn add_edep(&mut self, edep: f64) -> Result<(), EventError> {
        let open = self.current.as_mut().ok_or(EventError::NoEventInProgress)?;
        open.edep += edep;
        open.scoring_steps += 1;
        Ok(())
    }
}
