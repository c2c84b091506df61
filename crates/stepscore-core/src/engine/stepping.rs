use super::error::EngineError;
use super::event::EventLifecycle;
use super::recorder::StepRecorder;
use super::scoring::ScoringAccumulator;
use crate::core::detector::DetectorModel;
use crate::core::io::sink::TableSink;
use crate::core::models::ids::{TableId, VolumeId};
use crate::core::models::step::Step;

/// Per-step hook invoked by the transport engine.
///
/// Owns the detector handle, the step recorder with its sink, and the
/// scoring accumulator with its cached scoring volume. One instance belongs
/// to one simulation worker.
pub struct SteppingAction<D, S> {
    detector: D,
    recorder: StepRecorder<S>,
    scoring: ScoringAccumulator,
}

impl<D: DetectorModel, S: TableSink> SteppingAction<D, S> {
    /// Creates a stepping action writing into `table` of `sink`.
    ///
    /// # Arguments
    ///
    /// * `detector` - The detector model that names the scoring volume.
    /// * `sink` - The table sink receiving step rows.
    /// * `table` - The step table, laid out by [`step_table_schema`](crate::core::models::record::step_table_schema).
    pub fn new(detector: D, sink: S, table: TableId) -> Self {
        Self {
            detector,
            recorder: StepRecorder::new(sink, table),
            scoring: ScoringAccumulator::new(),
        }
    }

    /// Processes one finalized step.
    ///
    /// Always commits exactly one row to the step table, then adds the step's
    /// energy deposit to the current event if the step started inside the
    /// scoring volume.
    ///
    /// # Arguments
    ///
    /// * `step` - The step produced by the transport engine.
    /// * `events` - The event lifecycle collaborator for the event in progress.
    ///
    /// # Errors
    ///
    /// Collaborator failures propagate unchanged: no event in progress, a sink
    /// write failure, or a detector without a scoring volume.
    pub fn process_step<E: EventLifecycle + ?Sized>(
        &mut self,
        step: &Step,
        events: &mut E,
    ) -> Result<(), EngineError> {
        let event_id = events.current_event_id()?;
        self.recorder.record(step, event_id)?;
        self.scoring.score(step, &self.detector, events)?;
        Ok(())
    }

    pub fn rows_recorded(&self) -> u64 {
        self.recorder.rows_recorded()
    }

    pub fn scoring_volume(&self) -> Option<VolumeId> {
        self.scoring.resolved_volume()
    }

    pub fn sink(&self) -> &S {
        self.recorder.sink()
    }

    pub fn into_sink(self) -> S {
        self.recorder.into_sink()
    }
}
