use crate::core::detector::model::Detector;
use crate::core::io::sink::TableSink;
use crate::core::io::trace::StepTrace;
use crate::core::models::ids::TableId;
use crate::engine::config::ReplayConfig;
use crate::engine::error::EngineError;
use crate::engine::event::{EventManager, EventSummary};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::run::RunSummary;
use crate::engine::stepping::SteppingAction;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    /// One summary per replayed event, in trace order.
    pub events: Vec<EventSummary>,
    pub summary: RunSummary,
    pub steps: u64,
}

/// Loads the detector and step trace named by `config` and replays the trace.
///
/// # Arguments
///
/// * `config` - Paths of the detector description and the step trace.
/// * `sink` - Sink that receives the step table rows.
/// * `table` - The step table registered in `sink`.
/// * `reporter` - Progress reporter notified per event.
///
/// # Errors
///
/// Returns [`EngineError`] if either input fails to load or the replay fails.
#[instrument(skip_all, name = "replay_workflow")]
pub fn run<S: TableSink>(
    config: &ReplayConfig,
    sink: S,
    table: TableId,
    reporter: &ProgressReporter,
) -> Result<ReplayResult, EngineError> {
    reporter.report(Progress::Message("Loading inputs...".to_string()));
    info!("Loading detector description from {:?}.", config.detector_path);
    let detector = Detector::load(&config.detector_path)?;
    info!("Loading step trace from {:?}.", config.trace_path);
    let trace = StepTrace::load(&config.trace_path)?;
    info!(
        "Loaded {} volume(s) and {} step(s).",
        detector.len(),
        trace.len()
    );

    replay_trace(&detector, &trace, sink, table, reporter)
}

/// Replays an already loaded trace against `detector`.
///
/// Each run of consecutive steps sharing an event id is one event: the event
/// is opened, every step goes through [`SteppingAction::process_step`] in
/// trace order, and the event is closed.
///
/// # Errors
///
/// Returns [`EngineError::UnknownPlacement`] if a step refers to a placement
/// the detector does not define, [`EngineError::EventReopened`] if the steps
/// of one event are not contiguous in the trace, and propagates every error
/// raised while processing steps.
pub fn replay_trace<S: TableSink>(
    detector: &Detector,
    trace: &StepTrace,
    sink: S,
    table: TableId,
    reporter: &ProgressReporter,
) -> Result<ReplayResult, EngineError> {
    let mut action = SteppingAction::new(detector, sink, table);
    let mut events = EventManager::new();
    let mut summaries = Vec::new();
    let mut closed = HashSet::new();

    reporter.report(Progress::RunStart {
        total_events: trace.event_count() as u64,
    });

    for (event_id, records) in trace.events() {
        if !closed.insert(event_id) {
            return Err(EngineError::EventReopened { event_id });
        }
        events.begin_event(event_id)?;
        for record in records {
            let volume = detector
                .volume_for_placement(&record.placement)
                .ok_or_else(|| EngineError::UnknownPlacement {
                    placement: record.placement.clone(),
                    event_id,
                })?;
            action.process_step(&record.to_step(volume), &mut events)?;
        }
        let summary = events.end_event()?;
        debug!(
            "Replayed event {} with {} step(s).",
            event_id,
            records.len()
        );
        reporter.report(Progress::EventFinish {
            event_id,
            edep: summary.edep,
        });
        summaries.push(summary);
    }

    reporter.report(Progress::RunFinish);

    let summary = events.run_summary();
    info!(
        "Replay finished: {} event(s), {:.6} MeV deposited in the scoring volume (rms {:.6} MeV).",
        summary.events, summary.total_edep, summary.rms_edep
    );

    Ok(ReplayResult {
        events: summaries,
        summary,
        steps: action.rows_recorded(),
    })
}
