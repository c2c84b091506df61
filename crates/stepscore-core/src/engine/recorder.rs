use crate::core::io::sink::{SinkError, TableSink};
use crate::core::models::ids::{EventId, TableId};
use crate::core::models::record::StepRecord;
use crate::core::models::step::Step;
use tracing::trace;

/// Writes one step-table row per recorded step into an injected sink.
#[derive(Debug)]
pub struct StepRecorder<S> {
    sink: S,
    table: TableId,
    rows_recorded: u64,
}

impl<S: TableSink> StepRecorder<S> {
    pub fn new(sink: S, table: TableId) -> Self {
        Self {
            sink,
            table,
            rows_recorded: 0,
        }
    }

    /// Extracts the record for `step` and commits it as a new row.
    ///
    /// # Arguments
    ///
    /// * `step` - The finalized step.
    /// * `event_id` - The event in progress when the step was taken.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`SinkError`] if the row cannot be written.
    pub fn record(&mut self, step: &Step, event_id: EventId) -> Result<StepRecord, SinkError> {
        let record = StepRecord::from_step(step, event_id);
        record.write_to(&mut self.sink, self.table)?;
        self.rows_recorded += 1;
        trace!(
            event_id,
            track_id = record.track_id,
            species = %record.species,
            "Recorded step row."
        );
        Ok(record)
    }

    pub fn rows_recorded(&self) -> u64 {
        self.rows_recorded
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::sink::{CellValue, MemoryTableSink};
    use crate::core::models::ids::VolumeId;
    use crate::core::models::record::{SPECIES_COLUMN, TRACK_ID_COLUMN, step_table_schema};
    use crate::core::models::step::Track;
    use nalgebra::Vector3;

    fn step(track_id: i32, particle: &str) -> Step {
        Step::new(
            Vector3::new(1.0, 0.0, 1.0),
            Track::new(track_id, particle),
            VolumeId::default(),
        )
    }

    #[test]
    fn record_writes_one_row_per_call_in_order() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(step_table_schema("steps"));
        let mut recorder = StepRecorder::new(&mut sink, table);

        recorder.record(&step(1, "gamma"), 0).unwrap();
        recorder.record(&step(2, "e-"), 0).unwrap();
        recorder.record(&step(3, "proton"), 0).unwrap();
        assert_eq!(recorder.rows_recorded(), 3);
        assert_eq!(recorder.table(), table);

        let rows = sink.rows(table).unwrap();
        let tracks: Vec<_> = rows.iter().map(|r| r[TRACK_ID_COLUMN]).collect();
        let species: Vec<_> = rows.iter().map(|r| r[SPECIES_COLUMN]).collect();
        assert_eq!(
            tracks,
            vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)]
        );
        assert_eq!(
            species,
            vec![CellValue::Int(0), CellValue::Int(1), CellValue::Int(2)]
        );
    }

    #[test]
    fn record_returns_extracted_record() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(step_table_schema("steps"));
        let mut recorder = StepRecorder::new(sink, table);

        let record = recorder.record(&step(9, "gamma"), 4).unwrap();
        assert_eq!(record.track_id, 9);
        assert_eq!(record.event_id, 4);
        assert_eq!(recorder.into_sink().row_count(table), 1);
    }

    #[test]
    fn failed_write_is_not_counted() {
        let sink = MemoryTableSink::new();
        let mut recorder = StepRecorder::new(sink, TableId(0));

        let result = recorder.record(&step(1, "gamma"), 0);
        assert!(matches!(result, Err(SinkError::UnknownTable(_))));
        assert_eq!(recorder.rows_recorded(), 0);
    }
}
