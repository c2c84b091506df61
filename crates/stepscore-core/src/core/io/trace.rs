use crate::core::models::ids::{EventId, TrackId, VolumeId};
use crate::core::models::step::{Step, Track};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// One step as recorded in a step-trace CSV file.
///
/// The pre-step volume is referenced by its unique placement name and
/// resolved against a detector when the step is rebuilt.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TraceRecord {
    pub event_id: EventId,
    pub track_id: TrackId,
    pub particle: String,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub delta_energy: f64,
    pub edep: f64,
    pub placement: String,
}

impl TraceRecord {
    pub fn to_step(&self, volume: VolumeId) -> Step {
        Step::new(
            Vector3::new(self.dx, self.dy, self.dz),
            Track::new(self.track_id, &self.particle),
            volume,
        )
        .with_energies(self.delta_energy, self.edep)
    }
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// An ordered sequence of recorded steps, grouped into events by
/// consecutive runs of the same event id.
#[derive(Debug, Clone, Default)]
pub struct StepTrace {
    records: Vec<TraceRecord>,
}

impl StepTrace {
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let file = File::open(path).map_err(|e| TraceError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::read_from(file).map_err(|e| TraceError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = reader
            .deserialize::<TraceRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over events in trace order, yielding each event id with its steps.
    pub fn events(&self) -> impl Iterator<Item = (EventId, &[TraceRecord])> {
        self.records
            .chunk_by(|a, b| a.event_id == b.event_id)
            .map(|chunk| (chunk[0].event_id, chunk))
    }

    pub fn event_count(&self) -> usize {
        self.events().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "event_id,track_id,particle,dx,dy,dz,delta_energy,edep,placement";

    fn trace_from(body: &str) -> StepTrace {
        StepTrace::read_from(format!("{}\n{}", HEADER, body).as_bytes()).unwrap()
    }

    #[test]
    fn read_from_parses_records() {
        let trace = trace_from("12,7,e-,3.0,4.0,0.0,-2.0,2.0,Shape2");
        assert_eq!(trace.len(), 1);
        let record = &trace.records()[0];
        assert_eq!(record.event_id, 12);
        assert_eq!(record.track_id, 7);
        assert_eq!(record.particle, "e-");
        assert_eq!(record.delta_energy, -2.0);
        assert_eq!(record.edep, 2.0);
        assert_eq!(record.placement, "Shape2");
    }

    #[test]
    fn read_from_trims_whitespace_around_fields() {
        let trace = trace_from("1, 2, gamma, 0.5, 0.0, 1.0, 0.0, 0.0, World");
        assert_eq!(trace.records()[0].particle, "gamma");
        assert_eq!(trace.records()[0].placement, "World");
    }

    #[test]
    fn read_from_fails_on_malformed_rows() {
        let result = StepTrace::read_from(format!("{}\n1,2,gamma", HEADER).as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn events_groups_consecutive_event_ids() {
        let trace = trace_from(
            "0,1,gamma,0,0,1,0,0,World\n\
             0,2,e-,0,0,1,0,0,World\n\
             1,1,gamma,0,0,1,0,0,World\n\
             3,1,gamma,0,0,1,0,0,World\n\
             3,4,e-,0,0,1,0,0,World",
        );
        let events: Vec<_> = trace
            .events()
            .map(|(id, steps)| (id, steps.len()))
            .collect();
        assert_eq!(events, vec![(0, 2), (1, 1), (3, 2)]);
        assert_eq!(trace.event_count(), 3);
    }

    #[test]
    fn empty_trace_has_no_events() {
        let trace = StepTrace::read_from(HEADER.as_bytes()).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.event_count(), 0);
    }

    #[test]
    fn to_step_rebuilds_displacement_and_energies() {
        let trace = trace_from("12,7,e-,3.0,4.0,0.5,-2.0,2.0,Shape2");
        let step = trace.records()[0].to_step(VolumeId::default());
        assert_eq!(step.delta_position, Vector3::new(3.0, 4.0, 0.5));
        assert_eq!(step.delta_energy, -2.0);
        assert_eq!(step.total_energy_deposit, 2.0);
        assert_eq!(step.track, Track::new(7, "e-"));
        assert_eq!(step.pre_step_volume(), VolumeId::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        fs::write(&path, format!("{}\n5,1,proton,0,0,2,-1,1,World\n", HEADER)).unwrap();

        let trace = StepTrace::load(&path).unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.records()[0].particle, "proton");
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = StepTrace::load(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(TraceError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, format!("{}\nnot,a,number,x,y,z,1,1,World\n", HEADER)).unwrap();
        let result = StepTrace::load(&path);
        assert!(matches!(result, Err(TraceError::Csv { .. })));
    }
}
