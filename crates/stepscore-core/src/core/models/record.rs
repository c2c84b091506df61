use super::ids::{EventId, TableId, TrackId};
use super::species::ParticleSpecies;
use super::step::Step;
use crate::core::io::sink::{SinkError, TableSchema, TableSink};

pub const RADIAL_STEP_COLUMN: usize = 0;
pub const TRACK_ID_COLUMN: usize = 1;
pub const EVENT_ID_COLUMN: usize = 2;
pub const DELTA_Z_COLUMN: usize = 3;
pub const DELTA_ENERGY_COLUMN: usize = 4;
pub const SPECIES_COLUMN: usize = 5;

/// Column layout of the step table, in column-index order.
pub fn step_table_schema(name: &str) -> TableSchema {
    TableSchema::new(name)
        .real_column("radial_step")
        .int_column("track_id")
        .int_column("event_id")
        .real_column("delta_z")
        .real_column("delta_energy")
        .int_column("species")
}

/// The row written to the step table for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Lateral displacement, sqrt(dx² + dy²), in millimetres.
    pub radial_step_magnitude: f64,
    pub track_id: TrackId,
    pub event_id: EventId,
    /// Longitudinal displacement in millimetres.
    pub delta_z: f64,
    /// Kinetic-energy change of the track in MeV, signed as reported.
    pub delta_energy: f64,
    pub species: ParticleSpecies,
}

impl StepRecord {
    /// Extracts the record for `step` taken during event `event_id`.
    pub fn from_step(step: &Step, event_id: EventId) -> Self {
        Self {
            radial_step_magnitude: step.radial_step(),
            track_id: step.track.id,
            event_id,
            delta_z: step.delta_z(),
            delta_energy: step.delta_energy,
            species: ParticleSpecies::classify(&step.track.particle_name),
        }
    }

    /// Fills every column of the step table and commits the row.
    ///
    /// # Errors
    ///
    /// Propagates any [`SinkError`] raised by the sink; no row is committed
    /// if a fill fails.
    pub fn write_to<S: TableSink + ?Sized>(
        &self,
        sink: &mut S,
        table: TableId,
    ) -> Result<(), SinkError> {
        sink.fill_real_column(table, RADIAL_STEP_COLUMN, self.radial_step_magnitude)?;
        sink.fill_int_column(table, TRACK_ID_COLUMN, self.track_id)?;
        sink.fill_int_column(table, EVENT_ID_COLUMN, self.event_id)?;
        sink.fill_real_column(table, DELTA_Z_COLUMN, self.delta_z)?;
        sink.fill_real_column(table, DELTA_ENERGY_COLUMN, self.delta_energy)?;
        sink.fill_int_column(table, SPECIES_COLUMN, self.species.code())?;
        sink.add_row(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::sink::{CellValue, ColumnKind, MemoryTableSink};
    use crate::core::models::ids::VolumeId;
    use crate::core::models::step::Track;
    use nalgebra::Vector3;

    fn electron_step() -> Step {
        Step::new(
            Vector3::new(3.0, 4.0, 0.0),
            Track::new(7, "e-"),
            VolumeId::default(),
        )
        .with_energies(-2.0, 2.0)
    }

    #[test]
    fn schema_has_six_columns_in_fixed_order() {
        let schema = step_table_schema("steps");
        let kinds: Vec<_> = schema.columns.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Real,
                ColumnKind::Int,
                ColumnKind::Int,
                ColumnKind::Real,
                ColumnKind::Real,
                ColumnKind::Int,
            ]
        );
        assert_eq!(schema.columns[SPECIES_COLUMN].name, "species");
        assert_eq!(schema.columns[RADIAL_STEP_COLUMN].name, "radial_step");
    }

    #[test]
    fn from_step_extracts_all_fields() {
        let record = StepRecord::from_step(&electron_step(), 12);
        assert_eq!(record.radial_step_magnitude, 5.0);
        assert_eq!(record.track_id, 7);
        assert_eq!(record.event_id, 12);
        assert_eq!(record.delta_z, 0.0);
        assert_eq!(record.delta_energy, -2.0);
        assert_eq!(record.species, ParticleSpecies::Electron);
    }

    #[test]
    fn from_step_copies_delta_z_and_energy_verbatim() {
        let step = Step::new(
            Vector3::new(-0.3, 0.2, -7.125),
            Track::new(2, "proton"),
            VolumeId::default(),
        )
        .with_energies(0.015625, 0.0);
        let record = StepRecord::from_step(&step, 0);
        assert_eq!(record.delta_z, -7.125);
        assert_eq!(record.delta_energy, 0.015625);
        assert_eq!(
            record.radial_step_magnitude,
            ((-0.3f64) * (-0.3) + 0.2 * 0.2).sqrt()
        );
        assert_eq!(record.species, ParticleSpecies::Other);
    }

    #[test]
    fn write_to_commits_exactly_one_row() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(step_table_schema("steps"));

        StepRecord::from_step(&electron_step(), 12)
            .write_to(&mut sink, table)
            .unwrap();

        let rows = sink.rows(table).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            vec![
                CellValue::Real(5.0),
                CellValue::Int(7),
                CellValue::Int(12),
                CellValue::Real(0.0),
                CellValue::Real(-2.0),
                CellValue::Int(1),
            ]
        );
    }

    #[test]
    fn write_to_fails_against_incompatible_table() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(TableSchema::new("narrow").real_column("radial_step"));

        let result = StepRecord::from_step(&electron_step(), 1).write_to(&mut sink, table);
        assert!(matches!(result, Err(SinkError::ColumnOutOfRange { .. })));
        assert_eq!(sink.row_count(table), 0);
    }
}
