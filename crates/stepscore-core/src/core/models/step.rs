use super::ids::{TrackId, VolumeId};
use nalgebra::Vector3;

/// The particle track that owns a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track identifier assigned by the transport engine.
    pub id: TrackId,
    /// Particle name from the track's particle definition (e.g. "gamma", "e-").
    pub particle_name: String,
}

impl Track {
    pub fn new(id: TrackId, particle_name: &str) -> Self {
        Self {
            id,
            particle_name: particle_name.to_string(),
        }
    }
}

/// The pre-step point of a step, reduced to the geometry it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPoint {
    /// Logical volume enclosing the point.
    pub volume: VolumeId,
}

/// One discrete propagation step as finalized by the transport engine.
///
/// A step is read-only input to the stepping action: its geometry and
/// physics results are complete by the time it is handed over, and the
/// core performs no validation of its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Displacement between the pre- and post-step points in millimetres.
    pub delta_position: Vector3<f64>,
    /// Change of the track's kinetic energy over the step in MeV (may be negative).
    pub delta_energy: f64,
    /// Total energy deposited along the step in MeV.
    pub total_energy_deposit: f64,
    /// The track this step belongs to.
    pub track: Track,
    /// Where the step started.
    pub pre_step_point: StepPoint,
}

impl Step {
    /// Creates a step with the given displacement and track in `volume`.
    ///
    /// Energy fields start at zero and can be set with [`Step::with_energies`].
    ///
    /// # Arguments
    ///
    /// * `delta_position` - The displacement vector of the step.
    /// * `track` - The owning track.
    /// * `volume` - The logical volume of the pre-step point.
    pub fn new(delta_position: Vector3<f64>, track: Track, volume: VolumeId) -> Self {
        Self {
            delta_position,
            delta_energy: 0.0,
            total_energy_deposit: 0.0,
            track,
            pre_step_point: StepPoint { volume },
        }
    }

    /// Sets the kinetic-energy change and the total deposit of the step.
    pub fn with_energies(mut self, delta_energy: f64, total_energy_deposit: f64) -> Self {
        self.delta_energy = delta_energy;
        self.total_energy_deposit = total_energy_deposit;
        self
    }

    /// Magnitude of the lateral (x, y) component of the displacement.
    #[inline]
    pub fn radial_step(&self) -> f64 {
        let d = &self.delta_position;
        (d.x * d.x + d.y * d.y).sqrt()
    }

    #[inline]
    pub fn delta_z(&self) -> f64 {
        self.delta_position.z
    }

    #[inline]
    pub fn pre_step_volume(&self) -> VolumeId {
        self.pre_step_point.volume
    }
}
