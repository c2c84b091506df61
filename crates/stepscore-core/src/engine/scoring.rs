use super::error::EngineError;
use super::event::EventLifecycle;
use crate::core::detector::{DetectorError, DetectorModel};
use crate::core::models::ids::VolumeId;
use crate::core::models::step::Step;
use tracing::debug;

/// Adds the energy deposited inside the scoring volume to the current event.
///
/// The scoring volume is looked up from the detector on first use and cached
/// for the rest of the run, so the detector is queried at most once per
/// successful resolution. Volumes are compared by identity.
#[derive(Debug, Clone, Default)]
pub struct ScoringAccumulator {
    scoring_volume: Option<VolumeId>,
}

impl ScoringAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached scoring volume, if it has been resolved.
    pub fn resolved_volume(&self) -> Option<VolumeId> {
        self.scoring_volume
    }

    /// Returns the cached scoring volume, resolving it on the first call.
    ///
    /// # Errors
    ///
    /// Propagates the detector's error when no scoring volume can be
    /// resolved; nothing is cached in that case.
    pub fn resolve<D: DetectorModel + ?Sized>(
        &mut self,
        detector: &D,
    ) -> Result<VolumeId, DetectorError> {
        if let Some(volume) = self.scoring_volume {
            return Ok(volume);
        }
        let volume = detector.scoring_volume()?;
        debug!("Resolved scoring volume {:?}.", volume);
        self.scoring_volume = Some(volume);
        Ok(volume)
    }

    /// Scores `step` against the current event.
    ///
    /// # Return
    ///
    /// `true` if the step started inside the scoring volume and its deposit
    /// was added to the event, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Detector`] if the scoring volume cannot be
    /// resolved and [`EngineError::Event`] if no event is in progress.
    pub fn score<D, E>(
        &mut self,
        step: &Step,
        detector: &D,
        events: &mut E,
    ) -> Result<bool, EngineError>
    where
        D: DetectorModel + ?Sized,
        E: EventLifecycle + ?Sized,
    {
        let scoring_volume = self.resolve(detector)?;
        if step.pre_step_volume() != scoring_volume {
            return Ok(false);
        }
        events.add_edep(step.total_energy_deposit)?;
        Ok(true)
    }
}
