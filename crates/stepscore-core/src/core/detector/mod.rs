//! # Detector Module
//!
//! Volume identities and the scoring-volume query used by the engine.
//!
//! ## Overview
//!
//! Logical volumes are identified by [`VolumeId`] keys handed out by the
//! [`model::Detector`]. Equality of volumes is equality of keys: two volumes
//! sharing a name are still distinct if they were registered separately.
//! The engine only depends on the [`DetectorModel`] trait, so any geometry
//! backend able to name its scoring volume can be plugged in.
//!
//! ## Usage
//!
//! ```ignore
//! use stepscore::core::detector::{DetectorModel, model::Detector};
//!
//! let detector = Detector::load(Path::new("detector.toml"))?;
//! let scoring = detector.scoring_volume()?;
//! ```

pub mod model;

use crate::core::models::ids::VolumeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Placement '{0}' is defined more than once")]
    DuplicatePlacement(String),
    #[error("Placement '{0}' does not exist in the detector")]
    UnknownPlacement(String),
    #[error("Volume {0:?} does not exist in the detector")]
    UnknownVolume(VolumeId),
    #[error("The detector does not define a scoring volume")]
    NoScoringVolume,
}

/// Geometry collaborator queried by the engine for the scoring volume.
pub trait DetectorModel {
    /// Returns the volume whose deposited energy is scored.
    ///
    /// The answer must stay the same for the lifetime of a run.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::NoScoringVolume`] if none is configured.
    fn scoring_volume(&self) -> Result<VolumeId, DetectorError>;
}

impl<T: DetectorModel + ?Sized> DetectorModel for &T {
    fn scoring_volume(&self) -> Result<VolumeId, DetectorError> {
        (**self).scoring_volume()
    }
}
