use super::{DetectorError, DetectorModel};
use crate::core::models::ids::VolumeId;
use serde::Deserialize;
use slotmap::SlotMap;
use std::collections::HashMap;
use std::path::Path;

/// A logical volume together with the placement that puts it in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalVolume {
    /// Logical name; not required to be unique.
    pub name: String,
    /// Placement (physical volume) name; unique within a detector.
    pub placement: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct DetectorDescription {
    scoring_placement: Option<String>,
    #[serde(default)]
    volumes: Vec<VolumeDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VolumeDescription {
    name: String,
    placement: String,
}

/// The detector geometry as seen by the scoring engine.
///
/// Volumes live in a slot map, so every registered volume gets its own
/// [`VolumeId`] regardless of its name. Placement names index the volumes for
/// trace replay.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    /// Primary storage for logical volumes.
    volumes: SlotMap<VolumeId, LogicalVolume>,
    /// Lookup map from placement name to volume.
    placement_map: HashMap<String, VolumeId>,
    /// The volume whose energy deposit is scored, if configured.
    scoring_volume: Option<VolumeId>,
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a detector description from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the description file.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Io`] or [`DetectorError::Toml`] if the file
    /// cannot be read or parsed, and the registration errors of
    /// [`Detector::add_volume`] and [`Detector::set_scoring_placement`].
    pub fn load(path: &Path) -> Result<Self, DetectorError> {
        let content = std::fs::read_to_string(path).map_err(|e| DetectorError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let description: DetectorDescription =
            toml::from_str(&content).map_err(|e| DetectorError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        Self::from_description(description)
    }

    fn from_description(description: DetectorDescription) -> Result<Self, DetectorError> {
        let mut detector = Self::new();
        for volume in &description.volumes {
            detector.add_volume(&volume.name, &volume.placement)?;
        }
        if let Some(placement) = &description.scoring_placement {
            detector.set_scoring_placement(placement)?;
        }
        Ok(detector)
    }

    /// Registers a new logical volume.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::DuplicatePlacement`] if `placement` is taken.
    pub fn add_volume(&mut self, name: &str, placement: &str) -> Result<VolumeId, DetectorError> {
        if self.placement_map.contains_key(placement) {
            return Err(DetectorError::DuplicatePlacement(placement.to_string()));
        }
        let id = self.volumes.insert(LogicalVolume {
            name: name.to_string(),
            placement: placement.to_string(),
        });
        self.placement_map.insert(placement.to_string(), id);
        Ok(id)
    }

    pub fn set_scoring_volume(&mut self, id: VolumeId) -> Result<(), DetectorError> {
        if !self.volumes.contains_key(id) {
            return Err(DetectorError::UnknownVolume(id));
        }
        self.scoring_volume = Some(id);
        Ok(())
    }

    pub fn set_scoring_placement(&mut self, placement: &str) -> Result<VolumeId, DetectorError> {
        let id = self
            .volume_for_placement(placement)
            .ok_or_else(|| DetectorError::UnknownPlacement(placement.to_string()))?;
        self.scoring_volume = Some(id);
        Ok(id)
    }

    pub fn volume(&self, id: VolumeId) -> Option<&LogicalVolume> {
        self.volumes.get(id)
    }

    pub fn volume_for_placement(&self, placement: &str) -> Option<VolumeId> {
        self.placement_map.get(placement).copied()
    }

    pub fn volumes_iter(&self) -> impl Iterator<Item = (VolumeId, &LogicalVolume)> {
        self.volumes.iter()
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

impl DetectorModel for Detector {
    fn scoring_volume(&self) -> Result<VolumeId, DetectorError> {
        self.scoring_volume.ok_or(DetectorError::NoScoringVolume)
    }
}
