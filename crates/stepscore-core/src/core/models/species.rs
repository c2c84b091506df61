use std::fmt;

const PHOTON_NAME: &str = "gamma";
const ELECTRON_NAME: &str = "e-";

/// Coarse particle classification written into the step table.
///
/// The mapping from transport-engine particle names is exact and
/// case-sensitive; every name that is not a photon or an electron falls into
/// [`ParticleSpecies::Other`], so classification can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ParticleSpecies {
    /// A photon (`"gamma"`).
    Photon,
    /// An electron (`"e-"`).
    Electron,
    /// Any other particle, including names the transport engine invents.
    #[default]
    Other,
}

impl ParticleSpecies {
    /// Classifies a transport-engine particle name.
    ///
    /// # Arguments
    ///
    /// * `name` - The particle name as reported by the track's particle definition.
    ///
    /// # Return
    ///
    /// The species for `name`; unmatched names map to [`ParticleSpecies::Other`].
    pub fn classify(name: &str) -> Self {
        match name {
            PHOTON_NAME => ParticleSpecies::Photon,
            ELECTRON_NAME => ParticleSpecies::Electron,
            _ => ParticleSpecies::Other,
        }
    }

    /// Integer code stored in the species column: 0 photon, 1 electron, 2 other.
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            ParticleSpecies::Photon => 0,
            ParticleSpecies::Electron => 1,
            ParticleSpecies::Other => 2,
        }
    }
}

impl From<&str> for ParticleSpecies {
    fn from(name: &str) -> Self {
        Self::classify(name)
    }
}

impl fmt::Display for ParticleSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParticleSpecies::Photon => "photon",
            ParticleSpecies::Electron => "electron",
            ParticleSpecies::Other => "other",
        };
        f.write_str(label)
    }
}
