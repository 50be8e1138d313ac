//! Scene composition errors.

use helios_corona::CoronaError;
use helios_orbit::OrbitError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),

    #[error(transparent)]
    Corona(#[from] CoronaError),

    /// Planet index outside the catalog.
    #[error("no planet at index {0}")]
    UnknownPlanet(usize),
}
