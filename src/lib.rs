pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, DumpTarget};
pub use config::RegistryConfig;

pub use adapters::InMemoryStore;
pub use crate::core::{registry::MissionRegistry, seed::seed_registry};
pub use domain::model::{
    DeleteReport, EntityKind, Mission, MissionId, MissionPatch, NewMission, NewPlanet,
    NewScientist, Planet, PlanetId, PlanetPatch, Scientist, ScientistId, ScientistPatch,
};
pub use utils::error::{RegistryError, Result};
