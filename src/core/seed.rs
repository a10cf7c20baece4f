use crate::core::registry::MissionRegistry;
use crate::domain::model::{NewMission, NewPlanet, NewScientist, PlanetId, ScientistId};
use crate::domain::ports::RelationalStore;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declarative seed rows. Missions refer to their planet and scientist by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub planets: Vec<NewPlanet>,
    #[serde(default)]
    pub scientists: Vec<NewScientist>,
    #[serde(default)]
    pub missions: Vec<SeedMission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMission {
    pub name: Option<String>,
    pub planet: String,
    pub scientist: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub planets: usize,
    pub scientists: usize,
    pub missions: usize,
}

impl SeedData {
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty() && self.scientists.is_empty() && self.missions.is_empty()
    }
}

/// Inserts planets, then scientists, then missions. Stops at the first
/// rejected row; rows inserted before it stay committed.
pub fn seed_registry<S: RelationalStore>(
    registry: &MissionRegistry<S>,
    seed: &SeedData,
) -> Result<SeedReport> {
    let mut planets: HashMap<&str, PlanetId> = HashMap::new();
    let mut scientists: HashMap<&str, ScientistId> = HashMap::new();

    for input in &seed.planets {
        let planet = registry.create_planet(input.clone())?;
        planets.insert(input.name.as_str(), planet.id);
    }

    for input in &seed.scientists {
        let scientist = registry.create_scientist(input.clone())?;
        if let Some(name) = input.name.as_deref() {
            scientists.insert(name, scientist.id);
        }
    }

    for input in &seed.missions {
        // unresolved names fall through to the foreign-key validator
        registry.create_mission(NewMission {
            name: input.name.clone(),
            planet_id: planets.get(input.planet.as_str()).copied(),
            scientist_id: scientists.get(input.scientist.as_str()).copied(),
        })?;
    }

    let report = SeedReport {
        planets: seed.planets.len(),
        scientists: seed.scientists.len(),
        missions: seed.missions.len(),
    };
    tracing::info!(
        "Seeded {} planet(s), {} scientist(s), {} mission(s)",
        report.planets,
        report.scientists,
        report.missions
    );
    Ok(report)
}
