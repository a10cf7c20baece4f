use crate::domain::model::{
    EntityKind, Mission, MissionId, Planet, PlanetId, Scientist, ScientistId,
};
use crate::domain::ports::{RelationalStore, StoreView, UnitOfWork};
use crate::utils::error::{RegistryError, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct Tables {
    planets: BTreeMap<PlanetId, Planet>,
    scientists: BTreeMap<ScientistId, Scientist>,
    missions: BTreeMap<MissionId, Mission>,
    planet_seq: u64,
    scientist_seq: u64,
    mission_seq: u64,
}

impl StoreView for Tables {
    fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(&id)
    }

    fn scientist(&self, id: ScientistId) -> Option<&Scientist> {
        self.scientists.get(&id)
    }

    fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.get(&id)
    }

    fn planets(&self) -> Vec<&Planet> {
        self.planets.values().collect()
    }

    fn scientists(&self) -> Vec<&Scientist> {
        self.scientists.values().collect()
    }

    fn missions(&self) -> Vec<&Mission> {
        self.missions.values().collect()
    }
}

impl UnitOfWork for Tables {
    fn next_id(&mut self, kind: EntityKind) -> u64 {
        let seq = match kind {
            EntityKind::Planet => &mut self.planet_seq,
            EntityKind::Scientist => &mut self.scientist_seq,
            EntityKind::Mission => &mut self.mission_seq,
        };
        *seq += 1;
        *seq
    }

    fn put_planet(&mut self, planet: Planet) {
        self.planets.insert(planet.id, planet);
    }

    fn put_scientist(&mut self, scientist: Scientist) {
        self.scientists.insert(scientist.id, scientist);
    }

    fn put_mission(&mut self, mission: Mission) {
        self.missions.insert(mission.id, mission);
    }

    fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.get_mut(&id)
    }

    fn scientist_mut(&mut self, id: ScientistId) -> Option<&mut Scientist> {
        self.scientists.get_mut(&id)
    }

    fn mission_mut(&mut self, id: MissionId) -> Option<&mut Mission> {
        self.missions.get_mut(&id)
    }

    fn remove_planet(&mut self, id: PlanetId) -> Option<Planet> {
        self.planets.remove(&id)
    }

    fn remove_scientist(&mut self, id: ScientistId) -> Option<Scientist> {
        self.scientists.remove(&id)
    }

    fn remove_mission(&mut self, id: MissionId) -> Option<Mission> {
        self.missions.remove(&id)
    }
}

/// Reference store: three ordered tables behind one lock. A transaction works
/// on a copy of the tables and swaps it in only on success, so a failed
/// validate-then-write leaves no trace and concurrent writers serialize on the
/// write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> RegistryError {
    RegistryError::Store {
        message: "in-memory store lock poisoned".to_string(),
    }
}

impl RelationalStore for InMemoryStore {
    fn read<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreView) -> Result<T>,
    {
        let tables = self.tables.read().map_err(poisoned)?;
        work(&*tables)
    }

    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T>,
    {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let mut working = tables.clone();
        let value = work(&mut working)?;
        *tables = working;
        Ok(value)
    }
}
