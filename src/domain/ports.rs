use crate::domain::model::{
    EntityKind, Mission, MissionId, Planet, PlanetId, Scientist, ScientistId,
};
use crate::utils::error::Result;

/// Read access to committed (or in-transaction) rows.
pub trait StoreView {
    fn planet(&self, id: PlanetId) -> Option<&Planet>;
    fn scientist(&self, id: ScientistId) -> Option<&Scientist>;
    fn mission(&self, id: MissionId) -> Option<&Mission>;

    fn planets(&self) -> Vec<&Planet>;
    fn scientists(&self) -> Vec<&Scientist>;
    fn missions(&self) -> Vec<&Mission>;

    /// Primary-key presence check used by foreign-key validation.
    fn exists(&self, kind: EntityKind, id: u64) -> bool {
        match kind {
            EntityKind::Planet => self.planet(PlanetId(id)).is_some(),
            EntityKind::Scientist => self.scientist(ScientistId(id)).is_some(),
            EntityKind::Mission => self.mission(MissionId(id)).is_some(),
        }
    }
}

/// Mutable view handed to a transaction. Rows written here become visible to
/// other readers only when the enclosing transaction commits.
pub trait UnitOfWork: StoreView {
    /// Allocates the next primary key for `kind`. Keys are never reused.
    fn next_id(&mut self, kind: EntityKind) -> u64;

    fn put_planet(&mut self, planet: Planet);
    fn put_scientist(&mut self, scientist: Scientist);
    fn put_mission(&mut self, mission: Mission);

    fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet>;
    fn scientist_mut(&mut self, id: ScientistId) -> Option<&mut Scientist>;
    fn mission_mut(&mut self, id: MissionId) -> Option<&mut Mission>;

    fn remove_planet(&mut self, id: PlanetId) -> Option<Planet>;
    fn remove_scientist(&mut self, id: ScientistId) -> Option<Scientist>;
    fn remove_mission(&mut self, id: MissionId) -> Option<Mission>;
}

/// The relational store collaborator. `transaction` must be atomic: if `work`
/// returns an error, none of its writes are observable afterwards.
pub trait RelationalStore: Send + Sync {
    fn read<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreView) -> Result<T>;

    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T>;
}
