use crate::core::relations;
use crate::core::serialize;
use crate::domain::model::{
    DeleteReport, EntityKind, Mission, MissionId, MissionPatch, NewMission, NewPlanet,
    NewScientist, Planet, PlanetId, PlanetPatch, Scientist, ScientistId, ScientistPatch,
};
use crate::domain::ports::{RelationalStore, StoreView};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_foreign_key, validate_nonempty, ValidationPolicy};
use serde_json::Value;
use std::collections::BTreeSet;

/// Entry point for every mutation of planets, scientists and missions.
///
/// Each operation validates its input and writes inside a single store
/// transaction, so a rejected value never reaches committed state and a
/// foreign key cannot be deleted between its check and the write.
pub struct MissionRegistry<S: RelationalStore> {
    store: S,
    policy: ValidationPolicy,
}

fn not_found(kind: EntityKind, id: u64) -> RegistryError {
    RegistryError::NotFound { kind, id }
}

impl<S: RelationalStore> MissionRegistry<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, ValidationPolicy::default())
    }

    pub fn with_policy(store: S, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    // ---- planets -------------------------------------------------------

    pub fn create_planet(&self, input: NewPlanet) -> Result<Planet> {
        let planet = self.store.transaction(|uow| {
            let planet = Planet {
                id: PlanetId(uow.next_id(EntityKind::Planet)),
                name: input.name,
                distance_from_earth: input.distance_from_earth,
                nearest_star: input.nearest_star,
                missions: BTreeSet::new(),
            };
            uow.put_planet(planet.clone());
            Ok(planet)
        })?;
        tracing::debug!("Created planet {} ({})", planet.id, planet.name);
        Ok(planet)
    }

    pub fn update_planet(&self, id: PlanetId, patch: PlanetPatch) -> Result<Planet> {
        self.store.transaction(|uow| {
            let planet = uow
                .planet_mut(id)
                .ok_or_else(|| not_found(EntityKind::Planet, id.get()))?;
            if let Some(name) = patch.name {
                planet.name = name;
            }
            if let Some(distance) = patch.distance_from_earth {
                planet.distance_from_earth = distance;
            }
            if let Some(star) = patch.nearest_star {
                planet.nearest_star = star;
            }
            tracing::debug!("Updated planet {}", id);
            Ok(planet.clone())
        })
    }

    pub fn delete_planet(&self, id: PlanetId) -> Result<DeleteReport> {
        self.store
            .transaction(|uow| relations::delete_planet_cascade(uow, id))
    }

    // ---- scientists ----------------------------------------------------

    pub fn create_scientist(&self, input: NewScientist) -> Result<Scientist> {
        let name = validate_nonempty(
            self.policy,
            EntityKind::Scientist,
            "name",
            input.name.as_deref(),
        )?;
        let field_of_study = validate_nonempty(
            self.policy,
            EntityKind::Scientist,
            "field_of_study",
            input.field_of_study.as_deref(),
        )?;

        let scientist = self.store.transaction(|uow| {
            let scientist = Scientist {
                id: ScientistId(uow.next_id(EntityKind::Scientist)),
                name,
                field_of_study,
                missions: BTreeSet::new(),
            };
            uow.put_scientist(scientist.clone());
            Ok(scientist)
        })?;
        tracing::debug!("Created scientist {} ({})", scientist.id, scientist.name);
        Ok(scientist)
    }

    /// Validates every assigned field before touching the row; on error the
    /// stored scientist is unchanged.
    pub fn update_scientist(&self, id: ScientistId, patch: ScientistPatch) -> Result<Scientist> {
        let name = patch
            .name
            .as_deref()
            .map(|v| validate_nonempty(self.policy, EntityKind::Scientist, "name", Some(v)))
            .transpose()?;
        let field_of_study = patch
            .field_of_study
            .as_deref()
            .map(|v| {
                validate_nonempty(self.policy, EntityKind::Scientist, "field_of_study", Some(v))
            })
            .transpose()?;

        self.store.transaction(|uow| {
            let scientist = uow
                .scientist_mut(id)
                .ok_or_else(|| not_found(EntityKind::Scientist, id.get()))?;
            if let Some(name) = name {
                scientist.name = name;
            }
            if let Some(field_of_study) = field_of_study {
                scientist.field_of_study = field_of_study;
            }
            tracing::debug!("Updated scientist {}", id);
            Ok(scientist.clone())
        })
    }

    pub fn delete_scientist(&self, id: ScientistId) -> Result<DeleteReport> {
        self.store
            .transaction(|uow| relations::delete_scientist_cascade(uow, id))
    }

    // ---- missions ------------------------------------------------------

    pub fn create_mission(&self, input: NewMission) -> Result<Mission> {
        let name = validate_nonempty(
            self.policy,
            EntityKind::Mission,
            "name",
            input.name.as_deref(),
        )?;

        let mission = self.store.transaction(|uow| {
            let planet_id = validate_foreign_key(
                &*uow,
                EntityKind::Planet,
                input.planet_id.map(PlanetId::get),
            )?;
            let scientist_id = validate_foreign_key(
                &*uow,
                EntityKind::Scientist,
                input.scientist_id.map(ScientistId::get),
            )?;

            let mission = Mission {
                id: MissionId(uow.next_id(EntityKind::Mission)),
                name,
                planet_id: PlanetId(planet_id),
                scientist_id: ScientistId(scientist_id),
            };
            uow.put_mission(mission.clone());
            relations::attach_mission(uow, &mission)?;
            Ok(mission)
        })?;
        tracing::debug!(
            "Created mission {} (planet {}, scientist {})",
            mission.id,
            mission.planet_id,
            mission.scientist_id
        );
        Ok(mission)
    }

    /// Reassigning `planet_id` or `scientist_id` moves the mission between
    /// the parents' collections.
    pub fn update_mission(&self, id: MissionId, patch: MissionPatch) -> Result<Mission> {
        let name = patch
            .name
            .as_deref()
            .map(|v| validate_nonempty(self.policy, EntityKind::Mission, "name", Some(v)))
            .transpose()?;

        self.store.transaction(|uow| {
            let before = uow
                .mission(id)
                .cloned()
                .ok_or_else(|| not_found(EntityKind::Mission, id.get()))?;

            let mut after = before.clone();
            if let Some(name) = name {
                after.name = name;
            }
            if let Some(planet_id) = patch.planet_id {
                validate_foreign_key(&*uow, EntityKind::Planet, Some(planet_id.get()))?;
                after.planet_id = planet_id;
            }
            if let Some(scientist_id) = patch.scientist_id {
                validate_foreign_key(&*uow, EntityKind::Scientist, Some(scientist_id.get()))?;
                after.scientist_id = scientist_id;
            }

            uow.put_mission(after.clone());
            if before.planet_id != after.planet_id || before.scientist_id != after.scientist_id {
                relations::relink_mission(uow, &before, &after)?;
            }
            tracing::debug!("Updated mission {}", id);
            Ok(after)
        })
    }

    pub fn delete_mission(&self, id: MissionId) -> Result<Mission> {
        self.store
            .transaction(|uow| relations::delete_mission(uow, id))
    }

    // ---- reads ---------------------------------------------------------

    pub fn planet(&self, id: PlanetId) -> Result<Planet> {
        self.store.read(|view| {
            view.planet(id)
                .cloned()
                .ok_or_else(|| not_found(EntityKind::Planet, id.get()))
        })
    }

    pub fn scientist(&self, id: ScientistId) -> Result<Scientist> {
        self.store.read(|view| {
            view.scientist(id)
                .cloned()
                .ok_or_else(|| not_found(EntityKind::Scientist, id.get()))
        })
    }

    pub fn mission(&self, id: MissionId) -> Result<Mission> {
        self.store.read(|view| {
            view.mission(id)
                .cloned()
                .ok_or_else(|| not_found(EntityKind::Mission, id.get()))
        })
    }

    pub fn planets(&self) -> Result<Vec<Planet>> {
        self.store
            .read(|view| Ok(view.planets().into_iter().cloned().collect()))
    }

    pub fn scientists(&self) -> Result<Vec<Scientist>> {
        self.store
            .read(|view| Ok(view.scientists().into_iter().cloned().collect()))
    }

    pub fn missions(&self) -> Result<Vec<Mission>> {
        self.store
            .read(|view| Ok(view.missions().into_iter().cloned().collect()))
    }

    pub fn missions_of_planet(&self, id: PlanetId) -> Result<Vec<Mission>> {
        self.store.read(|view| {
            view.planet(id)
                .ok_or_else(|| not_found(EntityKind::Planet, id.get()))?;
            Ok(relations::missions_of_planet(view, id)
                .into_iter()
                .cloned()
                .collect())
        })
    }

    pub fn missions_of_scientist(&self, id: ScientistId) -> Result<Vec<Mission>> {
        self.store.read(|view| {
            view.scientist(id)
                .ok_or_else(|| not_found(EntityKind::Scientist, id.get()))?;
            Ok(relations::missions_of_scientist(view, id)
                .into_iter()
                .cloned()
                .collect())
        })
    }

    pub fn scientists_of_planet(&self, id: PlanetId) -> Result<Vec<Scientist>> {
        self.store.read(|view| {
            view.planet(id)
                .ok_or_else(|| not_found(EntityKind::Planet, id.get()))?;
            Ok(relations::scientists_of_planet(view, id)
                .into_iter()
                .cloned()
                .collect())
        })
    }

    pub fn planets_of_scientist(&self, id: ScientistId) -> Result<Vec<Planet>> {
        self.store.read(|view| {
            view.scientist(id)
                .ok_or_else(|| not_found(EntityKind::Scientist, id.get()))?;
            Ok(relations::planets_of_scientist(view, id)
                .into_iter()
                .cloned()
                .collect())
        })
    }

    // ---- serialization -------------------------------------------------

    pub fn serialize_planet(&self, id: PlanetId) -> Result<Value> {
        self.store
            .read(|view| serialize::serialize_planet(view, id))
    }

    pub fn serialize_scientist(&self, id: ScientistId) -> Result<Value> {
        self.store
            .read(|view| serialize::serialize_scientist(view, id))
    }

    pub fn serialize_mission(&self, id: MissionId) -> Result<Value> {
        self.store
            .read(|view| serialize::serialize_mission(view, id))
    }

    pub fn serialize_kind(&self, kind: EntityKind) -> Result<Value> {
        self.store
            .read(|view| Ok(serialize::serialize_kind(view, kind)))
    }

    pub fn serialize_all(&self) -> Result<Value> {
        self.store.read(|view| Ok(serialize::serialize_all(view)))
    }
}
