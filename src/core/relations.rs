//! Keeps the owning `missions` collections on planets and scientists in step
//! with each mission's `planet_id` / `scientist_id`, and drives cascades.
//!
//! All mutating functions take the transaction's unit of work; callers are
//! expected to run them inside `RelationalStore::transaction` so a failure
//! half-way through a cascade rolls back the whole delete.

use crate::domain::model::{
    DeleteReport, EntityKind, Mission, MissionId, Planet, PlanetId, Scientist, ScientistId,
};
use crate::domain::ports::{StoreView, UnitOfWork};
use crate::utils::error::{RegistryError, Result};
use std::collections::BTreeMap;

/// Adds `mission` to both parents' collections.
pub fn attach_mission(uow: &mut dyn UnitOfWork, mission: &Mission) -> Result<()> {
    uow.planet_mut(mission.planet_id)
        .ok_or(RegistryError::DanglingReference {
            kind: EntityKind::Planet,
            id: Some(mission.planet_id.get()),
        })?
        .missions
        .insert(mission.id);
    uow.scientist_mut(mission.scientist_id)
        .ok_or(RegistryError::DanglingReference {
            kind: EntityKind::Scientist,
            id: Some(mission.scientist_id.get()),
        })?
        .missions
        .insert(mission.id);
    Ok(())
}

/// Removes `mission` from whichever parents still exist.
pub fn detach_mission(uow: &mut dyn UnitOfWork, mission: &Mission) {
    if let Some(planet) = uow.planet_mut(mission.planet_id) {
        planet.missions.remove(&mission.id);
    }
    if let Some(scientist) = uow.scientist_mut(mission.scientist_id) {
        scientist.missions.remove(&mission.id);
    }
}

/// Moves an existing mission to new parents. Both targets must already have
/// passed foreign-key validation.
pub fn relink_mission(
    uow: &mut dyn UnitOfWork,
    before: &Mission,
    after: &Mission,
) -> Result<()> {
    detach_mission(uow, before);
    attach_mission(uow, after)
}

pub fn delete_mission(uow: &mut dyn UnitOfWork, id: MissionId) -> Result<Mission> {
    let mission = uow.remove_mission(id).ok_or(RegistryError::NotFound {
        kind: EntityKind::Mission,
        id: id.get(),
    })?;
    detach_mission(uow, &mission);
    tracing::debug!("Deleted mission {}", id);
    Ok(mission)
}

/// Deletes a planet and every mission that references it.
pub fn delete_planet_cascade(uow: &mut dyn UnitOfWork, id: PlanetId) -> Result<DeleteReport> {
    let missions: Vec<MissionId> = uow
        .planet(id)
        .ok_or(RegistryError::NotFound {
            kind: EntityKind::Planet,
            id: id.get(),
        })?
        .missions
        .iter()
        .copied()
        .collect();

    for mission_id in &missions {
        delete_mission(uow, *mission_id)?;
    }
    uow.remove_planet(id);

    tracing::info!("Deleted planet {} and {} mission(s)", id, missions.len());
    Ok(DeleteReport {
        removed_missions: missions,
    })
}

/// Deletes a scientist and every mission that references it.
pub fn delete_scientist_cascade(
    uow: &mut dyn UnitOfWork,
    id: ScientistId,
) -> Result<DeleteReport> {
    let missions: Vec<MissionId> = uow
        .scientist(id)
        .ok_or(RegistryError::NotFound {
            kind: EntityKind::Scientist,
            id: id.get(),
        })?
        .missions
        .iter()
        .copied()
        .collect();

    for mission_id in &missions {
        delete_mission(uow, *mission_id)?;
    }
    uow.remove_scientist(id);

    tracing::info!("Deleted scientist {} and {} mission(s)", id, missions.len());
    Ok(DeleteReport {
        removed_missions: missions,
    })
}

pub fn missions_of_planet<'a, V>(view: &'a V, id: PlanetId) -> Vec<&'a Mission>
where
    V: StoreView + ?Sized,
{
    view.planet(id)
        .map(|planet| {
            planet
                .missions
                .iter()
                .filter_map(|mission_id| view.mission(*mission_id))
                .collect()
        })
        .unwrap_or_default()
}

pub fn missions_of_scientist<'a, V>(view: &'a V, id: ScientistId) -> Vec<&'a Mission>
where
    V: StoreView + ?Sized,
{
    view.scientist(id)
        .map(|scientist| {
            scientist
                .missions
                .iter()
                .filter_map(|mission_id| view.mission(*mission_id))
                .collect()
        })
        .unwrap_or_default()
}

/// Scientists reachable from a planet through its missions, one entry per
/// scientist, ordered by id.
pub fn scientists_of_planet<'a, V>(view: &'a V, id: PlanetId) -> Vec<&'a Scientist>
where
    V: StoreView + ?Sized,
{
    missions_of_planet(view, id)
        .into_iter()
        .filter_map(|mission| view.scientist(mission.scientist_id))
        .map(|scientist| (scientist.id, scientist))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// Planets reachable from a scientist through their missions, ordered by id.
pub fn planets_of_scientist<'a, V>(view: &'a V, id: ScientistId) -> Vec<&'a Planet>
where
    V: StoreView + ?Sized,
{
    missions_of_scientist(view, id)
        .into_iter()
        .filter_map(|mission| view.planet(mission.planet_id))
        .map(|planet| (planet.id, planet))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::domain::ports::RelationalStore;
    use std::collections::BTreeSet;

    fn seed(uow: &mut dyn UnitOfWork) -> Result<()> {
        for name in ["Mars", "Venus"] {
            let id = PlanetId(uow.next_id(EntityKind::Planet));
            uow.put_planet(Planet {
                id,
                name: name.to_string(),
                distance_from_earth: 1,
                nearest_star: "Sun".to_string(),
                missions: BTreeSet::new(),
            });
        }
        for name in ["Ada", "Grace"] {
            let id = ScientistId(uow.next_id(EntityKind::Scientist));
            uow.put_scientist(Scientist {
                id,
                name: name.to_string(),
                field_of_study: "Astrophysics".to_string(),
                missions: BTreeSet::new(),
            });
        }
        // Mars: Ada twice, Grace once. Venus: Ada once.
        for (planet, scientist) in [(1, 1), (1, 1), (1, 2), (2, 1)] {
            let mission = Mission {
                id: MissionId(uow.next_id(EntityKind::Mission)),
                name: "Survey".to_string(),
                planet_id: PlanetId(planet),
                scientist_id: ScientistId(scientist),
            };
            uow.put_mission(mission.clone());
            attach_mission(uow, &mission)?;
        }
        Ok(())
    }

    fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.transaction(seed).unwrap();
        store
    }

    #[test]
    fn test_attach_is_visible_from_both_parents() {
        let store = seeded_store();
        store
            .read(|view| {
                let mars = view.planet(PlanetId(1)).unwrap();
                assert_eq!(mars.missions.len(), 3);
                let ada = view.scientist(ScientistId(1)).unwrap();
                assert_eq!(
                    ada.missions.iter().copied().collect::<Vec<_>>(),
                    vec![MissionId(1), MissionId(2), MissionId(4)]
                );
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_association_views_are_deduplicated() {
        let store = seeded_store();
        store
            .read(|view| {
                let names: Vec<&str> = scientists_of_planet(view, PlanetId(1))
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect();
                assert_eq!(names, vec!["Ada", "Grace"]);

                let planets: Vec<&str> = planets_of_scientist(view, ScientistId(1))
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect();
                assert_eq!(planets, vec!["Mars", "Venus"]);

                assert!(scientists_of_planet(view, PlanetId(99)).is_empty());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_planet_cascade_detaches_from_scientists() {
        let store = seeded_store();
        let report = store
            .transaction(|uow| delete_planet_cascade(uow, PlanetId(1)))
            .unwrap();
        assert_eq!(
            report.removed_missions,
            vec![MissionId(1), MissionId(2), MissionId(3)]
        );

        store
            .read(|view| {
                assert!(view.planet(PlanetId(1)).is_none());
                assert_eq!(view.missions().len(), 1);
                let ada = view.scientist(ScientistId(1)).unwrap();
                assert_eq!(ada.missions.iter().copied().collect::<Vec<_>>(), vec![MissionId(4)]);
                assert!(view.scientist(ScientistId(2)).unwrap().missions.is_empty());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_relink_moves_mission_between_planets() {
        let store = seeded_store();
        store
            .transaction(|uow| {
                let before = uow.mission(MissionId(3)).cloned().unwrap();
                let mut after = before.clone();
                after.planet_id = PlanetId(2);
                uow.put_mission(after.clone());
                relink_mission(uow, &before, &after)
            })
            .unwrap();

        store
            .read(|view| {
                assert!(!view.planet(PlanetId(1)).unwrap().missions.contains(&MissionId(3)));
                assert!(view.planet(PlanetId(2)).unwrap().missions.contains(&MissionId(3)));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_cascade_on_missing_planet_is_not_found() {
        let store = seeded_store();
        let result = store.transaction(|uow| delete_planet_cascade(uow, PlanetId(42)));
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }
}
