//! Acyclic JSON projection of entities.
//!
//! Relationships are walked by name (`missions`, `planet`, `scientist`) and
//! every edge is identified by its dotted path from the root, e.g.
//! `missions.planet`. `EXCLUSIONS` lists, per root kind, the paths that are
//! never expanded. Every cycle in the entity graph passes through one of
//! them, which is what bounds the output.

use crate::domain::model::{EntityKind, Mission, MissionId, Planet, PlanetId, Scientist, ScientistId};
use crate::domain::ports::StoreView;
use crate::utils::error::{RegistryError, Result};
use serde_json::{json, Map, Value};

pub const EXCLUSIONS: &[(EntityKind, &[&str])] = &[
    (EntityKind::Planet, &["missions.planet", "missions.scientist"]),
    (EntityKind::Scientist, &["missions.planet", "missions.scientist"]),
    (EntityKind::Mission, &["planet.missions", "scientist.missions"]),
];

pub fn excluded_paths(root: EntityKind) -> &'static [&'static str] {
    EXCLUSIONS
        .iter()
        .find(|(kind, _)| *kind == root)
        .map(|(_, paths)| *paths)
        .unwrap_or(&[])
}

struct Projector<'a, V: StoreView + ?Sized> {
    view: &'a V,
    excluded: &'static [&'static str],
}

impl<'a, V: StoreView + ?Sized> Projector<'a, V> {
    fn rooted_at(view: &'a V, root: EntityKind) -> Self {
        Self {
            view,
            excluded: excluded_paths(root),
        }
    }

    /// Path of `relation` below `path`, or `None` when it is excluded.
    fn edge(&self, path: &str, relation: &str) -> Option<String> {
        let edge = if path.is_empty() {
            relation.to_string()
        } else {
            format!("{}.{}", path, relation)
        };
        (!self.excluded.iter().any(|excluded| *excluded == edge)).then_some(edge)
    }

    fn missions(&self, ids: impl Iterator<Item = MissionId>, path: &str) -> Value {
        Value::Array(
            ids.filter_map(|id| self.view.mission(id))
                .map(|mission| self.mission(mission, path))
                .collect(),
        )
    }

    fn planet(&self, planet: &Planet, path: &str) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(planet.id));
        map.insert("name".to_string(), json!(planet.name));
        map.insert(
            "distance_from_earth".to_string(),
            json!(planet.distance_from_earth),
        );
        map.insert("nearest_star".to_string(), json!(planet.nearest_star));
        if let Some(edge) = self.edge(path, "missions") {
            map.insert(
                "missions".to_string(),
                self.missions(planet.missions.iter().copied(), &edge),
            );
        }
        Value::Object(map)
    }

    fn scientist(&self, scientist: &Scientist, path: &str) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(scientist.id));
        map.insert("name".to_string(), json!(scientist.name));
        map.insert("field_of_study".to_string(), json!(scientist.field_of_study));
        if let Some(edge) = self.edge(path, "missions") {
            map.insert(
                "missions".to_string(),
                self.missions(scientist.missions.iter().copied(), &edge),
            );
        }
        Value::Object(map)
    }

    fn mission(&self, mission: &Mission, path: &str) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(mission.id));
        map.insert("name".to_string(), json!(mission.name));
        map.insert("planet_id".to_string(), json!(mission.planet_id));
        map.insert("scientist_id".to_string(), json!(mission.scientist_id));
        if let Some(edge) = self.edge(path, "planet") {
            if let Some(planet) = self.view.planet(mission.planet_id) {
                map.insert("planet".to_string(), self.planet(planet, &edge));
            }
        }
        if let Some(edge) = self.edge(path, "scientist") {
            if let Some(scientist) = self.view.scientist(mission.scientist_id) {
                map.insert("scientist".to_string(), self.scientist(scientist, &edge));
            }
        }
        Value::Object(map)
    }
}

pub fn planet_to_value<V: StoreView + ?Sized>(view: &V, planet: &Planet) -> Value {
    Projector::rooted_at(view, EntityKind::Planet).planet(planet, "")
}

pub fn scientist_to_value<V: StoreView + ?Sized>(view: &V, scientist: &Scientist) -> Value {
    Projector::rooted_at(view, EntityKind::Scientist).scientist(scientist, "")
}

pub fn mission_to_value<V: StoreView + ?Sized>(view: &V, mission: &Mission) -> Value {
    Projector::rooted_at(view, EntityKind::Mission).mission(mission, "")
}

pub fn serialize_planet<V: StoreView + ?Sized>(view: &V, id: PlanetId) -> Result<Value> {
    view.planet(id)
        .map(|planet| planet_to_value(view, planet))
        .ok_or(RegistryError::NotFound {
            kind: EntityKind::Planet,
            id: id.get(),
        })
}

pub fn serialize_scientist<V: StoreView + ?Sized>(view: &V, id: ScientistId) -> Result<Value> {
    view.scientist(id)
        .map(|scientist| scientist_to_value(view, scientist))
        .ok_or(RegistryError::NotFound {
            kind: EntityKind::Scientist,
            id: id.get(),
        })
}

pub fn serialize_mission<V: StoreView + ?Sized>(view: &V, id: MissionId) -> Result<Value> {
    view.mission(id)
        .map(|mission| mission_to_value(view, mission))
        .ok_or(RegistryError::NotFound {
            kind: EntityKind::Mission,
            id: id.get(),
        })
}

/// Every row of one kind, each projected from its own root.
pub fn serialize_kind<V: StoreView + ?Sized>(view: &V, kind: EntityKind) -> Value {
    let items = match kind {
        EntityKind::Planet => view
            .planets()
            .into_iter()
            .map(|p| planet_to_value(view, p))
            .collect(),
        EntityKind::Scientist => view
            .scientists()
            .into_iter()
            .map(|s| scientist_to_value(view, s))
            .collect(),
        EntityKind::Mission => view
            .missions()
            .into_iter()
            .map(|m| mission_to_value(view, m))
            .collect(),
    };
    Value::Array(items)
}

pub fn serialize_all<V: StoreView + ?Sized>(view: &V) -> Value {
    json!({
        "planets": serialize_kind(view, EntityKind::Planet),
        "scientists": serialize_kind(view, EntityKind::Scientist),
        "missions": serialize_kind(view, EntityKind::Mission),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct Fixture {
        planets: Vec<Planet>,
        scientists: Vec<Scientist>,
        missions: Vec<Mission>,
    }

    impl StoreView for Fixture {
        fn planet(&self, id: PlanetId) -> Option<&Planet> {
            self.planets.iter().find(|p| p.id == id)
        }
        fn scientist(&self, id: ScientistId) -> Option<&Scientist> {
            self.scientists.iter().find(|s| s.id == id)
        }
        fn mission(&self, id: MissionId) -> Option<&Mission> {
            self.missions.iter().find(|m| m.id == id)
        }
        fn planets(&self) -> Vec<&Planet> {
            self.planets.iter().collect()
        }
        fn scientists(&self) -> Vec<&Scientist> {
            self.scientists.iter().collect()
        }
        fn missions(&self) -> Vec<&Mission> {
            self.missions.iter().collect()
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            planets: vec![Planet {
                id: PlanetId(1),
                name: "Mars".to_string(),
                distance_from_earth: 225_000_000,
                nearest_star: "Sun".to_string(),
                missions: BTreeSet::from([MissionId(1), MissionId(2)]),
            }],
            scientists: vec![Scientist {
                id: ScientistId(1),
                name: "Ada".to_string(),
                field_of_study: "Astrophysics".to_string(),
                missions: BTreeSet::from([MissionId(1), MissionId(2)]),
            }],
            missions: vec![
                Mission {
                    id: MissionId(1),
                    name: "Orbit Survey".to_string(),
                    planet_id: PlanetId(1),
                    scientist_id: ScientistId(1),
                },
                Mission {
                    id: MissionId(2),
                    name: "Sample Return".to_string(),
                    planet_id: PlanetId(1),
                    scientist_id: ScientistId(1),
                },
            ],
        }
    }

    #[test]
    fn test_every_root_has_exclusions() {
        for kind in [EntityKind::Planet, EntityKind::Scientist, EntityKind::Mission] {
            assert_eq!(excluded_paths(kind).len(), 2);
        }
    }

    #[test]
    fn test_planet_embeds_missions_as_leaves() {
        let view = fixture();
        let value = serialize_planet(&view, PlanetId(1)).unwrap();

        assert_eq!(value["name"], "Mars");
        assert_eq!(value["distance_from_earth"], 225_000_000);
        let missions = value["missions"].as_array().unwrap();
        assert_eq!(missions.len(), 2);
        for mission in missions {
            assert!(mission.get("planet").is_none());
            assert!(mission.get("scientist").is_none());
            assert_eq!(mission["planet_id"], 1);
        }
    }

    #[test]
    fn test_scientist_embeds_missions_as_leaves() {
        let view = fixture();
        let value = serialize_scientist(&view, ScientistId(1)).unwrap();

        assert_eq!(value["field_of_study"], "Astrophysics");
        let missions = value["missions"].as_array().unwrap();
        assert_eq!(missions.len(), 2);
        assert!(missions
            .iter()
            .all(|m| m.get("scientist").is_none() && m.get("planet").is_none()));
    }

    #[test]
    fn test_mission_embeds_parents_without_their_missions() {
        let view = fixture();
        let value = serialize_mission(&view, MissionId(1)).unwrap();

        assert_eq!(value["name"], "Orbit Survey");
        assert_eq!(value["planet"]["name"], "Mars");
        assert!(value["planet"].get("missions").is_none());
        assert_eq!(value["scientist"]["name"], "Ada");
        assert!(value["scientist"].get("missions").is_none());
    }

    #[test]
    fn test_missing_row_is_not_found() {
        let view = fixture();
        assert!(matches!(
            serialize_mission(&view, MissionId(9)),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_serialize_all_shape() {
        let view = fixture();
        let value = serialize_all(&view);
        assert_eq!(value["planets"].as_array().unwrap().len(), 1);
        assert_eq!(value["scientists"].as_array().unwrap().len(), 1);
        assert_eq!(value["missions"].as_array().unwrap().len(), 2);
        assert!(value["missions"][0]["planet"].get("missions").is_none());
    }
}
