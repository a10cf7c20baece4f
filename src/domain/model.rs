use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(PlanetId);
entity_id!(ScientistId);
entity_id!(MissionId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Planet,
    Scientist,
    Mission,
}

impl EntityKind {
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Planet => "planet",
            EntityKind::Scientist => "scientist",
            EntityKind::Mission => "mission",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Planet => "Planet",
            EntityKind::Scientist => "Scientist",
            EntityKind::Mission => "Mission",
        };
        f.write_str(name)
    }
}

/// A planet row. `missions` is the owning side of Planet -> Mission and is
/// maintained by `core::relations`, never assigned directly by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
    pub missions: BTreeSet<MissionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scientist {
    pub id: ScientistId,
    pub name: String,
    pub field_of_study: String,
    pub missions: BTreeSet<MissionId>,
}

/// Join row between a planet and a scientist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub planet_id: PlanetId,
    pub scientist_id: ScientistId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewScientist {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMission {
    pub name: Option<String>,
    pub planet_id: Option<PlanetId>,
    pub scientist_id: Option<ScientistId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetPatch {
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScientistPatch {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionPatch {
    pub name: Option<String>,
    pub planet_id: Option<PlanetId>,
    pub scientist_id: Option<ScientistId>,
}

impl NewPlanet {
    pub fn new(name: &str, distance_from_earth: i64, nearest_star: &str) -> Self {
        Self {
            name: name.to_string(),
            distance_from_earth,
            nearest_star: nearest_star.to_string(),
        }
    }
}

impl NewScientist {
    pub fn new(name: &str, field_of_study: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            field_of_study: Some(field_of_study.to_string()),
        }
    }
}

impl NewMission {
    pub fn new(name: &str, planet_id: PlanetId, scientist_id: ScientistId) -> Self {
        Self {
            name: Some(name.to_string()),
            planet_id: Some(planet_id),
            scientist_id: Some(scientist_id),
        }
    }
}

/// What a cascading delete removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteReport {
    pub removed_missions: Vec<MissionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_bare_numbers() {
        let json = serde_json::to_value(PlanetId(3)).unwrap();
        assert_eq!(json, serde_json::json!(3));

        let id: MissionId = serde_json::from_value(serde_json::json!(9)).unwrap();
        assert_eq!(id, MissionId(9));
    }

    #[test]
    fn test_new_mission_deserializes_absent_fields() {
        let mission: NewMission =
            serde_json::from_value(serde_json::json!({ "name": "Flyby" })).unwrap();
        assert_eq!(mission.name.as_deref(), Some("Flyby"));
        assert!(mission.planet_id.is_none());
        assert!(mission.scientist_id.is_none());
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Planet.to_string(), "Planet");
        assert_eq!(EntityKind::Scientist.singular(), "scientist");
    }
}
