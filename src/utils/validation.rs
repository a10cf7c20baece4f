use crate::domain::model::EntityKind;
use crate::domain::ports::StoreView;
use crate::utils::error::{RegistryError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// How strictly required string fields are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Treat whitespace-only strings as empty.
    pub reject_blank: bool,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self { reject_blank: true }
    }

    fn is_empty(&self, value: &str) -> bool {
        if self.reject_blank {
            value.trim().is_empty()
        } else {
            value.is_empty()
        }
    }
}

pub fn validate_nonempty(
    policy: ValidationPolicy,
    entity: EntityKind,
    field: &'static str,
    value: Option<&str>,
) -> Result<String> {
    match value {
        Some(v) if !policy.is_empty(v) => Ok(v.to_string()),
        _ => {
            tracing::debug!("Rejected {}.{}: value is empty or absent", entity, field);
            Err(RegistryError::RequiredField { entity, field })
        }
    }
}

/// Resolves a foreign key against the store at call time. An absent id and an
/// id with no matching row are both `DanglingReference`.
pub fn validate_foreign_key<V>(view: &V, kind: EntityKind, id: Option<u64>) -> Result<u64>
where
    V: StoreView + ?Sized,
{
    match id {
        Some(id) if view.exists(kind, id) => Ok(id),
        _ => {
            tracing::debug!("Rejected {} reference {:?}: no such row", kind, id);
            Err(RegistryError::DanglingReference { kind, id })
        }
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RegistryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RegistryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Mission, MissionId, Planet, PlanetId, Scientist, ScientistId};
    use std::collections::BTreeSet;

    struct OnePlanet(Planet);

    impl StoreView for OnePlanet {
        fn planet(&self, id: PlanetId) -> Option<&Planet> {
            (self.0.id == id).then_some(&self.0)
        }
        fn scientist(&self, _id: ScientistId) -> Option<&Scientist> {
            None
        }
        fn mission(&self, _id: MissionId) -> Option<&Mission> {
            None
        }
        fn planets(&self) -> Vec<&Planet> {
            vec![&self.0]
        }
        fn scientists(&self) -> Vec<&Scientist> {
            Vec::new()
        }
        fn missions(&self) -> Vec<&Mission> {
            Vec::new()
        }
    }

    fn view() -> OnePlanet {
        OnePlanet(Planet {
            id: PlanetId(1),
            name: "Mars".to_string(),
            distance_from_earth: 225_000_000,
            nearest_star: "Sun".to_string(),
            missions: BTreeSet::new(),
        })
    }

    #[test]
    fn test_validate_nonempty() {
        let policy = ValidationPolicy::default();
        assert_eq!(
            validate_nonempty(policy, EntityKind::Scientist, "name", Some("Ada")).unwrap(),
            "Ada"
        );
        assert!(validate_nonempty(policy, EntityKind::Scientist, "name", Some("")).is_err());
        assert!(validate_nonempty(policy, EntityKind::Mission, "name", None).is_err());
        // whitespace passes unless the policy is strict
        assert!(validate_nonempty(policy, EntityKind::Mission, "name", Some("  ")).is_ok());
        assert!(
            validate_nonempty(ValidationPolicy::strict(), EntityKind::Mission, "name", Some("  "))
                .is_err()
        );
    }

    #[test]
    fn test_validate_foreign_key() {
        let view = view();
        assert_eq!(
            validate_foreign_key(&view, EntityKind::Planet, Some(1)).unwrap(),
            1
        );

        match validate_foreign_key(&view, EntityKind::Planet, Some(9999)) {
            Err(RegistryError::DanglingReference { kind, id }) => {
                assert_eq!(kind, EntityKind::Planet);
                assert_eq!(id, Some(9999));
            }
            other => panic!("expected dangling reference, got {:?}", other),
        }

        assert!(matches!(
            validate_foreign_key(&view, EntityKind::Scientist, None),
            Err(RegistryError::DanglingReference { id: None, .. })
        ));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["compact", "json"]).is_err());
    }

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names("seed.planets", ["Mars", "Venus"]).is_ok());
        assert!(validate_unique_names("seed.planets", ["Mars", "Mars"]).is_err());
    }
}
