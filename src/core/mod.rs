pub mod registry;
pub mod relations;
pub mod seed;
pub mod serialize;

pub use crate::domain::model::{
    DeleteReport, EntityKind, Mission, MissionId, Planet, PlanetId, Scientist, ScientistId,
};
pub use crate::domain::ports::{RelationalStore, StoreView, UnitOfWork};
pub use crate::utils::error::Result;
