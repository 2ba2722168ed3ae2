pub mod bridge;
pub mod descriptor;
pub mod ivy;
pub mod locator;
pub mod placer;
pub mod resolver;

pub use crate::domain::model::{
    Coordinate, Descriptor, PlacementRequest, RepositoryEntry, Resolution,
};
pub use crate::domain::ports::ArtifactResolver;
pub use crate::utils::error::Result;
