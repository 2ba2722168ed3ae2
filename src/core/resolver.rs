use crate::core::descriptor::parse_descriptor;
use crate::domain::model::{Coordinate, Resolution};
use crate::domain::ports::ArtifactResolver;
use crate::utils::error::Result;
use std::path::Path;

/// Kind appended to coordinate lookups.
pub const DESCRIPTOR_KIND: &str = "jar";

pub struct CoordinateResolver<R: ArtifactResolver> {
    tools: R,
}

impl<R: ArtifactResolver> CoordinateResolver<R> {
    pub fn new(tools: R) -> Self {
        Self { tools }
    }

    /// Resolve `group:artifact` to a parsed descriptor.
    ///
    /// An explicit descriptor path bypasses the external lookup and its
    /// errors propagate. Without one, a failed lookup yields a
    /// [`Resolution::Stub`] carrying only the caller's group and artifact;
    /// a descriptor that was found but cannot be parsed is still an error.
    pub fn resolve(
        &self,
        group: &str,
        artifact: &str,
        explicit_path: Option<&Path>,
    ) -> Result<Resolution> {
        if let Some(path) = explicit_path {
            tracing::info!("Reading descriptor {}", path.display());
            return parse_descriptor(path).map(Resolution::Resolved);
        }

        let query = format!("{group}:{artifact}:{DESCRIPTOR_KIND}");
        match self.tools.resolve_descriptor(&query) {
            Ok(path) => {
                tracing::info!("Resolved {} to {}", query, path.display());
                let descriptor = parse_descriptor(&path)?;
                for dependency in &descriptor.dependencies {
                    tracing::debug!("Managed dependency: {}", dependency);
                }
                Ok(Resolution::Resolved(descriptor))
            }
            Err(e) => {
                tracing::warn!(
                    "No descriptor for {}, continuing with caller-supplied coordinates: {}",
                    query,
                    e
                );
                Ok(Resolution::Stub(Coordinate::unversioned(group, artifact)))
            }
        }
    }
}
