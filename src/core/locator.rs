use crate::domain::model::Coordinate;
use crate::domain::ports::ArtifactResolver;
use crate::utils::error::{BridgeError, Result};
use std::path::PathBuf;

pub const BINARY_KIND: &str = "jar";

pub struct BinaryLocator<R: ArtifactResolver> {
    tools: R,
}

impl<R: ArtifactResolver> BinaryLocator<R> {
    pub fn new(tools: R) -> Self {
        Self { tools }
    }

    /// Classpath query for an artifact, normally `group:artifact:jar:jar`.
    ///
    /// When the POM file name carried a short name (`JPP-<name>.pom`) the
    /// query is that bare `<name>` instead of the coordinate form, because
    /// the distribution's classpath tool indexes packaged jars by it.
    pub fn query_for(coordinate: &Coordinate, short_name: Option<&str>) -> String {
        match short_name {
            Some(name) => name.to_string(),
            None => format!(
                "{}:{}:{BINARY_KIND}:{BINARY_KIND}",
                coordinate.group, coordinate.artifact
            ),
        }
    }

    pub fn locate(&self, coordinate: &Coordinate, short_name: Option<&str>) -> Result<PathBuf> {
        let query = Self::query_for(coordinate, short_name);

        let path = self
            .tools
            .resolve_binary(&query)
            .map_err(|e| BridgeError::BinaryNotFound {
                query: query.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!("Located binary for {}: {}", query, path.display());
        Ok(path)
    }
}
