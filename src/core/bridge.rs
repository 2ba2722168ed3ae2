use crate::core::locator::BinaryLocator;
use crate::core::placer::RepositoryPlacer;
use crate::core::resolver::CoordinateResolver;
use crate::domain::model::{PlacementRequest, RepositoryEntry, Resolution, DEFAULT_STATUS};
use crate::domain::ports::ArtifactResolver;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything the caller knows about the artifact to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    pub group: String,
    pub artifact: String,
    pub repo_dir: PathBuf,
    pub version: Option<String>,
    pub jar_file: Option<PathBuf>,
    pub pom_file: Option<PathBuf>,
    pub status: String,
    pub metadata: BTreeMap<String, String>,
}

impl BridgeRequest {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        repo_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            repo_dir: repo_dir.into(),
            version: None,
            jar_file: None,
            pom_file: None,
            status: DEFAULT_STATUS.to_string(),
            metadata: BTreeMap::new(),
        }
    }
}

impl Validate for BridgeRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("group", &self.group)?;
        validate_non_empty_string("artifact", &self.artifact)?;
        validate_path("repo", &self.repo_dir.to_string_lossy())?;
        validate_non_empty_string("status", &self.status)?;
        if let Some(version) = &self.version {
            validate_non_empty_string("--version", version)?;
        }
        Ok(())
    }
}

/// Resolve, locate and place one artifact.
pub struct Bridge<R: ArtifactResolver> {
    resolver: CoordinateResolver<R>,
    locator: BinaryLocator<R>,
    placer: RepositoryPlacer,
}

impl<R: ArtifactResolver + Clone> Bridge<R> {
    pub fn new(tools: R, placer: RepositoryPlacer) -> Self {
        Self {
            resolver: CoordinateResolver::new(tools.clone()),
            locator: BinaryLocator::new(tools),
            placer,
        }
    }
}

impl<R: ArtifactResolver> Bridge<R> {
    pub fn placer(&self) -> &RepositoryPlacer {
        &self.placer
    }

    /// Work out what to place without writing anything.
    pub fn plan(&self, request: &BridgeRequest) -> Result<PlacementRequest> {
        request.validate()?;

        let resolution = self.resolver.resolve(
            &request.group,
            &request.artifact,
            request.pom_file.as_deref(),
        )?;
        let coordinate = resolution.coordinate();

        if let Resolution::Resolved(descriptor) = &resolution {
            tracing::info!(
                "Descriptor {} declares {} ({} managed dependencies)",
                descriptor.source_path.display(),
                coordinate,
                descriptor.dependencies.len()
            );
        }

        let revision = request
            .version
            .clone()
            .or_else(|| coordinate.version.clone())
            .ok_or_else(|| BridgeError::ResolutionIncomplete {
                coordinate: coordinate.to_string(),
                field: "version".to_string(),
            })?;

        let binary_file = match &request.jar_file {
            Some(path) => path.clone(),
            None => self.locator.locate(coordinate, resolution.short_name())?,
        };

        Ok(PlacementRequest {
            binary_file,
            repo_root: request.repo_dir.clone(),
            organisation: coordinate.group.clone(),
            module: coordinate.artifact.clone(),
            revision,
            status: request.status.clone(),
            metadata: request.metadata.clone(),
        })
    }

    pub fn run(&self, request: &BridgeRequest) -> Result<RepositoryEntry> {
        let placement = self.plan(request)?;
        self.placer.place(&placement)
    }
}
