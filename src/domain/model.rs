use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A `group:artifact:version` triple. The version is unknown for stub
/// coordinates built from caller input alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: Some(version.into()),
        }
    }

    pub fn unversioned(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

/// Package metadata recovered from a POM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub coordinate: Coordinate,
    /// Entries of `dependencyManagement/dependencies`, in document order.
    pub dependencies: Vec<Coordinate>,
    pub source_path: PathBuf,
    /// Short jar name taken from a `*JPP-<name>.pom` file name.
    pub short_name: Option<String>,
}

/// Outcome of coordinate resolution. A stub carries only what the caller
/// supplied and must never be treated as a resolved descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Descriptor),
    Stub(Coordinate),
}

impl Resolution {
    pub fn coordinate(&self) -> &Coordinate {
        match self {
            Resolution::Resolved(descriptor) => &descriptor.coordinate,
            Resolution::Stub(coordinate) => coordinate,
        }
    }

    pub fn short_name(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(descriptor) => descriptor.short_name.as_deref(),
            Resolution::Stub(_) => None,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Resolution::Stub(_))
    }
}

pub const DEFAULT_STATUS: &str = "release";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub binary_file: PathBuf,
    pub repo_root: PathBuf,
    pub organisation: String,
    pub module: String,
    pub revision: String,
    pub status: String,
    pub metadata: BTreeMap<String, String>,
}

/// Where a placement lands on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    pub artifact_dir: PathBuf,
    pub descriptor_path: PathBuf,
    pub link_path: PathBuf,
}
