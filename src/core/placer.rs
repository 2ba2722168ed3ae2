//! Writes entries into the destination Ivy repository.
//!
//! Layout: `<root>/<organisation split on '.'>/<module>/<revision>/` holding
//! the generated descriptor and a `<module>-<revision>.<ext>` symlink to the
//! binary. Both are replaced through a rename so a reader never sees a
//! half-written descriptor or a missing link.

use crate::core::ivy::IvyDescriptor;
use crate::domain::model::{PlacementRequest, RepositoryEntry};
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::validate_path_segment;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_DESCRIPTOR_NAME: &str = "descriptor.xml";
pub const DEFAULT_EXTENSION: &str = "jar";

#[derive(Debug, Clone)]
pub struct RepositoryPlacer {
    descriptor_name: String,
}

impl Default for RepositoryPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTOR_NAME)
    }
}

impl RepositoryPlacer {
    pub fn new(descriptor_name: impl Into<String>) -> Self {
        Self {
            descriptor_name: descriptor_name.into(),
        }
    }

    pub fn descriptor_name(&self) -> &str {
        &self.descriptor_name
    }

    /// Compute where `request` would land under `root`, without touching
    /// the filesystem.
    pub fn layout(&self, root: &Path, request: &PlacementRequest) -> Result<RepositoryEntry> {
        let mut artifact_dir = root.to_path_buf();
        for segment in request.organisation.split('.') {
            validate_path_segment("organisation", segment)?;
            artifact_dir.push(segment);
        }
        validate_path_segment("module", &request.module)?;
        validate_path_segment("revision", &request.revision)?;
        artifact_dir.push(&request.module);
        artifact_dir.push(&request.revision);

        let extension = request
            .binary_file
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_EXTENSION);

        Ok(RepositoryEntry {
            descriptor_path: artifact_dir.join(&self.descriptor_name),
            link_path: artifact_dir.join(format!(
                "{}-{}.{}",
                request.module, request.revision, extension
            )),
            artifact_dir,
        })
    }

    /// Where `place` would put `request`, without writing anything. An
    /// existing root is canonicalized as `place` does; a missing one can only
    /// be made absolute.
    pub fn preview(&self, request: &PlacementRequest) -> Result<RepositoryEntry> {
        let root = preview_root(&request.repo_root)?;
        self.layout(&root, request)
    }

    pub fn place(&self, request: &PlacementRequest) -> Result<RepositoryEntry> {
        let root = resolve_root(&request.repo_root)?;
        let entry = self.layout(&root, request)?;

        fs::create_dir_all(&entry.artifact_dir).map_err(|e| BridgeError::PlacementError {
            path: entry.artifact_dir.clone(),
            source: e,
        })?;

        let xml = IvyDescriptor::new(&request.organisation, &request.module, &request.revision)
            .with_status(&request.status)
            .with_metadata(request.metadata.clone())
            .to_xml()?;
        write_replacing(&entry.descriptor_path, xml.as_bytes())?;
        tracing::debug!("Wrote {}", entry.descriptor_path.display());

        let target = std::path::absolute(&request.binary_file).map_err(|e| {
            BridgeError::PlacementError {
                path: request.binary_file.clone(),
                source: e,
            }
        })?;
        if !target.exists() {
            tracing::warn!("Binary {} does not exist; linking anyway", target.display());
        }
        link_replacing(&target, &entry.link_path)?;

        tracing::info!(
            "Placed {}:{}:{} at {}",
            request.organisation,
            request.module,
            request.revision,
            entry.artifact_dir.display()
        );
        Ok(entry)
    }
}

fn preview_root(repo_root: &Path) -> Result<PathBuf> {
    let resolved = if repo_root.exists() {
        fs::canonicalize(repo_root)
    } else {
        std::path::absolute(repo_root)
    };
    resolved.map_err(|e| BridgeError::PlacementError {
        path: repo_root.to_path_buf(),
        source: e,
    })
}

/// Create the repository root if needed and return its canonical path.
fn resolve_root(repo_root: &Path) -> Result<PathBuf> {
    let placement_error = |e| BridgeError::PlacementError {
        path: repo_root.to_path_buf(),
        source: e,
    };
    fs::create_dir_all(repo_root).map_err(placement_error)?;
    fs::canonicalize(repo_root).map_err(placement_error)
}

fn write_replacing(path: &Path, contents: &[u8]) -> Result<()> {
    let placement_error = |e| BridgeError::PlacementError {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(placement_error)?;
    file.write_all(contents).map_err(placement_error)?;
    file.persist(path).map_err(|e| placement_error(e.error))?;
    Ok(())
}

fn link_replacing(target: &Path, link_path: &Path) -> Result<()> {
    let placement_error = |e| BridgeError::PlacementError {
        path: link_path.to_path_buf(),
        source: e,
    };

    if let Ok(metadata) = fs::symlink_metadata(link_path) {
        if metadata.is_dir() {
            return Err(placement_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a directory occupies the link location",
            )));
        }
        tracing::debug!("Replacing existing {}", link_path.display());
    }

    let file_name = link_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = link_path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    // Left over from an interrupted run.
    if fs::symlink_metadata(&staging).is_ok() {
        fs::remove_file(&staging).map_err(placement_error)?;
    }

    create_symlink(target, &staging).map_err(placement_error)?;
    if let Err(e) = fs::rename(&staging, link_path) {
        let _ = fs::remove_file(&staging);
        return Err(placement_error(e));
    }
    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
