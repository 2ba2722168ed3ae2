use crate::utils::error::Result;
use std::path::PathBuf;

/// Lookup of installed artifacts on the local system.
///
/// Both methods return exactly one path or fail; callers decide whether a
/// failure is fatal.
pub trait ArtifactResolver {
    /// Find the POM for a `group:artifact:kind` coordinate.
    fn resolve_descriptor(&self, coordinate: &str) -> Result<PathBuf>;

    /// Find the binary for a classpath query (a short jar name or
    /// `group:artifact:kind:kind`).
    fn resolve_binary(&self, query: &str) -> Result<PathBuf>;
}

impl<R: ArtifactResolver + ?Sized> ArtifactResolver for &R {
    fn resolve_descriptor(&self, coordinate: &str) -> Result<PathBuf> {
        (**self).resolve_descriptor(coordinate)
    }

    fn resolve_binary(&self, query: &str) -> Result<PathBuf> {
        (**self).resolve_binary(query)
    }
}
