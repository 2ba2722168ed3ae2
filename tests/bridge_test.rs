use mvn_ivy_bridge::core::locator::BinaryLocator;
use mvn_ivy_bridge::core::resolver::CoordinateResolver;
use mvn_ivy_bridge::core::{ArtifactResolver, Coordinate, Resolution};
use mvn_ivy_bridge::{Bridge, BridgeError, BridgeRequest, RepositoryPlacer, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for xmvn-resolve / build-classpath.
#[derive(Default)]
struct FakeResolver {
    descriptors: HashMap<String, PathBuf>,
    binaries: HashMap<String, PathBuf>,
    queries: RefCell<Vec<String>>,
}

impl FakeResolver {
    fn with_descriptor(mut self, coordinate: &str, path: PathBuf) -> Self {
        self.descriptors.insert(coordinate.to_string(), path);
        self
    }

    fn with_binary(mut self, query: &str, path: PathBuf) -> Self {
        self.binaries.insert(query.to_string(), path);
        self
    }

    fn lookup(&self, table: &HashMap<String, PathBuf>, tool: &str, query: &str) -> Result<PathBuf> {
        self.queries.borrow_mut().push(query.to_string());
        table
            .get(query)
            .cloned()
            .ok_or_else(|| BridgeError::ExternalTool {
                command: format!("{tool} {query}"),
                reason: "exited with exit status: 1".to_string(),
            })
    }
}

impl ArtifactResolver for FakeResolver {
    fn resolve_descriptor(&self, coordinate: &str) -> Result<PathBuf> {
        self.lookup(&self.descriptors, "xmvn-resolve", coordinate)
    }

    fn resolve_binary(&self, query: &str) -> Result<PathBuf> {
        self.lookup(&self.binaries, "build-classpath", query)
    }
}

const POM: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
  <parent><groupId>org.example</groupId><version>5.0</version></parent>
  <artifactId>widgets</artifactId>
</project>"#;

fn write_pom(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, POM).unwrap();
    path
}

#[test]
fn test_resolver_parses_looked_up_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let pom = write_pom(temp_dir.path(), "JPP-widgets.pom");
    let tools = FakeResolver::default().with_descriptor("org.example:widgets:jar", pom);

    let resolution = CoordinateResolver::new(&tools)
        .resolve("org.example", "widgets", None)
        .unwrap();

    match resolution {
        Resolution::Resolved(descriptor) => {
            assert_eq!(
                descriptor.coordinate,
                Coordinate::new("org.example", "widgets", "5.0")
            );
            assert_eq!(descriptor.short_name.as_deref(), Some("widgets"));
        }
        Resolution::Stub(_) => panic!("expected a resolved descriptor"),
    }
    assert_eq!(*tools.queries.borrow(), vec!["org.example:widgets:jar"]);
}

#[test]
fn test_resolver_falls_back_to_stub() {
    let tools = FakeResolver::default();

    let resolution = CoordinateResolver::new(&tools)
        .resolve("org.example", "unpackaged", None)
        .unwrap();

    assert_eq!(
        resolution,
        Resolution::Stub(Coordinate::unversioned("org.example", "unpackaged"))
    );
}

#[test]
fn test_explicit_descriptor_skips_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let pom = write_pom(temp_dir.path(), "widgets.pom");
    let tools = FakeResolver::default();

    let resolution = CoordinateResolver::new(&tools)
        .resolve("ignored", "ignored", Some(pom.as_path()))
        .unwrap();

    assert_eq!(resolution.coordinate().group, "org.example");
    assert!(tools.queries.borrow().is_empty());
}

#[test]
fn test_explicit_descriptor_errors_propagate() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.pom");
    let tools = FakeResolver::default();

    let result = CoordinateResolver::new(&tools).resolve("g", "a", Some(missing.as_path()));
    assert!(matches!(result, Err(BridgeError::MalformedDescriptor { .. })));
}

#[test]
fn test_looked_up_but_broken_descriptor_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let pom = temp_dir.path().join("broken.pom");
    fs::write(&pom, "<project><artifactId>a</artifactId></project>").unwrap();
    let tools = FakeResolver::default().with_descriptor("g:a:jar", pom);

    let result = CoordinateResolver::new(&tools).resolve("g", "a", None);
    assert!(matches!(result, Err(BridgeError::MalformedDescriptor { .. })));
}

#[test]
fn test_locator_queries() {
    let coordinate = Coordinate::new("org.example", "widgets", "5.0");
    assert_eq!(
        BinaryLocator::<FakeResolver>::query_for(&coordinate, None),
        "org.example:widgets:jar:jar"
    );
    assert_eq!(
        BinaryLocator::<FakeResolver>::query_for(&coordinate, Some("widgets")),
        "widgets"
    );
}

#[test]
fn test_locator_failure_is_binary_not_found() {
    let tools = FakeResolver::default();
    let coordinate = Coordinate::unversioned("g", "a");

    match BinaryLocator::new(&tools).locate(&coordinate, None) {
        Err(BridgeError::BinaryNotFound { query, .. }) => assert_eq!(query, "g:a:jar:jar"),
        other => panic!("expected BinaryNotFound, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_bridge_places_resolved_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let pom = write_pom(temp_dir.path(), "JPP-widgets.pom");
    let jar = temp_dir.path().join("widgets.jar");
    fs::write(&jar, "jar").unwrap();
    let tools = FakeResolver::default()
        .with_descriptor("org.example:widgets:jar", pom)
        .with_binary("widgets", jar.clone());

    let mut request = BridgeRequest::new("org.example", "widgets", temp_dir.path().join("repo"));
    request.metadata.insert("build".to_string(), "42".to_string());

    let entry = Bridge::new(&tools, RepositoryPlacer::default())
        .run(&request)
        .unwrap();

    assert!(entry.artifact_dir.ends_with("org/example/widgets/5.0"));
    assert_eq!(fs::read_link(&entry.link_path).unwrap(), jar);
    let descriptor = fs::read_to_string(&entry.descriptor_path).unwrap();
    assert!(descriptor.contains("revision=\"5.0\""));
    assert!(descriptor.contains("build=\"42\""));
}

#[test]
fn test_bridge_version_override() {
    let temp_dir = TempDir::new().unwrap();
    let pom = write_pom(temp_dir.path(), "widgets.pom");
    let tools = FakeResolver::default()
        .with_descriptor("org.example:widgets:jar", pom)
        .with_binary("org.example:widgets:jar:jar", PathBuf::from("/jars/widgets.jar"));

    let mut request = BridgeRequest::new("org.example", "widgets", "/repo");
    request.version = Some("5.0-custom".to_string());

    let placement = Bridge::new(&tools, RepositoryPlacer::default())
        .plan(&request)
        .unwrap();

    assert_eq!(placement.revision, "5.0-custom");
    assert_eq!(placement.organisation, "org.example");
    assert_eq!(placement.module, "widgets");
    assert_eq!(placement.binary_file, PathBuf::from("/jars/widgets.jar"));
    assert_eq!(placement.status, "release");
}

#[test]
fn test_bridge_stub_with_jar_and_version() {
    let tools = FakeResolver::default();

    let mut request = BridgeRequest::new("org.example", "unpackaged", "/repo");
    request.version = Some("1.2".to_string());
    request.jar_file = Some(PathBuf::from("/opt/unpackaged.jar"));

    let placement = Bridge::new(&tools, RepositoryPlacer::default())
        .plan(&request)
        .unwrap();

    assert_eq!(placement.organisation, "org.example");
    assert_eq!(placement.module, "unpackaged");
    assert_eq!(placement.revision, "1.2");
    assert_eq!(placement.binary_file, PathBuf::from("/opt/unpackaged.jar"));
    // Only the descriptor lookup ran.
    assert_eq!(*tools.queries.borrow(), vec!["org.example:unpackaged:jar"]);
}

#[test]
fn test_bridge_stub_without_version_is_incomplete() {
    let tools = FakeResolver::default();

    let mut request = BridgeRequest::new("org.example", "unpackaged", "/repo");
    request.jar_file = Some(PathBuf::from("/opt/unpackaged.jar"));

    match Bridge::new(&tools, RepositoryPlacer::default()).plan(&request) {
        Err(BridgeError::ResolutionIncomplete { coordinate, field }) => {
            assert_eq!(coordinate, "org.example:unpackaged");
            assert_eq!(field, "version");
        }
        other => panic!("expected ResolutionIncomplete, got {other:?}"),
    }
}

#[test]
fn test_bridge_stub_without_jar_uses_coordinate_query() {
    let tools = FakeResolver::default();

    let mut request = BridgeRequest::new("org.example", "unpackaged", "/repo");
    request.version = Some("1.2".to_string());

    let result = Bridge::new(&tools, RepositoryPlacer::default()).plan(&request);
    assert!(matches!(result, Err(BridgeError::BinaryNotFound { .. })));
    assert_eq!(
        *tools.queries.borrow(),
        vec!["org.example:unpackaged:jar", "org.example:unpackaged:jar:jar"]
    );
}

#[test]
fn test_bridge_rejects_empty_group_before_resolving() {
    let tools = FakeResolver::default();
    let request = BridgeRequest::new("  ", "a", "/repo");

    let result = Bridge::new(&tools, RepositoryPlacer::default()).plan(&request);
    assert!(matches!(result, Err(BridgeError::UsageError { .. })));
    assert!(tools.queries.borrow().is_empty());
}
