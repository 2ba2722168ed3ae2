use crate::config::{BridgeSettings, CliConfig};
use crate::core::bridge::BridgeRequest;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_meta_entries, validate_non_empty_string, validate_path, Validate,
};

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("GROUP", &self.group)?;
        validate_non_empty_string("ARTIFACT", &self.artifact)?;
        validate_path("REPO", &self.repo_dir.to_string_lossy())?;
        parse_meta_entries(&self.meta)?;
        if let Some(version) = &self.version {
            validate_non_empty_string("--version", version)?;
        }
        if let Some(status) = &self.status {
            validate_non_empty_string("--status", status)?;
        }
        Ok(())
    }
}

impl CliConfig {
    /// Build the bridge request, filling unset options from `settings`.
    pub fn to_request(&self, settings: &BridgeSettings) -> Result<BridgeRequest> {
        Ok(BridgeRequest {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            repo_dir: self.repo_dir.clone(),
            version: self.version.clone(),
            jar_file: self.jar_file.clone(),
            pom_file: self.pom_file.clone(),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| settings.repository.status.clone()),
            metadata: parse_meta_entries(&self.meta)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BridgeError;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("mvn-ivy-bridge").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parses_full_command_line() {
        let config = parse(&[
            "org.example",
            "foo",
            "/tmp/repo",
            "--version",
            "2.0",
            "--meta",
            "build=42",
            "--meta",
            "key=value=withequals",
            "--jarfile",
            "/jars/foo.jar",
            "--log",
            "DEBUG",
        ]);

        assert_eq!(config.group, "org.example");
        assert_eq!(config.repo_dir, PathBuf::from("/tmp/repo"));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert!(config.validate().is_ok());

        let request = config.to_request(&BridgeSettings::default()).unwrap();
        assert_eq!(request.version.as_deref(), Some("2.0"));
        assert_eq!(request.jar_file, Some(PathBuf::from("/jars/foo.jar")));
        assert_eq!(request.status, "release");
        assert_eq!(request.metadata["build"], "42");
        assert_eq!(request.metadata["key"], "value=withequals");
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(CliConfig::try_parse_from(["mvn-ivy-bridge", "org.example", "foo"]).is_err());
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(CliConfig::try_parse_from([
            "mvn-ivy-bridge",
            "g",
            "a",
            "/tmp/repo",
            "--log",
            "chatty"
        ])
        .is_err());
    }

    #[test]
    fn test_malformed_meta_is_usage_error() {
        let config = parse(&["g", "a", "/tmp/repo", "--meta", "novalue"]);
        assert!(matches!(
            config.validate(),
            Err(BridgeError::UsageError { .. })
        ));
    }

    #[test]
    fn test_status_falls_back_to_settings() {
        let mut settings = BridgeSettings::default();
        settings.repository.status = "integration".to_string();

        let config = parse(&["g", "a", "/tmp/repo"]);
        assert_eq!(config.to_request(&settings).unwrap().status, "integration");

        let config = parse(&["g", "a", "/tmp/repo", "--status", "milestone"]);
        assert_eq!(config.to_request(&settings).unwrap().status, "milestone");
    }
}
