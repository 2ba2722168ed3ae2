use crate::adapters::process::{
    CommandResolver, DEFAULT_CLASSPATH_RESOLVER, DEFAULT_DESCRIPTOR_RESOLVER,
};
use crate::core::placer::{RepositoryPlacer, DEFAULT_DESCRIPTOR_NAME};
use crate::domain::model::DEFAULT_STATUS;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path_segment, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every field has a default, so an empty file is
/// valid.
///
/// ```toml
/// [tools]
/// descriptor_resolver = ["xmvn-resolve"]
/// classpath_resolver = ["build-classpath"]
///
/// [repository]
/// descriptor_name = "ivy.xml"
/// status = "integration"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeSettings {
    pub tools: ToolsConfig,
    pub repository: RepositoryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Program and leading arguments used to find a POM.
    pub descriptor_resolver: Vec<String>,
    /// Program and leading arguments used to find a jar.
    pub classpath_resolver: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            descriptor_resolver: vec![DEFAULT_DESCRIPTOR_RESOLVER.to_string()],
            classpath_resolver: vec![DEFAULT_CLASSPATH_RESOLVER.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    pub descriptor_name: String,
    pub status: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            descriptor_name: DEFAULT_DESCRIPTOR_NAME.to_string(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl BridgeSettings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BridgeError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BridgeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` references with the variable's value. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BridgeError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn command_resolver(&self) -> CommandResolver {
        CommandResolver::new(
            self.tools.descriptor_resolver.clone(),
            self.tools.classpath_resolver.clone(),
        )
    }

    pub fn placer(&self) -> RepositoryPlacer {
        RepositoryPlacer::new(&self.repository.descriptor_name)
    }
}

impl Validate for BridgeSettings {
    fn validate(&self) -> Result<()> {
        for (field, command) in [
            ("tools.descriptor_resolver", &self.tools.descriptor_resolver),
            ("tools.classpath_resolver", &self.tools.classpath_resolver),
        ] {
            match command.first() {
                Some(program) => validate_non_empty_string(field, program)?,
                None => {
                    return Err(BridgeError::ConfigError {
                        message: format!("{field} must name a program"),
                    })
                }
            }
        }
        validate_path_segment("repository.descriptor_name", &self.repository.descriptor_name)?;
        validate_non_empty_string("repository.status", &self.repository.status)?;
        Ok(())
    }
}
