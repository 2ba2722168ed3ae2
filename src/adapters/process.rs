use crate::domain::ports::ArtifactResolver;
use crate::utils::error::{BridgeError, Result};
use std::path::PathBuf;
use std::process::Command;

pub const DEFAULT_DESCRIPTOR_RESOLVER: &str = "xmvn-resolve";
pub const DEFAULT_CLASSPATH_RESOLVER: &str = "build-classpath";

/// Runs the system's resolver tools and reads one path from their stdout.
///
/// Each tool is a program plus leading arguments; the query is appended as
/// the last argument. There is no timeout: a hung tool hangs the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResolver {
    descriptor_command: Vec<String>,
    classpath_command: Vec<String>,
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new(
            vec![DEFAULT_DESCRIPTOR_RESOLVER.to_string()],
            vec![DEFAULT_CLASSPATH_RESOLVER.to_string()],
        )
    }
}

impl CommandResolver {
    pub fn new(descriptor_command: Vec<String>, classpath_command: Vec<String>) -> Self {
        Self {
            descriptor_command,
            classpath_command,
        }
    }

    fn run_single(&self, command: &[String], query: &str) -> Result<PathBuf> {
        let rendered = format!("{} {}", command.join(" "), query);
        let Some((program, args)) = command.split_first() else {
            return Err(BridgeError::ConfigError {
                message: "resolver command is empty".to_string(),
            });
        };

        tracing::debug!("Running `{}`", rendered);
        let output = Command::new(program)
            .args(args)
            .arg(query)
            .output()
            .map_err(|e| BridgeError::ExternalTool {
                command: rendered.clone(),
                reason: format!("could not start: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BridgeError::ExternalTool {
                command: rendered,
                reason: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        single_token(&stdout)
            .map(PathBuf::from)
            .map_err(|reason| BridgeError::ExternalTool {
                command: rendered,
                reason,
            })
    }
}

impl ArtifactResolver for CommandResolver {
    fn resolve_descriptor(&self, coordinate: &str) -> Result<PathBuf> {
        self.run_single(&self.descriptor_command, coordinate)
    }

    fn resolve_binary(&self, query: &str) -> Result<PathBuf> {
        self.run_single(&self.classpath_command, query)
    }
}

/// The only whitespace-delimited token in `output`.
fn single_token(output: &str) -> std::result::Result<&str, String> {
    let mut tokens = output.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Ok(token),
        (None, _) => Err("produced no output".to_string()),
        (Some(_), Some(_)) => Err(format!(
            "expected one path, got {} tokens",
            output.split_whitespace().count()
        )),
    }
}
