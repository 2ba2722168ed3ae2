use crate::utils::error::{BridgeError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Names accepted as `info` attributes: no namespace prefix, nothing that
/// needs escaping.
static ATTRIBUTE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("attribute name pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::usage(format!(
            "{field_name} cannot be empty or whitespace-only"
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BridgeError::usage(format!("{field_name} cannot be empty")));
    }

    if path.contains('\0') {
        return Err(BridgeError::usage(format!(
            "{field_name} contains null bytes"
        )));
    }

    Ok(())
}

/// Organisation, module and revision become directory names in the
/// destination tree, so they may not contain separators or be `.`/`..`.
pub fn validate_path_segment(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.contains('/') || value.contains('\\') || value.contains('\0') {
        return Err(BridgeError::usage(format!(
            "{field_name} '{value}' contains a path separator"
        )));
    }
    if value == "." || value == ".." {
        return Err(BridgeError::usage(format!(
            "{field_name} '{value}' is not a valid directory name"
        )));
    }
    Ok(())
}

pub fn validate_attribute_name(field_name: &str, name: &str) -> Result<()> {
    if !ATTRIBUTE_NAME_PATTERN.is_match(name) {
        return Err(BridgeError::usage(format!(
            "{field_name} '{name}' is not a valid XML attribute name"
        )));
    }
    Ok(())
}

/// Split a `K=V` metadata entry on its first `=`. The key becomes an
/// attribute of the descriptor's `info` element.
pub fn parse_meta_entry(entry: &str) -> Result<(String, String)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            let key = key.trim();
            validate_attribute_name("--meta key", key)?;
            Ok((key.to_string(), value.to_string()))
        }
        Some(_) => Err(BridgeError::usage(format!(
            "--meta entry '{entry}' has an empty key"
        ))),
        None => Err(BridgeError::usage(format!(
            "--meta entry '{entry}' is not of the form KEY=VALUE"
        ))),
    }
}

/// Parse every `--meta` entry. A repeated key keeps its last value.
pub fn parse_meta_entries(entries: &[String]) -> Result<BTreeMap<String, String>> {
    entries.iter().map(|entry| parse_meta_entry(entry)).collect()
}
