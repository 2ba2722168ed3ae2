//! POM parsing.
//!
//! Only the handful of fields needed to place an artifact are read: the
//! project coordinate (with `<parent>` fallback for `groupId` and `version`)
//! and the coordinates listed under `dependencyManagement`. Documents may or
//! may not declare the POM namespace; lookups follow whatever namespace the
//! root element is in.

use crate::domain::model::{Coordinate, Descriptor};
use crate::utils::error::{BridgeError, Result};
use quick_xml::encoding::Decoder;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// A lookup strategy is a child path from the root; strategies are tried in
/// order and the first one yielding non-empty text wins.
type Lookup = &'static [&'static str];

const GROUP_ID_LOOKUPS: &[Lookup] = &[&["groupId"], &["parent", "groupId"]];
const VERSION_LOOKUPS: &[Lookup] = &[&["version"], &["parent", "version"]];
const ARTIFACT_ID_LOOKUPS: &[Lookup] = &[&["artifactId"]];

const MANAGED_DEPENDENCIES: Lookup = &["dependencyManagement", "dependencies", "dependency"];

static SHORT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*JPP-(.+)\.pom$").expect("short name pattern is valid"));

#[derive(Debug, Default)]
struct XmlElement {
    namespace: Option<String>,
    name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn matches(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }

    /// All descendants reached by following `path` one child level per step.
    fn find_all<'a>(&'a self, namespace: Option<&str>, path: &[&str]) -> Vec<&'a XmlElement> {
        let Some((first, rest)) = path.split_first() else {
            return vec![self];
        };
        self.children
            .iter()
            .filter(|child| child.matches(namespace, first))
            .flat_map(|child| child.find_all(namespace, rest))
            .collect()
    }

    /// Text of the first element at `path`, if it is non-empty.
    fn find_text(&self, namespace: Option<&str>, path: &[&str]) -> Option<String> {
        self.find_all(namespace, path)
            .first()
            .map(|element| element.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    fn lookup(&self, namespace: Option<&str>, strategies: &[Lookup]) -> Option<String> {
        strategies
            .iter()
            .find_map(|path| self.find_text(namespace, path))
    }
}

/// Parse the POM at `path`. The file is decoded according to its XML
/// declaration (or byte order mark), so Latin-1 POMs read fine.
pub fn parse_descriptor(path: impl AsRef<Path>) -> Result<Descriptor> {
    let path = path.as_ref();
    let content = std::fs::read(path)
        .map_err(|e| BridgeError::malformed(path, format!("cannot read descriptor: {e}")))?;
    parse_descriptor_bytes(&content, path)
}

/// Parse raw POM bytes, honouring the declared encoding.
pub fn parse_descriptor_bytes(content: &[u8], source_path: impl AsRef<Path>) -> Result<Descriptor> {
    build_descriptor(NsReader::from_reader(content), source_path.as_ref())
}

/// Parse POM text; `source_path` is recorded in the result and used to
/// derive the short name. The text is already decoded, so an `encoding`
/// in the declaration is ignored.
pub fn parse_descriptor_str(content: &str, source_path: impl AsRef<Path>) -> Result<Descriptor> {
    build_descriptor(NsReader::from_str(content), source_path.as_ref())
}

fn build_descriptor(reader: NsReader<&[u8]>, source_path: &Path) -> Result<Descriptor> {
    let root = read_tree(reader, source_path)?;
    let namespace = root.namespace.as_deref();

    tracing::debug!(
        "Parsing descriptor {} (root <{}>, namespace {:?})",
        source_path.display(),
        root.name,
        namespace
    );

    let required = |strategies: &[Lookup], field: &str| {
        root.lookup(namespace, strategies).ok_or_else(|| {
            BridgeError::malformed(
                source_path,
                format!("no {field} found directly or in <parent>"),
            )
        })
    };

    let group = required(GROUP_ID_LOOKUPS, "groupId")?;
    let artifact = root
        .lookup(namespace, ARTIFACT_ID_LOOKUPS)
        .ok_or_else(|| BridgeError::malformed(source_path, "no artifactId found"))?;
    let version = required(VERSION_LOOKUPS, "version")?;

    let dependencies = root
        .find_all(namespace, MANAGED_DEPENDENCIES)
        .into_iter()
        .enumerate()
        .map(|(index, dependency)| {
            let field = |name: &str| dependency.find_text(namespace, &[name]);
            match (field("groupId"), field("artifactId")) {
                (Some(group), Some(artifact)) => Ok(Coordinate {
                    group,
                    artifact,
                    version: field("version"),
                }),
                _ => Err(BridgeError::malformed(
                    source_path,
                    format!("managed dependency #{} lacks groupId or artifactId", index + 1),
                )),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Descriptor {
        coordinate: Coordinate {
            group,
            artifact,
            version: Some(version),
        },
        dependencies,
        source_path: source_path.to_path_buf(),
        short_name: derive_short_name(source_path),
    })
}

/// Extract `<name>` from a `...JPP-<name>.pom` file name.
pub fn derive_short_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    SHORT_NAME_PATTERN
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn read_tree(mut reader: NsReader<&[u8]>, source_path: &Path) -> Result<XmlElement> {
    let malformed = |reason: String| BridgeError::malformed(source_path, reason);

    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        // Updated once the declaration has been read.
        let decoder = reader.decoder();
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| malformed(format!("invalid XML: {e}")))?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(malformed("more than one root element".to_string()));
                }
                stack.push(XmlElement {
                    namespace: namespace_of(&resolved).map_err(&malformed)?,
                    name: decode(decoder, start.local_name().as_ref()).map_err(&malformed)?,
                    ..XmlElement::default()
                });
            }
            Event::Empty(start) => {
                let element = XmlElement {
                    namespace: namespace_of(&resolved).map_err(&malformed)?,
                    name: decode(decoder, start.local_name().as_ref()).map_err(&malformed)?,
                    ..XmlElement::default()
                };
                attach(element, &mut stack, &mut root).map_err(&malformed)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag".to_string()))?;
                attach(element, &mut stack, &mut root).map_err(&malformed)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| malformed(format!("bad text content: {e}")))?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&decode(decoder, &data).map_err(&malformed)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("document ended inside an element".to_string()));
    }
    root.ok_or_else(|| malformed("document has no root element".to_string()))
}

fn decode(decoder: Decoder, bytes: &[u8]) -> std::result::Result<String, String> {
    decoder
        .decode(bytes)
        .map(|text| text.into_owned())
        .map_err(|e| format!("cannot decode content: {e}"))
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err("more than one root element".to_string()),
    }
    Ok(())
}

fn namespace_of(resolved: &ResolveResult<'_>) -> std::result::Result<Option<String>, String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(prefix)
        )),
    }
}
