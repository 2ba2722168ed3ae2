use crate::domain::model::DEFAULT_STATUS;
use crate::utils::error::Result;
use crate::utils::validation::validate_attribute_name;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;

pub const IVY_FORMAT_VERSION: &str = "1.0";
pub const CONFIGURATIONS: [&str; 3] = ["default", "provided", "test"];
pub const ARTIFACT_TYPE: &str = "jar";

/// An `ivy.xml` document for a single published jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvyDescriptor {
    organisation: String,
    module: String,
    revision: String,
    status: String,
    metadata: BTreeMap<String, String>,
}

impl IvyDescriptor {
    pub fn new(
        organisation: impl Into<String>,
        module: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            organisation: organisation.into(),
            module: module.into(),
            revision: revision.into(),
            status: DEFAULT_STATUS.to_string(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata.extend(metadata);
        self
    }

    /// Attributes of the `info` element: the four built-ins followed by the
    /// metadata. A metadata key naming a built-in replaces its value.
    pub fn info_attributes(&self) -> Vec<(String, String)> {
        let mut attributes: Vec<(String, String)> = [
            ("organisation", &self.organisation),
            ("module", &self.module),
            ("revision", &self.revision),
            ("status", &self.status),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();

        for (key, value) in &self.metadata {
            match attributes.iter_mut().find(|(existing, _)| existing == key) {
                Some(slot) => slot.1 = value.clone(),
                None => attributes.push((key.clone(), value.clone())),
            }
        }
        attributes
    }

    /// Fails with a usage error when a metadata key cannot be written as an
    /// attribute name.
    pub fn to_xml(&self) -> Result<String> {
        for key in self.metadata.keys() {
            validate_attribute_name("metadata key", key)?;
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("ivy-module");
        root.push_attribute(("version", IVY_FORMAT_VERSION));
        writer.write_event(Event::Start(root))?;

        let mut info = BytesStart::new("info");
        for (key, value) in self.info_attributes() {
            info.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(info))?;
        // Some consumers reject a self-closing <info/>.
        writer.write_event(Event::Text(BytesText::new(" ")))?;
        writer.write_event(Event::End(BytesEnd::new("info")))?;

        writer.write_event(Event::Start(BytesStart::new("configurations")))?;
        for name in CONFIGURATIONS {
            let mut conf = BytesStart::new("conf");
            conf.push_attribute(("name", name));
            writer.write_event(Event::Empty(conf))?;
        }
        writer.write_event(Event::End(BytesEnd::new("configurations")))?;

        writer.write_event(Event::Start(BytesStart::new("publications")))?;
        let mut artifact = BytesStart::new("artifact");
        artifact.push_attribute(("name", self.module.as_str()));
        artifact.push_attribute(("type", ARTIFACT_TYPE));
        writer.write_event(Event::Empty(artifact))?;
        writer.write_event(Event::End(BytesEnd::new("publications")))?;

        writer.write_event(Event::End(BytesEnd::new("ivy-module")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        // Every piece written above came from &str, so this cannot fail.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub fn emit_descriptor(
    organisation: &str,
    module: &str,
    revision: &str,
    status: &str,
    metadata: &BTreeMap<String, String>,
) -> Result<String> {
    IvyDescriptor::new(organisation, module, revision)
        .with_status(status)
        .with_metadata(metadata.clone())
        .to_xml()
}
