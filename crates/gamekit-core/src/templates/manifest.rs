//! Template catalog types and parsing

use crate::request::{TemplateDescriptor, DEFAULT_CODE_TEMPLATE};
use serde::{Deserialize, Serialize};

/// File name of the catalog inside a template directory
pub const CATALOG_FILE: &str = "template.yaml";

/// Root catalog (templates/template.yaml)
/// Lists the template archives available in a directory or under a URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub templates: Vec<TemplateEntry>,
}

impl TemplateCatalog {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn find(&self, id: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.id.as_str()).collect()
    }
}

/// One template in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Logical id, also the archive id
    pub id: String,

    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Archive file name relative to the catalog (defaults to `<id>.zip`)
    #[serde(default)]
    pub archive: Option<String>,

    /// Placeholder embedded in the archive's entry paths
    pub internal_name: String,

    /// Code template seeded after extraction
    #[serde(default = "default_code_template")]
    pub code_template: String,
}

fn default_code_template() -> String {
    DEFAULT_CODE_TEMPLATE.to_string()
}

impl TemplateEntry {
    /// Get the archive file name (falls back to `<id>.zip`)
    pub fn archive_file(&self) -> String {
        self.archive
            .clone()
            .unwrap_or_else(|| format!("{}.zip", self.id))
    }

    /// Folder the bundle is built from (the archive name without `.zip`)
    pub fn source_folder(&self) -> String {
        let archive = self.archive_file();
        archive
            .strip_suffix(".zip")
            .map(str::to_string)
            .unwrap_or(archive)
    }

    pub fn descriptor(&self) -> TemplateDescriptor {
        TemplateDescriptor::new(&self.id, &self.internal_name)
            .with_code_template(&self.code_template)
    }
}
