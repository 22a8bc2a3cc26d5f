//! Scaffold inputs and identifier validation

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Code template seeded when a catalog entry does not name one
pub const DEFAULT_CODE_TEMPLATE: &str = "game-screen-logic";

/// Identifies a template archive and the placeholder its entries embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Opaque id resolvable by a [`crate::TemplateSource`]
    pub archive_id: String,

    /// Placeholder embedded in archive paths wherever the project name belongs
    pub internal_name: String,

    /// Id of the code template seeded after extraction
    pub code_template: String,
}

impl TemplateDescriptor {
    pub fn new(archive_id: impl Into<String>, internal_name: impl Into<String>) -> Self {
        Self {
            archive_id: archive_id.into(),
            internal_name: internal_name.into(),
            code_template: DEFAULT_CODE_TEMPLATE.to_string(),
        }
    }

    pub fn with_code_template(mut self, code_template: impl Into<String>) -> Self {
        self.code_template = code_template.into();
        self
    }
}

/// A single scaffold invocation
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub package_id: String,
    pub destination_root: PathBuf,
    pub template: TemplateDescriptor,
}

impl ScaffoldRequest {
    pub fn new(
        destination_root: impl Into<PathBuf>,
        project_name: impl Into<String>,
        package_id: impl Into<String>,
        template: TemplateDescriptor,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            package_id: package_id.into(),
            destination_root: destination_root.into(),
            template,
        }
    }

    /// Check both identifiers before anything touches the filesystem
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project_name)?;
        validate_package_id(&self.package_id)?;
        Ok(())
    }

    /// Directory the archive's top-level folder is renamed to
    pub fn project_dir(&self) -> PathBuf {
        project_dir(&self.destination_root, &self.project_name)
    }
}

pub(crate) fn project_dir(destination_root: &Path, project_name: &str) -> PathBuf {
    destination_root.join(project_name)
}

/// `com.acme.demo` -> `com/acme/demo`
pub fn package_path(package_id: &str) -> String {
    package_id.replace('.', "/")
}

pub fn validate_project_name(name: &str) -> Result<()> {
    check_path_hostile("project name", name)?;
    if name == "." {
        return Err(invalid("project name", name, "must not be '.'"));
    }
    Ok(())
}

pub fn validate_package_id(package_id: &str) -> Result<()> {
    check_path_hostile("package id", package_id)?;
    if package_id.split('.').any(str::is_empty) {
        return Err(invalid("package id", package_id, "contains an empty segment"));
    }
    Ok(())
}

fn check_path_hostile(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field, value, "must not be empty"));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(invalid(field, value, "must not contain path separators"));
    }
    if value.contains("..") {
        return Err(invalid(field, value, "must not contain '..'"));
    }
    if value.contains('\0') {
        return Err(invalid(field, value, "must not contain NUL"));
    }
    Ok(())
}

fn invalid(field: &'static str, value: &str, reason: &'static str) -> ScaffoldError {
    ScaffoldError::InvalidIdentifier {
        field,
        value: value.to_string(),
        reason,
    }
}
