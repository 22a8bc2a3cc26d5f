//! Project scaffolding: extract a template archive, then seed the main screen
//!
//! The operation is synchronous and single-threaded. Two scaffolds may run at
//! the same time only if their destination roots are disjoint.

pub mod emit;
pub mod extract;
pub mod rewrite;

pub use emit::{CodeTemplateEmitter, SEED_CLASS_NAME};
pub use extract::{extract, Extraction};
pub use rewrite::{rewrite, PathRewriter, RewriteRule, PACKAGE_PLACEHOLDER};

use crate::code::CodeTemplates;
use crate::error::{Result, ScaffoldError};
use crate::request::{ScaffoldRequest, TemplateDescriptor};
use crate::templates::TemplateSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a successful scaffold produced
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    /// `destination_root/project_name`
    pub project_dir: PathBuf,
    /// Files extracted from the archive, in archive order
    pub files: Vec<PathBuf>,
    /// Directories created for directory entries
    pub directories: Vec<PathBuf>,
    /// The emitted seed class
    pub seed: PathBuf,
}

/// Runs scaffold requests against a template source
pub struct Scaffolder<S> {
    source: S,
    code_templates: CodeTemplates,
}

impl<S: TemplateSource> Scaffolder<S> {
    pub fn new(source: S) -> Self {
        Self::with_code_templates(source, CodeTemplates::builtin())
    }

    pub fn with_code_templates(source: S, code_templates: CodeTemplates) -> Self {
        Self {
            source,
            code_templates,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn code_templates(&self) -> &CodeTemplates {
        &self.code_templates
    }

    /// Scaffold one project.
    ///
    /// Identifiers and the code template are checked before the archive is
    /// opened. Extraction runs to completion before the seed is written.
    pub fn scaffold(&self, request: &ScaffoldRequest) -> Result<ScaffoldReport> {
        let ScaffoldRequest {
            project_name,
            package_id,
            destination_root,
            template,
        } = request;

        request.validate()?;
        let rewriter = PathRewriter::new(&template.internal_name, project_name, package_id)?;
        let code_template = self.code_templates.get(&template.code_template)?;

        fs::create_dir_all(destination_root).map_err(|e| ScaffoldError::OutputWrite {
            path: destination_root.clone(),
            source: e,
        })?;

        let extraction = {
            let mut stream = self.source.open_stream(&template.archive_id)?;
            extract(&mut *stream, destination_root, &rewriter)?
        };

        let seed = CodeTemplateEmitter::new(code_template).emit(
            destination_root,
            project_name,
            package_id,
        )?;

        info!(
            template = %template.archive_id,
            project = %project_name,
            files = extraction.files.len(),
            seed = %seed.display(),
            "scaffolded project"
        );

        Ok(ScaffoldReport {
            project_dir: request.project_dir(),
            files: extraction.files,
            directories: extraction.directories,
            seed,
        })
    }
}

/// Scaffold a project from `source` using the built-in code templates.
pub fn scaffold<S: TemplateSource>(
    source: &S,
    destination_root: &Path,
    project_name: &str,
    package_id: &str,
    template: &TemplateDescriptor,
) -> Result<ScaffoldReport> {
    let request = ScaffoldRequest::new(destination_root, project_name, package_id, template.clone());
    Scaffolder::new(source).scaffold(&request)
}
