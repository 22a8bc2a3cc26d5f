//! Placeholder substitution on archive entry paths

use crate::error::{Result, ScaffoldError};
use crate::request::{package_path, validate_package_id, validate_project_name};
use std::path::{Path, PathBuf};

/// Directory placeholder standing in for the user's package namespace
pub const PACKAGE_PLACEHOLDER: &str = "game/logic/$pkgName";

const PACKAGE_PARENT: &str = "game/logic/";

/// One textual substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    fn apply(&self, path: &str) -> String {
        path.replace(&self.from, &self.to)
    }
}

/// Ordered rule list built once per scaffold request.
///
/// Rules run in order over the whole relative path: the internal name first,
/// then the package placeholder.
#[derive(Debug, Clone)]
pub struct PathRewriter {
    rules: Vec<RewriteRule>,
}

impl PathRewriter {
    pub fn new(internal_name: &str, project_name: &str, package_id: &str) -> Result<Self> {
        if internal_name.is_empty() {
            return Err(ScaffoldError::PathRewrite {
                path: String::new(),
                reason: "template internal name is empty",
            });
        }
        validate_project_name(project_name)?;
        validate_package_id(package_id)?;

        Ok(Self {
            rules: vec![
                RewriteRule::new(internal_name, project_name),
                RewriteRule::new(
                    PACKAGE_PLACEHOLDER,
                    format!("{}{}", PACKAGE_PARENT, package_path(package_id)),
                ),
            ],
        })
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Rewrite an entry path textually. Backslashes become forward slashes first.
    pub fn rewrite(&self, entry_path: &str) -> String {
        let normalized = entry_path.replace('\\', "/");
        self.rules
            .iter()
            .fold(normalized, |path, rule| rule.apply(&path))
    }

    /// Rewrite an entry path and resolve it beneath `root`.
    ///
    /// Returns `Ok(None)` when the path normalizes to `root` itself, which is
    /// only meaningful for directory entries.
    pub fn resolve(&self, root: &Path, entry_path: &str) -> Result<Option<PathBuf>> {
        let rewritten = self.rewrite(entry_path);
        let components = normalize(&rewritten).ok_or_else(|| ScaffoldError::UnsafeEntryPath {
            path: entry_path.to_string(),
        })?;

        if components.is_empty() {
            return Ok(None);
        }

        let mut resolved = root.to_path_buf();
        resolved.extend(components);
        Ok(Some(resolved))
    }

    /// Like [`PathRewriter::resolve`], but a file must name something below `root`.
    pub fn resolve_file(&self, root: &Path, entry_path: &str) -> Result<PathBuf> {
        self.resolve(root, entry_path)?
            .ok_or_else(|| ScaffoldError::PathRewrite {
                path: entry_path.to_string(),
                reason: "rewritten path is empty",
            })
    }
}

/// Free-standing form of the rewrite for one-off use.
pub fn rewrite(
    entry_path: &str,
    project_name: &str,
    package_id: &str,
    internal_name: &str,
) -> Result<String> {
    Ok(PathRewriter::new(internal_name, project_name, package_id)?.rewrite(entry_path))
}

/// Lexically normalize a forward-slash relative path.
///
/// `None` means the path is absolute or climbs above its starting point.
fn normalize(path: &str) -> Option<Vec<&str>> {
    if path.starts_with('/') || has_drive_prefix(path) {
        return None;
    }

    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop()?;
            }
            other => components.push(other),
        }
    }
    Some(components)
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
