//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a CLI binary implements to configure the
//! scaffolding front end: identity, where templates come from, and what to
//! tell the user once a project exists.

use std::path::Path;

/// Configuration trait for CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable name for overriding the local template directory
    fn template_dir_env(&self) -> &'static str;

    /// Environment variable name for a remote template base URL
    fn template_url_env(&self) -> &'static str;

    /// Package id suggested for a new project
    fn default_package_id(&self, project_name: &str) -> String {
        let slug: String = project_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if slug.is_empty() {
            "com.example.game".to_string()
        } else {
            format!("com.example.{}", slug)
        }
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_dir: &Path, seed: &Path) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
