//! Template catalogs, sources and bundles
//!
//! This module provides:
//! - The template catalog (`template.yaml`) types
//! - Template sources that open archive streams (local directory, memory)
//! - Remote catalog and archive download
//! - Bundle building from template folders

pub mod bundle;
pub mod fetcher;
pub mod manifest;
pub mod source;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use bundle::build_bundle;
pub use fetcher::TemplateFetcher;
pub use manifest::{TemplateCatalog, TemplateEntry, CATALOG_FILE};
pub use source::{ArchiveStream, DirectorySource, MemorySource, OpenedTemplate, TemplateSource};

/// Resolve the local template directory: explicit flag, then env override, then `templates`
pub fn resolve_template_dir<C: ProductConfig>(config: &C, template_dir: Option<&Path>) -> PathBuf {
    template_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(config.template_dir_env()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("templates"))
}

/// Build zip files for all templates in a directory
pub fn build_zips<C: ProductConfig>(config: &C, template_dir: Option<&Path>) -> Result<usize> {
    let dir = resolve_template_dir(config, template_dir);

    if !dir.exists() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    let catalog_path = dir.join(CATALOG_FILE);
    if !catalog_path.exists() {
        anyhow::bail!("{} not found in {}", CATALOG_FILE, dir.display());
    }

    let content = std::fs::read_to_string(&catalog_path)
        .with_context(|| format!("Failed to read {}", catalog_path.display()))?;
    let catalog = TemplateCatalog::from_yaml(&content)
        .with_context(|| format!("Failed to parse {}", catalog_path.display()))?;

    println!(
        "{}",
        format!("Building {} template zips...", config.display_name())
            .cyan()
            .bold()
    );
    println!();

    let mut built = 0;
    for entry in &catalog.templates {
        print!("  {} {}...", "->".blue(), entry.id);

        match build_bundle(&dir, entry) {
            Ok(zip_bytes) => {
                let zip_path = dir.join(entry.archive_file());
                if let Some(parent) = zip_path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                std::fs::write(&zip_path, &zip_bytes)
                    .with_context(|| format!("Failed to write {}", zip_path.display()))?;
                println!(" {} ({} bytes)", "done".green(), zip_bytes.len());
                built += 1;
            }
            Err(e) => {
                println!(" {}", "failed".red());
                eprintln!("    Error: {}", e);
                tracing::warn!(template = %entry.id, error = %e, "skipped template bundle");
            }
        }
    }

    println!();
    println!(
        "{} {} template zip(s) in {}",
        "Built".green().bold(),
        built,
        dir.display()
    );

    Ok(built)
}
