//! Building template archives from template folders

use super::manifest::TemplateEntry;
use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Zip `template_dir/<entry folder>` with every path prefixed by the entry's
/// internal name, so extraction renames the top-level folder to the project.
///
/// Entries are added in sorted order so the same folder always produces the
/// same archive layout.
pub fn build_bundle(template_dir: &Path, entry: &TemplateEntry) -> Result<Vec<u8>> {
    let folder = template_dir.join(entry.source_folder());
    if !folder.is_dir() {
        anyhow::bail!("Template folder not found: {}", folder.display());
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for item in WalkDir::new(&folder).min_depth(1).sort_by_file_name() {
        let item = item.with_context(|| format!("Failed to walk {}", folder.display()))?;
        let relative = item
            .path()
            .strip_prefix(&folder)
            .with_context(|| format!("Unexpected path {}", item.path().display()))?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let zip_path = format!("{}/{}", entry.internal_name, relative);

        if item.file_type().is_dir() {
            zip.add_directory(zip_path.as_str(), options)?;
        } else {
            let content = std::fs::read(item.path())
                .with_context(|| format!("Failed to read {}", item.path().display()))?;
            zip.start_file(zip_path.as_str(), options)?;
            zip.write_all(&content)?;
        }
    }

    let cursor = zip.finish().context("Failed to finish template archive")?;
    Ok(cursor.into_inner())
}
