//! Template archive sources
//!
//! A source resolves an archive id to a readable archive stream and the
//! descriptor needed to rewrite its entries:
//! - `DirectorySource`: a local directory with a `template.yaml` catalog
//! - `MemorySource`: archives held in memory (remote downloads, tests)

use super::manifest::{TemplateCatalog, TemplateEntry, CATALOG_FILE};
use crate::error::{Result, ScaffoldError};
use crate::request::TemplateDescriptor;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// A forward-only archive byte stream, read once from start to end
pub trait ArchiveStream: Read {}

impl<T: Read> ArchiveStream for T {}

/// An opened template: the archive stream plus its descriptor
pub struct OpenedTemplate<'a> {
    pub stream: Box<dyn ArchiveStream + 'a>,
    pub descriptor: TemplateDescriptor,
}

/// Resolves archive ids to archive streams
pub trait TemplateSource {
    /// Catalog entries this source can open
    fn entries(&self) -> Vec<TemplateEntry>;

    /// Open the archive stream for `archive_id`.
    ///
    /// The stream is released when the returned box is dropped.
    fn open_stream(&self, archive_id: &str) -> Result<Box<dyn ArchiveStream + '_>>;

    /// Descriptor for `archive_id`
    fn descriptor(&self, archive_id: &str) -> Result<TemplateDescriptor> {
        self.entries()
            .iter()
            .find(|e| e.id == archive_id)
            .map(TemplateEntry::descriptor)
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                id: archive_id.to_string(),
            })
    }

    /// Open the stream together with its descriptor
    fn open(&self, archive_id: &str) -> Result<OpenedTemplate<'_>> {
        let descriptor = self.descriptor(archive_id)?;
        let stream = self.open_stream(archive_id)?;
        Ok(OpenedTemplate { stream, descriptor })
    }
}

impl<S: TemplateSource + ?Sized> TemplateSource for &S {
    fn entries(&self) -> Vec<TemplateEntry> {
        (**self).entries()
    }

    fn open_stream(&self, archive_id: &str) -> Result<Box<dyn ArchiveStream + '_>> {
        (**self).open_stream(archive_id)
    }

    fn descriptor(&self, archive_id: &str) -> Result<TemplateDescriptor> {
        (**self).descriptor(archive_id)
    }
}

/// Templates stored as zip files next to a `template.yaml` catalog
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    catalog: TemplateCatalog,
}

impl DirectorySource {
    /// Load the catalog from `root/template.yaml`
    pub fn open_dir(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let catalog_path = root.join(CATALOG_FILE);
        let unreadable = |source: io::Error| ScaffoldError::TemplateUnreadable {
            id: catalog_path.display().to_string(),
            source,
        };

        let content = fs::read_to_string(&catalog_path).map_err(unreadable)?;
        let catalog = TemplateCatalog::from_yaml(&content)
            .map_err(|e| unreadable(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        Ok(Self { root, catalog })
    }

    pub fn new(root: impl Into<PathBuf>, catalog: TemplateCatalog) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Path of the archive file for a catalog entry
    pub fn archive_path(&self, entry: &TemplateEntry) -> PathBuf {
        self.root.join(entry.archive_file())
    }
}

impl TemplateSource for DirectorySource {
    fn entries(&self) -> Vec<TemplateEntry> {
        self.catalog.templates.clone()
    }

    fn open_stream(&self, archive_id: &str) -> Result<Box<dyn ArchiveStream + '_>> {
        let entry = self
            .catalog
            .find(archive_id)
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                id: archive_id.to_string(),
            })?;

        let file = File::open(self.archive_path(entry)).map_err(|e| {
            ScaffoldError::TemplateUnreadable {
                id: archive_id.to_string(),
                source: e,
            }
        })?;

        Ok(Box::new(BufReader::new(file)))
    }
}

/// Templates whose archives are already in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<TemplateEntry>,
    archives: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a template and its archive bytes
    pub fn insert(&mut self, entry: TemplateEntry, archive: Vec<u8>) {
        self.entries.retain(|e| e.id != entry.id);
        self.archives.insert(entry.id.clone(), archive);
        self.entries.push(entry);
    }

    pub fn with_template(mut self, entry: TemplateEntry, archive: Vec<u8>) -> Self {
        self.insert(entry, archive);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TemplateSource for MemorySource {
    fn entries(&self) -> Vec<TemplateEntry> {
        self.entries.clone()
    }

    fn open_stream(&self, archive_id: &str) -> Result<Box<dyn ArchiveStream + '_>> {
        let bytes = self
            .archives
            .get(archive_id)
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                id: archive_id.to_string(),
            })?;
        Ok(Box::new(Cursor::new(bytes.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn entry(id: &str) -> TemplateEntry {
        TemplateEntry {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            archive: None,
            internal_name: "TemplateGame".to_string(),
            code_template: "game-screen-logic".to_string(),
        }
    }

    #[test]
    fn test_memory_source_roundtrip() {
        let source = MemorySource::new().with_template(entry("empty-game"), b"PK".to_vec());

        let mut opened = source.open("empty-game").unwrap();
        let mut bytes = Vec::new();
        opened.stream.read_to_end(&mut bytes).unwrap();

        assert_eq!(bytes, b"PK");
        assert_eq!(opened.descriptor.internal_name, "TemplateGame");
    }

    #[test]
    fn test_memory_source_unknown_id() {
        let source = MemorySource::new();
        let err = source.open_stream("missing").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
        assert!(source.is_empty());
    }

    #[test]
    fn test_memory_source_insert_replaces() {
        let mut source = MemorySource::new();
        source.insert(entry("a"), vec![1]);
        source.insert(entry("a"), vec![2]);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CATALOG_FILE),
            "templates:\n  - id: empty-game\n    name: Empty\n    internal_name: TemplateGame\n  - id: gone\n    name: Gone\n    internal_name: G\n",
        )
        .unwrap();
        fs::write(dir.path().join("empty-game.zip"), b"zip bytes").unwrap();

        let source = DirectorySource::open_dir(dir.path()).unwrap();
        assert_eq!(source.entries().len(), 2);

        let mut stream = source.open_stream("empty-game").unwrap();
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, b"zip bytes");

        // Listed in the catalog but no archive on disk
        let err = source.open_stream("gone").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::TemplateUnreadable);

        let err = source.open_stream("unknown").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    }

    #[test]
    fn test_directory_source_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectorySource::open_dir(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateUnreadable);
    }
}
