//! Error types for the scaffold operation

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// Errors that can occur while scaffolding a project.
///
/// Every variant is fatal for the current scaffold. Files written before the
/// failure are left on disk.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("failed to open template '{id}': {source}")]
    TemplateUnreadable {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("cannot rewrite entry {path:?}: {reason}")]
    PathRewrite { path: String, reason: &'static str },

    #[error("archive entry {path:?} resolves outside the destination root")]
    UnsafeEntryPath { path: String },

    #[error("failed to read archive entry {path:?}: {source}")]
    ArchiveRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("template archive is corrupt ({context}): {source}")]
    ArchiveCorrupt {
        context: String,
        #[source]
        source: ZipError,
    },

    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write seed class {}: {source}", path.display())]
    SeedWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown code template: {id}")]
    UnknownCodeTemplate { id: String },
}

/// Fieldless discriminant of [`ScaffoldError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TemplateNotFound,
    TemplateUnreadable,
    InvalidIdentifier,
    PathRewrite,
    UnsafeEntryPath,
    ArchiveRead,
    ArchiveCorrupt,
    OutputWrite,
    SeedWrite,
    UnknownCodeTemplate,
}

impl ScaffoldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScaffoldError::TemplateNotFound { .. } => ErrorKind::TemplateNotFound,
            ScaffoldError::TemplateUnreadable { .. } => ErrorKind::TemplateUnreadable,
            ScaffoldError::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            ScaffoldError::PathRewrite { .. } => ErrorKind::PathRewrite,
            ScaffoldError::UnsafeEntryPath { .. } => ErrorKind::UnsafeEntryPath,
            ScaffoldError::ArchiveRead { .. } => ErrorKind::ArchiveRead,
            ScaffoldError::ArchiveCorrupt { .. } => ErrorKind::ArchiveCorrupt,
            ScaffoldError::OutputWrite { .. } => ErrorKind::OutputWrite,
            ScaffoldError::SeedWrite { .. } => ErrorKind::SeedWrite,
            ScaffoldError::UnknownCodeTemplate { .. } => ErrorKind::UnknownCodeTemplate,
        }
    }

    /// Classify a zip error raised while reading `context`.
    ///
    /// Truncation, checksum and inflate failures surface as `io::Error`s inside
    /// the zip crate; those are reported as corruption, everything else from
    /// the underlying reader as a read error.
    pub(crate) fn from_zip(context: impl Into<String>, err: ZipError) -> Self {
        let context = context.into();
        match err {
            ZipError::Io(e) if !is_corruption(&e) => ScaffoldError::ArchiveRead {
                path: context,
                source: e,
            },
            other => ScaffoldError::ArchiveCorrupt {
                context,
                source: other,
            },
        }
    }

    /// Classify an I/O error raised while reading the content of entry `path`.
    pub(crate) fn from_entry_read(path: &str, err: io::Error) -> Self {
        if is_corruption(&err) {
            ScaffoldError::ArchiveCorrupt {
                context: path.to_string(),
                source: ZipError::Io(err),
            }
        } else {
            ScaffoldError::ArchiveRead {
                path: path.to_string(),
                source: err,
            }
        }
    }
}

fn is_corruption(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput
    )
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
