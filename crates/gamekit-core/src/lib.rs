//! gamekit core - scaffolding game projects from zip templates
//!
//! A scaffold takes a template archive, a project name and a package id and
//! materializes a new project tree:
//!
//! 1. Every archive entry path is rewritten: the template's internal name
//!    becomes the project name, and `game/logic/$pkgName` becomes
//!    `game/logic/<package path>`.
//! 2. Entries are streamed to disk beneath the destination root. Paths that
//!    would resolve outside it are rejected.
//! 3. A `MainScreen` seed class is rendered from an in-process code template
//!    and written into the package directory, replacing any stub.
//!
//! # Layers
//!
//! - **Core operations** - [`scaffold`], [`PathRewriter`], [`extract`],
//!   [`CodeTemplateEmitter`]. Synchronous, typed errors ([`ScaffoldError`]).
//! - **Template sources** - [`DirectorySource`], [`MemorySource`] and the
//!   async [`TemplateFetcher`] for remote catalogs.
//! - **CLI/TUI interface** - optional cliclack prompts (feature `tui`).
//!
//! # Example
//!
//! ```ignore
//! use gamekit_core::{DirectorySource, Scaffolder, ScaffoldRequest, TemplateSource};
//!
//! let source = DirectorySource::open_dir("templates")?;
//! let descriptor = source.descriptor("empty-game")?;
//! let request = ScaffoldRequest::new("projects", "MyGame", "com.acme.demo", descriptor);
//! let report = Scaffolder::new(source).scaffold(&request)?;
//! println!("seeded {}", report.seed.display());
//! ```

pub mod code;
pub mod error;
pub mod product;
pub mod request;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use code::{CodeTemplate, CodeTemplates, GameScreenLogicTemplate};
pub use error::{ErrorKind, ScaffoldError};
pub use product::ProductConfig;
pub use request::{ScaffoldRequest, TemplateDescriptor};
pub use scaffold::{
    extract, rewrite, CodeTemplateEmitter, PathRewriter, ScaffoldReport, Scaffolder, scaffold,
};
pub use templates::{
    DirectorySource, MemorySource, TemplateCatalog, TemplateEntry, TemplateFetcher,
    TemplateSource,
};

#[cfg(feature = "tui")]
pub use tui::run;
