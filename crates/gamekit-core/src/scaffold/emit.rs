//! Seed class emission after extraction

use crate::code::CodeTemplate;
use crate::error::{Result, ScaffoldError};
use crate::request::{package_path, project_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Class name of the seeded screen
pub const SEED_CLASS_NAME: &str = "MainScreen";

/// Writes the seed class into a freshly extracted project
pub struct CodeTemplateEmitter<'a> {
    template: &'a dyn CodeTemplate,
}

impl<'a> CodeTemplateEmitter<'a> {
    pub fn new(template: &'a dyn CodeTemplate) -> Self {
        Self { template }
    }

    /// Where the seed lands for a given project
    pub fn target_path(
        &self,
        destination_root: &Path,
        project_name: &str,
        package_id: &str,
    ) -> PathBuf {
        project_dir(destination_root, project_name)
            .join("game/logic")
            .join(package_path(package_id))
            .join(format!(
                "{}.{}",
                SEED_CLASS_NAME,
                self.template.target_extension()
            ))
    }

    /// Render and write the seed class, replacing whatever is already there
    pub fn emit(
        &self,
        destination_root: &Path,
        project_name: &str,
        package_id: &str,
    ) -> Result<PathBuf> {
        let target = self.target_path(destination_root, project_name, package_id);
        let seed_error = |e| ScaffoldError::SeedWrite {
            path: target.clone(),
            source: e,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(seed_error)?;
        }

        let content = self.template.render(SEED_CLASS_NAME, package_id);
        fs::write(&target, &content).map_err(seed_error)?;

        debug!(path = %target.display(), template = self.template.id(), "emitted seed class");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{GameScreenLogicTemplate, KotlinGameScreenLogicTemplate};

    #[test]
    fn test_target_path() {
        let emitter = CodeTemplateEmitter::new(&GameScreenLogicTemplate);
        assert_eq!(
            emitter.target_path(Path::new("/dest"), "MyGame", "com.acme.demo"),
            PathBuf::from("/dest/MyGame/game/logic/com/acme/demo/MainScreen.java")
        );
    }

    #[test]
    fn test_emit_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = CodeTemplateEmitter::new(&KotlinGameScreenLogicTemplate);

        let seed = emitter.emit(dir.path(), "MyGame", "solo").unwrap();

        assert_eq!(seed, dir.path().join("MyGame/game/logic/solo/MainScreen.kt"));
        let source = fs::read_to_string(&seed).unwrap();
        assert!(source.contains("package solo"));
        assert!(source.contains("MainScreen"));
    }

    #[test]
    fn test_emit_overwrites_stub() {
        let dir = tempfile::tempdir().unwrap();
        let stub = dir.path().join("P/game/logic/p/MainScreen.java");
        fs::create_dir_all(stub.parent().unwrap()).unwrap();
        fs::write(&stub, "STUB").unwrap();

        let emitter = CodeTemplateEmitter::new(&GameScreenLogicTemplate);
        emitter.emit(dir.path(), "P", "p").unwrap();

        assert_eq!(
            fs::read(&stub).unwrap(),
            GameScreenLogicTemplate.render("MainScreen", "p")
        );
    }

    #[test]
    fn test_emit_into_file_fails_with_seed_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the game directory should be
        fs::create_dir_all(dir.path().join("P")).unwrap();
        fs::write(dir.path().join("P/game"), "not a directory").unwrap();

        let emitter = CodeTemplateEmitter::new(&GameScreenLogicTemplate);
        let err = emitter.emit(dir.path(), "P", "p").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::SeedWrite);
    }
}
