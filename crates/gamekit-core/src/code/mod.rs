//! In-process code templates used to seed generated projects
//!
//! A code template binds a class name and a package name into source text.
//! Templates are looked up by id through [`CodeTemplates`].

mod game_screen;

pub use game_screen::{GameScreenLogicTemplate, KotlinGameScreenLogicTemplate};

use crate::error::{Result, ScaffoldError};

/// A source file generator
pub trait CodeTemplate: Send + Sync {
    /// Registry id, referenced from template catalogs
    fn id(&self) -> &'static str;

    /// Render the source for `class_name` in `package_name`
    fn render(&self, class_name: &str, package_name: &str) -> Vec<u8>;

    /// File extension of the rendered source, without the dot
    fn target_extension(&self) -> &'static str;
}

/// Code templates keyed by id
pub struct CodeTemplates {
    templates: Vec<Box<dyn CodeTemplate>>,
}

impl CodeTemplates {
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Registry holding the built-in game screen templates
    pub fn builtin() -> Self {
        let mut templates = Self::empty();
        templates.register(GameScreenLogicTemplate);
        templates.register(KotlinGameScreenLogicTemplate);
        templates
    }

    /// Add a template, replacing any existing one with the same id
    pub fn register<T: CodeTemplate + 'static>(&mut self, template: T) {
        self.templates.retain(|t| t.id() != template.id());
        self.templates.push(Box::new(template));
    }

    pub fn get(&self, id: &str) -> Result<&dyn CodeTemplate> {
        self.templates
            .iter()
            .find(|t| t.id() == id)
            .map(|t| &**t)
            .ok_or_else(|| ScaffoldError::UnknownCodeTemplate { id: id.to_string() })
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.id()).collect()
    }
}

impl Default for CodeTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct Plain;

    impl CodeTemplate for Plain {
        fn id(&self) -> &'static str {
            "game-screen-logic"
        }

        fn render(&self, class_name: &str, _package_name: &str) -> Vec<u8> {
            class_name.as_bytes().to_vec()
        }

        fn target_extension(&self) -> &'static str {
            "txt"
        }
    }

    #[test]
    fn test_builtin_ids() {
        let templates = CodeTemplates::builtin();
        assert_eq!(
            templates.ids(),
            vec!["game-screen-logic", "game-screen-logic-kt"]
        );
        assert_eq!(
            templates.get("game-screen-logic-kt").unwrap().target_extension(),
            "kt"
        );
    }

    #[test]
    fn test_unknown_id() {
        let err = CodeTemplates::builtin().get("nope").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownCodeTemplate);
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut templates = CodeTemplates::builtin();
        templates.register(Plain);

        let template = templates.get("game-screen-logic").unwrap();
        assert_eq!(template.target_extension(), "txt");
        assert_eq!(templates.ids().len(), 2);
    }
}
