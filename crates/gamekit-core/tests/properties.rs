mod common;

use common::{source, INTERNAL_NAME};
use gamekit_core::{scaffold, PathRewriter, TemplateDescriptor};
use proptest::prelude::*;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,8}"
}

fn package_id() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..4).prop_map(|parts| parts.join("."))
}

/// Relative entry paths that may contain `.` and `..` components
fn entry_path() -> impl Strategy<Value = String> {
    let component = prop_oneof![
        6 => segment(),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ];
    prop::collection::vec(component, 1..5).prop_map(|parts| parts.join("/"))
}

fn placeholder_free_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5)
        .prop_map(|parts| parts.join("/"))
        .prop_filter("mentions a placeholder", |path| {
            !path.contains(INTERNAL_NAME) && !path.contains("game/logic/$pkgName")
        })
}

fn all_paths(root: &Path) -> Vec<std::path::PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_outputs_stay_under_destination_root(
        entry in entry_path(),
        package in package_id(),
    ) {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("root");
        let source = source(&[
            (format!("{}/{}", INTERNAL_NAME, entry).as_str(), Some(b"data".as_slice())),
        ]);
        let descriptor = TemplateDescriptor::new(common::TEMPLATE_ID, INTERNAL_NAME);

        let _ = scaffold(&source, &root, "MyGame", &package, &descriptor);

        for path in all_paths(parent.path()) {
            prop_assert!(path == parent.path() || path.starts_with(&root), "{:?} escaped", path);
        }
    }

    #[test]
    fn test_unrelated_paths_are_unchanged(
        path in placeholder_free_path(),
        package in package_id(),
    ) {
        let rewriter = PathRewriter::new(INTERNAL_NAME, "MyGame", &package).unwrap();
        prop_assert_eq!(rewriter.rewrite(&path), path);
    }

    #[test]
    fn test_entry_bytes_round_trip(
        content in prop::collection::vec(any::<u8>(), 0..4096),
        name in segment(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let entry = format!("{}/game/logic/$pkgName/{}.bin", INTERNAL_NAME, name);
        let source = source(&[(entry.as_str(), Some(content.as_slice()))]);
        let descriptor = TemplateDescriptor::new(common::TEMPLATE_ID, INTERNAL_NAME);

        scaffold(&source, dir.path(), "MyGame", "com.acme", &descriptor).unwrap();

        let written = fs::read(dir.path().join(format!("MyGame/game/logic/com/acme/{}.bin", name))).unwrap();
        prop_assert_eq!(written, content);
    }

    #[test]
    fn test_identity_rewrite(
        path in prop::collection::vec(
            prop_oneof![segment(), Just(INTERNAL_NAME.to_string()), Just("$pkgName".to_string())],
            1..6,
        ).prop_map(|parts| parts.join("/")),
    ) {
        let rewriter = PathRewriter::new(INTERNAL_NAME, INTERNAL_NAME, "$pkgName").unwrap();
        prop_assert_eq!(rewriter.rewrite(&path), path);
    }
}
