#![allow(dead_code)]

use gamekit_core::{MemorySource, TemplateEntry};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const INTERNAL_NAME: &str = "TemplateGame";
pub const TEMPLATE_ID: &str = "empty-game";

/// Build an in-memory zip from `(path, content)` pairs; `None` adds a directory entry
pub fn zip_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        match content {
            Some(bytes) => {
                zip.start_file(*name, options).unwrap();
                zip.write_all(bytes).unwrap();
            }
            None => zip.add_directory(*name, options).unwrap(),
        }
    }

    zip.finish().unwrap().into_inner()
}

pub fn entry(code_template: &str) -> TemplateEntry {
    TemplateEntry {
        id: TEMPLATE_ID.to_string(),
        name: "Empty Game".to_string(),
        description: "A blank game project".to_string(),
        archive: None,
        internal_name: INTERNAL_NAME.to_string(),
        code_template: code_template.to_string(),
    }
}

/// Memory source holding one template built from `entries`
pub fn source(entries: &[(&str, Option<&[u8]>)]) -> MemorySource {
    MemorySource::new().with_template(entry("game-screen-logic"), zip_bytes(entries))
}
