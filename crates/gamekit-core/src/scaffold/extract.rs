//! Streaming zip extraction with path rewriting

use super::rewrite::PathRewriter;
use crate::error::{Result, ScaffoldError};
use crate::templates::source::ArchiveStream;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::read::read_zipfile_from_stream;
use zip::result::ZipError;

/// Copy buffer size for entry contents
const COPY_BUFFER_SIZE: usize = 16 * 1024;

/// End-of-central-directory signature; an archive starting with it has no entries
const EMPTY_ARCHIVE_SIGNATURE: [u8; 4] = *b"PK\x05\x06";

/// What an extraction wrote, in archive order
#[derive(Debug, Default, Clone)]
pub struct Extraction {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

/// Extract every entry of `stream` beneath `destination_root`.
///
/// Entries are read from their local headers in archive order, in a single
/// forward pass, and each file's content is streamed through a fixed-size
/// buffer. The central directory is never consulted. On error, files already
/// written stay on disk.
pub fn extract<S: ArchiveStream + ?Sized>(
    stream: &mut S,
    destination_root: &Path,
    rewriter: &PathRewriter,
) -> Result<Extraction> {
    let mut reader = BufReader::new(stream);
    let mut extraction = Extraction::default();

    let header = reader
        .fill_buf()
        .map_err(|e| ScaffoldError::from_zip("archive header", ZipError::Io(e)))?;
    if header.starts_with(&EMPTY_ARCHIVE_SIGNATURE) {
        debug!("archive has no entries");
        return Ok(extraction);
    }

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut index = 0usize;

    while let Some(mut entry) = read_zipfile_from_stream(&mut reader)
        .map_err(|e| ScaffoldError::from_zip(format!("entry #{}", index), e))?
    {
        index += 1;
        let entry_path = entry.name().to_string();

        if entry.is_dir() || entry_path.ends_with('\\') {
            if let Some(dir) = rewriter.resolve(destination_root, &entry_path)? {
                create_dir(&dir)?;
                debug!(entry = %entry_path, dir = %dir.display(), "created directory");
                extraction.directories.push(dir);
            }
            continue;
        }

        let output_path = rewriter.resolve_file(destination_root, &entry_path)?;
        if let Some(parent) = output_path.parent() {
            create_dir(parent)?;
        }

        let written = copy_entry(&mut entry, &entry_path, &output_path, &mut buffer)?;
        debug!(
            entry = %entry_path,
            output = %output_path.display(),
            bytes = written,
            "extracted file"
        );
        extraction.files.push(output_path);
    }

    Ok(extraction)
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ScaffoldError::OutputWrite {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Stream one entry into a fresh file, keeping read and write failures apart.
fn copy_entry<R: Read>(
    entry: &mut R,
    entry_path: &str,
    output_path: &Path,
    buffer: &mut [u8],
) -> Result<u64> {
    let write_error = |e: io::Error| ScaffoldError::OutputWrite {
        path: output_path.to_path_buf(),
        source: e,
    };

    let mut sink = File::create(output_path).map_err(write_error)?;
    let mut written = 0u64;

    loop {
        let read = match entry.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ScaffoldError::from_entry_read(entry_path, e)),
        };
        sink.write_all(&buffer[..read]).map_err(write_error)?;
        written += read as u64;
    }

    sink.flush().map_err(write_error)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(entries: &[(&str, Option<&[u8]>)]) -> Cursor<Vec<u8>> {
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
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_extracts_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let rewriter = PathRewriter::new("TemplateGame", "MyGame", "a.b").unwrap();
        let mut stream = archive(&[
            ("TemplateGame/assets/", None),
            ("TemplateGame/README.md", Some(b"hello template".as_slice())),
            ("TemplateGame/game/logic/$pkgName/Stub.txt", Some(b"x".as_slice())),
        ]);

        let extraction = extract(&mut stream, dir.path(), &rewriter).unwrap();

        assert_eq!(extraction.files.len(), 2);
        assert_eq!(extraction.directories.len(), 1);
        assert!(dir.path().join("MyGame/assets").is_dir());
        assert_eq!(
            fs::read(dir.path().join("MyGame/README.md")).unwrap(),
            b"hello template"
        );
        assert_eq!(
            fs::read(dir.path().join("MyGame/game/logic/a/b/Stub.txt")).unwrap(),
            b"x"
        );
    }

    #[test]
    fn test_content_larger_than_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let rewriter = PathRewriter::new("T", "P", "p").unwrap();
        let content: Vec<u8> = (0..COPY_BUFFER_SIZE * 3 + 17)
            .map(|i| (i % 251) as u8)
            .collect();
        let mut stream = archive(&[("T/big.bin", Some(content.as_slice()))]);

        extract(&mut stream, dir.path(), &rewriter).unwrap();

        assert_eq!(fs::read(dir.path().join("P/big.bin")).unwrap(), content);
    }

    #[test]
    fn test_existing_file_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("P")).unwrap();
        fs::write(dir.path().join("P/a.txt"), "old content that is longer").unwrap();

        let rewriter = PathRewriter::new("T", "P", "p").unwrap();
        let mut stream = archive(&[("T/a.txt", Some(b"new".as_slice()))]);
        extract(&mut stream, dir.path(), &rewriter).unwrap();

        assert_eq!(fs::read(dir.path().join("P/a.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_escaping_entry_rejected() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("root");
        fs::create_dir_all(&root).unwrap();

        let rewriter = PathRewriter::new("T", "P", "p").unwrap();
        let mut stream = archive(&[("../escape.txt", Some(b"gotcha".as_slice()))]);
        let err = extract(&mut stream, &root, &rewriter).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnsafeEntryPath);
        assert!(!parent.path().join("escape.txt").exists());
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let rewriter = PathRewriter::new("T", "P", "p").unwrap();
        let mut stream = Cursor::new(vec![0x41u8; 1024]);

        let err = extract(&mut stream, dir.path(), &rewriter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArchiveCorrupt);
    }
}
