//! Input helpers shared by the annotation loaders.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Wraps a reader so that gzip-compressed input is decompressed transparently.
///
/// Compression is detected from the gzip magic bytes rather than the file name,
/// so BGZF files are handled as well.
pub fn open_maybe_gz<R: Read + 'static>(reader: R) -> Result<Box<dyn BufRead>, Error> {
    let mut buffered = BufReader::new(reader);
    let is_gz = buffered.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(buffered))))
    } else {
        Ok(Box::new(buffered))
    }
}

/// Open a plain or gzip-compressed file for line-wise reading.
pub fn open_path(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let file = File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to open {}: {e}", path.display()),
        ))
    })?;
    open_maybe_gz(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn make_gz(content: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap()
    }

    fn read_all(mut reader: Box<dyn BufRead>) -> String {
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn gzip_is_detected() {
        let gz = make_gz(b"line one\nline two\n");
        let reader = open_maybe_gz(Cursor::new(gz)).unwrap();
        assert_eq!(read_all(reader), "line one\nline two\n");
    }

    #[test]
    fn plain_text_passes_through() {
        let reader = open_maybe_gz(Cursor::new(b"plain\n".to_vec())).unwrap();
        assert_eq!(read_all(reader), "plain\n");
    }

    #[test]
    fn empty_input() {
        let reader = open_maybe_gz(Cursor::new(Vec::new())).unwrap();
        assert_eq!(read_all(reader), "");
    }

    #[test]
    fn open_compressed_file() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&make_gz(b"#comment\n")).unwrap();
        let reader = open_path(f.path()).unwrap();
        assert_eq!(read_all(reader), "#comment\n");
    }

    #[test]
    fn missing_file_error_names_path() {
        let Err(err) = open_path(Path::new("/nonexistent/domains.gff3")) else {
            panic!("opening a missing file succeeded");
        };
        assert!(err.to_string().contains("/nonexistent/domains.gff3"));
    }
}
