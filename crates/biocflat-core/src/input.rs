//! Input opening: plain or gzip-compressed XML files

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

/// Buffer size for file reader (256KB)
const READ_BUF_SIZE: usize = 256 * 1024;

/// Whether `path` names a gzip file (`.gz` extension).
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Read the whole input file into a string, gunzipping `.gz` files.
///
/// Invalid UTF-8 is reported as `InvalidData`.
pub fn read_input(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(READ_BUF_SIZE, file);

    let mut content = String::new();
    if is_gzip_path(path) {
        GzDecoder::new(reader).read_to_string(&mut content)?;
    } else {
        let mut reader = reader;
        reader.read_to_string(&mut content)?;
    }
    Ok(content)
}
